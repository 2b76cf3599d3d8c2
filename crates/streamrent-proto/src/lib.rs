//! Wire types for the StreamRent front-end.
//!
//! Everything that crosses the boundary to the wallet provider lives here:
//! validated ledger identifiers, the programmable transaction envelope handed
//! to the signer, and the execution response the signer reports back.
//!
//! Identifiers are only constructed through fallible parsing. Code downstream
//! of this crate never sees a malformed object id, so "is this really a hex
//! id?" checks do not leak into the application layer.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod errors;
pub mod ids;
pub mod response;
pub mod transaction;

pub use errors::{IdError, ResponseError};
pub use ids::{Address, ObjectId, TransactionDigest};
pub use response::{Effects, ExecutionResponse, ExecutionStatus, ObjectChange, ObjectChangeKind};
pub use transaction::{Argument, CallArg, Command, MoveCall, PureValue, Transaction};
