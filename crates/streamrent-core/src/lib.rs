//! StreamRent core logic
//!
//! Pure logic for the rental front-end, decoupled from terminal I/O and from
//! the concrete wallet. The only asynchronous piece is the [`Dispatcher`],
//! which awaits a [`WalletProvider`] supplied by the caller.
//!
//! # Pipeline
//!
//! ```text
//! form input ─> prepare() ─> Operation ─> TransactionBuilder ─> Transaction
//!                  │                                               │
//!                  │ ValidationError                    Dispatcher │ (async)
//!                  ↓                                               ↓
//!            StatusBanner::reject                              Completion
//!                                                                  │
//!                                      StatusBanner::settle <─ reconcile()
//! ```
//!
//! # Components
//!
//! - [`config`]: contract, explorer and timing configuration
//! - [`builder`]: input validation and transaction construction
//! - [`reconcile`]: provider result to [`OperationStatus`]
//! - [`status`]: banner state machine (idle, loading, success, error)
//! - [`explorer`]: outbound explorer links
//! - [`wallet`]: wallet provider abstraction
//! - [`dispatcher`]: one submission, one completion
//! - [`pricing`]: human-readable price hints

pub mod builder;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod explorer;
pub mod pricing;
pub mod reconcile;
pub mod status;
pub mod wallet;

pub use builder::{DeviceDraft, Operation, OperationKind, Request, TransactionBuilder, prepare};
pub use config::{ContractConfig, ExplorerConfig, RentalConfig};
pub use dispatcher::{Completion, Dispatcher, PendingCompletion, Submission};
pub use error::{ProviderError, StatusError, ValidationError};
pub use explorer::Explorer;
pub use reconcile::reconcile;
pub use status::{OperationStatus, StatusBanner, StatusKind};
pub use wallet::WalletProvider;
