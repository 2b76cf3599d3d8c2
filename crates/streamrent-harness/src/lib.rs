//! Deterministic simulation harness for StreamRent.
//!
//! Scripted implementations of the [`streamrent_app::Driver`] and
//! [`streamrent_core::WalletProvider`] traits, so the production
//! [`streamrent_app::Runtime`] can be exercised without a terminal or a
//! ledger. Time is virtual: it only moves when the script says so.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;
pub mod sim_driver;
pub mod sim_wallet;

pub use model::{Model, Observation, Outcome, Step, StepResult};
pub use sim_driver::{Frame, SimDriver, SimInput};
pub use sim_wallet::{Scripted, SimWallet};
