//! Terminal UI for StreamRent
//!
//! A thin shell over [`streamrent_app::Driver`] that provides terminal-specific
//! I/O, plus the production wallet provider backed by the `iota` CLI. All
//! orchestration logic lives in the generic [`streamrent_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;
pub mod wallet;

pub use streamrent_app::{App, AppAction, AppEvent, Driver, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use wallet::{IotaCliWallet, PtbError, ptb_args};
