//! Application layer for StreamRent
//!
//! Pure state machine and generic runtime for the rental front-end, so the
//! terminal UI and the simulation harness drive exactly the same code.
//!
//! # Components
//!
//! - [`App`]: Application state (form, wallet, status banner)
//! - [`commands`]: Command-line parsing
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver and a wallet

mod action;
mod app;
pub mod commands;
mod driver;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::App;
pub use commands::Command;
pub use driver::Driver;
pub use event::AppEvent;
pub use input::{InputState, KeyInput};
pub use runtime::Runtime;
pub use state::{DeviceForm, WalletState};
