//! Events fed into the App state machine.

use streamrent_core::Completion;
use streamrent_proto::Address;

use crate::input::KeyInput;

/// Inputs to [`crate::App::handle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Key pressed on the command line.
    Key(KeyInput),

    /// Periodic timer; expires terminal banners.
    Tick,

    /// Terminal resized.
    Resize,

    /// Wallet reported the connected account (or none).
    AccountChanged(Option<Address>),

    /// The outstanding submission finished.
    Completed(Completion),
}
