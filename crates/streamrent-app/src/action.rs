//! UI actions
//!
//! Actions produced by the App state machine for the runtime to execute.

use streamrent_core::Submission;

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Ask the wallet for the current account.
    RefreshAccount,

    /// Hand a built transaction to the wallet.
    Submit(Submission),
}
