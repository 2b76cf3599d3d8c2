//! Error types for the core pipeline.
//!
//! Three families, matching where a failure is detected:
//! - [`ValidationError`]: local input checks, never reaches the network
//! - [`ProviderError`]: reported by the wallet provider for a submission
//! - [`StatusError`]: illegal banner transition (a driver bug, not user error)

use std::time::Duration;

use streamrent_proto::IdError;
use thiserror::Error;

use crate::status::StatusKind;

/// Local validation failure. The display text is what the banner shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No wallet account is connected.
    #[error("⚠️ Wallet not connected!")]
    WalletNotConnected,

    /// Device name or price rate left empty.
    #[error("⚠️ Missing input fields!")]
    MissingFields,

    /// Price rate is not a non-negative integer.
    #[error("⚠️ Invalid price rate: {input:?}")]
    InvalidPrice {
        /// The rejected input.
        input: String,
    },

    /// Rent or return triggered without a device id.
    #[error("⚠️ Device ID is required!")]
    MissingDeviceId,

    /// Device id is not a `0x`-prefixed hex literal.
    #[error("⚠️ Invalid device ID: {0}")]
    InvalidDeviceId(#[source] IdError),
}

/// Failure payload of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider refused or failed to submit; message is verbatim.
    #[error("{0}")]
    Rejected(String),

    /// The transaction executed and aborted on chain.
    #[error("{0}")]
    Execution(String),

    /// The provider could not be reached at all.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with something that is not a response.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// No terminal answer within the configured submission timeout.
    #[error("submission timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

/// Illegal status transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// A submission is outstanding; the banner cannot be overwritten.
    #[error("a submission is already in progress")]
    Busy,

    /// No submission is outstanding, so there is nothing to settle.
    #[error("no submission pending (status is {current:?})")]
    NotPending {
        /// Status at the time of the call.
        current: StatusKind,
    },

    /// A submission can only settle into success or error.
    #[error("{kind:?} is not a terminal status")]
    NotTerminal {
        /// Kind that was offered.
        kind: StatusKind,
    },
}
