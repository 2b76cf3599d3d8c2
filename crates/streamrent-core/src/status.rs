//! Status banner state machine.
//!
//! The banner is the only piece of application state shared between the
//! three workflows. It is owned by one [`StatusBanner`] and changed only
//! through the transitions below; time is passed in, never read.
//!
//! ```text
//!            begin                 settle(success)
//! ┌──────┐ ───────> ┌─────────┐ ──────────────────> ┌─────────┐
//! │ Idle │          │ Loading │                     │ Success │
//! └──────┘ <─┐      └─────────┘ ──────────────┐     └─────────┘
//!    │       │                  settle(error) ↓          │
//!    │       │  tick(ttl)               ┌───────┐        │
//!    │       └──────────────────────────│ Error │<───────┘ reject
//!    └─────────────────────────────────>└───────┘
//!                    reject
//! ```
//!
//! Success and error both expire back to idle after the configured TTL.
//! Loading never expires: a submission that never resolves keeps the banner
//! in loading until the runtime delivers a completion.

use std::time::{Duration, Instant};

use streamrent_proto::{ObjectId, TransactionDigest};

use crate::error::StatusError;

/// Banner kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Nothing to show.
    Idle,
    /// A submission is outstanding.
    Loading,
    /// Last operation succeeded.
    Success,
    /// Last operation failed (locally or remotely).
    Error,
}

impl StatusKind {
    /// Success or error.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

/// The single operation status shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationStatus {
    /// Banner kind.
    pub kind: StatusKind,
    /// Banner text.
    pub message: String,
    /// Digest of the transaction the status refers to.
    pub transaction: Option<TransactionDigest>,
    /// Object created by the transaction, if one was identified.
    pub created: Option<ObjectId>,
}

impl OperationStatus {
    /// Empty idle status.
    pub fn idle() -> Self {
        Self { kind: StatusKind::Idle, message: String::new(), transaction: None, created: None }
    }

    /// Loading status with `message`.
    pub fn loading(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Loading, message: message.into(), transaction: None, created: None }
    }

    /// Success status.
    pub fn success(
        message: impl Into<String>,
        transaction: TransactionDigest,
        created: Option<ObjectId>,
    ) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
            transaction: Some(transaction),
            created,
        }
    }

    /// Error status without a transaction.
    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: StatusKind::Error, message: message.into(), transaction: None, created: None }
    }
}

impl Default for OperationStatus {
    fn default() -> Self {
        Self::idle()
    }
}

/// Owner of the operation status.
#[derive(Debug, Clone)]
pub struct StatusBanner {
    status: OperationStatus,
    ttl: Duration,
    expires_at: Option<Instant>,
}

impl StatusBanner {
    /// Idle banner whose terminal states last `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { status: OperationStatus::idle(), ttl, expires_at: None }
    }

    /// Current status.
    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    /// Current kind.
    pub fn kind(&self) -> StatusKind {
        self.status.kind
    }

    /// True while a submission is outstanding.
    pub fn is_busy(&self) -> bool {
        self.status.kind == StatusKind::Loading
    }

    /// When the current terminal status returns to idle.
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    /// Enter loading for a dispatched submission.
    ///
    /// # Errors
    ///
    /// `Busy` if a submission is already outstanding.
    pub fn begin(&mut self, message: impl Into<String>) -> Result<(), StatusError> {
        if self.is_busy() {
            return Err(StatusError::Busy);
        }
        self.status = OperationStatus::loading(message);
        self.expires_at = None;
        Ok(())
    }

    /// Record the terminal outcome of the outstanding submission.
    ///
    /// # Errors
    ///
    /// `NotPending` if nothing is outstanding, `NotTerminal` if `status` is
    /// idle or loading.
    pub fn settle(&mut self, status: OperationStatus, now: Instant) -> Result<(), StatusError> {
        if !self.is_busy() {
            return Err(StatusError::NotPending { current: self.status.kind });
        }
        if !status.kind.is_terminal() {
            return Err(StatusError::NotTerminal { kind: status.kind });
        }
        self.show(status, now);
        Ok(())
    }

    /// Show a local validation error without any submission.
    ///
    /// # Errors
    ///
    /// `Busy` while a submission is outstanding; the loading banner is kept.
    pub fn reject(&mut self, message: impl Into<String>, now: Instant) -> Result<(), StatusError> {
        if self.is_busy() {
            return Err(StatusError::Busy);
        }
        self.show(OperationStatus::error(message), now);
        Ok(())
    }

    /// Expire a terminal status whose TTL has elapsed.
    ///
    /// Returns true if the banner changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(deadline) if now >= deadline => {
                self.status = OperationStatus::idle();
                self.expires_at = None;
                true
            },
            _ => false,
        }
    }

    fn show(&mut self, status: OperationStatus, now: Instant) {
        self.status = status;
        self.expires_at = Some(now + self.ttl);
    }
}
