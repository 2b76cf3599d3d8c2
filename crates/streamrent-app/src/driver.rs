//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the application runtime from specific I/O
//! implementations. Each frontend implements the trait to provide
//! platform-specific I/O, while the generic [`crate::Runtime`] handles all
//! orchestration.

use std::{future::Future, time::Instant};

use crate::{App, AppEvent};

/// Abstracts terminal I/O and time for the application runtime.
///
/// Implementations provide platform-specific I/O while the generic
/// [`crate::Runtime`] handles orchestration logic. This ensures
/// the same orchestration code runs in the production TUI and in simulation.
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next batch of input events.
    ///
    /// May return an empty batch. The future must be cancel-safe: the
    /// runtime drops it when a submission completes first.
    fn poll_event(&mut self) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send;

    /// Current time. Simulation drivers return virtual time.
    fn now(&self) -> Instant;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Release platform resources (restore the terminal).
    fn stop(&mut self);
}
