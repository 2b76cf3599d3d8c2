//! Generic runtime
//!
//! Orchestrates the App state machine against a [`Driver`] and a wallet.
//! There is at most one outstanding submission; the loop waits on it and on
//! driver input at the same time, preferring the completion so a finished
//! submission is never starved by a busy terminal.

use std::{collections::VecDeque, future};

use streamrent_core::{Completion, Dispatcher, PendingCompletion, WalletProvider};
use tracing::{debug, warn};

use crate::{App, AppAction, AppEvent, Driver};

/// Runs the front-end until the user quits or the driver fails.
pub struct Runtime<D, W: ?Sized> {
    driver: D,
    app: App,
    dispatcher: Dispatcher<W>,
    pending: Option<PendingCompletion>,
}

enum Next<E> {
    Completed(Completion),
    Input(Result<Vec<AppEvent>, E>),
}

impl<D: Driver, W: WalletProvider + ?Sized> Runtime<D, W> {
    /// Create a runtime.
    pub fn new(driver: D, app: App, dispatcher: Dispatcher<W>) -> Self {
        Self { driver, app, dispatcher, pending: None }
    }

    /// Application state.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// The driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// True while a submission is in flight.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the event loop.
    ///
    /// Renders once, then asks the wallet for its account before waiting
    /// for input. The driver is stopped on every exit path. A submission still in
    /// flight on quit is abandoned.
    ///
    /// # Errors
    ///
    /// Returns the first driver error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let result = self.run_loop().await;
        if self.pending.take().is_some() {
            warn!("quitting with a submission in flight");
        }
        self.driver.stop();
        result
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        if !self.execute(vec![AppAction::Render, AppAction::RefreshAccount]).await? {
            return Ok(());
        }

        loop {
            let next = {
                let pending = &mut self.pending;
                let driver = &mut self.driver;
                tokio::select! {
                    biased;
                    completion = wait_for(pending) => Next::Completed(completion),
                    events = driver.poll_event() => Next::Input(events),
                }
            };

            let events = match next {
                Next::Completed(completion) => {
                    self.pending = None;
                    vec![AppEvent::Completed(completion)]
                },
                Next::Input(events) => events?,
            };

            for event in events {
                let now = self.driver.now();
                let actions = self.app.handle(event, now);
                if !self.execute(actions).await? {
                    return Ok(());
                }
            }
        }
    }

    /// Execute actions. Returns false on quit.
    async fn execute(&mut self, actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut queue = VecDeque::from(actions);

        while let Some(action) = queue.pop_front() {
            match action {
                AppAction::Render => self.driver.render(&self.app)?,
                AppAction::Quit => return Ok(false),
                AppAction::RefreshAccount => {
                    let account = self.dispatcher.current_account().await;
                    debug!(connected = account.is_some(), "account refreshed");
                    let now = self.driver.now();
                    queue.extend(self.app.handle(AppEvent::AccountChanged(account), now));
                },
                AppAction::Submit(submission) => {
                    if self.pending.is_some() {
                        warn!(operation = %submission.operation.kind(), "submission already in flight");
                        continue;
                    }
                    self.pending = Some(self.dispatcher.dispatch(submission));
                },
            }
        }

        Ok(true)
    }
}

/// Resolve the pending completion, or never if there is none.
async fn wait_for(pending: &mut Option<PendingCompletion>) -> Completion {
    match pending {
        Some(completion) => completion.await,
        None => future::pending().await,
    }
}
