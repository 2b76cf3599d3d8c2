//! Scripted driver with virtual time.

use std::{
    collections::VecDeque,
    convert::Infallible,
    future::{self, Future},
    time::{Duration, Instant},
};

use streamrent_app::{App, AppEvent, DeviceForm, Driver, KeyInput, WalletState};
use streamrent_core::OperationStatus;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimInput {
    /// A key press.
    Key(KeyInput),
    /// Move the virtual clock forward and deliver a tick.
    Advance(Duration),
    /// Terminal resize.
    Resize,
}

/// What the driver saw on one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Banner status.
    pub status: OperationStatus,
    /// Explorer link next to the banner.
    pub link: Option<String>,
    /// Form fields.
    pub form: DeviceForm,
    /// Wallet state.
    pub wallet: WalletState,
    /// Virtual time since start.
    pub at: Duration,
}

/// Driver that replays scripted input and records every render.
///
/// Each poll delivers one scripted input. When the script runs out the
/// driver presses Esc, so a run always terminates.
#[derive(Debug)]
pub struct SimDriver {
    inputs: VecDeque<SimInput>,
    start: Instant,
    elapsed: Duration,
    frames: Vec<Frame>,
    stopped: bool,
}

impl SimDriver {
    /// Driver with an empty script.
    pub fn new() -> Self {
        Self {
            inputs: VecDeque::new(),
            start: Instant::now(),
            elapsed: Duration::ZERO,
            frames: Vec::new(),
            stopped: false,
        }
    }

    /// Queue a key press.
    #[must_use]
    pub fn key(mut self, key: KeyInput) -> Self {
        self.inputs.push_back(SimInput::Key(key));
        self
    }

    /// Queue a typed line followed by Enter.
    #[must_use]
    pub fn line(mut self, text: &str) -> Self {
        self.inputs.extend(text.chars().map(|ch| SimInput::Key(KeyInput::Char(ch))));
        self.inputs.push_back(SimInput::Key(KeyInput::Enter));
        self
    }

    /// Queue a clock advance.
    #[must_use]
    pub fn advance(mut self, by: Duration) -> Self {
        self.inputs.push_back(SimInput::Advance(by));
        self
    }

    /// Queue a resize.
    #[must_use]
    pub fn resize(mut self) -> Self {
        self.inputs.push_back(SimInput::Resize);
        self
    }

    /// Every render so far.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent render.
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Virtual time since start.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// True once the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn next_events(&mut self) -> Vec<AppEvent> {
        match self.inputs.pop_front() {
            Some(SimInput::Key(key)) => vec![AppEvent::Key(key)],
            Some(SimInput::Advance(by)) => {
                self.elapsed += by;
                vec![AppEvent::Tick]
            },
            Some(SimInput::Resize) => vec![AppEvent::Resize],
            None => vec![AppEvent::Key(KeyInput::Esc)],
        }
    }
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for SimDriver {
    type Error = Infallible;

    fn poll_event(&mut self) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        future::ready(Ok(self.next_events()))
    }

    fn now(&self) -> Instant {
        self.start + self.elapsed
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.frames.push(Frame {
            status: app.status().clone(),
            link: app.status_link(),
            form: app.form().clone(),
            wallet: app.wallet().clone(),
            at: self.elapsed,
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}
