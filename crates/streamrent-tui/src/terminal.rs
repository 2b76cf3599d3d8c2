//! Terminal driver.
//!
//! Implements [`Driver`] on top of ratatui and crossterm's async event
//! stream. Ticks come from a tokio interval so expired banners disappear
//! without a key press.

use std::{
    future::Future,
    io,
    time::{Duration, Instant},
};

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use streamrent_app::{App, AppEvent, Driver, KeyInput};
use thiserror::Error;
use tokio::time::{Interval, MissedTickBehavior};

use crate::ui;

/// Terminal I/O failure.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// Reading input or drawing failed.
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input stream ended.
    #[error("terminal input closed")]
    InputClosed,
}

/// Driver for a real terminal.
///
/// Takes over the terminal on construction (raw mode, alternate screen) and
/// gives it back on [`Driver::stop`] or drop.
pub struct TerminalDriver {
    terminal: DefaultTerminal,
    events: EventStream,
    ticks: Interval,
    restored: bool,
}

impl TerminalDriver {
    /// Enter the alternate screen and start ticking every `tick_rate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be put into raw mode.
    pub fn new(tick_rate: Duration) -> Result<Self, TerminalError> {
        let terminal = ratatui::try_init()?;
        let mut ticks = tokio::time::interval(tick_rate);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        Ok(Self { terminal, events: EventStream::new(), ticks, restored: false })
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn poll_event(&mut self) -> impl Future<Output = Result<Vec<AppEvent>, Self::Error>> + Send {
        async move {
            tokio::select! {
                _ = self.ticks.tick() => Ok(vec![AppEvent::Tick]),
                event = self.events.next() => match event {
                    Some(Ok(event)) => Ok(translate(&event).into_iter().collect()),
                    Some(Err(err)) => Err(TerminalError::Io(err)),
                    None => Err(TerminalError::InputClosed),
                },
            }
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::draw(frame, app))?;
        Ok(())
    }

    fn stop(&mut self) {
        if !self.restored {
            ratatui::restore();
            self.restored = true;
        }
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Map a crossterm event to an app event. Key releases and repeats on
/// platforms that report them are ignored.
pub fn translate(event: &Event) -> Option<AppEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key).map(AppEvent::Key),
        Event::Resize(..) => Some(AppEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<KeyInput> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(KeyInput::Interrupt);
    }

    Some(match key.code {
        KeyCode::Char(ch) => KeyInput::Char(ch),
        KeyCode::Backspace => KeyInput::Backspace,
        KeyCode::Delete => KeyInput::Delete,
        KeyCode::Left => KeyInput::Left,
        KeyCode::Right => KeyInput::Right,
        KeyCode::Home => KeyInput::Home,
        KeyCode::End => KeyInput::End,
        KeyCode::Enter => KeyInput::Enter,
        KeyCode::Esc => KeyInput::Esc,
        _ => return None,
    })
}
