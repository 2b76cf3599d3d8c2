//! Reference model of the front-end.
//!
//! A deliberately naive re-statement of the rules the [`streamrent_app::App`]
//! must follow: one submission at a time, the account check before the input
//! checks, terminal banners that expire, and a create that clears its draft.
//! Property tests drive the model and the real App with the same [`Step`]s
//! and compare what they observe.

use std::time::Duration;

use streamrent_core::{OperationKind, StatusKind, config::STATUS_TTL};

/// One user or wallet step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Wallet reports an account (or none).
    Account {
        /// Whether an account is active.
        connected: bool,
    },
    /// `/name <text>`.
    SetName(String),
    /// `/price <text>`.
    SetPrice(String),
    /// `/device <text>`.
    SetDevice(String),
    /// `/create`.
    Create,
    /// `/create <name> <price>`.
    CreateWith {
        /// Name argument (a single word).
        name: String,
        /// Price argument.
        price: String,
    },
    /// `/rent`.
    Rent,
    /// `/rent <device id>`.
    RentWith(String),
    /// `/return`.
    Return,
    /// `/return <device id>`.
    ReturnWith(String),
    /// The outstanding submission finishes.
    Resolve(Outcome),
    /// Time passes, then a tick.
    Advance {
        /// Milliseconds to advance.
        millis: u16,
    },
}

impl Step {
    /// Create, rent or return, with or without arguments.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            Self::Create
                | Self::CreateWith { .. }
                | Self::Rent
                | Self::RentWith(_)
                | Self::Return
                | Self::ReturnWith(_)
        )
    }
}

/// How a submission ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Executed; the change list reports a created object.
    Created,
    /// Executed; nothing recognisable in the change list.
    Executed,
    /// Executed and aborted on chain.
    Aborted,
    /// Wallet refused to sign.
    Rejected,
}

impl Outcome {
    /// True if the banner should show success.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Created | Self::Executed)
    }
}

/// What a step did, as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// A submission of this kind was handed to the wallet.
    Submitted(OperationKind),
    /// Nothing was submitted.
    NotSubmitted,
}

/// Observable state compared after every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// Banner kind.
    pub status: StatusKind,
    /// Workflow in flight.
    pub pending: Option<OperationKind>,
    /// Name field.
    pub name: String,
    /// Price field.
    pub price: String,
    /// Device id field.
    pub device_id: String,
}

/// The reference model.
#[derive(Debug, Clone, Default)]
pub struct Model {
    connected: bool,
    name: String,
    price: String,
    device_id: String,
    status: Option<StatusKind>,
    pending: Option<OperationKind>,
    clock: Duration,
    expires_at: Option<Duration>,
}

impl Model {
    /// Disconnected, idle, empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &Step) -> StepResult {
        match step {
            Step::Account { connected } => self.connected = *connected,
            Step::SetName(name) => self.name = name.trim().to_string(),
            Step::SetPrice(price) => self.price = price.trim().to_string(),
            Step::SetDevice(device_id) => self.device_id = device_id.trim().to_string(),
            Step::Create => return self.trigger(OperationKind::Create),
            Step::CreateWith { name, price } => {
                if self.pending.is_none() {
                    self.name = name.trim().to_string();
                    self.price = price.trim().to_string();
                }
                return self.trigger(OperationKind::Create);
            },
            Step::Rent => return self.trigger(OperationKind::Rent),
            Step::RentWith(device_id) => {
                if self.pending.is_none() {
                    self.device_id = device_id.trim().to_string();
                }
                return self.trigger(OperationKind::Rent);
            },
            Step::Return => return self.trigger(OperationKind::Return),
            Step::ReturnWith(device_id) => {
                if self.pending.is_none() {
                    self.device_id = device_id.trim().to_string();
                }
                return self.trigger(OperationKind::Return);
            },
            Step::Resolve(outcome) => self.resolve(*outcome),
            Step::Advance { millis } => {
                self.clock += Duration::from_millis(u64::from(*millis));
                if self.expires_at.is_some_and(|deadline| self.clock >= deadline) {
                    self.status = None;
                    self.expires_at = None;
                }
            },
        }
        StepResult::NotSubmitted
    }

    /// Current observation.
    pub fn observe(&self) -> Observation {
        Observation {
            status: self.status.unwrap_or(StatusKind::Idle),
            pending: self.pending,
            name: self.name.clone(),
            price: self.price.clone(),
            device_id: self.device_id.clone(),
        }
    }

    /// Virtual time since start.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    fn trigger(&mut self, kind: OperationKind) -> StepResult {
        if self.pending.is_some() {
            return StepResult::NotSubmitted;
        }

        let valid = self.connected
            && match kind {
                OperationKind::Create => !self.name.is_empty() && self.price.parse::<u64>().is_ok(),
                OperationKind::Rent | OperationKind::Return => is_object_id(&self.device_id),
            };

        if valid {
            self.status = Some(StatusKind::Loading);
            self.expires_at = None;
            self.pending = Some(kind);
            StepResult::Submitted(kind)
        } else {
            self.finish(StatusKind::Error);
            StepResult::NotSubmitted
        }
    }

    fn resolve(&mut self, outcome: Outcome) {
        let Some(kind) = self.pending.take() else {
            return;
        };

        if outcome.is_success() {
            self.finish(StatusKind::Success);
            if kind == OperationKind::Create {
                self.name.clear();
                self.price.clear();
            }
        } else {
            self.finish(StatusKind::Error);
        }
    }

    fn finish(&mut self, status: StatusKind) {
        self.status = Some(status);
        self.expires_at = Some(self.clock + STATUS_TTL);
    }
}

fn is_object_id(text: &str) -> bool {
    let digits = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => digits,
        None => return false,
    };
    !digits.is_empty() && digits.len() <= 64 && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}
