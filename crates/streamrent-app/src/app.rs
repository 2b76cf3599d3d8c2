//! Application state machine.
//!
//! [`App`] owns the form fields, the wallet account and the status banner.
//! It never performs I/O: [`App::handle`] consumes one [`AppEvent`] and
//! returns the [`AppAction`]s the runtime must carry out. Time is passed in,
//! so the same sequence of events always produces the same state.

use std::time::Instant;

use streamrent_core::{
    Completion, Explorer, Operation, OperationStatus, RentalConfig, Request, StatusBanner, StatusKind,
    Submission, TransactionBuilder,
    pricing::{format_nanos, price_per_hour},
    prepare, reconcile,
};
use tracing::{debug, info, warn};

use crate::{
    AppAction, AppEvent,
    commands::{self, Command},
    input::{InputState, KeyInput},
    state::{DeviceForm, WalletState},
};

/// Front-end state.
#[derive(Debug, Clone)]
pub struct App {
    form: DeviceForm,
    input: InputState,
    wallet: WalletState,
    banner: StatusBanner,
    builder: TransactionBuilder,
    explorer: Explorer,
    running: bool,
}

impl App {
    /// Fresh state for `config`. The wallet starts in [`WalletState::Checking`].
    pub fn new(config: &RentalConfig) -> Self {
        Self {
            form: DeviceForm::default(),
            input: InputState::new(),
            wallet: WalletState::Checking,
            banner: StatusBanner::new(config.status_ttl),
            builder: TransactionBuilder::new(config.contract.clone()),
            explorer: Explorer::new(config.explorer.clone()),
            running: true,
        }
    }

    /// Form fields.
    pub fn form(&self) -> &DeviceForm {
        &self.form
    }

    /// Command line.
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Wallet account.
    pub fn wallet(&self) -> &WalletState {
        &self.wallet
    }

    /// Current banner status.
    pub fn status(&self) -> &OperationStatus {
        self.banner.status()
    }

    /// Status banner, including its expiry.
    pub fn banner(&self) -> &StatusBanner {
        &self.banner
    }

    /// Explorer link for the current banner, if it has one.
    pub fn status_link(&self) -> Option<String> {
        self.explorer.link_for(self.banner.status())
    }

    /// IOTA per hour for the typed price, when it parses.
    pub fn price_hint(&self) -> Option<String> {
        self.form.price.trim().parse::<u64>().ok().map(price_per_hour)
    }

    /// Collateral locked on rent, in nanos.
    pub fn deposit(&self) -> u64 {
        self.builder.contract().deposit
    }

    /// Hint shown on the rent action, e.g. `Deposit 2 IOTA`.
    pub fn deposit_hint(&self) -> String {
        format!("Deposit {} IOTA", format_nanos(u128::from(self.deposit())))
    }

    /// False once the user asked to quit.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process one event.
    pub fn handle(&mut self, event: AppEvent, now: Instant) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Tick => {
                if self.banner.tick(now) {
                    vec![AppAction::Render]
                } else {
                    Vec::new()
                }
            },
            AppEvent::Resize => vec![AppAction::Render],
            AppEvent::AccountChanged(account) => {
                match &account {
                    Some(address) => info!(account = %address, "wallet account"),
                    None => warn!("wallet reports no active account"),
                }
                self.wallet = WalletState::from(account);
                vec![AppAction::Render]
            },
            AppEvent::Completed(completion) => self.handle_completion(completion, now),
        }
    }

    fn handle_key(&mut self, key: KeyInput, now: Instant) -> Vec<AppAction> {
        match key {
            KeyInput::Esc | KeyInput::Interrupt => self.quit(),
            KeyInput::Enter => {
                let line = self.input.take();
                let mut actions = self.handle_command(commands::parse(&line), now);
                if self.running {
                    actions.push(AppAction::Render);
                }
                actions
            },
            key => {
                if self.input.apply(key) {
                    vec![AppAction::Render]
                } else {
                    Vec::new()
                }
            },
        }
    }

    fn handle_command(&mut self, command: Command, now: Instant) -> Vec<AppAction> {
        // Triggers carrying arguments must not touch the form while busy.
        if command.is_trigger() && self.banner.is_busy() {
            warn!("submission outstanding, trigger ignored");
            return Vec::new();
        }

        match command {
            Command::Empty => Vec::new(),
            Command::Connect => {
                self.wallet = WalletState::Checking;
                vec![AppAction::RefreshAccount]
            },
            Command::SetName { name } => {
                self.form.name = name;
                Vec::new()
            },
            Command::SetPrice { price } => {
                self.form.price = price;
                Vec::new()
            },
            Command::SetDevice { device_id } => {
                self.form.device_id = device_id;
                Vec::new()
            },
            Command::Create { fields } => {
                if let Some((name, price)) = fields {
                    self.form.name = name;
                    self.form.price = price;
                }
                self.trigger(DeviceForm::create_request, now)
            },
            Command::Rent { device_id } => {
                if let Some(device_id) = device_id {
                    self.form.device_id = device_id;
                }
                self.trigger(DeviceForm::rent_request, now)
            },
            Command::Return { device_id } => {
                if let Some(device_id) = device_id {
                    self.form.device_id = device_id;
                }
                self.trigger(DeviceForm::return_request, now)
            },
            Command::Quit => self.quit(),
            Command::Unknown { input } => self.reject(format!("Unknown command: {input}"), now),
            Command::InvalidArgs { error, .. } => self.reject(error, now),
        }
    }

    /// Validate, build and submit.
    fn trigger(&mut self, request: fn(&DeviceForm) -> Request<'_>, now: Instant) -> Vec<AppAction> {
        let operation = match prepare(request(&self.form), self.wallet.account()) {
            Ok(operation) => operation,
            Err(err) => {
                debug!(error = %err, "rejected before submission");
                return self.reject(err.to_string(), now);
            },
        };

        let transaction = self.builder.build(&operation);
        if let Err(err) = self.banner.begin(operation.loading_message()) {
            warn!(error = %err, "could not enter loading");
            return Vec::new();
        }

        vec![AppAction::Submit(Submission { operation, transaction })]
    }

    fn handle_completion(&mut self, completion: Completion, now: Instant) -> Vec<AppAction> {
        let Completion { operation, result } = completion;
        let status = reconcile(&operation, &result);
        let created = status.kind == StatusKind::Success && matches!(operation, Operation::CreateDevice(_));

        match self.banner.settle(status, now) {
            Ok(()) => {
                if created {
                    self.form.clear_draft();
                }
                vec![AppAction::Render]
            },
            Err(err) => {
                warn!(operation = %operation.kind(), error = %err, "dropping stale completion");
                Vec::new()
            },
        }
    }

    fn reject(&mut self, message: String, now: Instant) -> Vec<AppAction> {
        match self.banner.reject(message, now) {
            Ok(()) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "input error hidden behind loading banner");
                Vec::new()
            },
        }
    }

    fn quit(&mut self) -> Vec<AppAction> {
        self.running = false;
        vec![AppAction::Quit]
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use streamrent_core::{ProviderError, ValidationError};
    use streamrent_proto::{
        Address, Argument, CallArg, ExecutionResponse, ObjectChange, ObjectId, PureValue,
    };

    use super::*;

    fn app() -> App {
        App::new(&RentalConfig::default())
    }

    fn connected() -> App {
        let mut app = app();
        let account: Address = "0xa11ce".parse().unwrap();
        app.handle(AppEvent::AccountChanged(Some(account)), Instant::now());
        app
    }

    fn enter(app: &mut App, line: &str, now: Instant) -> Vec<AppAction> {
        for ch in line.chars() {
            app.handle(AppEvent::Key(KeyInput::Char(ch)), now);
        }
        app.handle(AppEvent::Key(KeyInput::Enter), now)
    }

    fn submission(actions: &[AppAction]) -> Option<&Submission> {
        actions.iter().find_map(|action| match action {
            AppAction::Submit(submission) => Some(submission),
            _ => None,
        })
    }

    fn success(digest: &str) -> ExecutionResponse {
        ExecutionResponse::new(digest.parse().unwrap())
    }

    #[test]
    fn wallet_check_comes_first() {
        let mut app = app();
        let now = Instant::now();

        let actions = enter(&mut app, "/create E-Bike 6", now);

        assert!(submission(&actions).is_none());
        assert_eq!(app.status().kind, StatusKind::Error);
        assert_eq!(app.status().message, ValidationError::WalletNotConnected.to_string());
    }

    #[test]
    fn create_with_missing_price_is_rejected_locally() {
        let mut app = connected();
        let now = Instant::now();

        enter(&mut app, "/name E-Bike", now);
        let actions = enter(&mut app, "/create", now);

        assert!(submission(&actions).is_none());
        assert_eq!(app.status().message, "⚠️ Missing input fields!");
        assert!(app.status_link().is_none());
    }

    #[test]
    fn create_submits_move_call() {
        let mut app = connected();
        let now = Instant::now();

        let actions = enter(&mut app, "/create E-Bike 6", now);
        let submission = submission(&actions).expect("create should submit");

        assert!(matches!(submission.operation, Operation::CreateDevice(_)));
        let call = submission.transaction.move_calls().next().unwrap();
        assert_eq!(call.function, "create_device");
        let args: Vec<_> =
            call.arguments.iter().map(|arg| submission.transaction.input(*arg).cloned()).collect();
        assert_eq!(
            args,
            vec![
                Some(CallArg::Pure(PureValue::String("E-Bike".into()))),
                Some(CallArg::Pure(PureValue::U64(6))),
            ]
        );
        assert_eq!(app.status().kind, StatusKind::Loading);
        assert_eq!(app.status().message, "Creating device...");
    }

    #[test]
    fn rent_splits_deposit_from_gas() {
        let mut app = connected();
        let actions = enter(&mut app, "/rent 0xdead", Instant::now());
        let tx = &submission(&actions).unwrap().transaction;

        let call = tx.move_calls().next().unwrap();
        assert_eq!(call.function, "rent_device");
        assert_eq!(tx.input(call.arguments[0]), Some(&CallArg::Object("0xdead".parse().unwrap())));
        assert_eq!(call.arguments[1], Argument::NestedResult(0, 0));
        assert_eq!(tx.input(call.arguments[2]), Some(&CallArg::Object(ObjectId::CLOCK)));
        assert_eq!(app.status().message, "Processing rental...");
    }

    #[test]
    fn triggers_are_ignored_while_loading() {
        let mut app = connected();
        let now = Instant::now();

        assert!(submission(&enter(&mut app, "/rent 0xdead", now)).is_some());
        assert!(submission(&enter(&mut app, "/return 0xdead", now)).is_none());
        assert!(submission(&enter(&mut app, "/create Bike 1", now)).is_none());
        enter(&mut app, "/bogus", now);

        assert_eq!(app.status().kind, StatusKind::Loading);
        assert_eq!(app.status().message, "Processing rental...");
    }

    #[test]
    fn ignored_triggers_leave_form_untouched() {
        let mut app = connected();
        let now = Instant::now();
        let actions = enter(&mut app, "/create E-Bike 6", now);
        let operation = submission(&actions).unwrap().operation.clone();

        assert!(submission(&enter(&mut app, "/create Scooter 9", now)).is_none());
        assert!(submission(&enter(&mut app, "/rent 0xbeef", now)).is_none());
        assert!(submission(&enter(&mut app, "/return 0xbeef", now)).is_none());
        assert_eq!(app.form(), &DeviceForm {
            name: "E-Bike".into(),
            price: "6".into(),
            device_id: String::new(),
        });

        // Field commands stay editable while loading.
        enter(&mut app, "/device 0xbeef", now);
        assert_eq!(app.form().device_id, "0xbeef");

        app.handle(AppEvent::Completed(Completion { operation, result: Ok(success("Dg1")) }), now);
        assert!(app.form().name.is_empty());
        assert_eq!(app.form().device_id, "0xbeef");
    }

    #[test]
    fn create_success_clears_draft_and_links_object() {
        let mut app = connected();
        let now = Instant::now();
        let actions = enter(&mut app, "/create E-Bike 6", now);
        let operation = submission(&actions).unwrap().operation.clone();

        let response = success("Dg1").with_object_changes(vec![ObjectChange::created("0xabc123")]);
        let actions = app.handle(
            AppEvent::Completed(Completion { operation, result: Ok(response) }),
            now,
        );

        assert_eq!(actions, vec![AppAction::Render]);
        assert_eq!(app.status().kind, StatusKind::Success);
        assert_eq!(app.status().message, "✅ Device \"E-Bike\" created successfully!");
        assert!(app.form().name.is_empty());
        assert!(app.form().price.is_empty());
        assert_eq!(
            app.status_link().as_deref(),
            Some("https://explorer.rebased.iota.org/object/0xabc123?network=testnet")
        );
    }

    #[test]
    fn failed_create_keeps_draft() {
        let mut app = connected();
        let now = Instant::now();
        let actions = enter(&mut app, "/create E-Bike 6", now);
        let operation = submission(&actions).unwrap().operation.clone();

        app.handle(
            AppEvent::Completed(Completion {
                operation,
                result: Err(ProviderError::Rejected("User rejected the request".into())),
            }),
            now,
        );

        assert_eq!(app.status().message, "Error: User rejected the request");
        assert_eq!(app.form().name, "E-Bike");
        assert_eq!(app.form().price, "6");
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut app = connected();
        let operation = Operation::RentDevice { device: "0xdead".parse().unwrap() };

        let actions = app.handle(
            AppEvent::Completed(Completion { operation, result: Ok(success("Dg1")) }),
            Instant::now(),
        );

        assert!(actions.is_empty());
        assert_eq!(app.status().kind, StatusKind::Idle);
    }

    #[test]
    fn terminal_status_expires() {
        let mut app = app();
        let now = Instant::now();
        enter(&mut app, "/rent", now);
        assert_eq!(app.status().kind, StatusKind::Error);

        assert!(app.handle(AppEvent::Tick, now + Duration::from_secs(5)).is_empty());
        assert_eq!(app.handle(AppEvent::Tick, now + Duration::from_secs(6)), vec![AppAction::Render]);
        assert_eq!(app.status().kind, StatusKind::Idle);
        assert!(app.status().message.is_empty());
    }

    #[test]
    fn hints() {
        let mut app = app();
        enter(&mut app, "/price 6", Instant::now());
        assert_eq!(app.price_hint().as_deref(), Some("0.0216"));
        assert_eq!(app.deposit_hint(), "Deposit 2 IOTA");

        enter(&mut app, "/price six", Instant::now());
        assert_eq!(app.price_hint(), None);
    }

    #[test]
    fn connect_refreshes_account() {
        let mut app = connected();
        let actions = enter(&mut app, "/connect", Instant::now());
        assert_eq!(actions, vec![AppAction::RefreshAccount, AppAction::Render]);
        assert_eq!(app.wallet(), &WalletState::Checking);
    }

    #[test]
    fn escape_quits() {
        let mut app = app();
        assert_eq!(app.handle(AppEvent::Key(KeyInput::Esc), Instant::now()), vec![AppAction::Quit]);
        assert!(!app.is_running());
    }
}
