//! Wallet provider backed by the `iota` CLI.
//!
//! The CLI keeps the keystore and the active address, signs, and talks to the
//! network. This module only renders a [`Transaction`] as programmable
//! transaction block arguments (`iota client ptb ...`) and decodes the JSON
//! the CLI prints.

use std::{collections::BTreeSet, ffi::OsStr, path::PathBuf, process::Output};

use async_trait::async_trait;
use streamrent_core::{ProviderError, WalletProvider};
use streamrent_proto::{
    Address, Argument, CallArg, Command, ExecutionResponse, PureValue, Transaction,
};
use thiserror::Error;
use tracing::{debug, warn};

/// A transaction that cannot be expressed as CLI arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PtbError {
    /// Argument refers to an input that does not exist.
    #[error("argument refers to missing input {0}")]
    MissingInput(u16),
}

/// Signs and executes through `iota client`.
#[derive(Debug, Clone)]
pub struct IotaCliWallet {
    binary: PathBuf,
    gas_budget: Option<u64>,
}

impl IotaCliWallet {
    /// Wallet using the CLI at `binary`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into(), gas_budget: None }
    }

    /// Pass `--gas-budget`. `None` lets the CLI estimate.
    #[must_use]
    pub fn with_gas_budget(mut self, gas_budget: Option<u64>) -> Self {
        self.gas_budget = gas_budget;
        self
    }

    async fn run<I, S>(&self, args: I) -> Result<Output, ProviderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        tokio::process::Command::new(&self.binary)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|err| ProviderError::Unavailable(format!("{}: {err}", self.binary.display())))
    }
}

#[async_trait]
impl WalletProvider for IotaCliWallet {
    async fn current_account(&self) -> Option<Address> {
        let output = match self.run(["client", "active-address"]).await {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                warn!(status = %output.status, stderr = %stderr(&output), "active-address failed");
                return None;
            },
            Err(err) => {
                warn!(error = %err, "cannot query active address");
                return None;
            },
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        match stdout.trim().parse() {
            Ok(address) => Some(address),
            Err(err) => {
                warn!(output = %stdout.trim(), error = %err, "unexpected active-address output");
                None
            },
        }
    }

    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResponse, ProviderError> {
        let args = ptb_args(transaction, self.gas_budget)
            .map_err(|err| ProviderError::Rejected(err.to_string()))?;
        debug!(?args, "running iota client ptb");

        let output = self.run(&args).await?;
        if !output.status.success() {
            let stderr = stderr(&output);
            return Err(ProviderError::Rejected(if stderr.is_empty() {
                format!("{} exited with {}", self.binary.display(), output.status)
            } else {
                stderr
            }));
        }

        let response = ExecutionResponse::from_json_output(&String::from_utf8_lossy(&output.stdout))
            .map_err(|err| ProviderError::InvalidResponse(err.to_string()))?;

        // The CLI exits 0 for transactions that executed and aborted.
        if let Some(abort) = response.failure() {
            return Err(ProviderError::Execution(abort.to_string()));
        }
        Ok(response)
    }
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_string()
}

/// Render `transaction` as `iota client ptb` arguments.
///
/// Commands whose results are used later get `--assign cmd{i}`; nested
/// results are addressed as `cmd{i}.{j}`.
///
/// # Errors
///
/// `MissingInput` if an argument refers past the input list.
pub fn ptb_args(transaction: &Transaction, gas_budget: Option<u64>) -> Result<Vec<String>, PtbError> {
    let referenced: BTreeSet<u16> = transaction
        .commands()
        .iter()
        .flat_map(command_arguments)
        .filter_map(|argument| match argument {
            Argument::Result(index) | Argument::NestedResult(index, _) => Some(index),
            Argument::GasCoin | Argument::Input(_) => None,
        })
        .collect();

    let mut args = vec!["client".to_string(), "ptb".to_string()];
    for (index, command) in transaction.commands().iter().enumerate() {
        match command {
            Command::SplitCoins { coin, amounts } => {
                args.push("--split-coins".into());
                args.push(render(transaction, *coin)?);
                let amounts =
                    amounts.iter().map(|amount| render(transaction, *amount)).collect::<Result<Vec<_>, _>>()?;
                args.push(format!("[{}]", amounts.join(", ")));
            },
            Command::MoveCall(call) => {
                args.push("--move-call".into());
                args.push(call.target());
                for argument in &call.arguments {
                    args.push(render(transaction, *argument)?);
                }
            },
        }

        if u16::try_from(index).is_ok_and(|index| referenced.contains(&index)) {
            args.push("--assign".into());
            args.push(format!("cmd{index}"));
        }
    }

    if let Some(budget) = gas_budget {
        args.push("--gas-budget".into());
        args.push(budget.to_string());
    }
    args.push("--json".into());
    Ok(args)
}

fn command_arguments(command: &Command) -> Vec<Argument> {
    match command {
        Command::SplitCoins { coin, amounts } => std::iter::once(*coin).chain(amounts.iter().copied()).collect(),
        Command::MoveCall(call) => call.arguments.clone(),
    }
}

fn render(transaction: &Transaction, argument: Argument) -> Result<String, PtbError> {
    Ok(match argument {
        Argument::GasCoin => "gas".into(),
        Argument::Result(index) => format!("cmd{index}"),
        Argument::NestedResult(index, nested) => format!("cmd{index}.{nested}"),
        Argument::Input(index) => match transaction.input(argument) {
            Some(CallArg::Pure(PureValue::String(text))) => format!("{text:?}"),
            Some(CallArg::Pure(PureValue::U64(value))) => format!("{value}u64"),
            Some(CallArg::Object(id)) => format!("@{id}"),
            None => return Err(PtbError::MissingInput(index)),
        },
    })
}
