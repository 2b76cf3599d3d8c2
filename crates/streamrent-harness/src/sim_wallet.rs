//! Scripted wallet provider.

use std::{
    collections::VecDeque,
    future,
    sync::{Mutex, MutexGuard, PoisonError},
};

use async_trait::async_trait;
use streamrent_core::{ProviderError, WalletProvider};
use streamrent_proto::{Address, ExecutionResponse, ObjectChange, Transaction, TransactionDigest};
use tracing::debug;

/// What the wallet does with the next submission.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Resolve immediately with this result.
    Respond(Result<ExecutionResponse, ProviderError>),
    /// Never resolve, like a wallet popup the user walked away from.
    Hang,
}

/// Wallet provider that answers from a script and records what it was asked
/// to sign.
///
/// An unscripted submission fails with [`ProviderError::Unavailable`].
#[derive(Debug, Default)]
pub struct SimWallet {
    account: Mutex<Option<Address>>,
    script: Mutex<VecDeque<Scripted>>,
    submitted: Mutex<Vec<Transaction>>,
    account_queries: Mutex<usize>,
}

impl SimWallet {
    /// Wallet with no account.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Wallet with `account` active.
    pub fn connected(account: Address) -> Self {
        let wallet = Self::default();
        wallet.set_account(Some(account));
        wallet
    }

    /// Switch the active account. Seen by the app on its next refresh.
    pub fn set_account(&self, account: Option<Address>) {
        *lock(&self.account) = account;
    }

    /// Queue a scripted answer.
    pub fn push(&self, scripted: Scripted) {
        lock(&self.script).push_back(scripted);
    }

    /// Queue a successful execution.
    pub fn succeed(&self, response: ExecutionResponse) {
        self.push(Scripted::Respond(Ok(response)));
    }

    /// Queue a successful create whose change list reports `device_id`.
    pub fn succeed_created(&self, digest: TransactionDigest, device_id: &str) {
        self.succeed(
            ExecutionResponse::new(digest).with_object_changes(vec![ObjectChange::created(device_id)]),
        );
    }

    /// Queue a failure.
    pub fn fail(&self, error: ProviderError) {
        self.push(Scripted::Respond(Err(error)));
    }

    /// Queue a submission that never resolves.
    pub fn hang(&self) {
        self.push(Scripted::Hang);
    }

    /// Transactions received so far, in order.
    pub fn submitted(&self) -> Vec<Transaction> {
        lock(&self.submitted).clone()
    }

    /// Number of `current_account` calls.
    pub fn account_queries(&self) -> usize {
        *lock(&self.account_queries)
    }
}

#[async_trait]
impl WalletProvider for SimWallet {
    async fn current_account(&self) -> Option<Address> {
        *lock(&self.account_queries) += 1;
        lock(&self.account).clone()
    }

    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResponse, ProviderError> {
        lock(&self.submitted).push(transaction.clone());
        let next = lock(&self.script).pop_front();
        debug!(scripted = ?next, "sim wallet asked to sign");

        match next {
            Some(Scripted::Respond(result)) => result,
            Some(Scripted::Hang) => future::pending().await,
            None => Err(ProviderError::Unavailable("no scripted response".into())),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
