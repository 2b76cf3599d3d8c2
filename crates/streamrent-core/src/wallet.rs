//! Wallet provider abstraction.
//!
//! The provider owns keys and network access. Production uses the `iota`
//! command-line wallet, tests use a scripted in-memory wallet. The front-end
//! never signs or talks to a fullnode itself.

use async_trait::async_trait;
use streamrent_proto::{Address, ExecutionResponse, Transaction};

use crate::error::ProviderError;

/// Signs and submits transactions on behalf of the connected account.
#[async_trait]
pub trait WalletProvider: Send + Sync + 'static {
    /// Currently connected account, `None` if no wallet is connected.
    async fn current_account(&self) -> Option<Address>;

    /// Sign `transaction` with the connected account and execute it.
    ///
    /// Resolves exactly once, with the execution response (including the
    /// object change list) or the provider's failure.
    async fn sign_and_execute(
        &self,
        transaction: &Transaction,
    ) -> Result<ExecutionResponse, ProviderError>;
}
