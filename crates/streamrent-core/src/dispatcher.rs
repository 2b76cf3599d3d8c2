//! Submission dispatcher.
//!
//! Hands one built transaction to the wallet provider and resolves to exactly
//! one [`Completion`]. The returned future is `'static` so the runtime can
//! hold it alongside input polling; dropping it abandons the submission
//! without retrying.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use streamrent_proto::{Address, ExecutionResponse, Transaction};
use tracing::{info, warn};

use crate::{builder::Operation, error::ProviderError, wallet::WalletProvider};

/// A validated operation and the transaction built for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// What the user asked for.
    pub operation: Operation,
    /// Transaction to sign and execute.
    pub transaction: Transaction,
}

/// Terminal result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Operation the result belongs to.
    pub operation: Operation,
    /// Provider success payload or failure.
    pub result: Result<ExecutionResponse, ProviderError>,
}

/// Future resolving to a submission's completion.
pub type PendingCompletion = Pin<Box<dyn Future<Output = Completion> + Send>>;

/// Dispatches submissions to a wallet provider.
pub struct Dispatcher<W: ?Sized> {
    wallet: Arc<W>,
    timeout: Option<Duration>,
}

impl<W: WalletProvider + ?Sized> Dispatcher<W> {
    /// Dispatcher without a submission timeout.
    pub fn new(wallet: Arc<W>) -> Self {
        Self { wallet, timeout: None }
    }

    /// Fail submissions that take longer than `timeout`. `None` waits
    /// indefinitely.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The wallet submissions go to.
    pub fn wallet(&self) -> &Arc<W> {
        &self.wallet
    }

    /// Ask the wallet for its account, within the same timeout as a
    /// submission. A wallet that does not answer in time counts as
    /// disconnected.
    pub async fn current_account(&self) -> Option<Address> {
        let query = self.wallet.current_account();
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, query).await.unwrap_or_else(|_| {
                warn!(timeout_secs = limit.as_secs(), "account query timed out");
                None
            }),
            None => query.await,
        }
    }

    /// Start a submission.
    pub fn dispatch(&self, submission: Submission) -> PendingCompletion {
        let wallet = Arc::clone(&self.wallet);
        let timeout = self.timeout;

        Box::pin(async move {
            let Submission { operation, transaction } = submission;
            info!(
                operation = %operation.kind(),
                commands = transaction.commands().len(),
                "dispatching submission"
            );

            let execute = wallet.sign_and_execute(&transaction);
            let result = match timeout {
                Some(limit) => tokio::time::timeout(limit, execute)
                    .await
                    .unwrap_or(Err(ProviderError::TimedOut(limit))),
                None => execute.await,
            };

            match &result {
                Ok(response) => {
                    info!(operation = %operation.kind(), digest = %response.digest, "submission executed");
                },
                Err(err) => warn!(operation = %operation.kind(), error = %err, "submission failed"),
            }

            Completion { operation, result }
        })
    }
}

impl<W: ?Sized> Clone for Dispatcher<W> {
    fn clone(&self) -> Self {
        Self { wallet: Arc::clone(&self.wallet), timeout: self.timeout }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use streamrent_proto::ObjectId;

    use super::*;
    use crate::{builder::TransactionBuilder, config::ContractConfig};

    enum Behavior {
        Succeed,
        Fail(&'static str),
        Hang,
    }

    struct TestWallet {
        behavior: Behavior,
        calls: Mutex<usize>,
    }

    impl TestWallet {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self { behavior, calls: Mutex::new(0) })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl WalletProvider for TestWallet {
        async fn current_account(&self) -> Option<Address> {
            if matches!(self.behavior, Behavior::Hang) {
                std::future::pending::<()>().await;
            }
            "0xa11ce".parse().ok()
        }

        async fn sign_and_execute(
            &self,
            _transaction: &Transaction,
        ) -> Result<ExecutionResponse, ProviderError> {
            *self.calls.lock().unwrap() += 1;
            match self.behavior {
                Behavior::Succeed => Ok(ExecutionResponse::new("Dg1".parse().unwrap())),
                Behavior::Fail(message) => Err(ProviderError::Rejected(message.into())),
                Behavior::Hang => std::future::pending().await,
            }
        }
    }

    fn submission() -> Submission {
        let device: ObjectId = "0xdead".parse().unwrap();
        let transaction = TransactionBuilder::new(ContractConfig::default()).rent_device(&device);
        Submission { operation: Operation::RentDevice { device }, transaction }
    }

    #[tokio::test]
    async fn resolves_with_provider_success() {
        let wallet = TestWallet::new(Behavior::Succeed);
        let completion = Dispatcher::new(Arc::clone(&wallet)).dispatch(submission()).await;

        assert_eq!(completion.operation, submission().operation);
        assert_eq!(completion.result.unwrap().digest.as_str(), "Dg1");
        assert_eq!(wallet.calls(), 1);
    }

    #[tokio::test]
    async fn failure_is_not_retried() {
        let wallet = TestWallet::new(Behavior::Fail("Insufficient gas"));
        let completion = Dispatcher::new(Arc::clone(&wallet)).dispatch(submission()).await;

        assert_eq!(completion.result, Err(ProviderError::Rejected("Insufficient gas".into())));
        assert_eq!(wallet.calls(), 1);
    }

    #[tokio::test]
    async fn optional_timeout_fails_hung_submission() {
        let wallet = TestWallet::new(Behavior::Hang);
        let limit = Duration::from_millis(20);
        let completion =
            Dispatcher::new(wallet).with_timeout(Some(limit)).dispatch(submission()).await;

        assert_eq!(completion.result, Err(ProviderError::TimedOut(limit)));
    }

    #[tokio::test]
    async fn account_query_shares_the_timeout() {
        let limit = Duration::from_millis(20);
        let hung = Dispatcher::new(TestWallet::new(Behavior::Hang)).with_timeout(Some(limit));
        assert_eq!(hung.current_account().await, None);

        let answering = Dispatcher::new(TestWallet::new(Behavior::Succeed)).with_timeout(Some(limit));
        assert_eq!(answering.current_account().await, Some("0xa11ce".parse().unwrap()));
    }
}
