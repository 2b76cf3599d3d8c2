//! Outbound block explorer links.

use streamrent_proto::{ObjectId, TransactionDigest};

use crate::{config::ExplorerConfig, status::OperationStatus};

/// Builds explorer URLs for objects and transactions.
#[derive(Debug, Clone)]
pub struct Explorer {
    config: ExplorerConfig,
}

impl Explorer {
    /// Explorer for `config`.
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// `{base}/object/{id}?network={network}`.
    pub fn object_url(&self, id: &ObjectId) -> String {
        format!("{}/object/{}?network={}", self.base(), id, self.config.network)
    }

    /// `{base}/txblock/{digest}?network={network}`.
    pub fn transaction_url(&self, digest: &TransactionDigest) -> String {
        format!("{}/txblock/{}?network={}", self.base(), digest, self.config.network)
    }

    /// Link for a status banner.
    ///
    /// Prefers the created object; falls back to the transaction. Statuses
    /// without a transaction (idle, loading, local errors) have no link.
    pub fn link_for(&self, status: &OperationStatus) -> Option<String> {
        let digest = status.transaction.as_ref()?;
        Some(match &status.created {
            Some(id) => self.object_url(id),
            None => self.transaction_url(digest),
        })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }
}

impl Default for Explorer {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_link_preferred_over_transaction() {
        let explorer = Explorer::default();
        let status = OperationStatus::success(
            "ok",
            "Dg1".parse().unwrap(),
            Some("0xabc".parse().unwrap()),
        );

        assert_eq!(
            explorer.link_for(&status).unwrap(),
            "https://explorer.rebased.iota.org/object/0xabc?network=testnet"
        );
    }

    #[test]
    fn falls_back_to_transaction_link() {
        let explorer = Explorer::default();
        let status = OperationStatus::success("ok", "Dg1".parse().unwrap(), None);

        assert_eq!(
            explorer.link_for(&status).unwrap(),
            "https://explorer.rebased.iota.org/txblock/Dg1?network=testnet"
        );
    }

    #[test]
    fn local_errors_have_no_link() {
        let explorer = Explorer::default();
        assert_eq!(explorer.link_for(&OperationStatus::error("⚠️ Missing input fields!")), None);
        assert_eq!(explorer.link_for(&OperationStatus::loading("Creating device...")), None);
    }

    #[test]
    fn trailing_slash_in_base_is_ignored() {
        let explorer = Explorer::new(ExplorerConfig {
            base_url: "http://localhost:3000/".into(),
            network: "localnet".into(),
        });
        assert_eq!(
            explorer.transaction_url(&"T".parse().unwrap()),
            "http://localhost:3000/txblock/T?network=localnet"
        );
    }
}
