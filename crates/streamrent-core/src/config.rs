//! Front-end configuration.
//!
//! Defaults target the rental package deployed on the IOTA Rebased testnet.
//! The terminal binary overrides individual fields from its command line.

use std::time::Duration;

use streamrent_proto::ObjectId;

/// Package id of the deployed rental contract.
pub const DEFAULT_PACKAGE_ID: ObjectId =
    ObjectId::from_static("0x7552655ef315af56605c7b6139ce217f9bad8847035fcd3da4afca6856de8497");

/// Module exposing the rental entry points.
pub const MODULE_NAME: &str = "rental";

/// Collateral taken on rent, in nanos (2 IOTA).
pub const DEPOSIT_AMOUNT: u64 = 2_000_000_000;

/// Nanos per IOTA.
pub const NANOS_PER_IOTA: u64 = 1_000_000_000;

/// Public explorer for the Rebased networks.
pub const EXPLORER_BASE_URL: &str = "https://explorer.rebased.iota.org";

/// Network the front-end talks to.
pub const DEFAULT_NETWORK: &str = "testnet";

/// How long a terminal status stays on screen.
pub const STATUS_TTL: Duration = Duration::from_secs(6);

/// Deployed contract and its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractConfig {
    /// Package id.
    pub package_id: ObjectId,
    /// Module name.
    pub module: String,
    /// Clock object passed to time-dependent entry points.
    pub clock: ObjectId,
    /// Collateral split off the gas coin on rent, in nanos.
    pub deposit: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            package_id: DEFAULT_PACKAGE_ID,
            module: MODULE_NAME.to_string(),
            clock: ObjectId::CLOCK,
            deposit: DEPOSIT_AMOUNT,
        }
    }
}

/// Block explorer used for outbound links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Network query parameter.
    pub network: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self { base_url: EXPLORER_BASE_URL.to_string(), network: DEFAULT_NETWORK.to_string() }
    }
}

/// Complete front-end configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalConfig {
    /// Contract coordinates.
    pub contract: ContractConfig,
    /// Explorer links.
    pub explorer: ExplorerConfig,
    /// Time a success or error banner stays before returning to idle.
    pub status_ttl: Duration,
    /// Give up on a submission after this long. `None` waits indefinitely.
    pub submission_timeout: Option<Duration>,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            contract: ContractConfig::default(),
            explorer: ExplorerConfig::default(),
            status_ttl: STATUS_TTL,
            submission_timeout: None,
        }
    }
}
