//! StreamRent terminal front-end.
//!
//! Logs go to a file because the terminal belongs to the UI. Set `RUST_LOG`
//! to change the level (default `info`).

use std::{
    error::Error,
    fs::File,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::Duration,
};

use clap::Parser;
use streamrent_app::{App, Runtime};
use streamrent_core::{Dispatcher, RentalConfig};
use streamrent_proto::ObjectId;
use streamrent_tui::{IotaCliWallet, TerminalDriver};
use tracing::info;
use tracing_subscriber::EnvFilter;

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Parser, Debug)]
#[command(name = "streamrent-tui", version, about = "Rent IoT devices on IOTA Rebased from the terminal")]
struct Args {
    /// Rental contract package id (defaults to the testnet deployment)
    #[arg(long)]
    package_id: Option<ObjectId>,

    /// Block explorer base URL
    #[arg(long)]
    explorer_url: Option<String>,

    /// Path to the iota CLI
    #[arg(long, default_value = "iota")]
    iota_bin: PathBuf,

    /// Gas budget in nanos; the CLI estimates when omitted
    #[arg(long)]
    gas_budget: Option<u64>,

    /// Give up on a submission after this many seconds (waits forever when omitted)
    #[arg(long)]
    submit_timeout_secs: Option<u64>,

    /// Log file
    #[arg(long, default_value = "streamrent.log")]
    log_file: PathBuf,
}

impl Args {
    fn config(&self) -> RentalConfig {
        let mut config = RentalConfig::default();
        if let Some(package_id) = &self.package_id {
            config.contract.package_id = package_id.clone();
        }
        if let Some(url) = &self.explorer_url {
            config.explorer.base_url = url.clone();
        }
        config.submission_timeout = self.submit_timeout_secs.map(Duration::from_secs);
        config
    }
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = args.config();
    info!(
        package = %config.contract.package_id,
        explorer = %config.explorer.base_url,
        iota = %args.iota_bin.display(),
        "starting"
    );

    let wallet = Arc::new(IotaCliWallet::new(&args.iota_bin).with_gas_budget(args.gas_budget));
    let dispatcher = Dispatcher::new(wallet).with_timeout(config.submission_timeout);
    let driver = TerminalDriver::new(TICK_RATE)?;

    let mut runtime = Runtime::new(driver, App::new(&config), dispatcher);
    runtime.run().await?;

    info!("bye");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn overrides_apply_to_config() {
        let args = Args::parse_from([
            "streamrent-tui",
            "--package-id",
            "0xABC",
            "--explorer-url",
            "http://localhost:9000",
            "--submit-timeout-secs",
            "90",
        ]);
        let config = args.config();

        assert_eq!(config.contract.package_id.as_str(), "0xabc");
        assert_eq!(config.explorer.base_url, "http://localhost:9000");
        assert_eq!(config.submission_timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.contract.module, "rental");
    }

    #[test]
    fn defaults_match_testnet() {
        let config = Args::parse_from(["streamrent-tui"]).config();
        assert_eq!(config, RentalConfig::default());
    }

    #[test]
    fn bad_package_id_is_refused() {
        assert!(Args::try_parse_from(["streamrent-tui", "--package-id", "dead"]).is_err());
    }
}
