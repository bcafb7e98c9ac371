//! Settings: defaults, then `tally.toml`, then environment and flags
//!
//! `.env` is loaded first so its `TALLY_*` values reach clap's `env` lookup.

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tally_core::logging_facility::Profile;

const DEFAULT_CONFIG_FILE: &str = "tally.toml";
const DEFAULT_DB: &str = ".tally/wallet.db";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Config file (default: ./tally.toml when present)
    #[arg(long, global = true, env = "TALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Wallet database path
    #[arg(long, global = true, env = "TALLY_DB")]
    pub db: Option<PathBuf>,

    /// Notary URL for servers without one in the wallet
    #[arg(long, global = true, env = "TALLY_NOTARY_URL")]
    pub notary_url: Option<String>,

    /// Seconds to wait for a notary reply
    #[arg(long, global = true, env = "TALLY_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// development | production
    #[arg(long, global = true, env = "TALLY_LOG_PROFILE")]
    pub log_profile: Option<String>,
}

/// Contents of the TOML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    db: Option<PathBuf>,
    notary_url: Option<String>,
    timeout_secs: Option<u64>,
    log_profile: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub db: PathBuf,
    pub notary_url: String,
    pub timeout: Duration,
    pub log_profile: Profile,
}

impl Settings {
    pub fn load(args: &GlobalArgs) -> Result<Self> {
        // A missing .env is normal
        dotenvy::dotenv().ok();

        let file = match &args.config {
            Some(path) => read_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                read_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => FileConfig::default(),
        };

        Self::merge(args, file)
    }

    fn merge(args: &GlobalArgs, file: FileConfig) -> Result<Self> {
        let profile_name = args
            .log_profile
            .clone()
            .or(file.log_profile)
            .unwrap_or_else(|| "development".to_string());
        let log_profile = profile_name
            .parse::<Profile>()
            .map_err(anyhow::Error::msg)?;

        Ok(Self {
            db: args
                .db
                .clone()
                .or(file.db)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB)),
            notary_url: args
                .notary_url
                .clone()
                .or(file.notary_url)
                .unwrap_or_default(),
            timeout: Duration::from_secs(
                args.timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
            log_profile,
        })
    }
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config file {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config file {}", path.display()))
}
