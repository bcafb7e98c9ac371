//! Subcommand handlers; each returns the process exit code

pub mod credentials;
pub mod markets;
pub mod withdraw;

pub use tally_engine::commands::EXIT_FAILURE;

use crate::config::Settings;
use anyhow::Result;
use tally_store::WalletStore;

fn open_wallet(settings: &Settings) -> Result<WalletStore> {
    Ok(WalletStore::open(&settings.db)?)
}
