//! Tally Store - SQLite-backed wallet state
//!
//! Provides:
//! - SQLite schema with an embedded, checksummed migrations framework
//! - Repository functions over a `Connection` (wallet entities, outpayments,
//!   stored objects, credentials, account snapshots)
//! - `WalletStore`, the shared handle that implements the core's
//!   `WalletResolver`, `ObjectStore` and `CredentialSource` traits

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod wallet_store;

// Re-export key types
pub use errors::Result;
pub use wallet_store::WalletStore;
