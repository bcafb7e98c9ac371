//! Repository layer
//!
//! Stateless functions over a borrowed `Connection`; locking and connection
//! ownership belong to `WalletStore`.

mod credential_repo;
mod object_repo;
mod outpayment_repo;
mod wallet_repo;

pub use credential_repo::CredentialRepo;
pub use object_repo::ObjectRepo;
pub use outpayment_repo::OutpaymentRepo;
pub use wallet_repo::{AccountRow, WalletRepo, WalletTable};

use chrono::{DateTime, TimeZone, Utc};

/// Timestamps are stored as Unix milliseconds
pub(crate) fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub(crate) fn from_millis(column: usize, millis: i64) -> rusqlite::Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or(rusqlite::Error::IntegralValueOutOfRange(column, millis))
}
