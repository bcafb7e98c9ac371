//! Servers, assets, nyms, accounts, public keys and account snapshots

#![allow(clippy::result_large_err)]

use super::{from_millis, to_millis};
use crate::errors::{from_rusqlite, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use tally_core::errors::{ExError, ExErrorKind};
use tally_core::model::{AccountSnapshot, Asset, Identifier, MAX_DECIMAL_POWER};

/// Account row joined to the ids it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRow {
    pub id: Identifier,
    pub server: Identifier,
    pub owner: Identifier,
    pub asset: Identifier,
    pub name: String,
}

pub struct WalletRepo;

impl WalletRepo {
    pub fn upsert_server(conn: &Connection, id: &Identifier, name: &str, url: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO servers (id, name, url) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name, url = excluded.url",
            params![id.as_str(), name, url],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Endpoint recorded for the server; empty when none was configured
    pub fn get_server_url(conn: &Connection, id: &Identifier) -> Result<Option<String>> {
        conn.query_row("SELECT url FROM servers WHERE id = ?1", [id.as_str()], |row| {
            row.get(0)
        })
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn upsert_asset(conn: &Connection, asset: &Asset) -> Result<()> {
        if !asset.has_supported_precision() {
            return Err(ExError::new(ExErrorKind::InvalidInput)
                .with_op("upsert_asset")
                .with_input(asset.id.as_str())
                .with_message(format!(
                    "decimal_power {} exceeds the supported maximum of {}",
                    asset.decimal_power, MAX_DECIMAL_POWER
                )));
        }
        conn.execute(
            "INSERT INTO assets (id, name, symbol, decimal_power) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                symbol = excluded.symbol,
                decimal_power = excluded.decimal_power",
            params![
                asset.id.as_str(),
                asset.name,
                asset.symbol,
                asset.decimal_power
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn upsert_nym(conn: &Connection, id: &Identifier, name: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO nyms (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            params![id.as_str(), name],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Insert an account; server, owner and asset must already exist
    pub fn upsert_account(conn: &Connection, account: &AccountRow) -> Result<()> {
        conn.execute(
            "INSERT INTO accounts (id, server_id, nym_id, asset_id, name)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                server_id = excluded.server_id,
                nym_id = excluded.nym_id,
                asset_id = excluded.asset_id,
                name = excluded.name",
            params![
                account.id.as_str(),
                account.server.as_str(),
                account.owner.as_str(),
                account.asset.as_str(),
                account.name,
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Whether a row with `id` exists in one of the wallet entity tables
    pub fn exists(conn: &Connection, table: WalletTable, id: &Identifier) -> Result<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE id = ?1", table.name());
        let found = conn
            .query_row(&sql, [id.as_str()], |_| Ok(()))
            .optional()
            .map_err(from_rusqlite)?;
        Ok(found.is_some())
    }

    pub fn get_account(conn: &Connection, id: &Identifier) -> Result<Option<AccountRow>> {
        conn.query_row(
            "SELECT id, server_id, nym_id, asset_id, name FROM accounts WHERE id = ?1",
            [id.as_str()],
            |row| {
                Ok(AccountRow {
                    id: Identifier::new(row.get::<_, String>(0)?),
                    server: Identifier::new(row.get::<_, String>(1)?),
                    owner: Identifier::new(row.get::<_, String>(2)?),
                    asset: Identifier::new(row.get::<_, String>(3)?),
                    name: row.get(4)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn get_asset(conn: &Connection, id: &Identifier) -> Result<Option<Asset>> {
        conn.query_row(
            "SELECT id, name, symbol, decimal_power FROM assets WHERE id = ?1",
            [id.as_str()],
            |row| {
                Ok(Asset {
                    id: Identifier::new(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    symbol: row.get(2)?,
                    decimal_power: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn put_public_key(conn: &Connection, nym: &Identifier, key_id: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO public_keys (nym_id, key_id, fetched_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(nym_id) DO UPDATE SET
                key_id = excluded.key_id,
                fetched_at = excluded.fetched_at",
            params![nym.as_str(), key_id, to_millis(Utc::now())],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_public_key(conn: &Connection, nym: &Identifier) -> Result<Option<String>> {
        conn.query_row(
            "SELECT key_id FROM public_keys WHERE nym_id = ?1",
            [nym.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(from_rusqlite)
    }

    pub fn save_snapshot(conn: &Connection, snapshot: &AccountSnapshot) -> Result<()> {
        conn.execute(
            "INSERT INTO account_snapshots
                (account_id, balance, inbox_hash, outbox_hash, refreshed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(account_id) DO UPDATE SET
                balance = excluded.balance,
                inbox_hash = excluded.inbox_hash,
                outbox_hash = excluded.outbox_hash,
                refreshed_at = excluded.refreshed_at",
            params![
                snapshot.account.as_str(),
                snapshot.balance,
                snapshot.inbox_hash,
                snapshot.outbox_hash,
                to_millis(snapshot.refreshed_at),
            ],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn get_snapshot(conn: &Connection, account: &Identifier) -> Result<Option<AccountSnapshot>> {
        conn.query_row(
            "SELECT account_id, balance, inbox_hash, outbox_hash, refreshed_at
             FROM account_snapshots WHERE account_id = ?1",
            [account.as_str()],
            |row| {
                Ok(AccountSnapshot {
                    account: Identifier::new(row.get::<_, String>(0)?),
                    balance: row.get(1)?,
                    inbox_hash: row.get(2)?,
                    outbox_hash: row.get(3)?,
                    refreshed_at: from_millis(4, row.get(4)?)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }
}

/// Entity tables addressable by `WalletRepo::exists`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletTable {
    Servers,
    Nyms,
    Accounts,
    Assets,
}

impl WalletTable {
    fn name(&self) -> &'static str {
        match self {
            WalletTable::Servers => "servers",
            WalletTable::Nyms => "nyms",
            WalletTable::Accounts => "accounts",
            WalletTable::Assets => "assets",
        }
    }
}
