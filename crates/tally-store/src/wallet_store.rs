//! Shared handle to the wallet database
//!
//! `WalletStore` owns one SQLite connection behind `Arc<Mutex<_>>`. Clones
//! share the connection, so each repository call is serialized. It is the
//! production implementation of the core's wallet-facing traits.

#![allow(clippy::result_large_err)]

use crate::db;
use crate::errors::{lock_poisoned, Result};
use crate::migrations::apply_migrations;
use crate::repo::{AccountRow, CredentialRepo, ObjectRepo, OutpaymentRepo, WalletRepo, WalletTable};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tally_core::model::{
    AccountSnapshot, Asset, Credential, Identifier, IdentifierRole, InstrumentId, LocalRecord,
    NymCredentials, StoredObject, StoredObjectKind,
};
use tally_core::ports::{CredentialSource, ObjectStore, WalletResolver};

#[derive(Clone)]
pub struct WalletStore {
    conn: Arc<Mutex<Connection>>,
}

impl WalletStore {
    /// Open (or create) the wallet at `path` and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn with_conn<T>(&self, op: &str, f: impl FnOnce(&mut Connection) -> Result<T>) -> Result<T> {
        let mut conn = self.conn.lock().map_err(|_| lock_poisoned(op))?;
        f(&mut conn)
    }

    // ---- wallet entities ----

    pub fn add_server(&self, id: &Identifier, name: &str, url: &str) -> Result<()> {
        self.with_conn("add_server", |c| WalletRepo::upsert_server(c, id, name, url))
    }

    pub fn server_url(&self, id: &Identifier) -> Result<Option<String>> {
        self.with_conn("server_url", |c| WalletRepo::get_server_url(c, id))
    }

    pub fn add_asset(&self, asset: &Asset) -> Result<()> {
        self.with_conn("add_asset", |c| WalletRepo::upsert_asset(c, asset))
    }

    pub fn add_nym(&self, id: &Identifier, name: &str) -> Result<()> {
        self.with_conn("add_nym", |c| WalletRepo::upsert_nym(c, id, name))
    }

    pub fn add_account(
        &self,
        id: &Identifier,
        server: &Identifier,
        owner: &Identifier,
        asset: &Identifier,
    ) -> Result<()> {
        let row = AccountRow {
            id: id.clone(),
            server: server.clone(),
            owner: owner.clone(),
            asset: asset.clone(),
            name: String::new(),
        };
        self.with_conn("add_account", |c| WalletRepo::upsert_account(c, &row))
    }

    pub fn account(&self, id: &Identifier) -> Result<Option<AccountRow>> {
        self.with_conn("account", |c| WalletRepo::get_account(c, id))
    }

    // ---- keys and snapshots ----

    pub fn public_key(&self, nym: &Identifier) -> Result<Option<String>> {
        self.with_conn("public_key", |c| WalletRepo::get_public_key(c, nym))
    }

    pub fn put_public_key(&self, nym: &Identifier, key_id: &str) -> Result<()> {
        self.with_conn("put_public_key", |c| WalletRepo::put_public_key(c, nym, key_id))
    }

    pub fn account_snapshot(&self, account: &Identifier) -> Result<Option<AccountSnapshot>> {
        self.with_conn("account_snapshot", |c| WalletRepo::get_snapshot(c, account))
    }

    pub fn save_account_snapshot(&self, snapshot: &AccountSnapshot) -> Result<()> {
        self.with_conn("save_account_snapshot", |c| WalletRepo::save_snapshot(c, snapshot))
    }

    // ---- outpayments ----

    pub fn archive_outpayment(&self, record: &LocalRecord) -> Result<()> {
        self.with_conn("archive_outpayment", |c| OutpaymentRepo::archive(c, record))
    }

    pub fn outpayment(&self, instrument_id: &InstrumentId) -> Result<Option<LocalRecord>> {
        self.with_conn("outpayment", |c| OutpaymentRepo::get(c, instrument_id))
    }

    pub fn outpayments(&self, server: &Identifier, owner: &Identifier) -> Result<Vec<LocalRecord>> {
        self.with_conn("outpayments", |c| OutpaymentRepo::list(c, server, owner))
    }

    // ---- stored objects and credentials ----

    pub fn put_object(&self, server: &Identifier, name: &str, object: &StoredObject) -> Result<()> {
        self.with_conn("put_object", |c| ObjectRepo::put(c, server, name, object))
    }

    pub fn add_credential(&self, nym: &Identifier, credential: &Credential, revoked: bool) -> Result<()> {
        self.with_conn("add_credential", |c| CredentialRepo::add(c, nym, credential, revoked))
    }

    fn lookup(&self, table: WalletTable, id: &Identifier) -> bool {
        match self.with_conn("resolve", |c| WalletRepo::exists(c, table, id)) {
            Ok(found) => found,
            Err(err) => {
                tracing::warn!(id = %id, error = %err, "wallet lookup failed");
                false
            }
        }
    }

    /// Account row for resolver queries; store failures read as absent
    fn account_row(&self, account: &Identifier) -> Option<AccountRow> {
        match self.account(account) {
            Ok(row) => row,
            Err(err) => {
                tracing::warn!(id = %account, error = %err, "account lookup failed");
                None
            }
        }
    }
}

impl WalletResolver for WalletStore {
    fn resolve(&self, role: IdentifierRole, id: &Identifier) -> bool {
        match role {
            IdentifierRole::MyAccount => self.lookup(WalletTable::Accounts, id),
            IdentifierRole::MyNym => self.lookup(WalletTable::Nyms, id),
            IdentifierRole::Server => self.lookup(WalletTable::Servers, id),
            // Counterparties need not be in the local wallet
            IdentifierRole::HisNym => id.is_well_formed(),
        }
    }

    fn account_server(&self, account: &Identifier) -> Option<Identifier> {
        self.account_row(account).map(|row| row.server)
    }

    fn account_owner(&self, account: &Identifier) -> Option<Identifier> {
        self.account_row(account).map(|row| row.owner)
    }

    fn account_asset(&self, account: &Identifier) -> Option<Asset> {
        let row = self.account_row(account)?;
        match self.with_conn("account_asset", |c| WalletRepo::get_asset(c, &row.asset)) {
            Ok(asset) => asset,
            Err(err) => {
                tracing::warn!(id = %account, asset_id = %row.asset, error = %err, "asset lookup failed");
                None
            }
        }
    }
}

impl ObjectStore for WalletStore {
    fn exists(&self, kind: StoredObjectKind, server: &Identifier, name: &str) -> Result<bool> {
        self.with_conn("object_exists", |c| ObjectRepo::exists(c, kind, server, name))
    }

    fn query_object(
        &self,
        kind: StoredObjectKind,
        server: &Identifier,
        name: &str,
    ) -> Result<Option<StoredObject>> {
        self.with_conn("query_object", |c| ObjectRepo::get(c, kind, server, name))
    }
}

impl CredentialSource for WalletStore {
    fn credentials(&self, nym: &Identifier) -> Result<NymCredentials> {
        self.with_conn("credentials", |c| CredentialRepo::list(c, nym))
    }
}
