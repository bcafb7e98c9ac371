//! Collaborator interfaces consumed by the command pipeline
//!
//! Wallet state and the notary connection are injected through these traits;
//! nothing in the pipeline reaches for global state.

use crate::errors::ExError;
use crate::model::{
    Asset, Identifier, IdentifierRole, Instrument, NymCredentials, Reply, Request, StoredObject,
    StoredObjectKind,
};

/// Read-only lookups against local wallet state
pub trait WalletResolver: Send + Sync {
    /// Whether `id` names something the wallet accepts for `role`
    fn resolve(&self, role: IdentifierRole, id: &Identifier) -> bool;

    /// Server the account lives on
    fn account_server(&self, account: &Identifier) -> Option<Identifier>;

    /// Nym that owns the account
    fn account_owner(&self, account: &Identifier) -> Option<Identifier>;

    /// Asset the account is denominated in
    fn account_asset(&self, account: &Identifier) -> Option<Asset>;
}

/// Authenticated messaging with a notary
///
/// Message signing, encryption and the wire transport live behind this trait.
/// Implementations own any retry or timeout policy.
#[allow(clippy::result_large_err)]
pub trait Messenger: Send + Sync {
    /// Load `peer_nym`'s public encryption key from the wallet, or fetch it
    /// from the server. Returns the key id, or `None` if it cannot be had.
    fn load_or_retrieve_key(
        &self,
        server: &Identifier,
        local_nym: &Identifier,
        peer_nym: &Identifier,
    ) -> Result<Option<String>, ExError>;

    /// Send one request and block until its reply arrives
    fn submit(&self, request: &Request) -> Result<Reply, ExError>;

    /// Store `instrument` in `nym`'s own outpayments, addressed to `nym`.
    /// Nothing goes over the wire.
    fn deliver_self(
        &self,
        server: &Identifier,
        nym: &Identifier,
        instrument: &Instrument,
    ) -> Result<(), ExError>;

    /// Re-download the account's balance and inbox/outbox state
    fn refresh_account(
        &self,
        server: &Identifier,
        nym: &Identifier,
        account: &Identifier,
        force_full: bool,
    ) -> Result<(), ExError>;
}

/// Typed access to stored objects
#[allow(clippy::result_large_err)]
pub trait ObjectStore: Send + Sync {
    /// Whether an object exists under (kind, server, name)
    fn exists(&self, kind: StoredObjectKind, server: &Identifier, name: &str)
        -> Result<bool, ExError>;

    fn query_object(
        &self,
        kind: StoredObjectKind,
        server: &Identifier,
        name: &str,
    ) -> Result<Option<StoredObject>, ExError>;
}

/// Credential listings for local nyms
#[allow(clippy::result_large_err)]
pub trait CredentialSource: Send + Sync {
    fn credentials(&self, nym: &Identifier) -> Result<NymCredentials, ExError>;
}
