#![allow(dead_code)]

pub mod notary;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{Duration, Utc};
use tally_core::errors::{ExError, ExErrorKind};
use tally_core::model::{
    Action, Asset, Identifier, IdentifierRole, Instrument, Ledger, Reply, Request, Transaction,
    Voucher,
};
use tally_core::ports::{Messenger, WalletResolver};
use tally_core_types::RequestId;

/// In-memory wallet: acct1 on srv1 owned by nymA, denominated in usd (2 places)
pub struct FakeWallet {
    accounts: HashMap<Identifier, (Identifier, Identifier, Asset)>,
    nyms: Vec<Identifier>,
    servers: Vec<Identifier>,
}

impl FakeWallet {
    pub fn scenario() -> Self {
        let mut accounts = HashMap::new();
        accounts.insert(
            Identifier::new("acct1"),
            ("srv1".into(), "nymA".into(), Asset::new("usd", "US Dollar", 2)),
        );
        Self {
            accounts,
            nyms: vec!["nymA".into()],
            servers: vec!["srv1".into()],
        }
    }

    /// An account the wallet lists but cannot place on a server
    pub fn with_orphan_account(mut self, account: &str) -> Self {
        self.accounts.insert(
            account.into(),
            (Identifier::new(""), "nymA".into(), Asset::new("usd", "US Dollar", 2)),
        );
        self
    }
}

impl WalletResolver for FakeWallet {
    fn resolve(&self, role: IdentifierRole, id: &Identifier) -> bool {
        match role {
            IdentifierRole::MyAccount => self.accounts.contains_key(id),
            IdentifierRole::MyNym => self.nyms.contains(id),
            IdentifierRole::Server => self.servers.contains(id),
            IdentifierRole::HisNym => id.is_well_formed(),
        }
    }

    fn account_server(&self, account: &Identifier) -> Option<Identifier> {
        self.accounts.get(account).map(|(s, _, _)| s.clone())
    }

    fn account_owner(&self, account: &Identifier) -> Option<Identifier> {
        self.accounts.get(account).map(|(_, n, _)| n.clone())
    }

    fn account_asset(&self, account: &Identifier) -> Option<Asset> {
        self.accounts.get(account).map(|(_, _, a)| a.clone())
    }
}

/// How the fake notary answers a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotaryMode {
    Issue,
    Reject(i32),
    EmptyLedger,
    NoLedger,
    Uncorrelated,
    Unreachable,
    /// The round trip worked but the reply does not decode
    Garbled,
}

/// Messenger that records every call
pub struct FakeMessenger {
    pub mode: NotaryMode,
    /// Nyms whose keys are available
    pub known_keys: Vec<Identifier>,
    pub fail_deliver: bool,
    pub fail_refresh: bool,
    pub key_calls: AtomicUsize,
    pub submit_calls: AtomicUsize,
    pub deliver_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    pub submitted: Mutex<Vec<Request>>,
    pub refreshed_with_force: Mutex<Vec<bool>>,
}

impl FakeMessenger {
    pub fn new(mode: NotaryMode) -> Self {
        Self {
            mode,
            known_keys: vec!["nymA".into(), "nymB".into()],
            fail_deliver: false,
            fail_refresh: false,
            key_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            deliver_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            submitted: Mutex::new(Vec::new()),
            refreshed_with_force: Mutex::new(Vec::new()),
        }
    }

    pub fn key_calls(&self) -> usize {
        self.key_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn deliver_calls(&self) -> usize {
        self.deliver_calls.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

impl Messenger for FakeMessenger {
    fn load_or_retrieve_key(
        &self,
        _server: &Identifier,
        _local_nym: &Identifier,
        peer_nym: &Identifier,
    ) -> Result<Option<String>, ExError> {
        self.key_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .known_keys
            .contains(peer_nym)
            .then(|| format!("key-{peer_nym}")))
    }

    fn submit(&self, request: &Request) -> Result<Reply, ExError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(request.clone());

        let id = request.request_id().clone();
        match self.mode {
            NotaryMode::Issue => Ok(issue_reply(request, 77)),
            NotaryMode::Reject(code) => Ok(Reply::rejected(id, request.command(), code)),
            NotaryMode::EmptyLedger => {
                Ok(Reply::success(id, request.command()).with_ledger(Ledger::default()))
            }
            NotaryMode::NoLedger => Ok(Reply::success(id, request.command())),
            NotaryMode::Uncorrelated => {
                let mut reply = issue_reply(request, 77);
                reply.request_id = RequestId::new();
                Ok(reply)
            }
            NotaryMode::Unreachable => Err(ExError::new(ExErrorKind::TransportFailure)
                .with_op("submit")
                .with_message("connection refused")),
            NotaryMode::Garbled => Err(ExError::new(ExErrorKind::MalformedReply)
                .with_op("submit")
                .with_message("undecodable reply: missing field `request_id`")),
        }
    }

    fn deliver_self(
        &self,
        _server: &Identifier,
        _nym: &Identifier,
        _instrument: &Instrument,
    ) -> Result<(), ExError> {
        self.deliver_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_deliver {
            return Err(ExError::new(ExErrorKind::Persistence).with_message("wallet is read-only"));
        }
        Ok(())
    }

    fn refresh_account(
        &self,
        _server: &Identifier,
        _nym: &Identifier,
        _account: &Identifier,
        force_full: bool,
    ) -> Result<(), ExError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refreshed_with_force.lock().unwrap().push(force_full);
        if self.fail_refresh {
            return Err(ExError::new(ExErrorKind::Timeout).with_message("notary timed out"));
        }
        Ok(())
    }
}

/// Voucher the notary would mint for a withdrawal request
pub fn voucher_for(request: &Request, transaction_number: i64) -> Voucher {
    let (recipient, amount, memo) = match request.action() {
        Action::WithdrawVoucher {
            recipient,
            amount,
            memo,
        } => (recipient.clone(), *amount, memo.clone()),
        other => panic!("not a withdrawal: {other:?}"),
    };
    let now = Utc::now();
    Voucher {
        server: request.server().clone(),
        asset: "usd".into(),
        issuer_nym: request.nym().clone(),
        issuer_account: request.account().cloned().unwrap_or_default(),
        recipient,
        amount,
        transaction_number,
        memo,
        valid_from: now,
        valid_to: now + Duration::days(180),
        signature: "notary-signature".to_string(),
    }
}

/// Successful reply carrying a freshly minted voucher at index 0
pub fn issue_reply(request: &Request, transaction_number: i64) -> Reply {
    let instrument = Instrument::from_voucher(voucher_for(request, transaction_number)).unwrap();
    Reply::success(request.request_id().clone(), request.command()).with_ledger(Ledger::new(
        vec![Transaction::withdrawal(
            transaction_number,
            Some(instrument.armored().to_string()),
        )],
    ))
}
