//! JSON-over-HTTP messenger
//!
//! Every request is POSTed to `<endpoint>/v1/requests` and answered with a
//! single JSON `Reply`. The endpoint is the server's URL from the wallet, or
//! the configured default when the wallet has none.
//!
//! Keys, outpayments and account snapshots are cached in the `WalletStore`.

#![allow(clippy::result_large_err)]

use std::time::Duration;

use reqwest::blocking::Client;
use tally_core::errors::{ExError, ExErrorKind};
use tally_core::model::{
    AccountSnapshot, Action, Identifier, Instrument, LocalRecord, Reply, ReplyStatus, Request,
};
use tally_core::ports::Messenger;
use tally_store::WalletStore;

const REQUESTS_PATH: &str = "/v1/requests";

pub struct HttpMessenger {
    client: Client,
    default_endpoint: String,
    store: WalletStore,
}

impl HttpMessenger {
    pub fn new(
        default_endpoint: impl Into<String>,
        timeout: Duration,
        store: WalletStore,
    ) -> Result<Self, ExError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| from_reqwest("http_client", e))?;
        Ok(Self {
            client,
            default_endpoint: default_endpoint.into(),
            store,
        })
    }

    fn endpoint(&self, server: &Identifier) -> Result<String, ExError> {
        let url = self
            .store
            .server_url(server)?
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| self.default_endpoint.clone());
        if url.is_empty() {
            return Err(ExError::new(ExErrorKind::TransportFailure)
                .with_op("endpoint")
                .with_input(server.as_str())
                .with_message("no notary URL configured for server"));
        }
        Ok(format!("{}{}", url.trim_end_matches('/'), REQUESTS_PATH))
    }

    fn post(&self, request: &Request) -> Result<Reply, ExError> {
        let url = self.endpoint(request.server())?;
        tracing::debug!(
            command = request.command(),
            request_id = request.request_id().as_str(),
            url = %url,
            "posting request"
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .map_err(|e| from_reqwest("submit", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExError::new(ExErrorKind::TransportFailure)
                .with_op("submit")
                .with_request_id(request.request_id().clone())
                .with_message(format!("notary answered HTTP {}", status)));
        }

        response.json::<Reply>().map_err(|e| {
            ExError::new(ExErrorKind::MalformedReply)
                .with_op("submit")
                .with_request_id(request.request_id().clone())
                .with_message(format!("undecodable reply: {}", e))
        })
    }
}

impl Messenger for HttpMessenger {
    fn load_or_retrieve_key(
        &self,
        server: &Identifier,
        local_nym: &Identifier,
        peer_nym: &Identifier,
    ) -> Result<Option<String>, ExError> {
        if let Some(key_id) = self.store.public_key(peer_nym)? {
            return Ok(Some(key_id));
        }

        let request = Request::new(
            tally_core_types::RequestId::new(),
            server.clone(),
            local_nym.clone(),
            None,
            Action::CheckNym {
                target: peer_nym.clone(),
            },
        );
        let reply = self.post(&request)?;
        if !reply.is_success() {
            return Ok(None);
        }

        let key_id = reply
            .payload
            .as_ref()
            .and_then(|p| p.get("key_id"))
            .and_then(|k| k.as_str())
            .filter(|k| !k.is_empty());

        match key_id {
            Some(key_id) => {
                self.store.put_public_key(peer_nym, key_id)?;
                Ok(Some(key_id.to_string()))
            }
            None => Ok(None),
        }
    }

    fn submit(&self, request: &Request) -> Result<Reply, ExError> {
        self.post(request)
    }

    fn deliver_self(
        &self,
        server: &Identifier,
        nym: &Identifier,
        instrument: &Instrument,
    ) -> Result<(), ExError> {
        let record = LocalRecord::new(server, nym, nym, instrument);
        self.store.archive_outpayment(&record)
    }

    /// Without `force_full` a cached snapshot is kept as is
    fn refresh_account(
        &self,
        server: &Identifier,
        nym: &Identifier,
        account: &Identifier,
        force_full: bool,
    ) -> Result<(), ExError> {
        if !force_full && self.store.account_snapshot(account)?.is_some() {
            return Ok(());
        }

        let request = Request::new(
            tally_core_types::RequestId::new(),
            server.clone(),
            nym.clone(),
            Some(account.clone()),
            Action::GetAccountData,
        );
        let reply = self.post(&request)?;
        if let ReplyStatus::Rejected { code } = reply.status {
            return Err(ExError::new(ExErrorKind::ServerRejected)
                .with_op("refresh_account")
                .with_server_code(code)
                .with_request_id(request.request_id().clone())
                .with_message("notary refused account data"));
        }

        let payload = reply.payload.ok_or_else(|| {
            ExError::new(ExErrorKind::MalformedReply)
                .with_op("refresh_account")
                .with_message("account data reply carries no payload")
        })?;
        let snapshot: AccountSnapshot =
            serde_json::from_value(payload).map_err(|e| ExError::from(e).with_op("refresh_account"))?;
        if &snapshot.account != account {
            return Err(ExError::new(ExErrorKind::MalformedReply)
                .with_op("refresh_account")
                .with_input(snapshot.account.as_str())
                .with_message("account data is for a different account"));
        }

        self.store.save_account_snapshot(&snapshot)
    }
}

fn from_reqwest(op: &str, err: reqwest::Error) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else {
        ExErrorKind::TransportFailure
    };
    ExError::new(kind)
        .with_op(op.to_string())
        .with_message(err.to_string())
}
