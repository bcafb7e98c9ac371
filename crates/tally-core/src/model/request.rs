use super::Identifier;
use serde::{Deserialize, Serialize};
use tally_core_types::{RequestId, Sensitive};

/// The notarized action a request asks for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Debit the account and mint a voucher payable to `recipient`
    WithdrawVoucher {
        recipient: Identifier,
        amount: i64,
        #[serde(default)]
        memo: Option<Sensitive<String>>,
    },
    /// Fetch the public encryption key of `target`
    CheckNym { target: Identifier },
    /// Fetch balance and inbox/outbox state of the request's account
    GetAccountData,
}

impl Action {
    /// Wire command name
    pub fn command(&self) -> &'static str {
        match self {
            Action::WithdrawVoucher { .. } => "withdraw_voucher",
            Action::CheckNym { .. } => "check_nym",
            Action::GetAccountData => "get_account_data",
        }
    }
}

/// One notarization request, bound to a single (server, nym, account)
///
/// Fields are private: once built the request cannot be altered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    request_id: RequestId,
    server: Identifier,
    nym: Identifier,
    #[serde(default)]
    account: Option<Identifier>,
    action: Action,
}

impl Request {
    pub fn new(
        request_id: RequestId,
        server: Identifier,
        nym: Identifier,
        account: Option<Identifier>,
        action: Action,
    ) -> Self {
        Self {
            request_id,
            server,
            nym,
            account,
            action,
        }
    }

    pub fn withdraw_voucher(
        request_id: RequestId,
        server: Identifier,
        nym: Identifier,
        account: Identifier,
        recipient: Identifier,
        amount: i64,
        memo: Option<String>,
    ) -> Self {
        Self::new(
            request_id,
            server,
            nym,
            Some(account),
            Action::WithdrawVoucher {
                recipient,
                amount,
                memo: memo.filter(|m| !m.is_empty()).map(Sensitive::new),
            },
        )
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    pub fn server(&self) -> &Identifier {
        &self.server
    }

    pub fn nym(&self) -> &Identifier {
        &self.nym
    }

    pub fn account(&self) -> Option<&Identifier> {
        self.account.as_ref()
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn command(&self) -> &'static str {
        self.action.command()
    }
}
