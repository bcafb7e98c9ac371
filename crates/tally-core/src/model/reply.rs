use super::instrument::{Instrument, InstrumentParseError};
use serde::{Deserialize, Serialize};
use tally_core_types::RequestId;

/// Success or failure as reported by the notary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    Rejected { code: i32 },
}

/// The notary's answer to one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub request_id: RequestId,
    pub command: String,
    #[serde(flatten)]
    pub status: ReplyStatus,
    #[serde(default)]
    pub ledger: Option<Ledger>,
    /// Command-specific data (public key, account state) outside the ledger
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
}

impl Reply {
    pub fn success(request_id: RequestId, command: impl Into<String>) -> Self {
        Self {
            request_id,
            command: command.into(),
            status: ReplyStatus::Success,
            ledger: None,
            payload: None,
        }
    }

    pub fn rejected(request_id: RequestId, command: impl Into<String>, code: i32) -> Self {
        Self {
            request_id,
            command: command.into(),
            status: ReplyStatus::Rejected { code },
            ledger: None,
            payload: None,
        }
    }

    pub fn with_ledger(mut self, ledger: Ledger) -> Self {
        self.ledger = Some(ledger);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ReplyStatus::Success
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }
}

/// Ordered transactions reflecting the server-side effect of a request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transaction_at(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Withdrawal,
    Deposit,
    Transfer,
    BalanceStatement,
    #[serde(other)]
    Other,
}

/// One ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub number: i64,
    pub kind: TransactionKind,
    /// Armored voucher, present on a voucher withdrawal
    #[serde(default)]
    pub voucher: Option<String>,
}

impl Transaction {
    pub fn withdrawal(number: i64, voucher: Option<String>) -> Self {
        Self {
            number,
            kind: TransactionKind::Withdrawal,
            voucher,
        }
    }

    /// Extract the instrument this transaction produced
    pub fn instrument(&self) -> Result<Instrument, InstrumentParseError> {
        match self.voucher.as_deref() {
            Some(text) => Instrument::parse(text),
            None => Err(InstrumentParseError::Empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_wire_shape() {
        let json = serde_json::json!({
            "request_id": "r1",
            "command": "withdraw_voucher",
            "status": "rejected",
            "code": 17
        });
        let reply: Reply = serde_json::from_value(json).unwrap();
        assert_eq!(reply.status, ReplyStatus::Rejected { code: 17 });
        assert!(reply.ledger().is_none());
        assert!(!reply.is_success());
    }

    #[test]
    fn test_success_reply_with_ledger() {
        let json = serde_json::json!({
            "request_id": "r2",
            "command": "withdraw_voucher",
            "status": "success",
            "ledger": { "transactions": [ { "number": 9, "kind": "withdrawal" } ] }
        });
        let reply: Reply = serde_json::from_value(json).unwrap();
        let ledger = reply.ledger().unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.transaction_at(0).unwrap().number, 9);
        assert!(ledger.transaction_at(1).is_none());
    }

    #[test]
    fn test_unknown_transaction_kind_maps_to_other() {
        let tx: Transaction =
            serde_json::from_value(serde_json::json!({"number": 1, "kind": "market_offer"}))
                .unwrap();
        assert_eq!(tx.kind, TransactionKind::Other);
    }

    #[test]
    fn test_transaction_without_voucher_yields_no_instrument() {
        let tx = Transaction::withdrawal(3, None);
        assert_eq!(tx.instrument(), Err(InstrumentParseError::Empty));
    }
}
