use super::{Identifier, Instrument, InstrumentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Copy of an issued instrument kept in the issuer's outpayments
///
/// There is at most one record per `instrument_id`. Archiving the same
/// instrument again (to self or to a third party) replaces the earlier record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalRecord {
    pub instrument_id: InstrumentId,
    pub owner_nym: Identifier,
    pub server: Identifier,
    pub recipient: Identifier,
    pub payload: String,
    pub archived_at: DateTime<Utc>,
}

impl LocalRecord {
    pub fn new(
        server: &Identifier,
        owner_nym: &Identifier,
        recipient: &Identifier,
        instrument: &Instrument,
    ) -> Self {
        Self {
            instrument_id: instrument.id().clone(),
            owner_nym: owner_nym.clone(),
            server: server.clone(),
            recipient: recipient.clone(),
            payload: instrument.armored().to_string(),
            archived_at: Utc::now(),
        }
    }

    /// Whether this is a self-addressed safekeeping copy
    pub fn is_self_addressed(&self) -> bool {
        self.owner_nym == self.recipient
    }
}

/// Cached intermediary state of an account, refreshed from the notary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub account: Identifier,
    pub balance: i64,
    #[serde(default)]
    pub inbox_hash: String,
    #[serde(default)]
    pub outbox_hash: String,
    #[serde(default = "chrono::Utc::now")]
    pub refreshed_at: DateTime<Utc>,
}
