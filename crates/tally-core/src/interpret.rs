//! Reply interpretation
//!
//! ## Steps (in order, first failure wins):
//! 1. Status check (a rejected reply is never parsed further)
//! 2. Ledger extraction
//! 3. Transaction lookup at the expected index
//! 4. Instrument extraction

use crate::errors::{NotaryError, Result};
use crate::model::{Instrument, Reply, ReplyStatus, TransactionKind};

/// Index of the issuance transaction in a single-action reply
pub const ISSUANCE_INDEX: usize = 0;

/// Turn a voucher-withdrawal reply into the issued instrument
pub fn interpret_withdrawal(reply: &Reply) -> Result<Instrument> {
    if let ReplyStatus::Rejected { code } = reply.status {
        return Err(NotaryError::ServerRejected { code });
    }

    let ledger = match reply.ledger() {
        Some(ledger) if !ledger.is_empty() => ledger,
        Some(_) => {
            return Err(NotaryError::MalformedReply {
                reason: "reply ledger has no transactions".to_string(),
            })
        }
        None => {
            return Err(NotaryError::MalformedReply {
                reason: "reply carries no ledger".to_string(),
            })
        }
    };

    let transaction = ledger
        .transaction_at(ISSUANCE_INDEX)
        .filter(|tx| tx.kind == TransactionKind::Withdrawal)
        .ok_or(NotaryError::MissingTransaction {
            index: ISSUANCE_INDEX,
        })?;

    transaction
        .instrument()
        .map_err(|e| NotaryError::InstrumentExtractionFailed {
            reason: e.to_string(),
        })
}
