//! Vouchers and their armored text form
//!
//! A voucher travels as
//!
//! ```text
//! -----BEGIN TALLY VOUCHER-----
//! <base64 of the JSON body, 64 columns>
//! -----END TALLY VOUCHER-----
//! ```
//!
//! Its identity is the SHA-256 of the decoded body bytes exactly as the notary
//! signed them, so the same voucher has the same id regardless of line
//! wrapping. The parsed [`Voucher`] is only a view; the body is never
//! re-serialized.

use super::Identifier;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use tally_core_types::Sensitive;

pub const ARMOR_BEGIN: &str = "-----BEGIN TALLY VOUCHER-----";
pub const ARMOR_END: &str = "-----END TALLY VOUCHER-----";
const ARMOR_WIDTH: usize = 64;

/// Cashier's-cheque-style instrument minted and signed by the notary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub server: Identifier,
    pub asset: Identifier,
    pub issuer_nym: Identifier,
    pub issuer_account: Identifier,
    pub recipient: Identifier,
    pub amount: i64,
    pub transaction_number: i64,
    #[serde(default)]
    pub memo: Option<Sensitive<String>>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    /// Notary signature over the other fields; verified by the notary, not here
    pub signature: String,
}

/// Content-derived identity of an instrument
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why armored text could not be turned into an instrument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstrumentParseError {
    Empty,
    MissingArmor,
    Base64(String),
    Body(String),
}

impl fmt::Display for InstrumentParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstrumentParseError::Empty => f.write_str("instrument text is empty"),
            InstrumentParseError::MissingArmor => f.write_str("voucher armor lines not found"),
            InstrumentParseError::Base64(e) => write!(f, "armor is not valid base64: {e}"),
            InstrumentParseError::Body(e) => write!(f, "voucher body does not parse: {e}"),
        }
    }
}

/// A standalone issued instrument
///
/// Once extracted it no longer depends on the reply that carried it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    id: InstrumentId,
    voucher: Voucher,
    body: Sensitive<Vec<u8>>,
    armored: Sensitive<String>,
}

impl Instrument {
    /// Armor a voucher, using its serde form as the body
    pub fn from_voucher(voucher: Voucher) -> Result<Self, InstrumentParseError> {
        let body =
            serde_json::to_vec(&voucher).map_err(|e| InstrumentParseError::Body(e.to_string()))?;
        Ok(Self::from_body(body, voucher))
    }

    /// Decode armored voucher text
    ///
    /// The body bytes are kept verbatim: fields the view does not know and
    /// the notary's own formatting survive into the id and the armor.
    pub fn parse(text: &str) -> Result<Self, InstrumentParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InstrumentParseError::Empty);
        }

        let inner = text
            .strip_prefix(ARMOR_BEGIN)
            .and_then(|rest| rest.strip_suffix(ARMOR_END))
            .ok_or(InstrumentParseError::MissingArmor)?;
        let encoded: String = inner.split_whitespace().collect();
        let raw = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| InstrumentParseError::Base64(e.to_string()))?;
        let voucher: Voucher =
            serde_json::from_slice(&raw).map_err(|e| InstrumentParseError::Body(e.to_string()))?;

        Ok(Self::from_body(raw, voucher))
    }

    fn from_body(body: Vec<u8>, voucher: Voucher) -> Self {
        Self {
            id: digest(&body),
            voucher,
            armored: Sensitive::new(armor(&body)),
            body: Sensitive::new(body),
        }
    }

    /// Body bytes as issued
    pub fn body(&self) -> &[u8] {
        self.body.expose()
    }

    pub fn id(&self) -> &InstrumentId {
        &self.id
    }

    pub fn voucher(&self) -> &Voucher {
        &self.voucher
    }

    /// Armored text; the caller decides where it may be shown
    pub fn armored(&self) -> &str {
        self.armored.expose()
    }
}

fn armor(body: &[u8]) -> String {
    let encoded = STANDARD.encode(body);
    let mut armored = String::with_capacity(encoded.len() + 80);
    armored.push_str(ARMOR_BEGIN);
    armored.push('\n');
    for chunk in encoded.as_bytes().chunks(ARMOR_WIDTH) {
        // base64 output is ASCII
        armored.push_str(&String::from_utf8_lossy(chunk));
        armored.push('\n');
    }
    armored.push_str(ARMOR_END);
    armored
}

fn digest(body: &[u8]) -> InstrumentId {
    let mut hasher = Sha256::new();
    hasher.update(body);
    InstrumentId(hex::encode(hasher.finalize()))
}
