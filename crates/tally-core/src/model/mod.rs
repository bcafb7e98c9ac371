//! Domain model: identifiers, requests, replies, instruments and local records

pub mod asset;
pub mod credential;
pub mod identifier;
pub mod instrument;
pub mod market;
pub mod record;
pub mod reply;
pub mod request;

pub use asset::{Asset, MAX_DECIMAL_POWER};
pub use credential::{Credential, NymCredentials};
pub use identifier::{Identifier, IdentifierRole};
pub use instrument::{Instrument, InstrumentId, InstrumentParseError, Voucher};
pub use market::{MarketData, MarketList, StoredObject, StoredObjectKind};
pub use record::{AccountSnapshot, LocalRecord};
pub use reply::{Ledger, Reply, ReplyStatus, Transaction, TransactionKind};
pub use request::{Action, Request};
