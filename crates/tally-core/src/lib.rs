//! Tally Core - protocol kernel for notarized instruments
//!
//! This crate holds everything the voucher issuance protocol needs that does
//! not do I/O:
//! - Domain model (identifiers, requests, replies, ledgers, vouchers, records)
//! - Error facility (`NotaryError` taxonomy and structured `ExError`)
//! - Collaborator traits for wallet state and notary messaging
//! - Identifier and amount rules
//! - Reply interpretation
//! - Logging facility

pub mod errors;
pub mod interpret;
pub mod logging_facility;
pub mod model;
pub mod outcome;
pub mod ports;
pub mod rules;

pub use errors::{ExError, ExErrorKind, NotaryError, Result, Stage};
pub use model::{Identifier, IdentifierRole, Instrument, Reply, Request};
pub use outcome::PostCommit;
pub use ports::{CredentialSource, Messenger, ObjectStore, WalletResolver};
