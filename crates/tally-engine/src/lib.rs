//! Tally Engine - Command orchestration
//!
//! Runs the voucher issuance pipeline and the wallet listing commands against
//! injected collaborators, and provides the HTTP messenger that talks to a
//! notary.

pub mod commands;
pub mod transport;
