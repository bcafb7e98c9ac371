//! Single dispatch point for every command the engine runs

#![allow(clippy::result_large_err)]

use crate::commands::credentials::show_credentials;
use crate::commands::listing_exit_code;
use crate::commands::markets::show_markets;
use crate::commands::withdraw_voucher::{withdraw_voucher, VoucherOutcome, WithdrawVoucherArgs};
use tally_core::errors::ExError;
use tally_core::model::{Identifier, MarketList, NymCredentials};
use tally_core::ports::{CredentialSource, Messenger, ObjectStore, WalletResolver};

#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Issue a voucher drawn on a local account
    WithdrawVoucher(WithdrawVoucherArgs),
    /// List the markets a server has published
    ShowMarkets { server: Identifier },
    /// List a local nym's active and revoked credentials
    ShowCredentials { nym: Identifier },
}

#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Voucher(VoucherOutcome),
    Markets(MarketList),
    Credentials(NymCredentials),
}

impl EngineCommandResult {
    /// Negative for failure, 0 for an empty listing, positive otherwise
    pub fn exit_code(&self) -> i32 {
        match self {
            EngineCommandResult::Voucher(outcome) => outcome.exit_code(),
            EngineCommandResult::Markets(list) => listing_exit_code(list.len()),
            EngineCommandResult::Credentials(creds) => listing_exit_code(creds.total()),
        }
    }
}

/// Collaborators a command may need
pub struct Collaborators<'a> {
    pub resolver: &'a dyn WalletResolver,
    pub messenger: &'a dyn Messenger,
    pub objects: &'a dyn ObjectStore,
    pub credentials: &'a dyn CredentialSource,
}

/// Run one command
///
/// A failed issuance is still `Ok`: it is reported inside
/// `VoucherOutcome::Failed`. Listing commands fail through `Err`.
pub fn apply_engine_command(
    cmd: EngineCommand,
    deps: &Collaborators<'_>,
) -> Result<EngineCommandResult, ExError> {
    match cmd {
        EngineCommand::WithdrawVoucher(args) => Ok(EngineCommandResult::Voucher(
            withdraw_voucher(args, deps.resolver, deps.messenger),
        )),
        EngineCommand::ShowMarkets { server } => {
            show_markets(&server, deps.resolver, deps.objects).map(EngineCommandResult::Markets)
        }
        EngineCommand::ShowCredentials { nym } => {
            show_credentials(&nym, deps.resolver, deps.credentials)
                .map(EngineCommandResult::Credentials)
        }
    }
}
