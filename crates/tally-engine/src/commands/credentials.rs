//! Credential listing for a local nym

#![allow(clippy::result_large_err)]

use std::time::Instant;

use tally_core::errors::ExError;
use tally_core::model::{Identifier, IdentifierRole, NymCredentials};
use tally_core::ports::{CredentialSource, WalletResolver};
use tally_core::rules::validate_identifier;
use tally_core::{log_op_end, log_op_error, log_op_start};

const OP: &str = "show_credentials";

pub fn show_credentials(
    nym: &Identifier,
    resolver: &dyn WalletResolver,
    source: &dyn CredentialSource,
) -> Result<NymCredentials, ExError> {
    log_op_start!(OP, nym_id = nym.as_str());
    let start = Instant::now();

    let result = validate_identifier(resolver, IdentifierRole::MyNym, nym)
        .map_err(ExError::from)
        .and_then(|()| source.credentials(nym))
        .map_err(|e| {
            log_op_error!(OP, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
            e
        })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        active = result.active.len(),
        revoked = result.revoked.len()
    );
    Ok(result)
}
