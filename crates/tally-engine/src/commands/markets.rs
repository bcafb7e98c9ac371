//! Market listing

#![allow(clippy::result_large_err)]

use std::time::Instant;

use tally_core::errors::{ExError, ExErrorKind};
use tally_core::model::{Identifier, IdentifierRole, MarketList, StoredObject, StoredObjectKind};
use tally_core::ports::{ObjectStore, WalletResolver};
use tally_core::rules::validate_identifier;
use tally_core::{log_op_end, log_op_error, log_op_start};

const OP: &str = "show_markets";

/// Name the market list is stored under, per server
pub const MARKET_DATA_NAME: &str = "market_data";

/// Load the market list a server last published to this wallet
pub fn show_markets(
    server: &Identifier,
    resolver: &dyn WalletResolver,
    objects: &dyn ObjectStore,
) -> Result<MarketList, ExError> {
    log_op_start!(OP, server_id = server.as_str());
    let start = Instant::now();

    let result = show_markets_impl(server, resolver, objects).map_err(|e| {
        log_op_error!(OP, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        e
    })?;

    log_op_end!(
        OP,
        duration_ms = start.elapsed().as_millis() as u64,
        markets = result.len()
    );
    Ok(result)
}

fn show_markets_impl(
    server: &Identifier,
    resolver: &dyn WalletResolver,
    objects: &dyn ObjectStore,
) -> Result<MarketList, ExError> {
    validate_identifier(resolver, IdentifierRole::Server, server)?;

    let missing = || {
        ExError::new(ExErrorKind::NotFound)
            .with_op(OP)
            .with_input(server.as_str())
            .with_message("market list file doesn't exist")
    };

    if !objects.exists(StoredObjectKind::MarketList, server, MARKET_DATA_NAME)? {
        return Err(missing());
    }

    match objects.query_object(StoredObjectKind::MarketList, server, MARKET_DATA_NAME)? {
        Some(StoredObject::MarketList(list)) => Ok(list),
        Some(other) => Err(ExError::new(ExErrorKind::Serialization)
            .with_op(OP)
            .with_message(format!(
                "expected a market list, found {}",
                other.kind().as_str()
            ))),
        None => Err(missing()),
    }
}
