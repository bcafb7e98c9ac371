use crate::errors::{NotaryError, Result};
use crate::model::{Identifier, IdentifierRole};
use crate::ports::WalletResolver;

/// Check an identifier before anything touches the network
///
/// In order:
/// 1. non-empty and free of whitespace/control characters
/// 2. resolvable in the wallet for `role`
///
/// Read-only. On failure returns `InvalidIdentifier` naming the role.
pub fn validate_identifier(
    resolver: &dyn WalletResolver,
    role: IdentifierRole,
    id: &Identifier,
) -> Result<()> {
    if !id.is_well_formed() || !resolver.resolve(role, id) {
        return Err(NotaryError::InvalidIdentifier {
            role,
            id: id.as_str().to_string(),
        });
    }
    Ok(())
}

/// The account's server and owner, both required before a request can be built
///
/// An account the wallet knows but cannot place is reported against the role
/// that could not be derived.
pub fn account_context(
    resolver: &dyn WalletResolver,
    account: &Identifier,
) -> Result<(Identifier, Identifier)> {
    let server = resolver
        .account_server(account)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| NotaryError::InvalidIdentifier {
            role: IdentifierRole::Server,
            id: account.as_str().to_string(),
        })?;

    let owner = resolver
        .account_owner(account)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| NotaryError::InvalidIdentifier {
            role: IdentifierRole::MyNym,
            id: account.as_str().to_string(),
        })?;

    Ok((server, owner))
}
