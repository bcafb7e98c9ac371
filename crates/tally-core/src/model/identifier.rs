use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque token naming a server, nym or account
///
/// Construction does not check anything; syntax and wallet resolution are the
/// identifier validator's job (`rules::validation`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Non-empty and free of whitespace and control characters
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self
                .0
                .chars()
                .all(|c| !c.is_whitespace() && !c.is_control())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Which wallet lookup an identifier must satisfy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierRole {
    /// An account owned by a local nym
    MyAccount,
    /// A nym whose private credentials live in the local wallet
    MyNym,
    /// A counterparty nym; need not be in the wallet
    HisNym,
    /// A notary server registered in the wallet
    Server,
}

impl IdentifierRole {
    /// The option name the role is reported under
    pub fn label(&self) -> &'static str {
        match self {
            IdentifierRole::MyAccount => "myacct",
            IdentifierRole::MyNym => "mynym",
            IdentifierRole::HisNym => "hisnym",
            IdentifierRole::Server => "server",
        }
    }
}

impl fmt::Display for IdentifierRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
