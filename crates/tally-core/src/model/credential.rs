use serde::{Deserialize, Serialize};

/// A master credential and the subcredentials it signed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub id: String,
    #[serde(default)]
    pub subcredentials: Vec<String>,
}

/// Active and revoked credentials of one nym
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NymCredentials {
    pub active: Vec<Credential>,
    pub revoked: Vec<Credential>,
}

impl NymCredentials {
    pub fn total(&self) -> usize {
        self.active.len() + self.revoked.len()
    }
}
