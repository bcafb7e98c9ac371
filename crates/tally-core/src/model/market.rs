use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One market the notary runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketData {
    pub scale: i64,
    pub market_id: String,
    pub instrument_definition_id: String,
    pub currency_type_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketList {
    pub markets: Vec<MarketData>,
}

impl MarketList {
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

/// Kind tag used to address stored objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoredObjectKind {
    MarketList,
    StringMap,
    Blob,
}

impl StoredObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoredObjectKind::MarketList => "market_list",
            StoredObjectKind::StringMap => "string_map",
            StoredObjectKind::Blob => "blob",
        }
    }
}

/// Everything the object store can hold
///
/// Queries return this union; callers match on the variant they expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum StoredObject {
    MarketList(MarketList),
    StringMap(BTreeMap<String, String>),
    Blob(Vec<u8>),
}

impl StoredObject {
    pub fn kind(&self) -> StoredObjectKind {
        match self {
            StoredObject::MarketList(_) => StoredObjectKind::MarketList,
            StoredObject::StringMap(_) => StoredObjectKind::StringMap,
            StoredObject::Blob(_) => StoredObjectKind::Blob,
        }
    }
}
