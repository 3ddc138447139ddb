use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Key of the list holding authenticatable items (e.g. `"User"`).
///
/// List keys are upper-camel-case in Lattice configs; this crate treats them
/// as opaque and only ever compares them against the host config's list map.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ListKey(pub String);

impl ListKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ListKey {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Identifier of an item within a list (opaque string).
///
/// The host data layer chooses the format (ULID, UUID, integer-as-string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Opaque session token minted by the host's session strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
#[serde(transparent)]
pub struct SessionToken(pub String);

/// An item as returned by the host data layer: its id plus selected field data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub data: JsonValue,
}

/// Session content after item augmentation.
///
/// This is what downstream resolvers see once the session strategy has
/// resolved an identity: which list the item lives in, which item it is, and
/// the `session_data` selection fetched for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSession {
    pub list_key: ListKey,
    pub item_id: ItemId,
    pub data: JsonValue,
}
