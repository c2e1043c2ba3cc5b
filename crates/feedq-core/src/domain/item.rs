//! Feed item domain types.
//!
//! An `Item` is opaque to the prefetch machinery apart from two fields: its
//! unique `id` and the locator of the heavy resource (usually an image) that
//! must be warm before the item is displayed. Everything else the provider
//! sends is carried through untouched in `metadata`.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Keys accepted for the resource locator, in lookup order.
///
/// The first key present on the object wins, even if its value turns out to
/// be invalid.
pub const RESOURCE_FIELDS: &[&str] = &["resource_url", "image_url", "url"];

/// Unique identifier of a feed item.
///
/// Providers may send identifiers as JSON strings or integers; both are
/// normalised to their string form so comparisons are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Create an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read an identifier from a JSON value.
    ///
    /// Accepts non-empty strings and integers. Floats, booleans, and
    /// empty or whitespace-only strings are rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if !s.trim().is_empty() => Some(Self(s.clone())),
            Value::Number(n) => n
                .as_u64()
                .map(|v| v.to_string())
                .or_else(|| n.as_i64().map(|v| v.to_string()))
                .map(Self),
            _ => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A unit of feed content.
///
/// Items are immutable once fetched. They serialise flat:
/// `{"id": "...", "resource_url": "...", ...metadata}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Unique identifier within the queue.
    pub id: ItemId,
    /// Locator of the externally hosted resource to prime.
    pub resource_url: String,
    /// Display metadata the core never inspects.
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Item {
    /// Create an item with no extra metadata.
    pub fn new(id: impl Into<ItemId>, resource_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_url: resource_url.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata field.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Structurally validate and convert a JSON value into an `Item`.
    ///
    /// This is the single validator shared by response parsing and snapshot
    /// restore. Returns `None` unless the value is an object carrying a
    /// non-empty `id` and a non-empty string locator.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let id = ItemId::from_json(object.get("id")?)?;

        let locator_key = RESOURCE_FIELDS
            .iter()
            .find(|key| object.contains_key(**key))?;
        let resource_url = object
            .get(*locator_key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())?
            .to_string();

        let mut metadata = object.clone();
        metadata.remove("id");
        metadata.remove(*locator_key);

        Some(Self {
            id,
            resource_url,
            metadata,
        })
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| {
            serde::de::Error::custom("item requires a non-empty id and resource locator")
        })
    }
}
