//! Backend-assigned item identifiers.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Numeric identifier the backend assigns to a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for ItemId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// An item identifier together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemHandle {
    /// The item identifier.
    pub id: ItemId,
    /// Opaque version tag (an etag for REST backends).
    pub version: Option<String>,
}

impl ItemHandle {
    /// Create a handle with a known version.
    pub fn new(id: impl Into<ItemId>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: Some(version.into()),
        }
    }

    /// Create a handle without version information.
    pub fn unversioned(id: impl Into<ItemId>) -> Self {
        Self {
            id: id.into(),
            version: None,
        }
    }
}
