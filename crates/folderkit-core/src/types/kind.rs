//! The two kinds of folder the workflow provisions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which template a request copies, and whether the copy is tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A project folder: copied, then tagged with the marker field.
    Project,
    /// A client folder: copied only.
    Client,
}

impl ResourceKind {
    /// Whether the new folder's item must be resolved and patched.
    pub fn requires_tagging(self) -> bool {
        matches!(self, Self::Project)
    }

    /// Lowercase name used in logs and config.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "project" => Ok(Self::Project),
            "client" => Ok(Self::Client),
            other => Err(AppError::validation(format!("Unknown resource kind '{other}'"))),
        }
    }
}
