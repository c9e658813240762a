//! Relationship model and edge-type validation.

use serde::{Deserialize, Serialize};

use crate::entity::SyncStatus;
use crate::error::{SyncError, SyncResult};

/// A validated relationship type, safe to splice into a Cypher pattern.
///
/// Cypher cannot bind a relationship type as a query parameter, so the type
/// string ends up interpolated into `MERGE (a)-[:Type]->(b)`. Construction
/// is the injection guard: only `[A-Za-z][A-Za-z0-9_]*` passes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelationType(String);

impl RelationType {
    pub fn new(raw: &str) -> SyncResult<Self> {
        let s = raw.trim();
        let mut chars = s.chars();
        let valid = match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(SyncError::InvalidRelationType(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RelationType {
    type Error = SyncError;

    fn try_from(value: String) -> SyncResult<Self> {
        Self::new(&value)
    }
}

impl From<RelationType> for String {
    fn from(value: RelationType) -> Self {
        value.0
    }
}

/// A directed edge between two entities, identified by the
/// `(from_name, rel_type, to_name)` triple.
///
/// Endpoints are resolved by name at operation time, not by stored
/// reference; the triple is the relationship's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub from_name: String,
    pub to_name: String,
    pub rel_type: RelationType,
    pub status: SyncStatus,
}
