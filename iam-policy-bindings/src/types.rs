//! Core data types: bindings, the wire resource, and the generic roles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Generic role implying all rights to an object.
pub const OWNER_ROLE: &str = "roles/owner";

/// Generic role implying rights to modify an object.
pub const EDITOR_ROLE: &str = "roles/editor";

/// Generic role implying rights to access an object.
pub const VIEWER_ROLE: &str = "roles/viewer";

/// Association of one role with a set of member identifiers.
///
/// Members are kept in a sorted set: duplicates collapse and the serialized
/// order is stable, which keeps emitted documents diff-friendly.
///
/// Any other binding field (such as a version 3 `condition`) is kept verbatim
/// in `extra` and written back on export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub role: String,
    #[serde(default)]
    pub members: BTreeSet<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Binding {
    /// Create a binding, deduplicating `members`.
    pub fn new<I, S>(role: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            role: role.into(),
            members: members.into_iter().map(Into::into).collect(),
            extra: Map::new(),
        }
    }

    /// Whether the binding carries a `condition`.
    pub fn is_conditional(&self) -> bool {
        self.extra.contains_key("condition")
    }
}

/// JSON shape exchanged with `getIamPolicy` / `setIamPolicy`.
///
/// Absent values are omitted rather than emitted as `null`; consumers
/// distinguish the two.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bindings: Vec<Binding>,
}

/// Deprecated tiers mapped onto fixed role lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyTier {
    Owners,
    Editors,
    Viewers,
}

impl LegacyTier {
    /// Roles whose members make up this tier.
    pub fn roles(self) -> &'static [&'static str] {
        match self {
            Self::Owners => &[OWNER_ROLE],
            Self::Editors => &[EDITOR_ROLE],
            Self::Viewers => &[VIEWER_ROLE],
        }
    }

    /// The single role an assignment to this tier is written to.
    pub fn assignment_role(self) -> &'static str {
        match self {
            Self::Owners => OWNER_ROLE,
            Self::Editors => EDITOR_ROLE,
            Self::Viewers => VIEWER_ROLE,
        }
    }

    /// Tier name as used in deprecation messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Owners => "owners",
            Self::Editors => "editors",
            Self::Viewers => "viewers",
        }
    }
}

impl std::str::FromStr for LegacyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "owners" | "owner" => Ok(Self::Owners),
            "editors" | "editor" => Ok(Self::Editors),
            "viewers" | "viewer" => Ok(Self::Viewers),
            other => Err(format!("unknown legacy tier: {other}")),
        }
    }
}
