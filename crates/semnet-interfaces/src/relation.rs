//! Relation interfaces for Semnet
//!
//! A relation labels an arc of the semantic network. The case-frame model
//! only needs a stable unique name from it: canonical frame IDs and
//! constraint maps are keyed by that name.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Semantic type given to relations that do not declare one
pub const DEFAULT_RELATION_KIND: &str = "Entity";

/// Delimiter reserved for canonical case-frame IDs; relation names may not contain it
const RESERVED_DELIMITER: char = ',';

/// Result type for interface operations
pub type InterfaceResult<T> = Result<T, InterfaceError>;

/// Errors raised by relation collaborators
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterfaceError {
    /// No relation is defined under the requested name
    #[error("Relation not found: {0}")]
    RelationNotFound(String),

    /// The relation name cannot be used as a key
    #[error("Invalid relation name: {0:?}")]
    InvalidRelationName(String),
}

/// A named relation of the semantic network.
///
/// Equality, hashing and ordering use the name only; `kind` is carried for
/// the benefit of callers and never participates in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    name: String,
    #[serde(default = "default_kind")]
    kind: String,
}

fn default_kind() -> String {
    DEFAULT_RELATION_KIND.to_string()
}

impl Relation {
    /// Create a relation of the default kind
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: default_kind(),
        }
    }

    /// Create a relation whose arcs point at nodes of the given semantic type
    pub fn with_kind(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Create a relation after checking that its name is usable as a key
    pub fn try_new(name: impl Into<String>) -> InterfaceResult<Self> {
        let name = name.into();
        validate_relation_name(&name)?;
        Ok(Self::new(name))
    }

    /// The unique name of this relation
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The semantic type label of this relation
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

/// Check that a relation name is non-empty and free of the ID delimiter.
pub fn validate_relation_name(name: &str) -> InterfaceResult<()> {
    if name.trim().is_empty() || name.contains(RESERVED_DELIMITER) {
        return Err(InterfaceError::InvalidRelationName(name.to_string()));
    }
    Ok(())
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Relation {}

impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl PartialOrd for Relation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Relation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

/// Contract for the collaborator that owns relation definitions.
///
/// Implementations must return the same relation for the same name for the
/// lifetime of the provider.
pub trait RelationProvider: Send + Sync {
    /// Contract: Looks up a relation by its unique name.
    /// - Returns: `Ok(None)` if no such relation is defined. `Err` on lookup failure.
    fn find_relation(&self, name: &str) -> InterfaceResult<Option<Relation>>;

    /// Looks up a relation, treating absence as an error.
    fn relation(&self, name: &str) -> InterfaceResult<Relation> {
        self.find_relation(name)?
            .ok_or_else(|| InterfaceError::RelationNotFound(name.to_string()))
    }
}
