//! Case-frame signature interfaces
//!
//! A signature is a restricted or alternative form of a case frame. Frames
//! keep their signatures in priority order; the matching algorithm that
//! tries them lives outside this workspace and only the stable ID is relied
//! on here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a case-frame signature
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SignatureId(pub String);

impl SignatureId {
    /// Create a signature ID from any string-like value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SignatureId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for SignatureId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Contract for a case-frame signature.
///
/// Two signatures with the same `id` are the same signature as far as a
/// case frame is concerned, whatever else they carry.
pub trait Signature: fmt::Debug + Send + Sync {
    /// The stable identity of this signature
    fn id(&self) -> &SignatureId;
}

/// A plain signature value: an ID plus the semantic class assigned to nodes
/// that satisfy it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSignature {
    /// Stable identifier
    pub id: SignatureId,

    /// Semantic class given to nodes matching this signature
    pub result_semantic_class: String,

    /// Optional human-readable note
    #[serde(default)]
    pub description: Option<String>,
}

impl FrameSignature {
    /// Create a signature without a description
    pub fn new(id: impl Into<SignatureId>, result_semantic_class: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            result_semantic_class: result_semantic_class.into(),
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Signature for FrameSignature {
    fn id(&self) -> &SignatureId {
        &self.id
    }
}
