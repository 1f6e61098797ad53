//! Semnet Interfaces
//!
//! This crate provides the contracts between the case-frame model and the
//! rest of the semantic network: relations, relation lookup, and case-frame
//! signatures. Only identity is modelled here; matching semantics live with
//! the node-construction code that consumes these types.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Relation identity and lookup
pub mod relation;

/// Case-frame signature identity
pub mod signature;

/// Re-export key types for convenient usage
pub use relation::{
    validate_relation_name, InterfaceError, InterfaceResult, Relation, RelationProvider,
    DEFAULT_RELATION_KIND,
};
pub use signature::{FrameSignature, Signature, SignatureId};
