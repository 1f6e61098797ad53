//! Testing utilities for the Semnet case-frame model.
//!
//! This crate provides mocks of the collaborator traits, fakes that inject
//! failures or record calls, and small builders shared by the test suites.

pub mod implementations;
pub mod mocks;

/// Re-export commonly used types for convenience
pub use mockall;

pub use implementations::{CountingFrameRegistry, FailingRelationProvider};
pub use mocks::{MockFrameRegistry, MockRelationProvider};

use semnet_core::RelationConstraint;
use semnet_interfaces::{FrameSignature, Relation, Signature};
use std::sync::Arc;

/// A signature with `id` and the "Proposition" result class
pub fn signature(id: &str) -> Arc<dyn Signature> {
    Arc::new(FrameSignature::new(id, "Proposition"))
}

/// An adjustable, unbounded constraint on a fresh relation
pub fn set_constraint(name: &str) -> RelationConstraint {
    RelationConstraint::new(Relation::new(name), true, None)
}

/// A non-adjustable constraint limited to one filler
pub fn single_constraint(name: &str) -> RelationConstraint {
    RelationConstraint::new(Relation::new(name), false, Some(1))
}

/// Install a test subscriber writing to the test harness; repeated calls are ignored
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
