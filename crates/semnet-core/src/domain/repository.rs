//! Frame registry trait for the case-frame model
//!
//! The registry is the collaborator that makes frames globally discoverable
//! and deduplicates them by canonical ID. External crates implement it to
//! back frames with whatever storage the host network uses.

use std::sync::Arc;

use super::case_frame::CaseFrameId;
use super::constrained::ConstrainedCaseFrame;
use super::relation_constraint::RelationConstraint;
use crate::error::CaseFrameResult;

/// Registry of case frames keyed by canonical ID
pub trait FrameRegistry: Send + Sync {
    /// Contract: Defines a case frame from a semantic class and constraints.
    /// - Computes the canonical ID from the constraints' relation names.
    /// - Returns the already-registered frame when one has the same ID,
    ///   ignoring `semantic_class`; otherwise registers and returns a new one.
    fn define_case_frame_with_constraints(
        &self,
        semantic_class: &str,
        constraints: Vec<RelationConstraint>,
    ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>>;

    /// Find a frame by canonical ID
    fn get(&self, id: &CaseFrameId) -> CaseFrameResult<Option<Arc<ConstrainedCaseFrame>>>;

    /// IDs of all registered frames
    fn list_ids(&self) -> CaseFrameResult<Vec<CaseFrameId>>;

    /// Number of registered frames
    fn len(&self) -> usize;

    /// True when no frame is registered
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
