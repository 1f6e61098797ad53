use parking_lot::RwLock;
use semnet_core::{
    canonical_id, CaseFrameId, CaseFrameResult, ConstrainedCaseFrame, FrameRegistry,
    RelationConstraint,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// In-memory frame registry keyed by canonical ID
#[derive(Default)]
pub struct InMemoryFrameRegistry {
    frames: RwLock<HashMap<CaseFrameId, Arc<ConstrainedCaseFrame>>>,
}

impl InMemoryFrameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registered frame, ordered by ID
    pub fn frames(&self) -> Vec<Arc<ConstrainedCaseFrame>> {
        let mut frames: Vec<_> = self.frames.read().values().cloned().collect();
        frames.sort_by(|a, b| a.id().as_str().cmp(b.id().as_str()));
        frames
    }
}

impl FrameRegistry for InMemoryFrameRegistry {
    fn define_case_frame_with_constraints(
        &self,
        semantic_class: &str,
        constraints: Vec<RelationConstraint>,
    ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>> {
        let id = canonical_id(constraints.iter().map(RelationConstraint::relation_name));

        if let Some(existing) = self.frames.read().get(&id) {
            debug!(frame = %id, "Case frame already defined");
            return Ok(Arc::clone(existing));
        }

        let mut frames = self.frames.write();
        let frame = frames.entry(id.clone()).or_insert_with(|| {
            debug!(frame = %id, semantic_class, "Defined case frame");
            Arc::new(ConstrainedCaseFrame::new(semantic_class, constraints))
        });
        Ok(Arc::clone(frame))
    }

    fn get(&self, id: &CaseFrameId) -> CaseFrameResult<Option<Arc<ConstrainedCaseFrame>>> {
        Ok(self.frames.read().get(id).cloned())
    }

    fn list_ids(&self) -> CaseFrameResult<Vec<CaseFrameId>> {
        let mut ids: Vec<CaseFrameId> = self.frames.read().keys().cloned().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }

    fn len(&self) -> usize {
        self.frames.read().len()
    }
}

impl fmt::Debug for InMemoryFrameRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFrameRegistry")
            .field("frames", &self.len())
            .finish()
    }
}
