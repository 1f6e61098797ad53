//! Fake implementations of the collaborator traits.

use parking_lot::Mutex;
use semnet_core::{
    CaseFrameError, CaseFrameId, CaseFrameResult, ConstrainedCaseFrame, FrameRegistry,
    RelationConstraint,
};
use semnet_interfaces::{InterfaceResult, Relation, RelationProvider};
use semnet_registry_inmemory::{InMemoryFrameRegistry, InMemoryRelationRegistry};
use std::collections::HashSet;
use std::sync::Arc;

/// Relation provider that knows every standard relation except a chosen few
#[derive(Debug)]
pub struct FailingRelationProvider {
    inner: InMemoryRelationRegistry,
    missing: HashSet<String>,
    lookups: Mutex<Vec<String>>,
}

impl FailingRelationProvider {
    /// Hide the relations named in `missing`
    pub fn without(missing: &[&str]) -> Self {
        Self {
            inner: InMemoryRelationRegistry::with_standard_relations(),
            missing: missing.iter().map(|name| name.to_string()).collect(),
            lookups: Mutex::new(Vec::new()),
        }
    }

    /// Names looked up so far, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

impl RelationProvider for FailingRelationProvider {
    fn find_relation(&self, name: &str) -> InterfaceResult<Option<Relation>> {
        self.lookups.lock().push(name.to_string());
        if self.missing.contains(name) {
            return Ok(None);
        }
        self.inner.find_relation(name)
    }
}

/// Frame registry that records every definition request and can be told to
/// reject requests after a number of successes
#[derive(Debug, Default)]
pub struct CountingFrameRegistry {
    inner: InMemoryFrameRegistry,
    requests: Mutex<Vec<String>>,
    fail_after: Option<usize>,
}

impl CountingFrameRegistry {
    /// Registry that accepts every definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that rejects every definition after the first `successes`
    pub fn failing_after(successes: usize) -> Self {
        Self {
            fail_after: Some(successes),
            ..Self::default()
        }
    }

    /// Semantic classes of all definition requests, in call order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of definition requests
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// The wrapped registry
    pub fn inner(&self) -> &InMemoryFrameRegistry {
        &self.inner
    }

    /// Wrap in an `Arc` for handing to a builder
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl FrameRegistry for CountingFrameRegistry {
    fn define_case_frame_with_constraints(
        &self,
        semantic_class: &str,
        constraints: Vec<RelationConstraint>,
    ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>> {
        let attempt = {
            let mut requests = self.requests.lock();
            requests.push(semantic_class.to_string());
            requests.len()
        };
        if let Some(limit) = self.fail_after {
            if attempt > limit {
                return Err(CaseFrameError::Registry(format!(
                    "definition {} rejected",
                    attempt
                )));
            }
        }
        self.inner.define_case_frame_with_constraints(semantic_class, constraints)
    }

    fn get(&self, id: &CaseFrameId) -> CaseFrameResult<Option<Arc<ConstrainedCaseFrame>>> {
        self.inner.get(id)
    }

    fn list_ids(&self) -> CaseFrameResult<Vec<CaseFrameId>> {
        self.inner.list_ids()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
