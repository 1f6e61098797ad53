//! Mock implementations of the collaborator traits.

use mockall::mock;
use semnet_core::{CaseFrameId, CaseFrameResult, ConstrainedCaseFrame, FrameRegistry, RelationConstraint};
use semnet_interfaces::{InterfaceResult, Relation, RelationProvider};
use std::sync::Arc;

mock! {
    /// Mock frame registry
    pub FrameRegistry {}

    impl FrameRegistry for FrameRegistry {
        fn define_case_frame_with_constraints(
            &self,
            semantic_class: &str,
            constraints: Vec<RelationConstraint>,
        ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>>;
        fn get(&self, id: &CaseFrameId) -> CaseFrameResult<Option<Arc<ConstrainedCaseFrame>>>;
        fn list_ids(&self) -> CaseFrameResult<Vec<CaseFrameId>>;
        fn len(&self) -> usize;
    }
}

mock! {
    /// Mock relation provider
    pub RelationProvider {}

    impl RelationProvider for RelationProvider {
        fn find_relation(&self, name: &str) -> InterfaceResult<Option<Relation>>;
    }
}
