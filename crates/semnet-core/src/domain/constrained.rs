//! Case frames with per-relation constraints and prioritized signatures

use parking_lot::RwLock;
use semnet_interfaces::{Relation, Signature, SignatureId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::case_frame::{CaseFrame, CaseFrameId};
use crate::domain::relation_constraint::RelationConstraint;
use crate::domain::signatures::{PrioritizedSignatures, SignatureRejection};
use crate::error::{CaseFrameError, CaseFrameResult};

/// A case frame whose relations carry constraints and which holds a
/// priority-ordered set of alternative signatures.
///
/// Everything except the signature collection is fixed at construction.
/// Signature mutations take a write lock; reads take a read lock and return
/// snapshots, so a reader sees either the state before a mutation or the
/// state after it.
pub struct ConstrainedCaseFrame {
    frame: CaseFrame,
    constraints_by_relation_name: HashMap<String, RelationConstraint>,
    signatures: RwLock<PrioritizedSignatures>,
}

impl ConstrainedCaseFrame {
    /// Build a frame from its constraints.
    ///
    /// If two constraints share a relation name, both appear in the relation
    /// list and the ID, and the later one wins in the constraint map.
    pub fn new(semantic_class: impl Into<String>, constraints: Vec<RelationConstraint>) -> Self {
        let frame = CaseFrame::new(semantic_class, &constraints);
        let duplicates = frame.duplicate_relation_names();
        if !duplicates.is_empty() {
            debug!(frame = %frame.id(), ?duplicates, "Case frame repeats relation names");
        }
        let constraints_by_relation_name = constraints
            .into_iter()
            .map(|c| (c.relation_name().to_string(), c))
            .collect();
        Self {
            frame,
            constraints_by_relation_name,
            signatures: RwLock::new(PrioritizedSignatures::new()),
        }
    }

    /// The underlying case frame
    pub fn frame(&self) -> &CaseFrame {
        &self.frame
    }

    /// Canonical ID of the frame
    pub fn id(&self) -> &CaseFrameId {
        self.frame.id()
    }

    /// Default semantic class of the frame
    pub fn semantic_class(&self) -> &str {
        self.frame.semantic_class()
    }

    /// Relations of the frame in definition order
    pub fn relations(&self) -> &[Relation] {
        self.frame.relations()
    }

    /// Constraint for `relation`, or `None` if the frame lacks it
    pub fn lookup_constraint(&self, relation: &Relation) -> Option<&RelationConstraint> {
        self.lookup_constraint_by_name(relation.name())
    }

    /// Constraint for the relation named `name`
    pub fn lookup_constraint_by_name(&self, name: &str) -> Option<&RelationConstraint> {
        self.constraints_by_relation_name.get(name)
    }

    /// All distinct constraints, in no particular order
    pub fn constraints(&self) -> impl Iterator<Item = &RelationConstraint> {
        self.constraints_by_relation_name.values()
    }

    /// Add a signature at `priority`, or last when `None`.
    ///
    /// Returns the position it was inserted at. Fails softly with
    /// `DuplicateSignature` or `PriorityOutOfRange`, changing nothing.
    pub fn add_signature(
        &self,
        signature: Arc<dyn Signature>,
        priority: Option<usize>,
    ) -> CaseFrameResult<usize> {
        let id = signature.id().clone();
        let mut signatures = self.signatures.write();
        match signatures.insert(signature, priority) {
            Ok(position) => {
                debug!(frame = %self.id(), signature = %id, position, "Added case frame signature");
                Ok(position)
            }
            Err(SignatureRejection::OutOfRange { len }) => {
                warn!(frame = %self.id(), signature = %id, ?priority, len, "Signature priority out of range");
                Err(CaseFrameError::PriorityOutOfRange {
                    priority: priority.unwrap_or(len),
                    len,
                })
            }
            Err(_) => Err(CaseFrameError::DuplicateSignature {
                frame: self.id().clone(),
                signature: id,
            }),
        }
    }

    /// Remove the signature with `id`. Returns the position it held.
    pub fn remove_signature(&self, id: &SignatureId) -> CaseFrameResult<usize> {
        let mut signatures = self.signatures.write();
        match signatures.remove(id) {
            Ok((position, _)) => {
                debug!(frame = %self.id(), signature = %id, position, "Removed case frame signature");
                Ok(position)
            }
            Err(_) => Err(CaseFrameError::SignatureNotFound {
                frame: self.id().clone(),
                signature: id.clone(),
            }),
        }
    }

    /// Remove a signature by the ID it carries
    pub fn remove_signature_of(&self, signature: &dyn Signature) -> CaseFrameResult<usize> {
        self.remove_signature(signature.id())
    }

    /// Snapshot of signature IDs, most specific first
    pub fn signature_order(&self) -> Vec<SignatureId> {
        self.signatures.read().order().to_vec()
    }

    /// Snapshot of signatures, most specific first
    pub fn signatures(&self) -> Vec<Arc<dyn Signature>> {
        self.signatures.read().iter().cloned().collect()
    }

    /// Signature registered under `id`
    pub fn signature(&self, id: &SignatureId) -> Option<Arc<dyn Signature>> {
        self.signatures.read().get(id).cloned()
    }

    /// Whether a signature with `id` is attached
    pub fn contains_signature(&self, id: &SignatureId) -> bool {
        self.signatures.read().contains(id)
    }

    /// Number of attached signatures
    pub fn signature_count(&self) -> usize {
        self.signatures.read().len()
    }

    /// Run `f` against a consistent view of the signatures under the read lock.
    ///
    /// Writers wait until `f` returns, so keep it short.
    pub fn with_signatures<R>(&self, f: impl FnOnce(&PrioritizedSignatures) -> R) -> R {
        f(&self.signatures.read())
    }
}

impl fmt::Debug for ConstrainedCaseFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstrainedCaseFrame")
            .field("id", self.id())
            .field("semantic_class", &self.semantic_class())
            .field("signatures", &self.signature_order())
            .finish()
    }
}

impl PartialEq for ConstrainedCaseFrame {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for ConstrainedCaseFrame {}

impl AsRef<CaseFrame> for ConstrainedCaseFrame {
    fn as_ref(&self) -> &CaseFrame {
        &self.frame
    }
}
