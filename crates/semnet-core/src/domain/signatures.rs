//! Priority-ordered signature collection
//!
//! Keeps the priority order and the ID index behind one type so the two can
//! never disagree: every ID in the order has exactly one indexed signature
//! and vice versa.

use semnet_interfaces::{Signature, SignatureId};
use std::collections::HashMap;
use std::sync::Arc;

/// Why a mutation of [`PrioritizedSignatures`] was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureRejection {
    /// The ID is already present
    Duplicate,
    /// The ID is not present
    Missing,
    /// The priority lies past the end of the order
    OutOfRange {
        /// Current number of signatures
        len: usize,
    },
}

/// Signatures of one case frame, most specific first.
#[derive(Debug, Clone, Default)]
pub struct PrioritizedSignatures {
    order: Vec<SignatureId>,
    by_id: HashMap<SignatureId, Arc<dyn Signature>>,
}

impl PrioritizedSignatures {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert at `priority`, or append when `None`. Returns the position.
    pub fn insert(
        &mut self,
        signature: Arc<dyn Signature>,
        priority: Option<usize>,
    ) -> Result<usize, SignatureRejection> {
        let id = signature.id().clone();
        if self.by_id.contains_key(&id) {
            return Err(SignatureRejection::Duplicate);
        }
        let position = match priority {
            Some(p) if p > self.order.len() => {
                return Err(SignatureRejection::OutOfRange { len: self.order.len() })
            }
            Some(p) => p,
            None => self.order.len(),
        };
        self.order.insert(position, id.clone());
        self.by_id.insert(id, signature);
        Ok(position)
    }

    /// Remove by ID. Returns the position the signature held.
    pub fn remove(&mut self, id: &SignatureId) -> Result<(usize, Arc<dyn Signature>), SignatureRejection> {
        let position = self.position(id).ok_or(SignatureRejection::Missing)?;
        let signature = self.by_id.remove(id).ok_or(SignatureRejection::Missing)?;
        self.order.remove(position);
        Ok((position, signature))
    }

    /// Position of `id` in priority order
    pub fn position(&self, id: &SignatureId) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == id)
    }

    /// Signature registered under `id`
    pub fn get(&self, id: &SignatureId) -> Option<&Arc<dyn Signature>> {
        self.by_id.get(id)
    }

    /// Whether `id` is registered
    pub fn contains(&self, id: &SignatureId) -> bool {
        self.by_id.contains_key(id)
    }

    /// IDs in priority order
    pub fn order(&self) -> &[SignatureId] {
        &self.order
    }

    /// Signatures in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Signature>> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Number of signatures
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no signature is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
