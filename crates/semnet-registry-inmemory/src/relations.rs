use parking_lot::RwLock;
use semnet_core::STANDARD_RELATIONS;
use semnet_interfaces::{InterfaceResult, Relation, RelationProvider, DEFAULT_RELATION_KIND};
use std::collections::HashMap;
use tracing::debug;

/// In-memory relation registry keyed by relation name
#[derive(Debug, Default)]
pub struct InMemoryRelationRegistry {
    relations: RwLock<HashMap<String, Relation>>,
}

impl InMemoryRelationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every standard relation
    pub fn with_standard_relations() -> Self {
        let registry = Self::new();
        {
            let mut relations = registry.relations.write();
            for standard in STANDARD_RELATIONS {
                relations
                    .entry(standard.name.to_string())
                    .or_insert_with(|| Relation::with_kind(standard.name, standard.kind));
            }
        }
        registry
    }

    /// Define a relation with the default kind
    pub fn define_relation(&self, name: &str) -> InterfaceResult<Relation> {
        self.define_relation_with_kind(name, DEFAULT_RELATION_KIND)
    }

    /// Define a relation. An existing relation with the same name is
    /// returned unchanged.
    pub fn define_relation_with_kind(&self, name: &str, kind: &str) -> InterfaceResult<Relation> {
        let candidate = Relation::try_new(name)?;
        let mut relations = self.relations.write();
        let relation = relations
            .entry(candidate.name().to_string())
            .or_insert_with(|| {
                debug!(relation = name, kind, "Defined relation");
                Relation::with_kind(name, kind)
            });
        Ok(relation.clone())
    }

    /// Names of all defined relations, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.relations.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of defined relations
    pub fn len(&self) -> usize {
        self.relations.read().len()
    }

    /// True when no relation is defined
    pub fn is_empty(&self) -> bool {
        self.relations.read().is_empty()
    }
}

impl RelationProvider for InMemoryRelationRegistry {
    fn find_relation(&self, name: &str) -> InterfaceResult<Option<Relation>> {
        Ok(self.relations.read().get(name).cloned())
    }
}
