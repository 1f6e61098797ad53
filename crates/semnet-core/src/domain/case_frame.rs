//! Case frames and their canonical identity
//!
//! A case frame is identified by the set of relation names it declares,
//! never by its semantic class: two frames over the same relations share an
//! ID and a frame registry keeps only one of them.

use semnet_interfaces::Relation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::domain::relation_constraint::RelationConstraint;

/// Separator between relation names in a canonical ID
pub const ID_DELIMITER: &str = ",";

/// Canonical identifier of a case frame
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseFrameId(pub String);

impl CaseFrameId {
    /// Wrap an already-canonical ID string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseFrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Compute the canonical ID of a relation-name collection.
///
/// Names are sorted lexicographically and joined by [`ID_DELIMITER`].
/// Repeated names are kept, so `["a", "a"]` yields `"a,a"`.
pub fn canonical_id<'a, I>(names: I) -> CaseFrameId
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    CaseFrameId(names.join(ID_DELIMITER))
}

/// Names that occur more than once in `names`, sorted, each listed once.
pub fn duplicate_names<'a, I>(names: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut names: Vec<&str> = names.into_iter().collect();
    names.sort_unstable();
    let mut duplicates: Vec<&str> = names
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    duplicates.dedup();
    duplicates
}

/// A semantic class paired with the relations that may co-occur under it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFrame {
    semantic_class: String,
    relations: Vec<Relation>,
    id: CaseFrameId,
}

impl CaseFrame {
    /// Build a frame from relation constraints, keeping their order.
    pub fn new(semantic_class: impl Into<String>, constraints: &[RelationConstraint]) -> Self {
        let relations = constraints
            .iter()
            .map(|c| c.relation().clone())
            .collect();
        Self::from_relations(semantic_class, relations)
    }

    /// Build a frame from bare relations, without constraint data.
    pub fn from_relations(semantic_class: impl Into<String>, relations: Vec<Relation>) -> Self {
        let id = canonical_id(relations.iter().map(Relation::name));
        Self {
            semantic_class: semantic_class.into(),
            relations,
            id,
        }
    }

    /// Canonical ID of this frame
    pub fn id(&self) -> &CaseFrameId {
        &self.id
    }

    /// Default semantic class of nodes implementing this frame
    pub fn semantic_class(&self) -> &str {
        &self.semantic_class
    }

    /// Relations in the order they were given
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Relation names in the order they were given
    pub fn relation_names(&self) -> impl Iterator<Item = &str> {
        self.relations.iter().map(Relation::name)
    }

    /// Whether the frame declares a relation with this name
    pub fn has_relation(&self, name: &str) -> bool {
        self.relations.iter().any(|r| r.name() == name)
    }

    /// Number of relations, counting repeats
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// True when the frame declares no relations
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Names that appear more than once in the relation list
    pub fn duplicate_relation_names(&self) -> Vec<&str> {
        duplicate_names(self.relation_names())
    }
}

impl PartialEq for CaseFrame {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CaseFrame {}

impl Hash for CaseFrame {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn constraint(name: &str) -> RelationConstraint {
        RelationConstraint::new(Relation::new(name), true, None)
    }

    #[test]
    fn test_canonical_id_sorts_and_joins() {
        let frame = CaseFrame::new("Proposition", &[constraint("cq"), constraint("andAnt")]);
        assert_eq!(frame.id().as_str(), "andAnt,cq");
    }

    #[test]
    fn test_id_independent_of_order_and_class() {
        let a = CaseFrame::new("Proposition", &[constraint("arg"), constraint("max"), constraint("min")]);
        let b = CaseFrame::new("Act", &[constraint("min"), constraint("arg"), constraint("max")]);
        assert_eq!(a.id(), b.id());
        assert_eq!(a, b);
        assert_ne!(a.semantic_class(), b.semantic_class());
    }

    fn permutations(items: &[Relation]) -> Vec<Vec<Relation>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut all = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                all.push(tail);
            }
        }
        all
    }

    #[test]
    fn test_id_independent_of_every_permutation_and_kind() {
        let first = vec![
            Relation::with_kind("when", "Proposition"),
            Relation::with_kind("do", "Act"),
            Relation::with_kind("else", "Act"),
            Relation::with_kind("vars", "Variable"),
        ];
        let second = vec![
            Relation::with_kind("when", "Entity"),
            Relation::with_kind("do", "Entity"),
            Relation::with_kind("else", "Proposition"),
            Relation::with_kind("vars", "Entity"),
        ];

        let mut ids: Vec<CaseFrameId> = permutations(&first)
            .into_iter()
            .chain(permutations(&second))
            .map(|relations| CaseFrame::from_relations("Proposition", relations).id().clone())
            .collect();
        assert_eq!(ids.len(), 48);
        ids.dedup();
        assert_eq!(ids, vec![CaseFrameId::new("do,else,vars,when")]);
    }

    #[test]
    fn test_duplicate_names_helper() {
        assert_eq!(duplicate_names(["b", "a", "b", "c", "a", "b"]), vec!["a", "b"]);
        assert!(duplicate_names(["a", "b"]).is_empty());
    }

    #[test]
    fn test_relations_keep_input_order() {
        let frame = CaseFrame::new("Act", &[constraint("obj"), constraint("action")]);
        let names: Vec<&str> = frame.relation_names().collect();
        assert_eq!(names, vec!["obj", "action"]);
        assert!(frame.has_relation("action"));
        assert!(!frame.has_relation("obj1"));
        assert_eq!(frame.len(), 2);
    }

    #[test]
    fn test_uppercase_sorts_before_lowercase() {
        let id = canonical_id(["thresh", "threshMax", "arg"]);
        assert_eq!(id.as_str(), "arg,thresh,threshMax");
        assert_eq!(canonical_id(["b", "Z", "a"]).as_str(), "Z,a,b");
    }

    #[test]
    fn test_repeated_names_are_kept() {
        let frame = CaseFrame::new("Proposition", &[constraint("cq"), constraint("ant"), constraint("cq")]);
        assert_eq!(frame.id().as_str(), "ant,cq,cq");
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.duplicate_relation_names(), vec!["cq"]);
    }

    #[test]
    fn test_empty_frame() {
        let frame = CaseFrame::from_relations("Entity", Vec::new());
        assert!(frame.is_empty());
        assert_eq!(frame.id().as_str(), "");
    }
}
