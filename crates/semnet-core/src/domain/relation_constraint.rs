//! Relation constraints within a case frame
//!
//! A [`RelationConstraint`] says how many arcs of one relation a node built
//! on a frame may carry and whether that count may change afterwards. The
//! standard relations of the network each get one named constraint, grouped
//! in a [`RelationConstraintCatalog`] that is created once per
//! [`ConstraintCatalogCell`].

use once_cell::sync::OnceCell;
use semnet_interfaces::{Relation, RelationProvider};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{CaseFrameError, CaseFrameResult};

/// A relation plus its adjustability and cardinality limit within a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationConstraint {
    relation: Relation,
    adjustable: bool,
    limit: Option<u32>,
}

impl RelationConstraint {
    /// Create a constraint
    pub fn new(relation: Relation, adjustable: bool, limit: Option<u32>) -> Self {
        Self {
            relation,
            adjustable,
            limit,
        }
    }

    /// The constrained relation
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// Name of the constrained relation
    pub fn relation_name(&self) -> &str {
        self.relation.name()
    }

    /// Whether the arc count may change after the node is built
    pub fn is_adjustable(&self) -> bool {
        self.adjustable
    }

    /// Maximum arc count, if bounded
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    /// Whether a node may carry `count` arcs of this relation
    pub fn allows(&self, count: u32) -> bool {
        self.limit.map_or(true, |limit| count <= limit)
    }
}

/// Definition of one standard relation and its default constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StandardRelation {
    /// Relation name
    pub name: &'static str,
    /// Semantic type of the nodes the relation points at
    pub kind: &'static str,
    /// Default adjustability
    pub adjustable: bool,
    /// Default limit
    pub limit: Option<u32>,
}

const fn set(name: &'static str, kind: &'static str) -> StandardRelation {
    StandardRelation { name, kind, adjustable: true, limit: None }
}

const fn single(name: &'static str, kind: &'static str) -> StandardRelation {
    StandardRelation { name, kind, adjustable: false, limit: Some(1) }
}

/// Object slot relations of the action family, in slot order
pub const OBJECT_RELATIONS: [&str; 10] = [
    "obj1", "obj2", "obj3", "obj4", "obj5", "obj6", "obj7", "obj8", "obj9", "obj10",
];

/// Every relation the standard catalog needs, with its default constraint
pub const STANDARD_RELATIONS: &[StandardRelation] = &[
    set("andAnt", "Proposition"),
    set("ant", "Proposition"),
    set("cq", "Proposition"),
    set("arg", "Proposition"),
    single("max", "Entity"),
    single("min", "Entity"),
    single("thresh", "Entity"),
    single("threshMax", "Entity"),
    single("i", "Entity"),
    single("action", "Action"),
    set("obj", "Entity"),
    set("obj1", "Entity"),
    set("obj2", "Entity"),
    set("obj3", "Entity"),
    set("obj4", "Entity"),
    set("obj5", "Entity"),
    set("obj6", "Entity"),
    set("obj7", "Entity"),
    set("obj8", "Entity"),
    set("obj9", "Entity"),
    set("obj10", "Entity"),
    set("precondition", "Proposition"),
    set("act", "Act"),
    set("when", "Proposition"),
    set("do", "Act"),
    set("whenever", "Proposition"),
    set("if", "Proposition"),
    set("effect", "Proposition"),
    set("plan", "Act"),
    set("goal", "Proposition"),
    single("withsome", "Action"),
    set("vars", "Entity"),
    set("suchthat", "Proposition"),
    set("else", "Act"),
];

/// Look up the standard definition of a relation by name
pub fn standard_relation(name: &str) -> Option<&'static StandardRelation> {
    STANDARD_RELATIONS.iter().find(|r| r.name == name)
}

/// Named constraints for every standard relation.
#[derive(Debug, Clone)]
pub struct RelationConstraintCatalog {
    /// Conjunction antecedents
    pub and_ant: RelationConstraint,
    /// Disjunctive antecedent
    pub ant: RelationConstraint,
    /// Consequent
    pub cq: RelationConstraint,
    /// Argument set of and-or and thresh
    pub arg: RelationConstraint,
    /// Upper bound of and-or
    pub max: RelationConstraint,
    /// Lower bound of and-or
    pub min: RelationConstraint,
    /// Threshold
    pub thresh: RelationConstraint,
    /// Upper bound of thresh
    pub thresh_max: RelationConstraint,
    /// Count of numerical entailment
    pub i: RelationConstraint,
    /// Action of an act
    pub action: RelationConstraint,
    /// Single object of an act
    pub obj: RelationConstraint,
    /// `obj1` through `obj10`
    pub objects: [RelationConstraint; 10],
    /// Precondition of an act
    pub precondition: RelationConstraint,
    /// Act of a control rule
    pub act: RelationConstraint,
    /// Trigger of when-do
    pub when: RelationConstraint,
    /// Body of a control rule
    pub do_: RelationConstraint,
    /// Trigger of whenever-do
    pub whenever: RelationConstraint,
    /// Condition of do-if
    pub if_: RelationConstraint,
    /// Effect of an act
    pub effect: RelationConstraint,
    /// Plan of an act or goal
    pub plan: RelationConstraint,
    /// Goal achieved by a plan
    pub goal: RelationConstraint,
    /// With-some control action
    pub withsome: RelationConstraint,
    /// Bound variables of with-some
    pub vars: RelationConstraint,
    /// Restriction on the bound variables
    pub suchthat: RelationConstraint,
    /// Alternative body of with-some
    pub else_: RelationConstraint,
}

impl RelationConstraintCatalog {
    /// Resolve every standard relation through `provider` and attach its
    /// default constraint. Fails on the first relation the provider lacks.
    pub fn initialize(provider: &dyn RelationProvider) -> CaseFrameResult<Self> {
        let resolve = |name: &str| resolve_standard(provider, name);

        let objects: Vec<RelationConstraint> = OBJECT_RELATIONS
            .iter()
            .map(|name| resolve(*name))
            .collect::<CaseFrameResult<_>>()?;
        let objects: [RelationConstraint; 10] = objects.try_into().map_err(|_| {
            CaseFrameError::Bootstrap {
                message: "object slot relations incomplete".to_string(),
                source: None,
            }
        })?;

        let catalog = Self {
            and_ant: resolve("andAnt")?,
            ant: resolve("ant")?,
            cq: resolve("cq")?,
            arg: resolve("arg")?,
            max: resolve("max")?,
            min: resolve("min")?,
            thresh: resolve("thresh")?,
            thresh_max: resolve("threshMax")?,
            i: resolve("i")?,
            action: resolve("action")?,
            obj: resolve("obj")?,
            objects,
            precondition: resolve("precondition")?,
            act: resolve("act")?,
            when: resolve("when")?,
            do_: resolve("do")?,
            whenever: resolve("whenever")?,
            if_: resolve("if")?,
            effect: resolve("effect")?,
            plan: resolve("plan")?,
            goal: resolve("goal")?,
            withsome: resolve("withsome")?,
            vars: resolve("vars")?,
            suchthat: resolve("suchthat")?,
            else_: resolve("else")?,
        };
        debug!(constraints = STANDARD_RELATIONS.len(), "Resolved standard relation constraints");
        Ok(catalog)
    }

    /// Constraint for slot `obj<n>`, with `n` in `1..=10`
    pub fn object(&self, n: usize) -> Option<&RelationConstraint> {
        n.checked_sub(1).and_then(|idx| self.objects.get(idx))
    }

    /// Constraint for a standard relation by name
    pub fn get(&self, name: &str) -> Option<&RelationConstraint> {
        self.iter().find(|c| c.relation_name() == name)
    }

    /// All constraints in standard-table order
    pub fn iter(&self) -> impl Iterator<Item = &RelationConstraint> {
        let head = [
            &self.and_ant,
            &self.ant,
            &self.cq,
            &self.arg,
            &self.max,
            &self.min,
            &self.thresh,
            &self.thresh_max,
            &self.i,
            &self.action,
            &self.obj,
        ];
        let tail = [
            &self.precondition,
            &self.act,
            &self.when,
            &self.do_,
            &self.whenever,
            &self.if_,
            &self.effect,
            &self.plan,
            &self.goal,
            &self.withsome,
            &self.vars,
            &self.suchthat,
            &self.else_,
        ];
        head.into_iter().chain(self.objects.iter()).chain(tail)
    }
}

fn resolve_standard(provider: &dyn RelationProvider, name: &str) -> CaseFrameResult<RelationConstraint> {
    let standard = standard_relation(name).ok_or_else(|| CaseFrameError::Bootstrap {
        message: format!("{} is not a standard relation", name),
        source: None,
    })?;
    let relation = provider
        .relation(name)
        .map_err(|e| CaseFrameError::bootstrap(format!("resolving standard relation {}", name), e))?;
    Ok(RelationConstraint::new(relation, standard.adjustable, standard.limit))
}

/// Guarded, idempotent holder for the standard constraint catalog.
///
/// Anything that builds frames from the standard constraints goes through
/// [`ConstraintCatalogCell::require`] or
/// [`ConstraintCatalogCell::get_or_initialize`], so an uninitialized catalog
/// is reported as [`CaseFrameError::UninitializedConstraintCatalog`].
#[derive(Debug, Default)]
pub struct ConstraintCatalogCell {
    cell: OnceCell<Arc<RelationConstraintCatalog>>,
    initializations: AtomicUsize,
}

impl ConstraintCatalogCell {
    /// Create an empty cell
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the catalog, initializing it from `provider` on first use.
    ///
    /// Concurrent callers block until one initialization finishes. A failed
    /// initialization leaves the cell empty so a later call may retry.
    pub fn get_or_initialize(
        &self,
        provider: &dyn RelationProvider,
    ) -> CaseFrameResult<Arc<RelationConstraintCatalog>> {
        self.cell
            .get_or_try_init(|| {
                let catalog = RelationConstraintCatalog::initialize(provider)?;
                self.initializations.fetch_add(1, Ordering::SeqCst);
                info!("Initialized relation constraint catalog");
                Ok(Arc::new(catalog))
            })
            .map(Arc::clone)
    }

    /// The catalog, if already initialized
    pub fn get(&self) -> Option<Arc<RelationConstraintCatalog>> {
        self.cell.get().cloned()
    }

    /// The catalog, or an error if it was never initialized
    pub fn require(&self) -> CaseFrameResult<Arc<RelationConstraintCatalog>> {
        self.get().ok_or(CaseFrameError::UninitializedConstraintCatalog)
    }

    /// Whether initialization has completed
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of successful initializations (0 or 1)
    pub fn initialization_count(&self) -> usize {
        self.initializations.load(Ordering::SeqCst)
    }
}
