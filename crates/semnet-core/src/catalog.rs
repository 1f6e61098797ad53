//! Standard case-frame catalog
//!
//! Builds the well-known family of frames (logical connectives, the action
//! family, control constructs) through a [`FrameRegistry`]. The result is an
//! explicit [`StandardFrames`] value; hosts thread it to consumers through a
//! [`CatalogContext`].

use anyhow::Context as _;
use semnet_interfaces::RelationProvider;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::CatalogConfig;
use crate::domain::case_frame::{canonical_id, duplicate_names};
use crate::domain::constrained::ConstrainedCaseFrame;
use crate::domain::relation_constraint::{
    ConstraintCatalogCell, RelationConstraint, RelationConstraintCatalog,
};
use crate::domain::repository::FrameRegistry;
use crate::error::{CaseFrameError, CaseFrameResult};

/// Semantic class of propositional frames
pub const PROPOSITION: &str = "Proposition";
/// Semantic class of the action family
pub const ACT: &str = "Act";
/// Semantic class of the with-some frame
pub const CONTROL_ACTION: &str = "ControlAction";

/// Largest number of extra object slots in the action family
pub const MAX_EXTRA_OBJECTS: usize = 9;

/// One entry of the standard catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFrameKind {
    /// andAnt, cq
    AndRule,
    /// ant, cq
    OrRule,
    /// arg, max, min
    AndOrRule,
    /// arg, thresh, threshMax
    ThreshRule,
    /// andAnt, cq, i
    NumericalRule,
    /// action plus object slots; the payload counts extra slots (0..=9)
    Act(usize),
    /// precondition, act
    PreconditionAct,
    /// when, do
    WhenDo,
    /// whenever, do
    WheneverDo,
    /// do, if
    DoIf,
    /// act, effect
    ActEffect,
    /// plan, act
    PlanAct,
    /// plan, goal
    PlanGoal,
    /// withsome, vars, suchthat, do, else
    WithSome,
}

impl StandardFrameKind {
    /// Every standard frame, in definition order
    pub const ALL: [StandardFrameKind; 23] = [
        StandardFrameKind::AndRule,
        StandardFrameKind::OrRule,
        StandardFrameKind::AndOrRule,
        StandardFrameKind::ThreshRule,
        StandardFrameKind::NumericalRule,
        StandardFrameKind::Act(0),
        StandardFrameKind::PreconditionAct,
        StandardFrameKind::WhenDo,
        StandardFrameKind::WheneverDo,
        StandardFrameKind::DoIf,
        StandardFrameKind::ActEffect,
        StandardFrameKind::PlanAct,
        StandardFrameKind::PlanGoal,
        StandardFrameKind::WithSome,
        StandardFrameKind::Act(1),
        StandardFrameKind::Act(2),
        StandardFrameKind::Act(3),
        StandardFrameKind::Act(4),
        StandardFrameKind::Act(5),
        StandardFrameKind::Act(6),
        StandardFrameKind::Act(7),
        StandardFrameKind::Act(8),
        StandardFrameKind::Act(9),
    ];

    /// Semantic class assigned by this frame
    pub fn semantic_class(&self) -> &'static str {
        match self {
            StandardFrameKind::Act(_) => ACT,
            StandardFrameKind::WithSome => CONTROL_ACTION,
            _ => PROPOSITION,
        }
    }

    /// Constraint list of this frame, or `None` for an action arity past
    /// [`MAX_EXTRA_OBJECTS`].
    pub fn constraints(&self, c: &RelationConstraintCatalog) -> Option<Vec<RelationConstraint>> {
        let list = match self {
            StandardFrameKind::AndRule => vec![c.and_ant.clone(), c.cq.clone()],
            StandardFrameKind::OrRule => vec![c.ant.clone(), c.cq.clone()],
            StandardFrameKind::AndOrRule => vec![c.arg.clone(), c.max.clone(), c.min.clone()],
            StandardFrameKind::ThreshRule => {
                vec![c.arg.clone(), c.thresh_max.clone(), c.thresh.clone()]
            }
            StandardFrameKind::NumericalRule => vec![c.and_ant.clone(), c.cq.clone(), c.i.clone()],
            StandardFrameKind::Act(0) => vec![c.action.clone(), c.obj.clone()],
            StandardFrameKind::Act(extra) if *extra <= MAX_EXTRA_OBJECTS => {
                std::iter::once(c.action.clone())
                    .chain(c.objects[..=*extra].iter().cloned())
                    .collect()
            }
            StandardFrameKind::Act(_) => return None,
            StandardFrameKind::PreconditionAct => vec![c.precondition.clone(), c.act.clone()],
            StandardFrameKind::WhenDo => vec![c.when.clone(), c.do_.clone()],
            StandardFrameKind::WheneverDo => vec![c.whenever.clone(), c.do_.clone()],
            StandardFrameKind::DoIf => vec![c.do_.clone(), c.if_.clone()],
            StandardFrameKind::ActEffect => vec![c.act.clone(), c.effect.clone()],
            StandardFrameKind::PlanAct => vec![c.plan.clone(), c.act.clone()],
            StandardFrameKind::PlanGoal => vec![c.plan.clone(), c.goal.clone()],
            StandardFrameKind::WithSome => vec![
                c.withsome.clone(),
                c.vars.clone(),
                c.suchthat.clone(),
                c.do_.clone(),
                c.else_.clone(),
            ],
        };
        Some(list)
    }
}

impl fmt::Display for StandardFrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardFrameKind::AndRule => write!(f, "andRule"),
            StandardFrameKind::OrRule => write!(f, "orRule"),
            StandardFrameKind::AndOrRule => write!(f, "andOrRule"),
            StandardFrameKind::ThreshRule => write!(f, "threshRule"),
            StandardFrameKind::NumericalRule => write!(f, "numericalRule"),
            StandardFrameKind::Act(0) => write!(f, "act"),
            StandardFrameKind::Act(extra) => write!(f, "act{}", extra),
            StandardFrameKind::PreconditionAct => write!(f, "preconditionAct"),
            StandardFrameKind::WhenDo => write!(f, "whenDo"),
            StandardFrameKind::WheneverDo => write!(f, "wheneverDo"),
            StandardFrameKind::DoIf => write!(f, "doIf"),
            StandardFrameKind::ActEffect => write!(f, "actEffect"),
            StandardFrameKind::PlanAct => write!(f, "planAct"),
            StandardFrameKind::PlanGoal => write!(f, "planGoal"),
            StandardFrameKind::WithSome => write!(f, "withSome"),
        }
    }
}

/// The standard frames as registered by one catalog build.
#[derive(Debug, Clone)]
pub struct StandardFrames {
    /// Conjunction
    pub and_rule: Arc<ConstrainedCaseFrame>,
    /// Disjunction
    pub or_rule: Arc<ConstrainedCaseFrame>,
    /// And-or with bounds
    pub and_or_rule: Arc<ConstrainedCaseFrame>,
    /// Threshold
    pub thresh_rule: Arc<ConstrainedCaseFrame>,
    /// Numerical entailment
    pub numerical_rule: Arc<ConstrainedCaseFrame>,
    /// Action family, indexed by number of extra object slots
    pub act: [Arc<ConstrainedCaseFrame>; 10],
    /// Precondition-act
    pub precondition_act: Arc<ConstrainedCaseFrame>,
    /// When-do
    pub when_do: Arc<ConstrainedCaseFrame>,
    /// Whenever-do
    pub whenever_do: Arc<ConstrainedCaseFrame>,
    /// Do-if
    pub do_if: Arc<ConstrainedCaseFrame>,
    /// Act-effect
    pub act_effect: Arc<ConstrainedCaseFrame>,
    /// Plan-act
    pub plan_act: Arc<ConstrainedCaseFrame>,
    /// Plan-goal
    pub plan_goal: Arc<ConstrainedCaseFrame>,
    /// With-some
    pub with_some: Arc<ConstrainedCaseFrame>,
}

impl StandardFrames {
    /// Frame for `kind`
    pub fn get(&self, kind: StandardFrameKind) -> Option<&Arc<ConstrainedCaseFrame>> {
        let frame = match kind {
            StandardFrameKind::AndRule => &self.and_rule,
            StandardFrameKind::OrRule => &self.or_rule,
            StandardFrameKind::AndOrRule => &self.and_or_rule,
            StandardFrameKind::ThreshRule => &self.thresh_rule,
            StandardFrameKind::NumericalRule => &self.numerical_rule,
            StandardFrameKind::Act(extra) => return self.act.get(extra),
            StandardFrameKind::PreconditionAct => &self.precondition_act,
            StandardFrameKind::WhenDo => &self.when_do,
            StandardFrameKind::WheneverDo => &self.whenever_do,
            StandardFrameKind::DoIf => &self.do_if,
            StandardFrameKind::ActEffect => &self.act_effect,
            StandardFrameKind::PlanAct => &self.plan_act,
            StandardFrameKind::PlanGoal => &self.plan_goal,
            StandardFrameKind::WithSome => &self.with_some,
        };
        Some(frame)
    }

    /// Action frame with `extra` object slots beyond the first
    pub fn action(&self, extra: usize) -> Option<&Arc<ConstrainedCaseFrame>> {
        self.act.get(extra)
    }

    /// All frames in definition order
    pub fn iter(&self) -> impl Iterator<Item = (StandardFrameKind, &Arc<ConstrainedCaseFrame>)> {
        StandardFrameKind::ALL
            .into_iter()
            .filter_map(move |kind| self.get(kind).map(|frame| (kind, frame)))
    }

    /// Number of standard frames
    pub fn len(&self) -> usize {
        StandardFrameKind::ALL.len()
    }

    /// Always false
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builds the standard catalog against a relation provider and a registry.
///
/// The constraint catalog is initialized on the first successful build and
/// reused afterwards, including by other builders sharing the same cell.
/// Every build re-submits all frame definitions and relies on the registry
/// to return existing frames.
pub struct StandardCatalogBuilder {
    relations: Arc<dyn RelationProvider>,
    registry: Arc<dyn FrameRegistry>,
    constraints: Arc<ConstraintCatalogCell>,
    config: CatalogConfig,
}

impl StandardCatalogBuilder {
    /// Create a builder with default configuration
    pub fn new(relations: Arc<dyn RelationProvider>, registry: Arc<dyn FrameRegistry>) -> Self {
        Self::with_config(relations, registry, CatalogConfig::default())
    }

    /// Create a builder with explicit configuration
    pub fn with_config(
        relations: Arc<dyn RelationProvider>,
        registry: Arc<dyn FrameRegistry>,
        config: CatalogConfig,
    ) -> Self {
        Self::with_cell(relations, registry, config, Arc::new(ConstraintCatalogCell::new()))
    }

    /// Create a builder that initializes or reuses `constraints`
    pub fn with_cell(
        relations: Arc<dyn RelationProvider>,
        registry: Arc<dyn FrameRegistry>,
        config: CatalogConfig,
        constraints: Arc<ConstraintCatalogCell>,
    ) -> Self {
        Self {
            relations,
            registry,
            constraints,
            config,
        }
    }

    /// The constraint catalog cell used by this builder
    pub fn constraint_catalog(&self) -> &Arc<ConstraintCatalogCell> {
        &self.constraints
    }

    /// The registry frames are defined through
    pub fn registry(&self) -> &Arc<dyn FrameRegistry> {
        &self.registry
    }

    /// Active configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Initialize the constraint catalog if needed, then define every
    /// standard frame in order.
    ///
    /// A failure stops the build; frames defined before it stay registered.
    pub fn build(&self) -> CaseFrameResult<StandardFrames> {
        info!("Building standard case frame catalog");
        let catalog = self
            .constraints
            .get_or_initialize(self.relations.as_ref())
            .map_err(|e| {
                error!(error = %e, "Standard catalog bootstrap failed");
                e
            })?;

        let define = |kind: StandardFrameKind| self.define_with(kind, &catalog);

        let and_rule = define(StandardFrameKind::AndRule)?;
        let or_rule = define(StandardFrameKind::OrRule)?;
        let and_or_rule = define(StandardFrameKind::AndOrRule)?;
        let thresh_rule = define(StandardFrameKind::ThreshRule)?;
        let numerical_rule = define(StandardFrameKind::NumericalRule)?;
        let act0 = define(StandardFrameKind::Act(0))?;
        let precondition_act = define(StandardFrameKind::PreconditionAct)?;
        let when_do = define(StandardFrameKind::WhenDo)?;
        let whenever_do = define(StandardFrameKind::WheneverDo)?;
        let do_if = define(StandardFrameKind::DoIf)?;
        let act_effect = define(StandardFrameKind::ActEffect)?;
        let plan_act = define(StandardFrameKind::PlanAct)?;
        let plan_goal = define(StandardFrameKind::PlanGoal)?;
        let with_some = define(StandardFrameKind::WithSome)?;

        let mut act = Vec::with_capacity(MAX_EXTRA_OBJECTS + 1);
        act.push(act0);
        for extra in 1..=MAX_EXTRA_OBJECTS {
            act.push(define(StandardFrameKind::Act(extra))?);
        }
        let act: [Arc<ConstrainedCaseFrame>; 10] = act
            .try_into()
            .map_err(|_| CaseFrameError::Registry("action family incomplete".to_string()))?;

        let frames = StandardFrames {
            and_rule,
            or_rule,
            and_or_rule,
            thresh_rule,
            numerical_rule,
            act,
            precondition_act,
            when_do,
            whenever_do,
            do_if,
            act_effect,
            plan_act,
            plan_goal,
            with_some,
        };
        info!(frames = frames.len(), registered = self.registry.len(), "Standard case frame catalog ready");
        Ok(frames)
    }

    /// Define a single standard frame. The constraint catalog must already
    /// be initialized by [`StandardCatalogBuilder::build`].
    pub fn define_standard(&self, kind: StandardFrameKind) -> CaseFrameResult<Arc<ConstrainedCaseFrame>> {
        let catalog = self.constraints.require()?;
        self.define_with(kind, &catalog)
    }

    /// Define an arbitrary frame through the registry.
    pub fn define_frame(
        &self,
        semantic_class: &str,
        constraints: Vec<RelationConstraint>,
    ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>> {
        if self.config.warn_on_duplicate_relations {
            let names = || constraints.iter().map(RelationConstraint::relation_name);
            let duplicates = duplicate_names(names());
            if !duplicates.is_empty() {
                let id = canonical_id(names());
                warn!(frame = %id, ?duplicates, "Case frame definition repeats a relation name; later constraint wins");
            }
        }
        self.registry.define_case_frame_with_constraints(semantic_class, constraints)
    }

    fn define_with(
        &self,
        kind: StandardFrameKind,
        catalog: &RelationConstraintCatalog,
    ) -> CaseFrameResult<Arc<ConstrainedCaseFrame>> {
        let constraints = kind.constraints(catalog).ok_or_else(|| {
            CaseFrameError::Registry(format!("{} is not a standard frame", kind))
        })?;
        let frame = self.define_frame(kind.semantic_class(), constraints)?;
        debug!(kind = %kind, frame = %frame.id(), "Defined standard case frame");
        Ok(frame)
    }
}

/// Catalog state handed to consumers in place of process-wide globals.
#[derive(Clone)]
pub struct CatalogContext {
    config: CatalogConfig,
    registry: Arc<dyn FrameRegistry>,
    constraints: Arc<ConstraintCatalogCell>,
    standard_frames: StandardFrames,
}

impl CatalogContext {
    /// Build the standard catalog and wrap it with its configuration.
    ///
    /// Any error here is fatal for features that depend on standard frames.
    pub fn bootstrap(
        config: CatalogConfig,
        relations: Arc<dyn RelationProvider>,
        registry: Arc<dyn FrameRegistry>,
    ) -> anyhow::Result<Self> {
        Self::bootstrap_with_cell(config, relations, registry, Arc::new(ConstraintCatalogCell::new()))
    }

    /// Like [`CatalogContext::bootstrap`], reusing the constraint catalog in
    /// `constraints` when an earlier bootstrap already initialized it.
    pub fn bootstrap_with_cell(
        config: CatalogConfig,
        relations: Arc<dyn RelationProvider>,
        registry: Arc<dyn FrameRegistry>,
        constraints: Arc<ConstraintCatalogCell>,
    ) -> anyhow::Result<Self> {
        let builder = StandardCatalogBuilder::with_cell(
            relations,
            Arc::clone(&registry),
            config.clone(),
            Arc::clone(&constraints),
        );
        let standard_frames = builder
            .build()
            .context("Failed to build standard case frame catalog")?;
        Ok(Self {
            config,
            registry,
            constraints,
            standard_frames,
        })
    }

    /// Constraint catalog cell shared with later bootstraps
    pub fn constraint_catalog(&self) -> &Arc<ConstraintCatalogCell> {
        &self.constraints
    }

    /// Active configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Registry holding the standard frames
    pub fn registry(&self) -> &Arc<dyn FrameRegistry> {
        &self.registry
    }

    /// The standard frames
    pub fn standard_frames(&self) -> &StandardFrames {
        &self.standard_frames
    }
}

impl fmt::Debug for CatalogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogContext")
            .field("config", &self.config)
            .field("registered", &self.registry.len())
            .field("constraints_initialized", &self.constraints.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::relation_constraint::standard_relation;
    use pretty_assertions::assert_eq;
    use semnet_interfaces::{InterfaceResult, Relation};

    struct StandardOnly;

    impl RelationProvider for StandardOnly {
        fn find_relation(&self, name: &str) -> InterfaceResult<Option<Relation>> {
            Ok(standard_relation(name).map(|r| Relation::with_kind(r.name, r.kind)))
        }
    }

    fn catalog() -> RelationConstraintCatalog {
        RelationConstraintCatalog::initialize(&StandardOnly).unwrap()
    }

    fn id_of(kind: StandardFrameKind) -> String {
        let constraints = kind.constraints(&catalog()).unwrap();
        canonical_id(constraints.iter().map(RelationConstraint::relation_name)).0
    }

    #[test]
    fn test_connective_ids() {
        assert_eq!(id_of(StandardFrameKind::AndRule), "andAnt,cq");
        assert_eq!(id_of(StandardFrameKind::OrRule), "ant,cq");
        assert_eq!(id_of(StandardFrameKind::AndOrRule), "arg,max,min");
        assert_eq!(id_of(StandardFrameKind::ThreshRule), "arg,thresh,threshMax");
        assert_eq!(id_of(StandardFrameKind::NumericalRule), "andAnt,cq,i");
    }

    #[test]
    fn test_control_ids() {
        assert_eq!(id_of(StandardFrameKind::PreconditionAct), "act,precondition");
        assert_eq!(id_of(StandardFrameKind::WhenDo), "do,when");
        assert_eq!(id_of(StandardFrameKind::WheneverDo), "do,whenever");
        assert_eq!(id_of(StandardFrameKind::DoIf), "do,if");
        assert_eq!(id_of(StandardFrameKind::ActEffect), "act,effect");
        assert_eq!(id_of(StandardFrameKind::PlanAct), "act,plan");
        assert_eq!(id_of(StandardFrameKind::PlanGoal), "goal,plan");
        assert_eq!(id_of(StandardFrameKind::WithSome), "do,else,suchthat,vars,withsome");
    }

    #[test]
    fn test_action_family_ids() {
        assert_eq!(id_of(StandardFrameKind::Act(0)), "action,obj");
        assert_eq!(id_of(StandardFrameKind::Act(1)), "action,obj1,obj2");
        assert_eq!(
            id_of(StandardFrameKind::Act(9)),
            "action,obj1,obj10,obj2,obj3,obj4,obj5,obj6,obj7,obj8,obj9"
        );
        assert!(StandardFrameKind::Act(10).constraints(&catalog()).is_none());
    }

    #[test]
    fn test_semantic_classes() {
        assert_eq!(StandardFrameKind::AndRule.semantic_class(), PROPOSITION);
        assert_eq!(StandardFrameKind::DoIf.semantic_class(), PROPOSITION);
        assert_eq!(StandardFrameKind::Act(4).semantic_class(), ACT);
        assert_eq!(StandardFrameKind::WithSome.semantic_class(), CONTROL_ACTION);
    }

    #[test]
    fn test_all_kinds_have_distinct_ids() {
        let mut ids: Vec<String> = StandardFrameKind::ALL.iter().map(|k| id_of(*k)).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), StandardFrameKind::ALL.len());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(StandardFrameKind::Act(0).to_string(), "act");
        assert_eq!(StandardFrameKind::Act(7).to_string(), "act7");
        assert_eq!(StandardFrameKind::WithSome.to_string(), "withSome");
    }
}
