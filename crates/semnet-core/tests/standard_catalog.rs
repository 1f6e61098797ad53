use pretty_assertions::assert_eq;
use semnet_core::{
    CaseFrameError, CaseFrameId, CatalogConfig, CatalogContext, ConstraintCatalogCell,
    FrameRegistry, StandardCatalogBuilder, StandardFrameKind, ACT, CONTROL_ACTION, PROPOSITION,
};
use semnet_interfaces::{Relation, RelationProvider};
use semnet_registry_inmemory::{InMemoryFrameRegistry, InMemoryRelationRegistry};
use semnet_test_utils::{
    init_test_tracing, set_constraint, signature, single_constraint, CountingFrameRegistry,
    FailingRelationProvider, MockFrameRegistry, MockRelationProvider,
};
use std::sync::Arc;

fn standard_relations() -> Arc<InMemoryRelationRegistry> {
    Arc::new(InMemoryRelationRegistry::with_standard_relations())
}

#[test]
fn test_build_defines_every_standard_frame() {
    init_test_tracing();
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let builder = StandardCatalogBuilder::new(standard_relations(), registry.clone());

    let frames = builder.build().unwrap();

    assert_eq!(registry.len(), 23);
    assert_eq!(frames.iter().count(), 23);
    for (kind, frame) in frames.iter() {
        let registered = registry.get(frame.id()).unwrap().unwrap();
        assert!(Arc::ptr_eq(&registered, frame), "{} not registered", kind);
        assert_eq!(frame.semantic_class(), kind.semantic_class());
    }
}

#[test]
fn test_action_family_ids() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let frames = StandardCatalogBuilder::new(standard_relations(), registry)
        .build()
        .unwrap();

    let expected = [
        "action,obj",
        "action,obj1,obj2",
        "action,obj1,obj2,obj3",
        "action,obj1,obj2,obj3,obj4",
        "action,obj1,obj2,obj3,obj4,obj5",
        "action,obj1,obj2,obj3,obj4,obj5,obj6",
        "action,obj1,obj2,obj3,obj4,obj5,obj6,obj7",
        "action,obj1,obj2,obj3,obj4,obj5,obj6,obj7,obj8",
        "action,obj1,obj2,obj3,obj4,obj5,obj6,obj7,obj8,obj9",
        "action,obj1,obj10,obj2,obj3,obj4,obj5,obj6,obj7,obj8,obj9",
    ];
    for (extra, id) in expected.iter().enumerate() {
        let frame = frames.action(extra).unwrap();
        assert_eq!(frame.id().as_str(), *id);
        assert_eq!(frame.semantic_class(), ACT);
        assert_eq!(frame.relations().len(), extra + 2);
    }
    assert!(frames.action(10).is_none());
}

#[test]
fn test_standard_constraints_attached() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let frames = StandardCatalogBuilder::new(standard_relations(), registry)
        .build()
        .unwrap();

    let and_or = &frames.and_or_rule;
    assert_eq!(and_or.id().as_str(), "arg,max,min");
    let max = and_or.lookup_constraint(&Relation::new("max")).unwrap();
    assert!(!max.is_adjustable());
    assert_eq!(max.limit(), Some(1));
    let arg = and_or.lookup_constraint(&Relation::new("arg")).unwrap();
    assert!(arg.is_adjustable());
    assert_eq!(arg.limit(), None);
    assert!(and_or.lookup_constraint(&Relation::new("cq")).is_none());

    let with_some = &frames.with_some;
    assert_eq!(with_some.id().as_str(), "do,else,suchthat,vars,withsome");
    assert_eq!(with_some.semantic_class(), CONTROL_ACTION);
    assert_eq!(frames.do_if.semantic_class(), PROPOSITION);
    assert_eq!(
        frames.get(StandardFrameKind::NumericalRule).map(|f| f.id().as_str()),
        Some("andAnt,cq,i")
    );
}

#[test]
fn test_second_build_is_idempotent() {
    let registry = Arc::new(CountingFrameRegistry::new());
    let builder = StandardCatalogBuilder::new(standard_relations(), registry.clone());

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();

    assert_eq!(builder.constraint_catalog().initialization_count(), 1);
    assert_eq!(registry.len(), 23);
    assert_eq!(registry.request_count(), 46);
    for ((kind, a), (_, b)) in first.iter().zip(second.iter()) {
        assert!(Arc::ptr_eq(a, b), "{} redefined", kind);
    }
}

#[test]
fn test_builders_sharing_a_cell_initialize_once() {
    let relations = Arc::new(FailingRelationProvider::without(&[]));
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let cell = Arc::new(ConstraintCatalogCell::new());

    let first = StandardCatalogBuilder::with_cell(
        relations.clone(),
        registry.clone(),
        CatalogConfig::default(),
        cell.clone(),
    );
    let second = StandardCatalogBuilder::with_cell(
        relations.clone(),
        registry.clone(),
        CatalogConfig::default(),
        cell.clone(),
    );
    let lookups_per_initialization = {
        first.build().unwrap();
        relations.lookups().len()
    };
    let frames = second.build().unwrap();

    assert_eq!(cell.initialization_count(), 1);
    assert_eq!(relations.lookups().len(), lookups_per_initialization);
    assert!(Arc::ptr_eq(first.constraint_catalog(), second.constraint_catalog()));
    assert_eq!(frames.when_do.id().as_str(), "do,when");
    assert_eq!(registry.len(), 23);
}

#[test]
fn test_repeated_context_bootstrap_reuses_constraint_catalog() {
    let relations = standard_relations();
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let cell = Arc::new(ConstraintCatalogCell::new());

    let first = CatalogContext::bootstrap_with_cell(
        CatalogConfig::default(),
        relations.clone(),
        registry.clone(),
        cell.clone(),
    )
    .unwrap();
    let second = CatalogContext::bootstrap_with_cell(
        CatalogConfig::default(),
        relations,
        registry.clone(),
        Arc::clone(first.constraint_catalog()),
    )
    .unwrap();

    assert_eq!(cell.initialization_count(), 1);
    assert!(Arc::ptr_eq(second.constraint_catalog(), &cell));
    assert!(Arc::ptr_eq(
        &first.standard_frames().with_some,
        &second.standard_frames().with_some
    ));
    assert_eq!(registry.len(), 23);
}

#[test]
fn test_definition_order() {
    let registry = Arc::new(CountingFrameRegistry::new());
    StandardCatalogBuilder::new(standard_relations(), registry.clone())
        .build()
        .unwrap();

    let classes = registry.requests();
    assert_eq!(classes.len(), 23);
    assert_eq!(&classes[..5], &[PROPOSITION; 5]);
    assert_eq!(classes[5], ACT);
    assert_eq!(classes[13], CONTROL_ACTION);
    assert!(classes[14..].iter().all(|c| c == ACT));
}

#[test]
fn test_existing_frame_keeps_its_semantic_class() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let custom = registry
        .define_case_frame_with_constraints("Entity", vec![set_constraint("ant"), set_constraint("cq")])
        .unwrap();

    let frames = StandardCatalogBuilder::new(standard_relations(), registry.clone())
        .build()
        .unwrap();

    assert!(Arc::ptr_eq(&frames.or_rule, &custom));
    assert_eq!(frames.or_rule.semantic_class(), "Entity");
    assert_eq!(registry.len(), 23);
}

#[test]
fn test_missing_relation_is_fatal_bootstrap_error() {
    let provider = Arc::new(FailingRelationProvider::without(&["withsome"]));
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let builder = StandardCatalogBuilder::new(provider.clone(), registry.clone());

    let err = builder.build().unwrap_err();

    match &err {
        CaseFrameError::Bootstrap { message, source } => {
            assert!(message.contains("withsome"));
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.is_fatal());
    assert!(!builder.constraint_catalog().is_initialized());
    assert!(registry.is_empty());
    assert!(provider.lookups().contains(&"withsome".to_string()));
}

#[test]
fn test_registry_failure_keeps_earlier_frames() {
    let registry = Arc::new(CountingFrameRegistry::failing_after(3));
    let builder = StandardCatalogBuilder::new(standard_relations(), registry.clone());

    let err = builder.build().unwrap_err();

    assert!(matches!(err, CaseFrameError::Registry(_)));
    assert_eq!(registry.len(), 3);
    let ids = registry.list_ids().unwrap();
    assert_eq!(
        ids,
        vec![
            CaseFrameId::new("andAnt,cq"),
            CaseFrameId::new("ant,cq"),
            CaseFrameId::new("arg,max,min"),
        ]
    );
}

#[test]
fn test_define_standard_requires_initialized_catalog() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let builder = StandardCatalogBuilder::new(standard_relations(), registry.clone());

    let err = builder.define_standard(StandardFrameKind::WhenDo).unwrap_err();
    assert_eq!(err, CaseFrameError::UninitializedConstraintCatalog);
    assert!(err.is_fatal());
    assert!(registry.is_empty());

    builder.build().unwrap();
    let when_do = builder.define_standard(StandardFrameKind::WhenDo).unwrap();
    assert_eq!(when_do.id().as_str(), "do,when");
    assert!(builder.define_standard(StandardFrameKind::Act(12)).is_err());
}

#[test]
fn test_define_frame_with_repeated_relation() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let builder = StandardCatalogBuilder::new(standard_relations(), registry);

    let frame = builder
        .define_frame("Proposition", vec![set_constraint("member"), single_constraint("member")])
        .unwrap();

    assert_eq!(frame.id().as_str(), "member,member");
    assert_eq!(frame.lookup_constraint_by_name("member").and_then(|c| c.limit()), Some(1));
}

#[test]
fn test_signatures_on_standard_frame() {
    let registry = Arc::new(InMemoryFrameRegistry::new());
    let frames = StandardCatalogBuilder::new(standard_relations(), registry.clone())
        .build()
        .unwrap();

    frames.when_do.add_signature(signature("general"), None).unwrap();
    frames.when_do.add_signature(signature("specific"), Some(0)).unwrap();

    let looked_up = registry.get(&CaseFrameId::new("do,when")).unwrap().unwrap();
    let order: Vec<String> = looked_up.signature_order().into_iter().map(|id| id.0).collect();
    assert_eq!(order, vec!["specific", "general"]);
}

#[test]
fn test_context_bootstrap() {
    let registry: Arc<dyn FrameRegistry> = Arc::new(InMemoryFrameRegistry::new());
    let context =
        CatalogContext::bootstrap(CatalogConfig::default(), standard_relations(), registry).unwrap();

    assert_eq!(context.registry().len(), 23);
    assert_eq!(context.standard_frames().plan_goal.id().as_str(), "goal,plan");
    assert_eq!(context.config(), &CatalogConfig::default());
}

#[test]
fn test_context_bootstrap_failure_carries_cause() {
    let provider = Arc::new(FailingRelationProvider::without(&["obj3"]));
    let registry = Arc::new(InMemoryFrameRegistry::new());

    let err = CatalogContext::bootstrap(CatalogConfig::default(), provider, registry).unwrap_err();

    assert!(err.to_string().contains("standard case frame catalog"));
    let cause = err.downcast_ref::<CaseFrameError>().unwrap();
    assert!(matches!(cause, CaseFrameError::Bootstrap { .. }));
}

#[test]
fn test_mock_registry_receives_standard_definitions() {
    let mut registry = MockFrameRegistry::new();
    registry
        .expect_define_case_frame_with_constraints()
        .times(23)
        .returning(|class, constraints| {
            Ok(Arc::new(semnet_core::ConstrainedCaseFrame::new(class, constraints)))
        });
    registry.expect_len().return_const(0usize);

    let frames = StandardCatalogBuilder::new(standard_relations(), Arc::new(registry))
        .build()
        .unwrap();
    assert_eq!(frames.thresh_rule.id().as_str(), "arg,thresh,threshMax");
}

#[test]
fn test_mock_provider_error_stops_bootstrap() {
    let mut provider = MockRelationProvider::new();
    provider.expect_find_relation().returning(|name| {
        if name == "obj1" {
            Err(semnet_interfaces::InterfaceError::RelationNotFound(name.to_string()))
        } else {
            Ok(Some(Relation::new(name)))
        }
    });
    let mut registry = MockFrameRegistry::new();
    registry.expect_define_case_frame_with_constraints().never();

    let err = StandardCatalogBuilder::new(Arc::new(provider), Arc::new(registry))
        .build()
        .unwrap_err();
    assert!(matches!(err, CaseFrameError::Bootstrap { .. }));
}

#[test]
fn test_standard_relations_resolve_through_provider() {
    let relations = standard_relations();
    assert_eq!(relations.relation("threshMax").unwrap().name(), "threshMax");
}
