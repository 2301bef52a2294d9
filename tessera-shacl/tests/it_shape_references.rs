//! Shapes that refer to other shapes: recursion, severities and messages.

mod support;

use support::{ex, graph, shapes, triple, typed};
use tessera_graph::Term;
use tessera_shacl::{
    Constraint, ConstraintComponent, PropertyPath, Severity, ShaclError, Shape, ShapesGraph,
    Target, ValidationOptions, Validator,
};

/// Person: every ex:knows value must itself be a Person
fn knows_people() -> ShapesGraph {
    let person = Shape::node(ex("PersonShape"))
        .unwrap()
        .with_target(Target::node(ex("alice")))
        .with_constraint(Constraint::property(ex("KnowsShape")).unwrap());
    let knows = Shape::property(ex("KnowsShape"), PropertyPath::predicate(ex("knows")).unwrap())
        .unwrap()
        .with_constraint(Constraint::node(ex("PersonShape")).unwrap());
    shapes([person, knows])
}

#[test]
fn recursive_shapes_on_acyclic_data() {
    let _guard = support::init_tracing();
    let data = graph([
        triple(ex("alice"), ex("knows"), ex("bob")),
        triple(ex("bob"), ex("knows"), ex("carol")),
    ]);
    let report = knows_people().validate(&data).unwrap();
    assert!(report.conforms);
}

#[test]
fn recursive_shapes_on_cyclic_data_fail_fast() {
    let _guard = support::init_tracing();
    let data = graph([
        triple(ex("alice"), ex("knows"), ex("bob")),
        triple(ex("bob"), ex("knows"), ex("alice")),
    ]);
    match knows_people().validate(&data) {
        Err(ShaclError::CyclicShapeReference {
            shape_id,
            focus_node,
        }) => {
            assert_eq!(shape_id, ex("PersonShape"));
            assert_eq!(focus_node, ex("alice"));
        }
        other => panic!("expected CyclicShapeReference, got {:?}", other),
    }
}

#[test]
fn self_referencing_node_shape_is_cyclic() {
    let looping = Shape::node(ex("Loop"))
        .unwrap()
        .with_target(Target::node(ex("x")))
        .with_constraint(Constraint::node(ex("Loop")).unwrap());
    let err = shapes([looping]).validate(&graph([])).unwrap_err();
    assert!(matches!(err, ShaclError::CyclicShapeReference { .. }));
}

#[test]
fn unknown_references_abort_the_run() {
    let dangling = Shape::node(ex("S"))
        .unwrap()
        .with_target(Target::node(ex("x")))
        .with_constraint(Constraint::not(ex("Nowhere")).unwrap());
    let err = shapes([dangling]).validate(&graph([])).unwrap_err();
    match err {
        ShaclError::UnknownShapeReference {
            referrer,
            referenced,
        } => {
            assert_eq!(referrer, ex("S"));
            assert_eq!(referenced, ex("Nowhere"));
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn warnings_do_not_break_conformance() {
    let data = graph([triple(ex("alice"), ex("age"), Term::integer(150))]);
    let age = Shape::property(ex("AgeShape"), PropertyPath::predicate(ex("age")).unwrap())
        .unwrap()
        .with_target(Target::subjects_of(ex("age")).unwrap())
        .with_constraint(Constraint::max_inclusive(Term::integer(120)))
        .with_severity(Severity::Warning);

    let report = shapes([age]).validate(&data).unwrap();
    assert!(report.conforms);
    assert_eq!(report.warning_count(), 1);
    assert_eq!(report.violation_count(), 0);
    assert!(report.into_result(10).is_ok());
}

#[test]
fn warning_results_in_nested_shapes_still_conform() {
    let data = graph([triple(ex("alice"), ex("age"), Term::integer(150))]);
    let plausible = Shape::property(ex("Plausible"), PropertyPath::predicate(ex("age")).unwrap())
        .unwrap()
        .with_constraint(Constraint::max_inclusive(Term::integer(120)))
        .with_severity(Severity::Warning);
    let person = Shape::node(ex("PersonShape"))
        .unwrap()
        .with_target(Target::node(ex("alice")))
        .with_constraint(Constraint::node(ex("Plausible")).unwrap());

    let report = shapes([person, plausible]).validate(&data).unwrap();
    assert!(report.conforms);
    assert!(report.is_empty());
}

#[test]
fn shape_messages_replace_defaults() {
    let data = graph([typed(ex("alice"), ex("Person"))]);
    let named = Shape::property(ex("NameShape"), PropertyPath::predicate(ex("name")).unwrap())
        .unwrap()
        .with_target(Target::class(ex("Person")).unwrap())
        .with_constraint(Constraint::min_count(1))
        .with_message("Every person needs a name")
        .unwrap()
        .with_message("Chaque personne a besoin d'un nom")
        .unwrap();

    let report = shapes([named]).validate(&data).unwrap();
    assert_eq!(
        report.results[0].messages,
        vec![
            "Every person needs a name".to_string(),
            "Chaque personne a besoin d'un nom".to_string(),
        ]
    );

    match report.into_result(5) {
        Err(ShaclError::ValidationFailed {
            violation_count,
            details,
            ..
        }) => {
            assert_eq!(violation_count, 1);
            assert_eq!(
                details,
                vec!["Node <http://example.org/ns/alice>: property <http://example.org/ns/name>: \
                      Every person needs a name; Chaque personne a besoin d'un nom"
                    .to_string()]
            );
        }
        other => panic!("expected ValidationFailed, got {:?}", other),
    }
}

#[test]
fn recursion_limit_is_configurable() {
    let data = graph([
        triple(ex("a"), ex("next"), ex("b")),
        triple(ex("b"), ex("next"), ex("c")),
        triple(ex("c"), ex("next"), ex("d")),
    ]);
    let chain = Shape::node(ex("Chain"))
        .unwrap()
        .with_constraint(Constraint::property(ex("Next")).unwrap());
    let next = Shape::property(ex("Next"), PropertyPath::predicate(ex("next")).unwrap())
        .unwrap()
        .with_constraint(Constraint::node(ex("Chain")).unwrap());
    let start = Shape::node(ex("Start"))
        .unwrap()
        .with_target(Target::node(ex("a")))
        .with_constraint(Constraint::node(ex("Chain")).unwrap());
    let sg = shapes([start, chain, next]);

    assert!(sg.validate(&data).unwrap().conforms);

    let tight = ValidationOptions::new().with_max_recursion_depth(3);
    let err = Validator::new(&sg)
        .with_options(tight)
        .validate(&data)
        .unwrap_err();
    assert!(matches!(err, ShaclError::RecursionLimit { limit: 3, .. }));
}

#[test]
fn qualified_counts_are_reported_without_a_value() {
    let data = graph([
        triple(ex("team"), ex("member"), ex("ann")),
        triple(ex("team"), ex("member"), ex("ben")),
        typed(ex("ann"), ex("Lead")),
    ]);
    let lead = Shape::node(ex("IsLead"))
        .unwrap()
        .with_constraint(Constraint::class(ex("Lead")).unwrap());
    let members = Shape::property(ex("Members"), PropertyPath::predicate(ex("member")).unwrap())
        .unwrap()
        .with_target(Target::node(ex("team")))
        .with_constraint(
            Constraint::qualified_value_shape(ex("IsLead"), Some(2), Some(3), false).unwrap(),
        );

    let report = shapes([members, lead]).validate(&data).unwrap();
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_eq!(
        r.source_constraint_component,
        ConstraintComponent::QualifiedMinCount
    );
    assert_eq!(r.value, None);
    assert_eq!(r.focus_node, ex("team"));
}
