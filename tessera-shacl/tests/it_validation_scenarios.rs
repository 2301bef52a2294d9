//! End-to-end validation scenarios over small data graphs.

mod support;

use support::{alice_the_woman, ex, foaf, graph, shapes, triple, typed};
use tessera_graph::Term;
use tessera_shacl::{
    select_focus_nodes, Constraint, ConstraintComponent, PropertyPath, Severity, Shape, Target,
};

fn person_shape(constraint: Constraint) -> Shape {
    Shape::node(ex("PersonShape"))
        .unwrap()
        .with_target(Target::class(ex("Person")).unwrap())
        .with_constraint(constraint)
}

#[test]
fn class_constraint_follows_subclass_chain() {
    let sg = shapes([person_shape(Constraint::class(ex("Person")).unwrap())]);
    let report = sg.validate(&alice_the_woman()).unwrap();
    assert!(report.conforms);
    assert!(report.is_empty());
}

#[test]
fn class_constraint_reports_the_focus_node() {
    let sg = shapes([person_shape(Constraint::class(ex("Man")).unwrap())]);
    let report = sg.validate(&alice_the_woman()).unwrap();

    assert!(!report.conforms);
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_eq!(r.severity, Severity::Violation);
    assert_eq!(r.focus_node, ex("Alice"));
    assert_eq!(r.value, Some(ex("Alice")));
    assert_eq!(r.path, None);
    assert_eq!(r.source_constraint_component, ConstraintComponent::Class);
    assert_eq!(
        r.source_constraint_component.iri(),
        "http://www.w3.org/ns/shacl#ClassConstraintComponent"
    );
    assert_eq!(r.source_shape, ex("PersonShape"));
}

#[test]
fn max_exclusive_on_a_property_path() {
    let data = graph([triple(ex("Alice"), foaf("knows"), ex("Bob"))]);
    let knows = Shape::property(ex("KnowsShape"), PropertyPath::predicate(foaf("knows")).unwrap())
        .unwrap()
        .with_target(Target::node(ex("Alice")))
        .with_constraint(Constraint::max_exclusive(ex("Bob")));

    let report = shapes([knows]).validate(&data).unwrap();
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_eq!(r.focus_node, ex("Alice"));
    assert_eq!(r.value, Some(ex("Bob")));
    assert_eq!(r.path, Some(PropertyPath::Predicate(foaf("knows"))));
    assert_eq!(r.source_constraint_component, ConstraintComponent::MaxExclusive);
}

#[test]
fn nested_property_results_belong_to_the_property_shape() {
    let data = graph([
        triple(ex("a"), ex("address"), ex("addrA")),
        typed(ex("addrA"), ex("PostalAddress")),
        triple(ex("b"), ex("address"), ex("addrB")),
        typed(ex("addrB"), ex("PostalAddress")),
        triple(ex("c"), ex("address"), ex("addrC")),
    ]);
    let holder = Shape::node(ex("HolderShape"))
        .unwrap()
        .with_target(Target::node(ex("a")))
        .with_target(Target::node(ex("b")))
        .with_target(Target::node(ex("c")))
        .with_constraint(Constraint::property(ex("AddressShape")).unwrap());
    let address = Shape::property(
        ex("AddressShape"),
        PropertyPath::predicate(ex("address")).unwrap(),
    )
    .unwrap()
    .with_constraint(Constraint::class(ex("PostalAddress")).unwrap());

    let report = shapes([holder, address]).validate(&data).unwrap();
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_eq!(r.focus_node, ex("c"));
    assert_eq!(r.value, Some(ex("addrC")));
    assert_eq!(r.source_shape, ex("AddressShape"));
    assert_eq!(r.path, Some(PropertyPath::Predicate(ex("address"))));
}

#[test]
fn literal_values_never_satisfy_class() {
    let data = graph([triple(ex("Alice"), ex("friend"), Term::string("Bob"))]);
    let friend = Shape::property(ex("FriendShape"), PropertyPath::predicate(ex("friend")).unwrap())
        .unwrap()
        .with_target(Target::node(ex("Alice")))
        .with_constraint(Constraint::class(ex("Person")).unwrap());

    let report = shapes([friend]).validate(&data).unwrap();
    assert_eq!(report.violation_count(), 1);
    assert_eq!(report.results[0].value, Some(Term::string("Bob")));
}

#[test]
fn node_targets_select_absent_nodes() {
    let data = alice_the_woman();
    let target = Target::node(ex("Ghost"));
    assert_eq!(select_focus_nodes(&target, &data), vec![ex("Ghost")]);

    let named = Shape::property(ex("NameShape"), PropertyPath::predicate(ex("name")).unwrap())
        .unwrap()
        .with_target(target)
        .with_constraint(Constraint::min_count(1));
    let report = shapes([named]).validate(&data).unwrap();
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].focus_node, ex("Ghost"));
    assert_eq!(report.results[0].value, None);
}

#[test]
fn class_targets_select_transitive_instances_only() {
    let mut data = alice_the_woman();
    data.add(typed(ex("Bob"), ex("Person")));
    data.add(typed(ex("R2"), ex("Robot")));

    let mut nodes = select_focus_nodes(&Target::class(ex("Person")).unwrap(), &data);
    nodes.sort_by_key(|t| t.to_string());
    assert_eq!(nodes, vec![ex("Alice"), ex("Bob")]);
}

#[test]
fn not_passes_when_the_negated_shape_fails() {
    let data = graph([typed(ex("alice"), ex("Person")), typed(ex("robo"), ex("Robot"))]);
    let is_robot = Shape::node(ex("IsRobot"))
        .unwrap()
        .with_constraint(Constraint::class(ex("Robot")).unwrap());
    let not_robot = Shape::node(ex("NotRobot"))
        .unwrap()
        .with_target(Target::node(ex("alice")))
        .with_target(Target::node(ex("robo")))
        .with_constraint(Constraint::not(ex("IsRobot")).unwrap());

    let report = shapes([not_robot, is_robot]).validate(&data).unwrap();
    assert_eq!(report.results.len(), 1);
    let r = &report.results[0];
    assert_eq!(r.focus_node, ex("robo"));
    assert_eq!(r.value, Some(ex("robo")));
    assert_eq!(r.source_constraint_component, ConstraintComponent::Not);
    assert_eq!(r.source_shape, ex("NotRobot"));
}

#[test]
fn results_are_ordered_by_shape_then_focus_then_constraint() {
    let data = graph([
        typed(ex("a"), ex("Thing")),
        typed(ex("b"), ex("Thing")),
        triple(ex("a"), ex("size"), Term::integer(50)),
        triple(ex("b"), ex("size"), Term::integer(-1)),
    ]);
    let size = Shape::property(ex("SizeShape"), PropertyPath::predicate(ex("size")).unwrap())
        .unwrap()
        .with_target(Target::node(ex("a")))
        .with_target(Target::node(ex("b")))
        .with_constraint(Constraint::min_inclusive(Term::integer(0)))
        .with_constraint(Constraint::max_inclusive(Term::integer(10)));
    let things = Shape::node(ex("ThingShape"))
        .unwrap()
        .with_target(Target::class(ex("Thing")).unwrap())
        .with_constraint(Constraint::class(ex("Gadget")).unwrap());

    let report = shapes([size, things]).validate(&data).unwrap();
    let order: Vec<_> = report
        .results
        .iter()
        .map(|r| {
            (
                r.source_shape.clone(),
                r.focus_node.clone(),
                r.source_constraint_component,
            )
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (ex("SizeShape"), ex("a"), ConstraintComponent::MaxInclusive),
            (ex("SizeShape"), ex("b"), ConstraintComponent::MinInclusive),
            (ex("ThingShape"), ex("a"), ConstraintComponent::Class),
            (ex("ThingShape"), ex("b"), ConstraintComponent::Class),
        ]
    );
}

#[test]
fn validation_is_idempotent() {
    let sg = shapes([person_shape(Constraint::class(ex("Man")).unwrap())]);
    let data = alice_the_woman();
    let first = sg.validate(&data).unwrap();
    let second = sg.validate(&data).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn string_facets_and_language_constraints() {
    let data = graph([
        triple(ex("doc"), ex("title"), Term::plain_literal("Hello", Some("en")).unwrap()),
        triple(ex("doc"), ex("title"), Term::plain_literal("Hi", Some("EN")).unwrap()),
        triple(ex("doc"), ex("title"), Term::plain_literal("Bonjour", Some("fr")).unwrap()),
    ]);
    let title = Shape::property(ex("TitleShape"), PropertyPath::predicate(ex("title")).unwrap())
        .unwrap()
        .with_target(Target::node(ex("doc")))
        .with_constraint(Constraint::language_in(["en"]).unwrap())
        .with_constraint(Constraint::unique_lang(true))
        .with_constraint(Constraint::min_length(3))
        .with_constraint(Constraint::pattern("^[A-Z]", None).unwrap());

    let report = shapes([title]).validate(&data).unwrap();
    let components: Vec<_> = report
        .results
        .iter()
        .map(|r| r.source_constraint_component)
        .collect();
    assert_eq!(
        components,
        vec![
            ConstraintComponent::LanguageIn,
            ConstraintComponent::UniqueLang,
            ConstraintComponent::MinLength,
        ]
    );
}
