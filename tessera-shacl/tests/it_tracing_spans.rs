//! Validation runs emit a `shacl_validate` span with run sizes.

mod support;

use support::span_capture::init_test_tracing;
use support::{alice_the_woman, ex, shapes};
use tessera_shacl::{Constraint, Shape, Target, Validator};

fn person_shapes() -> tessera_shacl::ShapesGraph {
    shapes([Shape::node(ex("PersonShape"))
        .unwrap()
        .with_target(Target::class(ex("Person")).unwrap())
        .with_constraint(Constraint::class(ex("Person")).unwrap())])
}

#[test]
fn validate_emits_a_debug_span() {
    let (store, _guard) = init_test_tracing();
    let sg = person_shapes();
    let data = alice_the_woman();
    Validator::new(&sg).validate(&data).unwrap();

    let span = store
        .find_span("shacl_validate")
        .expect("shacl_validate span");
    assert_eq!(span.level, tracing::Level::DEBUG);
    assert_eq!(span.fields.get("shapes").map(String::as_str), Some("1"));
    assert_eq!(span.fields.get("triples").map(String::as_str), Some("2"));
}

#[test]
fn each_run_gets_its_own_span() {
    let (store, _guard) = init_test_tracing();
    let sg = person_shapes();
    let data = alice_the_woman();
    let validator = Validator::new(&sg);
    validator.validate(&data).unwrap();
    validator.validate(&data).unwrap();
    validator.validate_node(&data, &ex("Alice")).unwrap();

    assert_eq!(store.count("shacl_validate"), 2);
    assert_eq!(store.count("shacl_validate_node"), 1);
}
