//! Shared fixtures for tessera-shacl integration tests.

// Each integration test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub mod span_capture;

use tessera_graph::{Graph, Term, Triple};
use tessera_shacl::{Shape, ShapesGraph};
use tessera_vocab::{rdf, rdfs};

pub const EX: &str = "http://example.org/ns/";
pub const FOAF: &str = "http://xmlns.com/foaf/0.1/";

pub fn ex(local: &str) -> Term {
    Term::iri(format!("{}{}", EX, local)).expect("valid IRI")
}

pub fn foaf(local: &str) -> Term {
    Term::iri(format!("{}{}", FOAF, local)).expect("valid IRI")
}

pub fn rdf_type() -> Term {
    Term::vocab(rdf::TYPE)
}

pub fn triple(s: Term, p: Term, o: Term) -> Triple {
    Triple::new(s, p, o).expect("valid triple")
}

/// `s rdf:type class`
pub fn typed(s: Term, class: Term) -> Triple {
    triple(s, rdf_type(), class)
}

/// `sub rdfs:subClassOf sup`
pub fn subclass(sub: Term, sup: Term) -> Triple {
    triple(sub, Term::vocab(rdfs::SUB_CLASS_OF), sup)
}

pub fn graph(triples: impl IntoIterator<Item = Triple>) -> Graph {
    Graph::from_triples(triples)
}

pub fn shapes(shapes: impl IntoIterator<Item = Shape>) -> ShapesGraph {
    ShapesGraph::from_shapes(ex("shapes"), shapes).expect("distinct shape ids")
}

/// `ex:Alice a ex:Woman . ex:Woman rdfs:subClassOf ex:Person .`
pub fn alice_the_woman() -> Graph {
    graph([
        typed(ex("Alice"), ex("Woman")),
        subclass(ex("Woman"), ex("Person")),
    ])
}

/// Install a fmt subscriber writing through the test harness.
///
/// Returns a guard; output is captured per test and shown on failure.
pub fn init_tracing() -> tracing::subscriber::DefaultGuard {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .finish();
    tracing::subscriber::set_default(subscriber)
}
