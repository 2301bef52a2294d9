//! Triple store behaviour across terms, triples, indexes and shared access.

use std::thread;
use tessera_graph::{shared, Graph, Term, Triple};
use tessera_vocab::{rdf, xsd};

fn ex(local: &str) -> Term {
    Term::iri(format!("http://example.org/{}", local)).unwrap()
}

fn people() -> Graph {
    let rdf_type = Term::vocab(rdf::TYPE);
    let name = ex("name");
    let age = ex("age");
    let mut g = Graph::new();
    for (who, n, a) in [("alice", "Alice", 30), ("bob", "Bob", 25), ("carol", "Carol", 41)] {
        g.add(Triple::new(ex(who), rdf_type.clone(), ex("Person")).unwrap());
        g.add(Triple::new(ex(who), name.clone(), Term::string(n)).unwrap());
        g.add(Triple::new(ex(who), age.clone(), Term::integer(a)).unwrap());
    }
    g
}

#[test]
fn equal_canonical_forms_index_together() {
    let mut g = Graph::new();
    let typed = Term::typed_literal("Alice", xsd::STRING).unwrap();
    g.add(Triple::new(ex("alice"), ex("name"), typed).unwrap());

    // Plain and xsd:string-typed forms are the same term
    let plain = Term::string("Alice");
    assert_eq!(g.select(None, None, Some(&plain), None).count(), 1);
    assert!(!g.add(Triple::new(ex("alice"), ex("name"), plain).unwrap()));
}

#[test]
fn select_matches_a_full_scan_for_every_pattern() {
    let g = people();
    let subjects = [None, Some(ex("alice")), Some(ex("nobody"))];
    let predicates = [None, Some(ex("name")), Some(Term::vocab(rdf::TYPE))];
    let objects = [None, Some(ex("Person")), Some(Term::integer(25))];

    for s in &subjects {
        for p in &predicates {
            for o in &objects {
                let indexed: Vec<&Triple> =
                    g.select(s.as_ref(), p.as_ref(), o.as_ref(), None).collect();
                let scanned: Vec<&Triple> = g
                    .iter()
                    .filter(|t| t.matches(s.as_ref(), p.as_ref(), o.as_ref(), None))
                    .collect();
                assert_eq!(indexed, scanned, "pattern ({:?}, {:?}, {:?})", s, p, o);
            }
        }
    }
}

#[test]
fn removal_by_pattern_then_reinsertion_appends() {
    let mut g = people();
    let age = ex("age");
    assert_eq!(g.remove_matching(Some(&ex("bob")), None, None, None), 3);
    assert_eq!(g.len(), 6);

    g.add(Triple::new(ex("bob"), age.clone(), Term::integer(26)).unwrap());
    let ages: Vec<_> = g
        .select(None, Some(&age), None, None)
        .map(|t| t.subject().clone())
        .collect();
    assert_eq!(ages, vec![ex("alice"), ex("carol"), ex("bob")]);
}

#[test]
fn named_graphs_are_selectable() {
    let mut g = Graph::new();
    let t1 = Triple::with_context(ex("a"), ex("p"), ex("b"), Some(ex("g1"))).unwrap();
    let t2 = Triple::with_context(ex("a"), ex("p"), ex("b"), Some(ex("g2"))).unwrap();
    g.extend([t1.clone(), t2]);
    assert_eq!(g.len(), 2);
    assert_eq!(
        g.select(None, None, None, Some(&ex("g1"))).collect::<Vec<_>>(),
        vec![&t1]
    );
    assert_eq!(g.remove_matching(None, None, None, Some(&ex("g2"))), 1);
    assert_eq!(g.len(), 1);
}

#[test]
fn concurrent_readers_share_a_graph() {
    let graph = shared(people());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let graph = graph.clone();
            thread::spawn(move || {
                let g = graph.read();
                g.select(None, Some(&ex("age")), None, None).count()
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), 3);
    }

    graph
        .write()
        .add(Triple::new(ex("dave"), ex("age"), Term::integer(19)).unwrap());
    assert_eq!(graph.read().len(), 10);
}
