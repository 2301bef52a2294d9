//! Class hierarchy traversal over `rdf:type` / `rdfs:subClassOf`
//!
//! Unlike a precomputed schema closure, these walk the live graph on demand:
//! the validation engine reads a graph it does not own and must see every
//! `rdfs:subClassOf` edge as it currently stands.
//!
//! # Closure Direction
//!
//! - `subclasses_of(Animal)` returns `[Animal, Dog, Cat, ...]` (descendants)
//! - `superclasses_of(Dog)` returns `[Dog, Animal, ...]` (ancestors)
//!
//! Both include the class itself and terminate on subclass cycles.

use crate::graph::Graph;
use crate::term::Term;
use hashbrown::HashSet;
use std::collections::VecDeque;
use tessera_vocab::{rdf, rdfs};

/// Breadth-first closure from `start`, following `step` edges
fn closure<F>(start: &Term, mut step: F) -> Vec<Term>
where
    F: FnMut(&Term) -> Vec<Term>,
{
    let mut visited: HashSet<Term> = HashSet::new();
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited.insert(start.clone());
    queue.push_back(start.clone());

    while let Some(class) = queue.pop_front() {
        for next in step(&class) {
            if visited.insert(next.clone()) {
                queue.push_back(next);
            }
        }
        order.push(class);
    }
    order
}

/// `class` and every transitive superclass
pub fn superclasses_of(graph: &Graph, class: &Term) -> Vec<Term> {
    let sub_class_of = Term::vocab(rdfs::SUB_CLASS_OF);
    closure(class, |c| {
        graph
            .select(Some(c), Some(&sub_class_of), None, None)
            .map(|t| t.object())
            .filter(|o| o.is_resource())
            .cloned()
            .collect()
    })
}

/// `class` and every transitive subclass
pub fn subclasses_of(graph: &Graph, class: &Term) -> Vec<Term> {
    let sub_class_of = Term::vocab(rdfs::SUB_CLASS_OF);
    closure(class, |c| {
        graph
            .select(None, Some(&sub_class_of), Some(c), None)
            .map(|t| t.subject().clone())
            .collect()
    })
}

/// Whether `node rdf:type X` holds for `class` or one of its subclasses
///
/// Literals are never instances of anything.
pub fn is_instance_of(graph: &Graph, node: &Term, class: &Term) -> bool {
    if node.is_literal() {
        return false;
    }
    let rdf_type = Term::vocab(rdf::TYPE);
    let mut types = graph
        .select(Some(node), Some(&rdf_type), None, None)
        .map(|t| t.object())
        .peekable();
    if types.peek().is_none() {
        return false;
    }
    let accepted: HashSet<Term> = subclasses_of(graph, class).into_iter().collect();
    types.any(|ty| accepted.contains(ty))
}

/// Distinct instances of `class` or any of its subclasses, in discovery order
pub fn instances_of(graph: &Graph, class: &Term) -> Vec<Term> {
    let rdf_type = Term::vocab(rdf::TYPE);
    let mut seen: HashSet<Term> = HashSet::new();
    let mut out = Vec::new();
    for c in subclasses_of(graph, class) {
        for node in graph.subjects(&rdf_type, &c) {
            if seen.insert(node.clone()) {
                out.push(node.clone());
            }
        }
    }
    out
}
