//! Focus node selection
//!
//! A shape's targets decide which data nodes it validates. Class targets see
//! instances of subclasses too (`rdfs:subClassOf` is followed transitively),
//! so a shape targeting `Animal` also applies to instances of `Dog` when
//! `Dog rdfs:subClassOf Animal`.

use crate::error::{Result, ShaclError};
use hashbrown::HashSet;
use tessera_graph::{hierarchy, Graph, Term};
use tessera_vocab::shacl;

/// How a shape selects its target focus nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// sh:targetClass - all instances of the class
    Class(Term),
    /// sh:targetNode - the node, whether or not it appears in the data
    Node(Term),
    /// sh:targetSubjectsOf - subjects of triples with this predicate
    SubjectsOf(Term),
    /// sh:targetObjectsOf - objects of triples with this predicate
    ObjectsOf(Term),
    /// Implicit class targeting: the shape is itself a class
    ///
    /// The term is the owning shape's id; add it with
    /// `Shape::add_implicit_class_target`.
    ImplicitClass(Term),
}

impl Target {
    pub fn class(class: Term) -> Result<Self> {
        require_resource(shacl::TARGET_CLASS, &class)?;
        Ok(Target::Class(class))
    }

    pub fn node(node: Term) -> Self {
        Target::Node(node)
    }

    pub fn subjects_of(predicate: Term) -> Result<Self> {
        require_iri(shacl::TARGET_SUBJECTS_OF, &predicate)?;
        Ok(Target::SubjectsOf(predicate))
    }

    pub fn objects_of(predicate: Term) -> Result<Self> {
        require_iri(shacl::TARGET_OBJECTS_OF, &predicate)?;
        Ok(Target::ObjectsOf(predicate))
    }

    /// Whether this target selects `node` in `data`
    ///
    /// Agrees with [`select_focus_nodes`] without materializing the set.
    pub fn selects(&self, data: &Graph, node: &Term) -> bool {
        match self {
            Target::Class(class) | Target::ImplicitClass(class) => {
                hierarchy::is_instance_of(data, node, class)
            }
            Target::Node(n) => n == node,
            Target::SubjectsOf(p) => {
                node.is_resource()
                    && data
                        .select(Some(node), Some(p), None, None)
                        .next()
                        .is_some()
            }
            Target::ObjectsOf(p) => data.select(None, Some(p), Some(node), None).next().is_some(),
        }
    }
}

fn require_iri(parameter: &'static str, term: &Term) -> Result<()> {
    if term.is_iri() {
        Ok(())
    } else {
        Err(ShaclError::invalid_parameter(
            parameter,
            format!("target predicate must be an IRI, got {}", term),
        ))
    }
}

fn require_resource(parameter: &'static str, term: &Term) -> Result<()> {
    if term.is_resource() {
        Ok(())
    } else {
        Err(ShaclError::invalid_parameter(
            parameter,
            format!("target class must be an IRI or blank node, got {}", term),
        ))
    }
}

/// Focus nodes selected by one target, distinct and in discovery order
pub fn select_focus_nodes(target: &Target, data: &Graph) -> Vec<Term> {
    match target {
        Target::Class(class) | Target::ImplicitClass(class) => {
            hierarchy::instances_of(data, class)
        }
        Target::Node(node) => vec![node.clone()],
        Target::SubjectsOf(p) => {
            distinct(data.select(None, Some(p), None, None).map(|t| t.subject()))
        }
        Target::ObjectsOf(p) => {
            distinct(data.select(None, Some(p), None, None).map(|t| t.object()))
        }
    }
}

/// Union of the focus nodes of several targets, keeping first occurrence
pub fn select_all(targets: &[Target], data: &Graph) -> Vec<Term> {
    let mut seen: HashSet<Term> = HashSet::new();
    let mut out = Vec::new();
    for target in targets {
        for node in select_focus_nodes(target, data) {
            if seen.insert(node.clone()) {
                out.push(node);
            }
        }
    }
    out
}

fn distinct<'a>(terms: impl Iterator<Item = &'a Term>) -> Vec<Term> {
    let mut seen: HashSet<&Term> = HashSet::new();
    terms.filter(|t| seen.insert(*t)).cloned().collect()
}
