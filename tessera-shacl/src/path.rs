//! SHACL property paths
//!
//! A property shape reaches its value nodes by following a path from the
//! focus node. Paths compose:
//!
//! | Path                 | Syntax      | Value nodes                                |
//! |----------------------|-------------|--------------------------------------------|
//! | `Predicate(p)`       | `<p>`       | objects of `focus p ?o`                    |
//! | `Inverse(x)`         | `^x`        | nodes reaching the focus through `x`       |
//! | `Sequence([x, y])`   | `x/y`       | `y` applied to every result of `x`         |
//! | `Alternative([x,y])` | `x\|y`      | union of `x` and `y`                       |
//! | `ZeroOrMore(x)`      | `x*`        | focus plus the transitive closure of `x`   |
//! | `OneOrMore(x)`       | `x+`        | transitive closure of `x`                  |
//! | `ZeroOrOne(x)`       | `x?`        | focus plus one step of `x`                 |
//!
//! Evaluation returns distinct nodes in discovery order. Closure operators
//! keep a visited set, so cyclic data terminates.

use crate::error::{Result, ShaclError};
use crate::export::BlankNodes;
use hashbrown::HashSet;
use serde::{Serialize, Serializer};
use std::fmt;
use tessera_graph::{Graph, Term, Triple};
use tessera_vocab::shacl;

/// A SHACL property path expression
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPath {
    Predicate(Term),
    Inverse(Box<PropertyPath>),
    Sequence(Vec<PropertyPath>),
    Alternative(Vec<PropertyPath>),
    ZeroOrMore(Box<PropertyPath>),
    OneOrMore(Box<PropertyPath>),
    ZeroOrOne(Box<PropertyPath>),
}

impl PropertyPath {
    /// A single-predicate path; the predicate must be an IRI
    pub fn predicate(iri: Term) -> Result<Self> {
        if !iri.is_iri() {
            return Err(ShaclError::invalid_parameter(
                shacl::PATH,
                format!("path predicate must be an IRI, got {}", iri),
            ));
        }
        Ok(PropertyPath::Predicate(iri))
    }

    pub fn inverse(path: PropertyPath) -> Self {
        PropertyPath::Inverse(Box::new(path))
    }

    /// `a/b/...`; a one-element sequence is that element
    pub fn sequence(paths: Vec<PropertyPath>) -> Result<Self> {
        Self::composite(paths, PropertyPath::Sequence, "sequence")
    }

    /// `a|b|...`; a one-element alternative is that element
    pub fn alternative(paths: Vec<PropertyPath>) -> Result<Self> {
        Self::composite(paths, PropertyPath::Alternative, "alternative")
    }

    fn composite(
        mut paths: Vec<PropertyPath>,
        build: fn(Vec<PropertyPath>) -> PropertyPath,
        what: &str,
    ) -> Result<Self> {
        match paths.len() {
            0 => Err(ShaclError::invalid_parameter(
                shacl::PATH,
                format!("{} path must not be empty", what),
            )),
            1 => Ok(paths.remove(0)),
            _ => Ok(build(paths)),
        }
    }

    pub fn zero_or_more(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrMore(Box::new(path))
    }

    pub fn one_or_more(path: PropertyPath) -> Self {
        PropertyPath::OneOrMore(Box::new(path))
    }

    pub fn zero_or_one(path: PropertyPath) -> Self {
        PropertyPath::ZeroOrOne(Box::new(path))
    }

    /// The predicate of a simple (single forward predicate) path
    pub fn as_predicate(&self) -> Option<&Term> {
        match self {
            PropertyPath::Predicate(p) => Some(p),
            _ => None,
        }
    }

    /// Value nodes reached from `focus`
    pub fn evaluate(&self, graph: &Graph, focus: &Term) -> Vec<Term> {
        self.step(graph, std::slice::from_ref(focus), false)
    }

    /// Apply the path (or its inverse) to every node of `from`
    fn step(&self, graph: &Graph, from: &[Term], inverse: bool) -> Vec<Term> {
        let mut out = Distinct::default();
        match self {
            PropertyPath::Predicate(p) => {
                for node in from {
                    if inverse {
                        out.extend(graph.subjects(p, node));
                    } else {
                        out.extend(graph.objects(node, p));
                    }
                }
            }
            PropertyPath::Inverse(inner) => return inner.step(graph, from, !inverse),
            PropertyPath::Sequence(parts) => {
                let mut current = from.to_vec();
                // ^(a/b) == ^b/^a
                let ordered: Vec<&PropertyPath> = if inverse {
                    parts.iter().rev().collect()
                } else {
                    parts.iter().collect()
                };
                for part in ordered {
                    current = part.step(graph, &current, inverse);
                    if current.is_empty() {
                        break;
                    }
                }
                return current;
            }
            PropertyPath::Alternative(parts) => {
                for part in parts {
                    out.extend(part.step(graph, from, inverse).iter());
                }
            }
            PropertyPath::ZeroOrOne(inner) => {
                out.extend(from.iter());
                out.extend(inner.step(graph, from, inverse).iter());
            }
            PropertyPath::ZeroOrMore(inner) => {
                out.extend(from.iter());
                out.extend(inner.closure(graph, from, inverse).iter());
            }
            PropertyPath::OneOrMore(inner) => {
                out.extend(inner.closure(graph, from, inverse).iter());
            }
        }
        out.into_vec()
    }

    /// Nodes reachable in one or more steps
    fn closure(&self, graph: &Graph, from: &[Term], inverse: bool) -> Vec<Term> {
        let mut reached = Distinct::default();
        let mut frontier = self.step(graph, from, inverse);
        while !frontier.is_empty() {
            let fresh: Vec<Term> = frontier
                .into_iter()
                .filter(|n| reached.push(n.clone()))
                .collect();
            frontier = if fresh.is_empty() {
                Vec::new()
            } else {
                self.step(graph, &fresh, inverse)
            };
        }
        reached.into_vec()
    }

    /// Encode this path into `graph`, returning the node that stands for it
    ///
    /// Simple predicates are their own IRI; every operator gets a fresh blank
    /// node and sequences become RDF lists.
    pub(crate) fn write_to(&self, graph: &mut Graph, blanks: &mut BlankNodes) -> Result<Term> {
        fn wrap(
            graph: &mut Graph,
            blanks: &mut BlankNodes,
            prop: &'static str,
            inner: &PropertyPath,
        ) -> Result<Term> {
            let inner = inner.write_to(graph, blanks)?;
            let node = blanks.fresh()?;
            graph.add(Triple::new(node.clone(), Term::vocab(prop), inner)?);
            Ok(node)
        }
        match self {
            PropertyPath::Predicate(p) => Ok(p.clone()),
            PropertyPath::Inverse(inner) => wrap(graph, blanks, shacl::INVERSE_PATH, inner),
            PropertyPath::ZeroOrMore(inner) => wrap(graph, blanks, shacl::ZERO_OR_MORE_PATH, inner),
            PropertyPath::OneOrMore(inner) => wrap(graph, blanks, shacl::ONE_OR_MORE_PATH, inner),
            PropertyPath::ZeroOrOne(inner) => wrap(graph, blanks, shacl::ZERO_OR_ONE_PATH, inner),
            PropertyPath::Sequence(parts) => {
                let items = parts
                    .iter()
                    .map(|p| p.write_to(graph, blanks))
                    .collect::<Result<Vec<_>>>()?;
                crate::export::write_list(graph, blanks, items)
            }
            PropertyPath::Alternative(parts) => {
                let items = parts
                    .iter()
                    .map(|p| p.write_to(graph, blanks))
                    .collect::<Result<Vec<_>>>()?;
                let list = crate::export::write_list(graph, blanks, items)?;
                let node = blanks.fresh()?;
                graph.add(Triple::new(
                    node.clone(),
                    Term::vocab(shacl::ALTERNATIVE_PATH),
                    list,
                )?);
                Ok(node)
            }
        }
    }
}

/// Insertion-ordered set of terms
#[derive(Default)]
struct Distinct {
    seen: HashSet<Term>,
    order: Vec<Term>,
}

impl Distinct {
    fn push(&mut self, term: Term) -> bool {
        if self.seen.insert(term.clone()) {
            self.order.push(term);
            true
        } else {
            false
        }
    }

    fn extend<'a>(&mut self, terms: impl Iterator<Item = &'a Term>) {
        for t in terms {
            self.push(t.clone());
        }
    }

    fn into_vec(self) -> Vec<Term> {
        self.order
    }
}

impl fmt::Display for PropertyPath {
    /// SPARQL property path syntax
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, parts: &[PropertyPath], sep: &str) -> fmt::Result {
            f.write_str("(")?;
            for (i, p) in parts.iter().enumerate() {
                if i > 0 {
                    f.write_str(sep)?;
                }
                write!(f, "{}", p)?;
            }
            f.write_str(")")
        }
        match self {
            PropertyPath::Predicate(p) => write!(f, "{}", p),
            PropertyPath::Inverse(inner) => write!(f, "^{}", inner),
            PropertyPath::Sequence(parts) => join(f, parts, "/"),
            PropertyPath::Alternative(parts) => join(f, parts, "|"),
            PropertyPath::ZeroOrMore(inner) => write!(f, "{}*", inner),
            PropertyPath::OneOrMore(inner) => write!(f, "{}+", inner),
            PropertyPath::ZeroOrOne(inner) => write!(f, "{}?", inner),
        }
    }
}

impl Serialize for PropertyPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
