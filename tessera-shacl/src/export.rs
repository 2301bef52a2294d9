//! Writing shapes back out as SHACL triples
//!
//! Every operator node (path operators, RDF list cells) gets a fresh blank
//! node from a [`BlankNodes`] allocator shared across one export. Labels of
//! blank nodes the caller supplied are reserved first, so generated nodes
//! never merge with them.

use crate::constraints::Constraint;
use crate::error::Result;
use crate::shape::{Severity, Shape, ShapeKind};
use crate::shapes_graph::ShapesGraph;
use crate::target::Target;
use hashbrown::HashSet;
use tessera_graph::{Graph, Term, Triple};
use tessera_vocab::{rdf, rdfs, shacl, xsd};

/// Sequential blank node labels: `{prefix}0`, `{prefix}1`, ...
///
/// Labels passed to [`reserve`](Self::reserve) are skipped.
pub(crate) struct BlankNodes {
    prefix: &'static str,
    next: usize,
    taken: HashSet<String>,
}

impl BlankNodes {
    pub(crate) fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: 0,
            taken: HashSet::new(),
        }
    }

    /// Mark the labels of any blank nodes among `terms` as in use
    pub(crate) fn reserve<'t>(&mut self, terms: impl IntoIterator<Item = &'t Term>) {
        for term in terms {
            if term.is_blank() {
                self.taken.insert(term.lexical_form().to_string());
            }
        }
    }

    pub(crate) fn fresh(&mut self) -> Result<Term> {
        loop {
            let label = format!("{}{}", self.prefix, self.next);
            self.next += 1;
            if !self.taken.contains(&label) {
                return Ok(Term::blank(label)?);
            }
        }
    }
}

/// Write `items` as an RDF list and return its head (`rdf:nil` when empty)
pub(crate) fn write_list(
    graph: &mut Graph,
    blanks: &mut BlankNodes,
    items: Vec<Term>,
) -> Result<Term> {
    let nil = Term::vocab(rdf::NIL);
    if items.is_empty() {
        return Ok(nil);
    }
    let cells = (0..items.len())
        .map(|_| blanks.fresh())
        .collect::<Result<Vec<_>>>()?;
    for (i, item) in items.into_iter().enumerate() {
        let rest = cells.get(i + 1).cloned().unwrap_or_else(|| nil.clone());
        graph.add(Triple::new(cells[i].clone(), Term::vocab(rdf::FIRST), item)?);
        graph.add(Triple::new(cells[i].clone(), Term::vocab(rdf::REST), rest)?);
    }
    Ok(cells[0].clone())
}

/// `xsd:integer` literal for a count
fn count(n: usize) -> Result<Term> {
    Ok(Term::typed_literal(n.to_string(), xsd::INTEGER)?)
}

fn add(graph: &mut Graph, s: &Term, p: &'static str, o: Term) -> Result<()> {
    graph.add(Triple::new(s.clone(), Term::vocab(p), o)?);
    Ok(())
}

impl Constraint {
    /// Export this constraint as the triples declaring it on `owner`
    ///
    /// The subject is the owning shape and the predicate the constraint's
    /// SHACL parameter. List-valued parameters become RDF lists; companion
    /// parameters (`sh:flags`, the qualified counts, `sh:ignoredProperties`)
    /// are written alongside.
    pub fn to_graph(&self, owner: &Term) -> Result<Graph> {
        let mut graph = Graph::new();
        let mut blanks = BlankNodes::new("b");
        blanks.reserve(std::iter::once(owner).chain(self.terms()));
        self.write_to(owner, &mut graph, &mut blanks)?;
        Ok(graph)
    }

    /// Every term this constraint mentions
    fn terms(&self) -> Vec<&Term> {
        match self {
            Constraint::Class(t)
            | Constraint::Datatype(t)
            | Constraint::MinExclusive(t)
            | Constraint::MinInclusive(t)
            | Constraint::MaxExclusive(t)
            | Constraint::MaxInclusive(t)
            | Constraint::HasValue(t)
            | Constraint::Equals(t)
            | Constraint::Disjoint(t)
            | Constraint::LessThan(t)
            | Constraint::LessThanOrEquals(t)
            | Constraint::Not(t)
            | Constraint::Node(t)
            | Constraint::Property(t)
            | Constraint::QualifiedValueShape { shape: t, .. } => vec![t],
            Constraint::In(terms)
            | Constraint::And(terms)
            | Constraint::Or(terms)
            | Constraint::Xone(terms)
            | Constraint::Closed {
                ignored_properties: terms,
            } => terms.iter().collect(),
            Constraint::NodeKind(_)
            | Constraint::MinCount(_)
            | Constraint::MaxCount(_)
            | Constraint::MinLength(_)
            | Constraint::MaxLength(_)
            | Constraint::Pattern(_)
            | Constraint::LanguageIn(_)
            | Constraint::UniqueLang(_) => Vec::new(),
        }
    }

    pub(crate) fn write_to(
        &self,
        owner: &Term,
        graph: &mut Graph,
        blanks: &mut BlankNodes,
    ) -> Result<()> {
        let param = self.parameter_iri();
        let value = match self {
            Constraint::Class(t)
            | Constraint::Datatype(t)
            | Constraint::MinExclusive(t)
            | Constraint::MinInclusive(t)
            | Constraint::MaxExclusive(t)
            | Constraint::MaxInclusive(t)
            | Constraint::HasValue(t)
            | Constraint::Equals(t)
            | Constraint::Disjoint(t)
            | Constraint::LessThan(t)
            | Constraint::LessThanOrEquals(t)
            | Constraint::Not(t)
            | Constraint::Node(t)
            | Constraint::Property(t) => t.clone(),
            Constraint::NodeKind(kind) => Term::vocab(kind.iri()),
            Constraint::MinCount(n)
            | Constraint::MaxCount(n)
            | Constraint::MinLength(n)
            | Constraint::MaxLength(n) => count(*n)?,
            Constraint::Pattern(pattern) => {
                if let Some(flags) = pattern.flags() {
                    add(graph, owner, shacl::FLAGS, Term::string(flags))?;
                }
                Term::string(pattern.source())
            }
            Constraint::LanguageIn(ranges) => {
                let items = ranges.iter().map(Term::string).collect();
                write_list(graph, blanks, items)?
            }
            Constraint::UniqueLang(unique) => Term::boolean(*unique),
            Constraint::In(values) => write_list(graph, blanks, values.clone())?,
            Constraint::And(shapes) | Constraint::Or(shapes) | Constraint::Xone(shapes) => {
                write_list(graph, blanks, shapes.clone())?
            }
            Constraint::QualifiedValueShape {
                shape,
                min_count,
                max_count,
                disjoint,
            } => {
                if let Some(min) = min_count {
                    add(graph, owner, shacl::QUALIFIED_MIN_COUNT, count(*min)?)?;
                }
                if let Some(max) = max_count {
                    add(graph, owner, shacl::QUALIFIED_MAX_COUNT, count(*max)?)?;
                }
                if *disjoint {
                    add(
                        graph,
                        owner,
                        shacl::QUALIFIED_VALUE_SHAPES_DISJOINT,
                        Term::boolean(true),
                    )?;
                }
                shape.clone()
            }
            Constraint::Closed { ignored_properties } => {
                if !ignored_properties.is_empty() {
                    let list = write_list(graph, blanks, ignored_properties.clone())?;
                    add(graph, owner, shacl::IGNORED_PROPERTIES, list)?;
                }
                Term::boolean(true)
            }
        };
        add(graph, owner, param, value)
    }
}

impl Shape {
    /// Export this shape: type, targets, path, metadata and constraints
    pub fn to_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();
        let mut blanks = BlankNodes::new("b");
        blanks.reserve(self.terms());
        self.write_to(&mut graph, &mut blanks)?;
        Ok(graph)
    }

    /// The shape id plus every term its targets and constraints mention
    ///
    /// Path steps are IRIs and never need reserving.
    fn terms(&self) -> Vec<&Term> {
        let mut terms = vec![self.id()];
        for target in self.targets() {
            match target {
                Target::Class(t)
                | Target::Node(t)
                | Target::SubjectsOf(t)
                | Target::ObjectsOf(t)
                | Target::ImplicitClass(t) => terms.push(t),
            }
        }
        for constraint in self.constraints() {
            terms.extend(constraint.terms());
        }
        terms
    }

    pub(crate) fn write_to(&self, graph: &mut Graph, blanks: &mut BlankNodes) -> Result<()> {
        let id = self.id();
        let shape_type = match self.kind() {
            ShapeKind::Node => shacl::NODE_SHAPE,
            ShapeKind::Property(_) => shacl::PROPERTY_SHAPE,
        };
        add(graph, id, rdf::TYPE, Term::vocab(shape_type))?;

        for target in self.targets() {
            match target {
                Target::Class(c) => add(graph, id, shacl::TARGET_CLASS, c.clone())?,
                Target::Node(n) => add(graph, id, shacl::TARGET_NODE, n.clone())?,
                Target::SubjectsOf(p) => add(graph, id, shacl::TARGET_SUBJECTS_OF, p.clone())?,
                Target::ObjectsOf(p) => add(graph, id, shacl::TARGET_OBJECTS_OF, p.clone())?,
                Target::ImplicitClass(_) => {
                    add(graph, id, rdf::TYPE, Term::vocab(rdfs::CLASS))?
                }
            }
        }

        if let Some(path) = self.path() {
            let node = path.write_to(graph, blanks)?;
            add(graph, id, shacl::PATH, node)?;
        }
        if self.severity() != Severity::Violation {
            add(graph, id, shacl::SEVERITY, self.severity().term())?;
        }
        for message in self.messages() {
            add(graph, id, shacl::MESSAGE, Term::string(message))?;
        }
        if self.is_deactivated() {
            add(graph, id, shacl::DEACTIVATED, Term::boolean(true))?;
        }
        if let Some(name) = self.name() {
            add(graph, id, shacl::NAME, Term::string(name))?;
        }

        for constraint in self.constraints() {
            constraint.write_to(id, graph, blanks)?;
        }
        Ok(())
    }
}

impl ShapesGraph {
    /// Export every shape into one graph, in declaration order
    pub fn to_graph(&self) -> Result<Graph> {
        let mut graph = Graph::new();
        let mut blanks = BlankNodes::new("b");
        for shape in self.shapes() {
            blanks.reserve(shape.terms());
        }
        for shape in self.shapes() {
            shape.write_to(&mut graph, &mut blanks)?;
        }
        Ok(graph)
    }
}
