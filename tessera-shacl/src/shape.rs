//! Node shapes and property shapes

use crate::constraints::Constraint;
use crate::error::{Result, ShaclError};
use crate::path::PropertyPath;
use crate::target::{self, Target};
use serde::{Serialize, Serializer};
use std::fmt;
use tessera_graph::{Graph, Term};
use tessera_vocab::shacl;

/// Severity level for constraint violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    Info,
    Warning,
    #[default]
    Violation,
}

impl Severity {
    pub fn iri(self) -> &'static str {
        match self {
            Severity::Info => shacl::INFO,
            Severity::Warning => shacl::WARNING,
            Severity::Violation => shacl::VIOLATION,
        }
    }

    pub fn term(self) -> Term {
        Term::vocab(self.iri())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "sh:Info",
            Severity::Warning => "sh:Warning",
            Severity::Violation => "sh:Violation",
        })
    }
}

impl Serialize for Severity {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.iri())
    }
}

/// Node shape or property shape
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Constraints apply to the focus node itself
    Node,
    /// Constraints apply to the nodes reached through the path
    Property(PropertyPath),
}

/// A SHACL shape
///
/// Built incrementally; every builder checks only its own argument. Shapes
/// referenced by `sh:not`, `sh:node` and friends are resolved by identifying
/// term when the shapes graph is validated.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: Term,
    kind: ShapeKind,
    targets: Vec<Target>,
    constraints: Vec<Constraint>,
    messages: Vec<String>,
    severity: Severity,
    deactivated: bool,
    name: Option<String>,
}

impl Shape {
    /// A node shape; the id must be an IRI or blank node
    pub fn node(id: Term) -> Result<Self> {
        Self::with_kind(id, ShapeKind::Node)
    }

    /// A property shape reaching its value nodes through `path`
    pub fn property(id: Term, path: PropertyPath) -> Result<Self> {
        Self::with_kind(id, ShapeKind::Property(path))
    }

    fn with_kind(id: Term, kind: ShapeKind) -> Result<Self> {
        if id.is_literal() {
            return Err(ShaclError::invalid_shape(
                &id,
                "shape id must be an IRI or blank node",
            ));
        }
        Ok(Self {
            id,
            kind,
            targets: Vec::new(),
            constraints: Vec::new(),
            messages: Vec::new(),
            severity: Severity::default(),
            deactivated: false,
            name: None,
        })
    }

    pub fn add_target(&mut self, target: Target) -> &mut Self {
        self.targets.push(target);
        self
    }

    /// Target the instances of this shape's own id, treating the shape as a class
    pub fn add_implicit_class_target(&mut self) -> &mut Self {
        self.targets.push(Target::ImplicitClass(self.id.clone()));
        self
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Add an sh:message; once any is set it replaces every default message
    pub fn add_message(&mut self, message: impl Into<String>) -> Result<&mut Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ShaclError::invalid_shape(&self.id, "message must not be empty"));
        }
        self.messages.push(message);
        Ok(self)
    }

    pub fn set_severity(&mut self, severity: Severity) -> &mut Self {
        self.severity = severity;
        self
    }

    pub fn set_deactivated(&mut self, deactivated: bool) -> &mut Self {
        self.deactivated = deactivated;
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.add_target(target);
        self
    }

    pub fn with_implicit_class_target(mut self) -> Self {
        self.add_implicit_class_target();
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.add_constraint(constraint);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Result<Self> {
        self.add_message(message)?;
        Ok(self)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_deactivated(mut self, deactivated: bool) -> Self {
        self.deactivated = deactivated;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn id(&self) -> &Term {
        &self.id
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The path of a property shape
    pub fn path(&self) -> Option<&PropertyPath> {
        match &self.kind {
            ShapeKind::Node => None,
            ShapeKind::Property(path) => Some(path),
        }
    }

    pub fn is_property_shape(&self) -> bool {
        matches!(self.kind, ShapeKind::Property(_))
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_deactivated(&self) -> bool {
        self.deactivated
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Focus nodes selected by the union of this shape's targets
    pub fn focus_nodes(&self, data: &Graph) -> Vec<Term> {
        target::select_all(&self.targets, data)
    }

    /// Whether any of this shape's targets selects `node`
    pub fn targets_node(&self, data: &Graph, node: &Term) -> bool {
        self.targets.iter().any(|t| t.selects(data, node))
    }

    /// Value nodes for `focus`: the focus itself, or the path's results
    pub fn value_nodes(&self, data: &Graph, focus: &Term) -> Vec<Term> {
        match &self.kind {
            ShapeKind::Node => vec![focus.clone()],
            ShapeKind::Property(path) => path.evaluate(data, focus),
        }
    }
}
