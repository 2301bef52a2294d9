//! SHACL validation engine for Tessera graphs
//!
//! This crate provides SHACL Core (Shapes Constraint Language) validation for
//! RDF data held in a [`tessera_graph::Graph`]. Shapes are built through a
//! typed API rather than parsed from Turtle.
//!
//! # Overview
//!
//! SHACL validation works by:
//! 1. Building [`Shape`]s and collecting them in a [`ShapesGraph`]
//! 2. Determining target nodes for each shape (via `sh:targetClass`, `sh:targetNode`, etc.)
//! 3. Validating each focus node against applicable shape constraints
//! 4. Producing a [`ValidationReport`] with conformance status and any violations
//!
//! # Supported Constraints
//!
//! - Cardinality: `sh:minCount`, `sh:maxCount`
//! - Value type: `sh:datatype`, `sh:nodeKind`, `sh:class`
//! - Value range: `sh:minInclusive`, `sh:maxInclusive`, `sh:minExclusive`, `sh:maxExclusive`
//! - String: `sh:pattern`, `sh:minLength`, `sh:maxLength`, `sh:languageIn`, `sh:uniqueLang`
//! - Value: `sh:hasValue`, `sh:in`
//! - Closed: `sh:closed`, `sh:ignoredProperties`
//! - Pair: `sh:equals`, `sh:disjoint`, `sh:lessThan`, `sh:lessThanOrEquals`
//! - Logical: `sh:not`, `sh:and`, `sh:or`, `sh:xone`
//! - Shape-based: `sh:node`, `sh:property`, `sh:qualifiedValueShape`
//!
//! # Example
//!
//! ```
//! use tessera_graph::{Graph, Term, Triple};
//! use tessera_shacl::{Constraint, PropertyPath, Shape, ShapesGraph, Target};
//!
//! let ex = |s: &str| Term::iri(format!("http://example.org/{}", s));
//! let rdf_type = Term::iri("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")?;
//!
//! let mut data = Graph::new();
//! data.add(Triple::new(ex("alice")?, rdf_type, ex("Person")?)?);
//!
//! let name = Shape::property(ex("NameShape")?, PropertyPath::predicate(ex("name")?)?)?
//!     .with_target(Target::class(ex("Person")?)?)
//!     .with_constraint(Constraint::min_count(1));
//! let shapes = ShapesGraph::from_shapes(ex("shapes")?, [name])?;
//!
//! let report = shapes.validate(&data)?;
//! assert!(!report.conforms);
//! assert_eq!(report.results[0].focus_node, ex("alice")?);
//! # Ok::<(), tessera_shacl::ShaclError>(())
//! ```

pub mod constraints;
pub mod error;
mod export;
pub mod options;
pub mod path;
pub mod report;
pub mod shape;
pub mod shapes_graph;
pub mod target;
pub mod validate;

pub use constraints::{Constraint, ConstraintComponent, ConstraintViolation, NodeKind, Pattern};
pub use error::{Result, ShaclError};
pub use options::ValidationOptions;
pub use path::PropertyPath;
pub use report::{ValidationReport, ValidationResult};
pub use shape::{Severity, Shape, ShapeKind};
pub use shapes_graph::ShapesGraph;
pub use target::{select_focus_nodes, Target};
pub use validate::Validator;

/// SHACL vocabulary full IRIs (re-exported from tessera-vocab)
pub use tessera_vocab::shacl;
