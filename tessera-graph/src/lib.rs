//! # Tessera Graph
//!
//! In-memory RDF model for the Tessera validation engine.
//!
//! This crate provides:
//! - Core types: `Term`, `TermId`, `Triple`
//! - `Graph`, an insertion-ordered triple store indexed on every
//!   subject/predicate/object/context binding pattern
//! - Class hierarchy traversal (`rdf:type` / `rdfs:subClassOf`)
//! - Literal value interpretation and ordering for XSD datatypes
//!
//! ## Design Principles
//!
//! 1. **Content-derived identity**: a term's identifier is a stable hash of its
//!    canonical form, so equal terms always index to the same bucket
//! 2. **Construction-time errors only**: malformed terms and triples are
//!    rejected when built; the graph itself never fails
//! 3. **No I/O**: parsing and serialization belong to the caller
//!
//! ## Example
//!
//! ```
//! use tessera_graph::{Graph, Term, Triple};
//!
//! let alice = Term::iri("http://example.org/Alice")?;
//! let knows = Term::iri("http://xmlns.com/foaf/0.1/knows")?;
//! let bob = Term::iri("http://example.org/Bob")?;
//!
//! let mut graph = Graph::new();
//! graph.add(Triple::new(alice.clone(), knows.clone(), bob)?);
//! assert_eq!(graph.select(Some(&alice), Some(&knows), None, None).count(), 1);
//! # Ok::<(), tessera_graph::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod term;
pub mod triple;
pub mod value;

// Re-export main types
pub use error::{Error, Result};
pub use graph::{shared, Graph, Select, SharedGraph};
pub use hierarchy::{instances_of, is_instance_of, subclasses_of, superclasses_of};
pub use term::{Term, TermId, TermKind};
pub use triple::Triple;
pub use value::{compare_terms, is_valid_lexical, LiteralValue};
