//! Closed shape validator (sh:closed, sh:ignoredProperties)

use super::{ConstraintComponent, ConstraintViolation};
use crate::path::PropertyPath;
use hashbrown::HashSet;
use tessera_graph::{Graph, Term};

/// Validate sh:closed constraint for one value node
///
/// `declared` holds the predicates of the shape's simple property paths.
/// Every triple of `value` using any other predicate, unless ignored, yields
/// one violation whose path is that predicate and whose value is the object.
/// A statement repeated in several contexts is reported once. `rdf:type` is
/// only allowed when declared or ignored.
pub fn validate_closed(
    data: &Graph,
    value: &Term,
    declared: &[Term],
    ignored: &[Term],
) -> Vec<ConstraintViolation> {
    if value.is_literal() {
        return Vec::new();
    }
    let mut seen: HashSet<(&Term, &Term)> = HashSet::new();
    data.select(Some(value), None, None, None)
        .filter(|t| !declared.contains(t.predicate()) && !ignored.contains(t.predicate()))
        .filter(|t| seen.insert((t.predicate(), t.object())))
        .map(|t| {
            ConstraintViolation::new(
                ConstraintComponent::Closed,
                Some(t.object().clone()),
                format!("Property {} is not allowed by closed shape", t.predicate()),
            )
            .with_path(PropertyPath::Predicate(t.predicate().clone()))
        })
        .collect()
}
