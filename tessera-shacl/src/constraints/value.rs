//! Value range and value set constraint validators
//!
//! Range bounds may be any term. A value that cannot be ordered against the
//! bound (an IRI, or a literal from another value space) fails.

use super::{ConstraintComponent, ConstraintViolation};
use std::cmp::Ordering;
use tessera_graph::{compare_terms, Term};

/// Which side of the bound a value must lie on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    MinExclusive,
    MinInclusive,
    MaxExclusive,
    MaxInclusive,
}

impl RangeBound {
    fn accepts(self, ord: Ordering) -> bool {
        match self {
            RangeBound::MinExclusive => ord == Ordering::Greater,
            RangeBound::MinInclusive => ord != Ordering::Less,
            RangeBound::MaxExclusive => ord == Ordering::Less,
            RangeBound::MaxInclusive => ord != Ordering::Greater,
        }
    }

    fn component(self) -> ConstraintComponent {
        match self {
            RangeBound::MinExclusive => ConstraintComponent::MinExclusive,
            RangeBound::MinInclusive => ConstraintComponent::MinInclusive,
            RangeBound::MaxExclusive => ConstraintComponent::MaxExclusive,
            RangeBound::MaxInclusive => ConstraintComponent::MaxInclusive,
        }
    }

    fn message(self, bound: &Term) -> String {
        match self {
            RangeBound::MinExclusive => format!("Must have values greater than {}", bound),
            RangeBound::MinInclusive => {
                format!("Must have values greater than or equal to {}", bound)
            }
            RangeBound::MaxExclusive => format!("Must have values lower than {}", bound),
            RangeBound::MaxInclusive => {
                format!("Must have values lower than or equal to {}", bound)
            }
        }
    }
}

/// Validate sh:minExclusive, sh:minInclusive, sh:maxExclusive, sh:maxInclusive
pub fn validate_range(
    value: &Term,
    bound: &Term,
    kind: RangeBound,
) -> Option<ConstraintViolation> {
    match compare_terms(value, bound) {
        Some(ord) if kind.accepts(ord) => None,
        _ => Some(ConstraintViolation::new(
            kind.component(),
            Some(value.clone()),
            kind.message(bound),
        )),
    }
}

/// Validate sh:in constraint
pub fn validate_in(value: &Term, allowed: &[Term]) -> Option<ConstraintViolation> {
    if allowed.contains(value) {
        None
    } else {
        Some(ConstraintViolation::new(
            ConstraintComponent::In,
            Some(value.clone()),
            format!(
                "Value {} is not in the allowed set of {} values",
                value,
                allowed.len()
            ),
        ))
    }
}

/// Validate sh:hasValue constraint
///
/// Reported on the focus node when the required term is missing.
pub fn validate_has_value(values: &[Term], required: &Term) -> Option<ConstraintViolation> {
    if values.contains(required) {
        None
    } else {
        Some(ConstraintViolation::new(
            ConstraintComponent::HasValue,
            None,
            format!("Required value {} not found", required),
        ))
    }
}
