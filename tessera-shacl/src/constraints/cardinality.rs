//! Count bounds: sh:minCount, sh:maxCount and the qualified counts
//!
//! Counts are properties of the value set as a whole, so every violation here
//! is reported against the focus node and carries no value.

use super::{ConstraintComponent, ConstraintViolation};
use tessera_graph::Term;

/// One end of an allowed count range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountBound {
    Min(usize),
    Max(usize),
}

impl CountBound {
    pub fn admits(self, count: usize) -> bool {
        match self {
            CountBound::Min(min) => count >= min,
            CountBound::Max(max) => count <= max,
        }
    }

    fn phrase(self) -> String {
        match self {
            CountBound::Min(min) => format!("at least {}", min),
            CountBound::Max(max) => format!("at most {}", max),
        }
    }
}

/// sh:minCount / sh:maxCount over the number of value nodes
pub fn validate_count(count: usize, bound: CountBound) -> Option<ConstraintViolation> {
    if bound.admits(count) {
        return None;
    }
    let component = match bound {
        CountBound::Min(_) => ConstraintComponent::MinCount,
        CountBound::Max(_) => ConstraintComponent::MaxCount,
    };
    Some(ConstraintViolation::new(
        component,
        None,
        format!("Expected {} value(s) but found {}", bound.phrase(), count),
    ))
}

/// sh:qualifiedMinCount / sh:qualifiedMaxCount over the value nodes
/// conforming to `shape`
pub fn validate_qualified_count(
    conforming: usize,
    bound: CountBound,
    shape: &Term,
) -> Option<ConstraintViolation> {
    if bound.admits(conforming) {
        return None;
    }
    let component = match bound {
        CountBound::Min(_) => ConstraintComponent::QualifiedMinCount,
        CountBound::Max(_) => ConstraintComponent::QualifiedMaxCount,
    };
    Some(ConstraintViolation::new(
        component,
        None,
        format!(
            "Expected {} value(s) conforming to {} but found {}",
            bound.phrase(),
            shape,
            conforming
        ),
    ))
}
