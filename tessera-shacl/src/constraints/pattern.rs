//! String constraint validators (sh:pattern, sh:minLength, sh:maxLength)
//!
//! All three look at the lexical form: an IRI's string, a literal's value.
//! Blank nodes have no lexical form to test and always fail.

use super::{ConstraintComponent, ConstraintViolation, Pattern};
use tessera_graph::Term;

/// Validate sh:pattern constraint
pub fn validate_pattern(value: &Term, pattern: &Pattern) -> Option<ConstraintViolation> {
    if value.is_blank() {
        return Some(ConstraintViolation::new(
            ConstraintComponent::Pattern,
            Some(value.clone()),
            format!("Blank node {} cannot match pattern '{}'", value, pattern.source()),
        ));
    }

    let text = value.lexical_form();
    if pattern.is_match(text) {
        None
    } else {
        Some(ConstraintViolation::new(
            ConstraintComponent::Pattern,
            Some(value.clone()),
            format!(
                "Value '{}' does not match pattern '{}'",
                text,
                pattern.source()
            ),
        ))
    }
}

/// Validate sh:minLength constraint
pub fn validate_min_length(value: &Term, min: usize) -> Option<ConstraintViolation> {
    let len = match string_length(value) {
        Some(len) => len,
        None => return Some(blank_violation(ConstraintComponent::MinLength, value)),
    };

    if len < min {
        Some(ConstraintViolation::new(
            ConstraintComponent::MinLength,
            Some(value.clone()),
            format!("String length {} is less than minimum {}", len, min),
        ))
    } else {
        None
    }
}

/// Validate sh:maxLength constraint
pub fn validate_max_length(value: &Term, max: usize) -> Option<ConstraintViolation> {
    let len = match string_length(value) {
        Some(len) => len,
        None => return Some(blank_violation(ConstraintComponent::MaxLength, value)),
    };

    if len > max {
        Some(ConstraintViolation::new(
            ConstraintComponent::MaxLength,
            Some(value.clone()),
            format!("String length {} exceeds maximum {}", len, max),
        ))
    } else {
        None
    }
}

/// Character length of the lexical form
fn string_length(value: &Term) -> Option<usize> {
    if value.is_blank() {
        None
    } else {
        Some(value.lexical_form().chars().count())
    }
}

fn blank_violation(component: ConstraintComponent, value: &Term) -> ConstraintViolation {
    ConstraintViolation::new(
        component,
        Some(value.clone()),
        format!("Blank node {} has no string length", value),
    )
}
