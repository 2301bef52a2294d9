//! Pair constraint validators
//!
//! Validates constraints that compare values of one property to another:
//! - sh:equals - values must be equal
//! - sh:disjoint - values must not overlap
//! - sh:lessThan - values must be less than
//! - sh:lessThanOrEquals - values must be less than or equal to
//!
//! `other_values` are the objects of `other_property` on the focus node.

use crate::constraints::{ConstraintComponent, ConstraintViolation};
use std::cmp::Ordering;
use tessera_graph::{compare_terms, Term};

/// Validate sh:equals constraint
///
/// One violation per value found on only one side.
pub fn validate_equals(
    values: &[Term],
    other_values: &[Term],
    other_property: &Term,
) -> Vec<ConstraintViolation> {
    let missing_here = other_values.iter().filter(|v| !values.contains(v));
    let extra_here = values.iter().filter(|v| !other_values.contains(v));

    extra_here
        .chain(missing_here)
        .map(|v| {
            ConstraintViolation::new(
                ConstraintComponent::Equals,
                Some(v.clone()),
                format!(
                    "Values do not equal {}: {} is not present on both sides",
                    other_property, v
                ),
            )
        })
        .collect()
}

/// Validate sh:disjoint constraint
///
/// One violation per value shared with the other property.
pub fn validate_disjoint(
    values: &[Term],
    other_values: &[Term],
    other_property: &Term,
) -> Vec<ConstraintViolation> {
    values
        .iter()
        .filter(|v| other_values.contains(v))
        .map(|v| {
            ConstraintViolation::new(
                ConstraintComponent::Disjoint,
                Some(v.clone()),
                format!(
                    "Values must be disjoint from {}, but found common value {}",
                    other_property, v
                ),
            )
        })
        .collect()
}

/// Validate sh:lessThan constraint
///
/// Each value of the constrained property must be strictly less than
/// each value of the specified property.
pub fn validate_less_than(
    values: &[Term],
    other_values: &[Term],
    other_property: &Term,
) -> Vec<ConstraintViolation> {
    compare_pairs(values, other_values, |ord| ord == Ordering::Less)
        .map(|(value, other, comparable)| {
            let message = if comparable {
                format!(
                    "Value {} is not less than {} from {}",
                    value, other, other_property
                )
            } else {
                incomparable(value, other, other_property)
            };
            ConstraintViolation::new(ConstraintComponent::LessThan, Some(value.clone()), message)
        })
        .collect()
}

/// Validate sh:lessThanOrEquals constraint
///
/// Each value of the constrained property must be less than or equal to
/// each value of the specified property.
pub fn validate_less_than_or_equals(
    values: &[Term],
    other_values: &[Term],
    other_property: &Term,
) -> Vec<ConstraintViolation> {
    compare_pairs(values, other_values, |ord| ord != Ordering::Greater)
        .map(|(value, other, comparable)| {
            let message = if comparable {
                format!(
                    "Value {} is not less than or equal to {} from {}",
                    value, other, other_property
                )
            } else {
                incomparable(value, other, other_property)
            };
            ConstraintViolation::new(
                ConstraintComponent::LessThanOrEquals,
                Some(value.clone()),
                message,
            )
        })
        .collect()
}

/// Every failing (value, other) pair, flagged with whether it was comparable
fn compare_pairs<'a, F>(
    values: &'a [Term],
    other_values: &'a [Term],
    accepts: F,
) -> impl Iterator<Item = (&'a Term, &'a Term, bool)> + 'a
where
    F: Fn(Ordering) -> bool + Copy + 'a,
{
    values.iter().flat_map(move |value| {
        other_values
            .iter()
            .filter_map(move |other| match compare_terms(value, other) {
                Some(ord) if accepts(ord) => None,
                Some(_) => Some((value, other, true)),
                None => Some((value, other, false)),
            })
    })
}

fn incomparable(value: &Term, other: &Term, other_property: &Term) -> String {
    format!(
        "Cannot compare value {} with {} from {} (incompatible types)",
        value, other, other_property
    )
}
