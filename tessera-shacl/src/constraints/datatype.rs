//! Value type constraint validators (sh:class, sh:datatype, sh:nodeKind)

use super::{ConstraintComponent, ConstraintViolation, NodeKind};
use tessera_graph::{hierarchy, is_valid_lexical, Graph, Term};

/// Validate sh:class constraint
///
/// The value must reach `class` through `rdf:type` followed by any number of
/// `rdfs:subClassOf` edges. Literals always fail.
pub fn validate_class(data: &Graph, value: &Term, class: &Term) -> Option<ConstraintViolation> {
    if hierarchy::is_instance_of(data, value, class) {
        None
    } else {
        Some(ConstraintViolation::new(
            ConstraintComponent::Class,
            Some(value.clone()),
            format!("Value does not have class {}", class),
        ))
    }
}

/// Validate sh:datatype constraint
///
/// Checks that a value is a literal of the expected datatype whose lexical
/// form is valid for that datatype.
pub fn validate_datatype(value: &Term, expected_dt: &Term) -> Option<ConstraintViolation> {
    let expected = expected_dt.lexical_form();
    let message = match value.datatype() {
        None => format!(
            "Expected datatype {} but found {} {}",
            expected_dt,
            NodeKind::of(value),
            value
        ),
        Some(actual) if actual != expected => {
            format!("Expected datatype {} but found <{}>", expected_dt, actual)
        }
        Some(_) if !is_valid_lexical(value.lexical_form(), expected) => format!(
            "Value \"{}\" is not a valid lexical form of {}",
            value.lexical_form(),
            expected_dt
        ),
        Some(_) => return None,
    };
    Some(ConstraintViolation::new(
        ConstraintComponent::Datatype,
        Some(value.clone()),
        message,
    ))
}

/// Validate sh:nodeKind constraint
pub fn validate_node_kind(value: &Term, expected_kind: NodeKind) -> Option<ConstraintViolation> {
    if expected_kind.matches(value) {
        return None;
    }
    Some(ConstraintViolation::new(
        ConstraintComponent::NodeKind,
        Some(value.clone()),
        format!(
            "Expected node kind {} but found {}",
            expected_kind,
            NodeKind::of(value)
        ),
    ))
}
