//! SHACL error types

use tessera_graph::Term;
use thiserror::Error;

/// Result type for SHACL operations
pub type Result<T> = std::result::Result<T, ShaclError>;

/// SHACL model and validation errors
///
/// Malformed data never produces an error: it is what validation reports.
/// Only malformed shapes (at construction or when a run discovers a bad
/// reference) end up here.
#[derive(Debug, Error)]
pub enum ShaclError {
    /// Term or triple construction error
    #[error("Model error: {0}")]
    Model(#[from] tessera_graph::Error),

    /// Invalid shape definition
    #[error("Invalid shape {shape_id}: {message}")]
    InvalidShape { shape_id: String, message: String },

    /// Invalid constraint specification
    #[error("Invalid constraint {component}: {message}")]
    InvalidConstraint {
        component: &'static str,
        message: String,
    },

    /// Invalid target or property path argument
    #[error("Invalid {parameter} value: {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    /// Invalid regex pattern in sh:pattern
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Two shapes with the same identifying term
    #[error("Duplicate shape {0}")]
    DuplicateShape(Term),

    /// Shape references unknown shape
    #[error("Shape {referrer} references unknown shape {referenced}")]
    UnknownShapeReference { referrer: Term, referenced: Term },

    /// A shape was re-entered for the same focus node within one evaluation chain
    #[error("Cyclic shape reference: shape {shape_id} re-entered for focus node {focus_node}")]
    CyclicShapeReference { shape_id: Term, focus_node: Term },

    /// Nested shape evaluation went deeper than allowed
    #[error("Shape nesting exceeded the recursion limit of {limit} at shape {shape_id}")]
    RecursionLimit { shape_id: Term, limit: usize },

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// SHACL validation failed
    ///
    /// Contains a summary of the validation failures.
    #[error("SHACL validation failed: {violation_count} violation(s), {warning_count} warning(s)")]
    ValidationFailed {
        violation_count: usize,
        warning_count: usize,
        /// Detailed messages for each violation (truncated if too many)
        details: Vec<String>,
    },
}

impl ShaclError {
    pub(crate) fn invalid_constraint(component: &'static str, message: impl Into<String>) -> Self {
        ShaclError::InvalidConstraint {
            component,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &'static str, message: impl Into<String>) -> Self {
        ShaclError::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_shape(shape_id: &Term, message: impl Into<String>) -> Self {
        ShaclError::InvalidShape {
            shape_id: shape_id.to_string(),
            message: message.into(),
        }
    }
}
