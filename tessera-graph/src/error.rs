//! Error types for tessera-graph

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Model errors raised while constructing terms and triples
///
/// These are construction-time errors: the graph itself never fails on
/// insertion, removal or lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A term was built from an empty or malformed required value
    #[error("Invalid term: {0}")]
    InvalidTerm(String),

    /// A triple was built from terms of the wrong kind
    #[error("Invalid triple: {0}")]
    InvalidTriple(String),
}

impl Error {
    /// Create an invalid term error
    pub fn invalid_term(msg: impl Into<String>) -> Self {
        Error::InvalidTerm(msg.into())
    }

    /// Create an invalid triple error
    pub fn invalid_triple(msg: impl Into<String>) -> Self {
        Error::InvalidTriple(msg.into())
    }
}
