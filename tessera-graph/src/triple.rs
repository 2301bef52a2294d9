//! Triple - a single statement with an optional named-graph context
//!
//! A Triple has 4 components:
//! - `s`: subject (IRI or blank node)
//! - `p`: predicate (IRI)
//! - `o`: object (any term)
//! - `g`: context (IRI or blank node), `None` for the default graph
//!
//! Construction checks the term kinds, so a `Triple` in hand is always
//! well-formed. Two triples are equal iff all four positions are equal,
//! including the context.

use crate::error::{Error, Result};
use crate::term::Term;
use serde::Serialize;
use std::fmt;

/// An RDF statement, optionally in a named graph
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Triple {
    s: Term,
    p: Term,
    o: Term,
    #[serde(skip_serializing_if = "Option::is_none")]
    g: Option<Term>,
}

impl Triple {
    /// Create a triple in the default graph
    pub fn new(s: Term, p: Term, o: Term) -> Result<Self> {
        Self::with_context(s, p, o, None)
    }

    /// Create a triple in a named graph (or the default graph when `g` is `None`)
    pub fn with_context(s: Term, p: Term, o: Term, g: Option<Term>) -> Result<Self> {
        if s.is_literal() {
            return Err(Error::invalid_triple(format!(
                "subject must be an IRI or blank node, got {}",
                s
            )));
        }
        if !p.is_iri() {
            return Err(Error::invalid_triple(format!(
                "predicate must be an IRI, got {}",
                p
            )));
        }
        if let Some(ctx) = &g {
            if ctx.is_literal() {
                return Err(Error::invalid_triple(format!(
                    "context must be an IRI or blank node, got {}",
                    ctx
                )));
            }
        }
        Ok(Self { s, p, o, g })
    }

    pub fn subject(&self) -> &Term {
        &self.s
    }

    pub fn predicate(&self) -> &Term {
        &self.p
    }

    pub fn object(&self) -> &Term {
        &self.o
    }

    /// Named-graph context, `None` for the default graph
    pub fn context(&self) -> Option<&Term> {
        self.g.as_ref()
    }

    /// Whether this triple matches a pattern, `None` meaning "any"
    ///
    /// A `Some` context pattern never matches a default-graph triple.
    pub fn matches(
        &self,
        s: Option<&Term>,
        p: Option<&Term>,
        o: Option<&Term>,
        g: Option<&Term>,
    ) -> bool {
        s.map_or(true, |s| *s == self.s)
            && p.map_or(true, |p| *p == self.p)
            && o.map_or(true, |o| *o == self.o)
            && g.map_or(true, |g| self.g.as_ref() == Some(g))
    }

    /// Decompose into `(s, p, o, g)`
    pub fn into_parts(self) -> (Term, Term, Term, Option<Term>) {
        (self.s, self.p, self.o, self.g)
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.g {
            Some(g) => write!(f, "{} {} {} {} .", self.s, self.p, self.o, g),
            None => write!(f, "{} {} {} .", self.s, self.p, self.o),
        }
    }
}

impl fmt::Debug for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Triple({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Term {
        Term::iri(format!("http://example.org/{}", s)).unwrap()
    }

    #[test]
    fn test_kind_checks() {
        let lit = Term::string("x");
        assert!(matches!(
            Triple::new(lit.clone(), iri("p"), iri("o")),
            Err(Error::InvalidTriple(_))
        ));
        assert!(matches!(
            Triple::new(iri("s"), Term::blank("p").unwrap(), iri("o")),
            Err(Error::InvalidTriple(_))
        ));
        assert!(matches!(
            Triple::with_context(iri("s"), iri("p"), iri("o"), Some(lit.clone())),
            Err(Error::InvalidTriple(_))
        ));
        // Literal objects and blank subjects are fine
        assert!(Triple::new(Term::blank("b").unwrap(), iri("p"), lit).is_ok());
    }

    #[test]
    fn test_equality_includes_context() {
        let a = Triple::new(iri("s"), iri("p"), iri("o")).unwrap();
        let b = Triple::with_context(iri("s"), iri("p"), iri("o"), Some(iri("g"))).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, Triple::new(iri("s"), iri("p"), iri("o")).unwrap());
    }

    #[test]
    fn test_matches() {
        let t = Triple::with_context(iri("s"), iri("p"), Term::integer(1), Some(iri("g"))).unwrap();
        assert!(t.matches(None, None, None, None));
        assert!(t.matches(Some(&iri("s")), None, Some(&Term::integer(1)), None));
        assert!(t.matches(None, None, None, Some(&iri("g"))));
        assert!(!t.matches(None, Some(&iri("q")), None, None));

        let default = Triple::new(iri("s"), iri("p"), iri("o")).unwrap();
        assert!(!default.matches(None, None, None, Some(&iri("g"))));
    }

    #[test]
    fn test_display() {
        let t = Triple::new(iri("s"), iri("p"), Term::string("v")).unwrap();
        assert_eq!(
            t.to_string(),
            "<http://example.org/s> <http://example.org/p> \"v\" ."
        );
    }
}
