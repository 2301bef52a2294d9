//! Term - identity and equality for the atomic values of a graph
//!
//! A term is one of:
//! - an IRI (`<http://example.org/Alice>`)
//! - a blank node (`_:b0`)
//! - a plain literal, optionally language-tagged (`"chat"@fr`)
//! - a typed literal (`"42"^^<http://www.w3.org/2001/XMLSchema#integer>`)
//!
//! ## Canonical form and identifiers
//!
//! Every term has a canonical string form (the N-Triples rendering above).
//! The `TermId` is the xxHash64 (seed 0) of that canonical form, computed
//! once at construction and cached. It is stable across process runs, so it
//! can be used as an index key and persisted by callers.
//!
//! Two normalizations keep the canonical form unique:
//! - language tags are lower-cased (tags are case-insensitive)
//! - a typed literal with datatype `xsd:string` is stored as a plain literal
//!
//! ## Equality
//!
//! Equality is structural; hashing uses the cached identifier only.

use crate::error::{Error, Result};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tessera_vocab::{rdf, xsd};
use xxhash_rust::xxh64::Xxh64;

/// Content-derived term identifier (xxHash64 of the canonical form)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TermId(u64);

impl TermId {
    /// Raw 64-bit value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// The shape of a term
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TermKind {
    /// An IRI resource
    Iri(Arc<str>),
    /// A blank node, by label (without the `_:` prefix)
    BlankNode(Arc<str>),
    /// A plain literal with an optional (lower-cased) language tag
    PlainLiteral {
        value: Arc<str>,
        language: Option<Arc<str>>,
    },
    /// A literal with an explicit datatype IRI (never `xsd:string`)
    TypedLiteral { value: Arc<str>, datatype: Arc<str> },
}

/// An RDF term with its cached content-derived identifier
///
/// Cheap to clone: all payloads are `Arc<str>`.
#[derive(Clone)]
pub struct Term {
    kind: TermKind,
    id: TermId,
}

impl Term {
    /// Create an IRI term
    ///
    /// Fails if the IRI is empty or contains characters that can never
    /// appear in an IRI (whitespace, `<`, `>`, `"`).
    pub fn iri(iri: impl AsRef<str>) -> Result<Self> {
        let iri = iri.as_ref();
        if iri.is_empty() {
            return Err(Error::invalid_term("IRI must not be empty"));
        }
        if iri
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '"'))
        {
            return Err(Error::invalid_term(format!(
                "IRI '{}' contains illegal characters",
                iri
            )));
        }
        Ok(Self::from_kind(TermKind::Iri(Arc::from(iri))))
    }

    /// Create a blank node term
    ///
    /// A leading `_:` is accepted and stripped.
    pub fn blank(id: impl AsRef<str>) -> Result<Self> {
        let id = id.as_ref();
        let label = id.strip_prefix("_:").unwrap_or(id);
        if label.is_empty() {
            return Err(Error::invalid_term("blank node label must not be empty"));
        }
        if label.chars().any(char::is_whitespace) {
            return Err(Error::invalid_term(format!(
                "blank node label '{}' contains whitespace",
                label
            )));
        }
        Ok(Self::from_kind(TermKind::BlankNode(Arc::from(label))))
    }

    /// Create a plain literal, optionally language-tagged
    ///
    /// An empty value is a legal literal; an empty language tag is not.
    pub fn plain_literal(value: impl AsRef<str>, language: Option<&str>) -> Result<Self> {
        let language = match language {
            Some(tag) if tag.is_empty() => {
                return Err(Error::invalid_term("language tag must not be empty"));
            }
            Some(tag) => Some(Arc::from(tag.to_ascii_lowercase())),
            None => None,
        };
        Ok(Self::from_kind(TermKind::PlainLiteral {
            value: Arc::from(value.as_ref()),
            language,
        }))
    }

    /// Create a typed literal
    ///
    /// `xsd:string` literals are normalized to plain literals. A datatype of
    /// `rdf:langString` is rejected since it cannot carry its language here.
    pub fn typed_literal(value: impl AsRef<str>, datatype: impl AsRef<str>) -> Result<Self> {
        let datatype = datatype.as_ref();
        if datatype.is_empty() {
            return Err(Error::invalid_term("literal datatype IRI must not be empty"));
        }
        if datatype == rdf::LANG_STRING {
            return Err(Error::invalid_term(
                "rdf:langString literals must be built with plain_literal and a language tag",
            ));
        }
        if datatype == xsd::STRING {
            return Self::plain_literal(value, None);
        }
        // Validate the datatype the same way as any other IRI
        let datatype = Term::iri(datatype)?;
        let TermKind::Iri(datatype) = datatype.kind else {
            return Err(Error::invalid_term("literal datatype must be an IRI"));
        };
        Ok(Self::from_kind(TermKind::TypedLiteral {
            value: Arc::from(value.as_ref()),
            datatype,
        }))
    }

    /// IRI term for a vocabulary constant
    ///
    /// Skips the checks done by [`Term::iri`]; meant for the constants in
    /// `tessera_vocab`, which are known to be well-formed.
    pub fn vocab(iri: &'static str) -> Self {
        Self::from_kind(TermKind::Iri(Arc::from(iri)))
    }

    /// A plain `xsd:string` literal
    pub fn string(value: impl AsRef<str>) -> Self {
        Self::from_kind(TermKind::PlainLiteral {
            value: Arc::from(value.as_ref()),
            language: None,
        })
    }

    /// An `xsd:integer` literal
    pub fn integer(value: i64) -> Self {
        Self::from_kind(TermKind::TypedLiteral {
            value: Arc::from(value.to_string()),
            datatype: Arc::from(xsd::INTEGER),
        })
    }

    /// An `xsd:decimal` literal
    pub fn decimal(value: f64) -> Self {
        let mut lexical = value.to_string();
        if !lexical.contains('.') && value.is_finite() {
            lexical.push_str(".0");
        }
        Self::from_kind(TermKind::TypedLiteral {
            value: Arc::from(lexical),
            datatype: Arc::from(xsd::DECIMAL),
        })
    }

    /// An `xsd:boolean` literal
    pub fn boolean(value: bool) -> Self {
        Self::from_kind(TermKind::TypedLiteral {
            value: Arc::from(if value { "true" } else { "false" }),
            datatype: Arc::from(xsd::BOOLEAN),
        })
    }

    fn from_kind(kind: TermKind) -> Self {
        let mut hasher = HashWriter(Xxh64::new(0));
        // Writing into the hasher cannot fail
        let _ = write_canonical(&kind, &mut hasher);
        Self {
            id: TermId(hasher.0.digest()),
            kind,
        }
    }

    /// Cached content-derived identifier
    pub fn id(&self) -> TermId {
        self.id
    }

    /// The term's shape
    pub fn kind(&self) -> &TermKind {
        &self.kind
    }

    pub fn is_iri(&self) -> bool {
        matches!(self.kind, TermKind::Iri(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TermKind::BlankNode(_))
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TermKind::PlainLiteral { .. } | TermKind::TypedLiteral { .. }
        )
    }

    /// IRI or blank node (anything that may appear as a subject)
    pub fn is_resource(&self) -> bool {
        !self.is_literal()
    }

    /// The IRI string if this is an IRI
    pub fn as_iri(&self) -> Option<&str> {
        match &self.kind {
            TermKind::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Lexical form: the IRI string, blank node label, or literal value
    pub fn lexical_form(&self) -> &str {
        match &self.kind {
            TermKind::Iri(s) | TermKind::BlankNode(s) => s,
            TermKind::PlainLiteral { value, .. } | TermKind::TypedLiteral { value, .. } => value,
        }
    }

    /// Datatype IRI of a literal
    ///
    /// Plain literals report `xsd:string`, language-tagged ones
    /// `rdf:langString`. Returns `None` for IRIs and blank nodes.
    pub fn datatype(&self) -> Option<&str> {
        match &self.kind {
            TermKind::PlainLiteral { language: None, .. } => Some(xsd::STRING),
            TermKind::PlainLiteral {
                language: Some(_), ..
            } => Some(rdf::LANG_STRING),
            TermKind::TypedLiteral { datatype, .. } => Some(datatype),
            _ => None,
        }
    }

    /// Language tag of a language-tagged literal
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            TermKind::PlainLiteral {
                language: Some(lang),
                ..
            } => Some(lang),
            _ => None,
        }
    }
}

/// Writes the canonical N-Triples form of a term
fn write_canonical<W: fmt::Write>(kind: &TermKind, w: &mut W) -> fmt::Result {
    match kind {
        TermKind::Iri(iri) => write!(w, "<{}>", iri),
        TermKind::BlankNode(label) => write!(w, "_:{}", label),
        TermKind::PlainLiteral { value, language } => {
            write_quoted(value, w)?;
            if let Some(lang) = language {
                write!(w, "@{}", lang)?;
            }
            Ok(())
        }
        TermKind::TypedLiteral { value, datatype } => {
            write_quoted(value, w)?;
            write!(w, "^^<{}>", datatype)
        }
    }
}

fn write_quoted<W: fmt::Write>(value: &str, w: &mut W) -> fmt::Result {
    w.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => w.write_str("\\\"")?,
            '\\' => w.write_str("\\\\")?,
            '\n' => w.write_str("\\n")?,
            '\r' => w.write_str("\\r")?,
            '\t' => w.write_str("\\t")?,
            c => w.write_char(c)?,
        }
    }
    w.write_char('"')
}

/// Adapter feeding formatted output straight into the hasher
struct HashWriter(Xxh64);

impl fmt::Write for HashWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.update(s.as_bytes());
        Ok(())
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for Term {}

impl Hash for Term {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_canonical(&self.kind, f)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Term({})", self)
    }
}

// === Serde: serialize as the canonical string ===

impl Serialize for Term {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_canonical_forms_share_identity() {
        let a = Term::iri("http://example.org/Alice").unwrap();
        let b = Term::iri(String::from("http://example.org/Alice")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_identifier_is_hash_of_canonical_form() {
        let t = Term::typed_literal("5", xsd::INTEGER).unwrap();
        let canonical = t.to_string();
        assert_eq!(canonical, "\"5\"^^<http://www.w3.org/2001/XMLSchema#integer>");
        assert_eq!(
            t.id().as_u64(),
            xxhash_rust::xxh64::xxh64(canonical.as_bytes(), 0)
        );
    }

    #[test]
    fn test_literal_identity_includes_datatype_and_language() {
        let int = Term::typed_literal("1", xsd::INTEGER).unwrap();
        let long = Term::typed_literal("1", xsd::LONG).unwrap();
        let plain = Term::string("1");
        assert_ne!(int, long);
        assert_ne!(int, plain);

        let en = Term::plain_literal("chat", Some("en")).unwrap();
        let fr = Term::plain_literal("chat", Some("fr")).unwrap();
        assert_ne!(en, fr);
        assert_ne!(en, Term::string("chat"));
    }

    #[test]
    fn test_xsd_string_normalizes_to_plain() {
        let typed = Term::typed_literal("hello", xsd::STRING).unwrap();
        assert_eq!(typed, Term::string("hello"));
        assert_eq!(typed.datatype(), Some(xsd::STRING));
    }

    #[test]
    fn test_language_tags_are_case_insensitive() {
        let a = Term::plain_literal("colour", Some("en-GB")).unwrap();
        let b = Term::plain_literal("colour", Some("en-gb")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.language(), Some("en-gb"));
        assert_eq!(a.datatype(), Some(rdf::LANG_STRING));
    }

    #[test]
    fn test_empty_required_values_rejected() {
        assert!(matches!(Term::iri(""), Err(Error::InvalidTerm(_))));
        assert!(matches!(Term::blank(""), Err(Error::InvalidTerm(_))));
        assert!(matches!(Term::blank("_:"), Err(Error::InvalidTerm(_))));
        assert!(matches!(
            Term::plain_literal("x", Some("")),
            Err(Error::InvalidTerm(_))
        ));
        assert!(matches!(
            Term::typed_literal("x", ""),
            Err(Error::InvalidTerm(_))
        ));
        assert!(Term::iri("http://example.org/has space").is_err());
        // Empty lexical values are fine
        assert!(Term::plain_literal("", None).is_ok());
    }

    #[test]
    fn test_blank_prefix_is_stripped() {
        let a = Term::blank("_:b1").unwrap();
        let b = Term::blank("b1").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "_:b1");
        assert!(a.is_blank() && a.is_resource());
    }

    #[test]
    fn test_lexical_forms_and_escaping() {
        let lit = Term::string("say \"hi\"\n");
        assert_eq!(lit.to_string(), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(lit.lexical_form(), "say \"hi\"\n");

        let iri = Term::iri("http://example.org/x").unwrap();
        assert_eq!(iri.lexical_form(), "http://example.org/x");
        assert_eq!(iri.as_iri(), Some("http://example.org/x"));
        assert_eq!(iri.datatype(), None);
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(Term::integer(-3).lexical_form(), "-3");
        assert_eq!(Term::boolean(true).datatype(), Some(xsd::BOOLEAN));
        assert_eq!(Term::decimal(2.0).lexical_form(), "2.0");
        assert_eq!(Term::decimal(2.5).lexical_form(), "2.5");
    }

    #[test]
    fn test_serializes_as_canonical_string() {
        let t = Term::plain_literal("hi", Some("en")).unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"\\\"hi\\\"@en\"");
    }
}
