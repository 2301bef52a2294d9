//! SHACL constraint types and validators
//!
//! This module defines the constraint types supported by the SHACL engine
//! and provides validation logic for each constraint type that only needs the
//! data graph. Constraints that refer to other shapes (`sh:not`, `sh:and`,
//! `sh:or`, `sh:xone`, `sh:node`, `sh:property`, `sh:qualifiedValueShape`)
//! hold the referenced shape's identifying term and are evaluated by the
//! validation engine, which resolves them through the shapes graph.

pub mod cardinality;
pub mod closed;
pub mod datatype;
pub mod language;
pub mod pair;
pub mod pattern;
pub mod value;

use crate::error::{Result, ShaclError};
use crate::path::PropertyPath;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use tessera_graph::Term;
use tessera_vocab::shacl;
use tessera_vocab::shacl::component;

/// A SHACL Core constraint
///
/// Closed set: the engine dispatches on it with a single exhaustive match.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    // Value type constraints
    /// sh:class - values must be instances of this class
    Class(Term),
    /// sh:datatype - values must be literals of this datatype
    Datatype(Term),
    /// sh:nodeKind - values must be of this node kind
    NodeKind(NodeKind),

    // Cardinality constraints
    /// sh:minCount - minimum number of values
    MinCount(usize),
    /// sh:maxCount - maximum number of values
    MaxCount(usize),

    // Value range constraints
    /// sh:minExclusive - value > this
    MinExclusive(Term),
    /// sh:minInclusive - value >= this
    MinInclusive(Term),
    /// sh:maxExclusive - value < this
    MaxExclusive(Term),
    /// sh:maxInclusive - value <= this
    MaxInclusive(Term),

    // String constraints
    /// sh:minLength - minimum string length
    MinLength(usize),
    /// sh:maxLength - maximum string length
    MaxLength(usize),
    /// sh:pattern with optional flags
    Pattern(Pattern),
    /// sh:languageIn - language must match one of these ranges
    LanguageIn(Vec<String>),
    /// sh:uniqueLang - each language tag may only appear once
    UniqueLang(bool),

    // Value constraints
    /// sh:in - value must be in this list
    In(Vec<Term>),
    /// sh:hasValue - must have this specific value
    HasValue(Term),

    // Pair constraints (comparing two properties)
    /// sh:equals - values must equal values of another property
    Equals(Term),
    /// sh:disjoint - values must not overlap with values of another property
    Disjoint(Term),
    /// sh:lessThan - values must be less than values of another property
    LessThan(Term),
    /// sh:lessThanOrEquals - values must be <= values of another property
    LessThanOrEquals(Term),

    // Shape-based constraints
    /// sh:not - value nodes must NOT conform to the shape
    Not(Term),
    /// sh:and - value nodes must conform to all shapes
    And(Vec<Term>),
    /// sh:or - value nodes must conform to at least one shape
    Or(Vec<Term>),
    /// sh:xone - value nodes must conform to exactly one shape
    Xone(Vec<Term>),
    /// sh:node - value nodes must conform to the shape
    Node(Term),
    /// sh:property - value nodes are validated against a property shape
    Property(Term),
    /// sh:qualifiedValueShape with min/max counts
    QualifiedValueShape {
        shape: Term,
        min_count: Option<usize>,
        max_count: Option<usize>,
        /// sh:qualifiedValueShapesDisjoint
        disjoint: bool,
    },

    // Other constraints
    /// sh:closed - value nodes may only use declared properties
    Closed {
        /// sh:ignoredProperties
        ignored_properties: Vec<Term>,
    },
}

impl Constraint {
    /// sh:class; the class must be an IRI or blank node
    pub fn class(class: Term) -> Result<Self> {
        require_resource(component::CLASS, "class", &class)?;
        Ok(Constraint::Class(class))
    }

    /// sh:datatype; the datatype must be an IRI
    pub fn datatype(datatype: Term) -> Result<Self> {
        require_iri(component::DATATYPE, "datatype", &datatype)?;
        Ok(Constraint::Datatype(datatype))
    }

    pub fn node_kind(kind: NodeKind) -> Self {
        Constraint::NodeKind(kind)
    }

    pub fn min_count(n: usize) -> Self {
        Constraint::MinCount(n)
    }

    pub fn max_count(n: usize) -> Self {
        Constraint::MaxCount(n)
    }

    pub fn min_exclusive(bound: Term) -> Self {
        Constraint::MinExclusive(bound)
    }

    pub fn min_inclusive(bound: Term) -> Self {
        Constraint::MinInclusive(bound)
    }

    pub fn max_exclusive(bound: Term) -> Self {
        Constraint::MaxExclusive(bound)
    }

    pub fn max_inclusive(bound: Term) -> Self {
        Constraint::MaxInclusive(bound)
    }

    pub fn min_length(n: usize) -> Self {
        Constraint::MinLength(n)
    }

    pub fn max_length(n: usize) -> Self {
        Constraint::MaxLength(n)
    }

    /// sh:pattern; the regular expression is compiled here
    pub fn pattern(pattern: impl Into<String>, flags: Option<&str>) -> Result<Self> {
        Ok(Constraint::Pattern(Pattern::new(pattern, flags)?))
    }

    /// sh:languageIn; ranges must be non-empty
    pub fn language_in<S: Into<String>>(ranges: impl IntoIterator<Item = S>) -> Result<Self> {
        let ranges: Vec<String> = ranges.into_iter().map(Into::into).collect();
        if ranges.iter().any(String::is_empty) {
            return Err(ShaclError::invalid_constraint(
                component::LANGUAGE_IN,
                "language ranges must not be empty",
            ));
        }
        Ok(Constraint::LanguageIn(ranges))
    }

    pub fn unique_lang(unique: bool) -> Self {
        Constraint::UniqueLang(unique)
    }

    pub fn in_list(values: impl IntoIterator<Item = Term>) -> Self {
        Constraint::In(values.into_iter().collect())
    }

    pub fn has_value(value: Term) -> Self {
        Constraint::HasValue(value)
    }

    /// sh:equals; the other property must be an IRI
    pub fn equals(property: Term) -> Result<Self> {
        require_iri(component::EQUALS, "property", &property)?;
        Ok(Constraint::Equals(property))
    }

    /// sh:disjoint; the other property must be an IRI
    pub fn disjoint(property: Term) -> Result<Self> {
        require_iri(component::DISJOINT, "property", &property)?;
        Ok(Constraint::Disjoint(property))
    }

    /// sh:lessThan; the other property must be an IRI
    pub fn less_than(property: Term) -> Result<Self> {
        require_iri(component::LESS_THAN, "property", &property)?;
        Ok(Constraint::LessThan(property))
    }

    /// sh:lessThanOrEquals; the other property must be an IRI
    pub fn less_than_or_equals(property: Term) -> Result<Self> {
        require_iri(component::LESS_THAN_OR_EQUALS, "property", &property)?;
        Ok(Constraint::LessThanOrEquals(property))
    }

    pub fn not(shape: Term) -> Result<Self> {
        require_resource(component::NOT, "shape", &shape)?;
        Ok(Constraint::Not(shape))
    }

    pub fn and(shapes: Vec<Term>) -> Result<Self> {
        require_shape_list(component::AND, &shapes)?;
        Ok(Constraint::And(shapes))
    }

    pub fn or(shapes: Vec<Term>) -> Result<Self> {
        require_shape_list(component::OR, &shapes)?;
        Ok(Constraint::Or(shapes))
    }

    pub fn xone(shapes: Vec<Term>) -> Result<Self> {
        require_shape_list(component::XONE, &shapes)?;
        Ok(Constraint::Xone(shapes))
    }

    pub fn node(shape: Term) -> Result<Self> {
        require_resource(component::NODE, "shape", &shape)?;
        Ok(Constraint::Node(shape))
    }

    pub fn property(shape: Term) -> Result<Self> {
        require_resource(component::PROPERTY, "shape", &shape)?;
        Ok(Constraint::Property(shape))
    }

    /// sh:qualifiedValueShape; at least one bound is required and min <= max
    pub fn qualified_value_shape(
        shape: Term,
        min_count: Option<usize>,
        max_count: Option<usize>,
        disjoint: bool,
    ) -> Result<Self> {
        require_resource(component::QUALIFIED_MIN_COUNT, "shape", &shape)?;
        match (min_count, max_count) {
            (None, None) => {
                return Err(ShaclError::invalid_constraint(
                    component::QUALIFIED_MIN_COUNT,
                    "qualifiedValueShape needs qualifiedMinCount or qualifiedMaxCount",
                ))
            }
            (Some(min), Some(max)) if min > max => {
                return Err(ShaclError::invalid_constraint(
                    component::QUALIFIED_MIN_COUNT,
                    format!("qualifiedMinCount {} exceeds qualifiedMaxCount {}", min, max),
                ))
            }
            _ => {}
        }
        Ok(Constraint::QualifiedValueShape {
            shape,
            min_count,
            max_count,
            disjoint,
        })
    }

    /// sh:closed with sh:ignoredProperties
    pub fn closed(ignored_properties: impl IntoIterator<Item = Term>) -> Result<Self> {
        let ignored_properties: Vec<Term> = ignored_properties.into_iter().collect();
        for p in &ignored_properties {
            require_iri(component::CLOSED, "ignored property", p)?;
        }
        Ok(Constraint::Closed { ignored_properties })
    }

    /// The constraint component reported for this constraint
    ///
    /// Qualified value shapes report the min-count component when a minimum
    /// is set; the engine picks the exact one per failing bound.
    pub fn component(&self) -> ConstraintComponent {
        use ConstraintComponent as C;
        match self {
            Constraint::Class(_) => C::Class,
            Constraint::Datatype(_) => C::Datatype,
            Constraint::NodeKind(_) => C::NodeKind,
            Constraint::MinCount(_) => C::MinCount,
            Constraint::MaxCount(_) => C::MaxCount,
            Constraint::MinExclusive(_) => C::MinExclusive,
            Constraint::MinInclusive(_) => C::MinInclusive,
            Constraint::MaxExclusive(_) => C::MaxExclusive,
            Constraint::MaxInclusive(_) => C::MaxInclusive,
            Constraint::MinLength(_) => C::MinLength,
            Constraint::MaxLength(_) => C::MaxLength,
            Constraint::Pattern(_) => C::Pattern,
            Constraint::LanguageIn(_) => C::LanguageIn,
            Constraint::UniqueLang(_) => C::UniqueLang,
            Constraint::In(_) => C::In,
            Constraint::HasValue(_) => C::HasValue,
            Constraint::Equals(_) => C::Equals,
            Constraint::Disjoint(_) => C::Disjoint,
            Constraint::LessThan(_) => C::LessThan,
            Constraint::LessThanOrEquals(_) => C::LessThanOrEquals,
            Constraint::Not(_) => C::Not,
            Constraint::And(_) => C::And,
            Constraint::Or(_) => C::Or,
            Constraint::Xone(_) => C::Xone,
            Constraint::Node(_) => C::Node,
            Constraint::Property(_) => C::Property,
            Constraint::QualifiedValueShape { min_count, .. } => {
                if min_count.is_some() {
                    C::QualifiedMinCount
                } else {
                    C::QualifiedMaxCount
                }
            }
            Constraint::Closed { .. } => C::Closed,
        }
    }

    /// The SHACL property that declares this constraint on a shape
    pub fn parameter_iri(&self) -> &'static str {
        match self {
            Constraint::Class(_) => shacl::CLASS,
            Constraint::Datatype(_) => shacl::DATATYPE,
            Constraint::NodeKind(_) => shacl::NODE_KIND,
            Constraint::MinCount(_) => shacl::MIN_COUNT,
            Constraint::MaxCount(_) => shacl::MAX_COUNT,
            Constraint::MinExclusive(_) => shacl::MIN_EXCLUSIVE,
            Constraint::MinInclusive(_) => shacl::MIN_INCLUSIVE,
            Constraint::MaxExclusive(_) => shacl::MAX_EXCLUSIVE,
            Constraint::MaxInclusive(_) => shacl::MAX_INCLUSIVE,
            Constraint::MinLength(_) => shacl::MIN_LENGTH,
            Constraint::MaxLength(_) => shacl::MAX_LENGTH,
            Constraint::Pattern(_) => shacl::PATTERN,
            Constraint::LanguageIn(_) => shacl::LANGUAGE_IN,
            Constraint::UniqueLang(_) => shacl::UNIQUE_LANG,
            Constraint::In(_) => shacl::IN,
            Constraint::HasValue(_) => shacl::HAS_VALUE,
            Constraint::Equals(_) => shacl::EQUALS,
            Constraint::Disjoint(_) => shacl::DISJOINT,
            Constraint::LessThan(_) => shacl::LESS_THAN,
            Constraint::LessThanOrEquals(_) => shacl::LESS_THAN_OR_EQUALS,
            Constraint::Not(_) => shacl::NOT,
            Constraint::And(_) => shacl::AND,
            Constraint::Or(_) => shacl::OR,
            Constraint::Xone(_) => shacl::XONE,
            Constraint::Node(_) => shacl::NODE,
            Constraint::Property(_) => shacl::PROPERTY,
            Constraint::QualifiedValueShape { .. } => shacl::QUALIFIED_VALUE_SHAPE,
            Constraint::Closed { .. } => shacl::CLOSED,
        }
    }

    /// Shapes this constraint refers to by identifying term
    pub fn referenced_shapes(&self) -> Vec<&Term> {
        match self {
            Constraint::Not(s) | Constraint::Node(s) | Constraint::Property(s) => vec![s],
            Constraint::QualifiedValueShape { shape, .. } => vec![shape],
            Constraint::And(shapes) | Constraint::Or(shapes) | Constraint::Xone(shapes) => {
                shapes.iter().collect()
            }
            _ => Vec::new(),
        }
    }

    /// Get a human-readable description of this constraint
    pub fn description(&self) -> String {
        match self {
            Constraint::MinCount(n) => format!("sh:minCount {}", n),
            Constraint::MaxCount(n) => format!("sh:maxCount {}", n),
            Constraint::Datatype(dt) => format!("sh:datatype {}", dt),
            Constraint::NodeKind(kind) => format!("sh:nodeKind {}", kind),
            Constraint::Class(class) => format!("sh:class {}", class),
            Constraint::MinInclusive(v) => format!("sh:minInclusive {}", v),
            Constraint::MaxInclusive(v) => format!("sh:maxInclusive {}", v),
            Constraint::MinExclusive(v) => format!("sh:minExclusive {}", v),
            Constraint::MaxExclusive(v) => format!("sh:maxExclusive {}", v),
            Constraint::Pattern(p) => format!("sh:pattern \"{}\"", p.source()),
            Constraint::MinLength(n) => format!("sh:minLength {}", n),
            Constraint::MaxLength(n) => format!("sh:maxLength {}", n),
            Constraint::HasValue(v) => format!("sh:hasValue {}", v),
            Constraint::In(vs) => format!("sh:in ({} values)", vs.len()),
            Constraint::Equals(prop) => format!("sh:equals {}", prop),
            Constraint::Disjoint(prop) => format!("sh:disjoint {}", prop),
            Constraint::LessThan(prop) => format!("sh:lessThan {}", prop),
            Constraint::LessThanOrEquals(prop) => format!("sh:lessThanOrEquals {}", prop),
            Constraint::UniqueLang(v) => format!("sh:uniqueLang {}", v),
            Constraint::LanguageIn(langs) => format!("sh:languageIn {:?}", langs),
            Constraint::Not(s) => format!("sh:not {}", s),
            Constraint::And(shapes) => format!("sh:and ({} shapes)", shapes.len()),
            Constraint::Or(shapes) => format!("sh:or ({} shapes)", shapes.len()),
            Constraint::Xone(shapes) => format!("sh:xone ({} shapes)", shapes.len()),
            Constraint::Node(s) => format!("sh:node {}", s),
            Constraint::Property(s) => format!("sh:property {}", s),
            Constraint::QualifiedValueShape {
                shape,
                min_count,
                max_count,
                ..
            } => format!(
                "sh:qualifiedValueShape {} (min: {:?}, max: {:?})",
                shape, min_count, max_count
            ),
            Constraint::Closed { ignored_properties } => format!(
                "sh:closed true (ignored: {} properties)",
                ignored_properties.len()
            ),
        }
    }
}

fn require_iri(component: &'static str, what: &str, term: &Term) -> Result<()> {
    if term.is_iri() {
        Ok(())
    } else {
        Err(ShaclError::invalid_constraint(
            component,
            format!("{} must be an IRI, got {}", what, term),
        ))
    }
}

fn require_resource(component: &'static str, what: &str, term: &Term) -> Result<()> {
    if term.is_resource() {
        Ok(())
    } else {
        Err(ShaclError::invalid_constraint(
            component,
            format!("{} must be an IRI or blank node, got {}", what, term),
        ))
    }
}

fn require_shape_list(component: &'static str, shapes: &[Term]) -> Result<()> {
    if shapes.is_empty() {
        return Err(ShaclError::invalid_constraint(
            component,
            "shape list must not be empty",
        ));
    }
    shapes
        .iter()
        .try_for_each(|s| require_resource(component, "shape", s))
}

/// sh:nodeKind values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    BlankNode,
    IRI,
    Literal,
    BlankNodeOrIRI,
    BlankNodeOrLiteral,
    IRIOrLiteral,
}

impl NodeKind {
    pub fn iri(self) -> &'static str {
        match self {
            NodeKind::BlankNode => shacl::BLANK_NODE,
            NodeKind::IRI => shacl::IRI,
            NodeKind::Literal => shacl::LITERAL,
            NodeKind::BlankNodeOrIRI => shacl::BLANK_NODE_OR_IRI,
            NodeKind::BlankNodeOrLiteral => shacl::BLANK_NODE_OR_LITERAL,
            NodeKind::IRIOrLiteral => shacl::IRI_OR_LITERAL,
        }
    }

    /// Whether a term is of this kind
    pub fn matches(self, term: &Term) -> bool {
        let (iri, blank, literal) = (term.is_iri(), term.is_blank(), term.is_literal());
        match self {
            NodeKind::BlankNode => blank,
            NodeKind::IRI => iri,
            NodeKind::Literal => literal,
            NodeKind::BlankNodeOrIRI => blank || iri,
            NodeKind::BlankNodeOrLiteral => blank || literal,
            NodeKind::IRIOrLiteral => iri || literal,
        }
    }

    /// The narrowest kind describing a term
    pub fn of(term: &Term) -> NodeKind {
        if term.is_iri() {
            NodeKind::IRI
        } else if term.is_blank() {
            NodeKind::BlankNode
        } else {
            NodeKind::Literal
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::BlankNode => "sh:BlankNode",
            NodeKind::IRI => "sh:IRI",
            NodeKind::Literal => "sh:Literal",
            NodeKind::BlankNodeOrIRI => "sh:BlankNodeOrIRI",
            NodeKind::BlankNodeOrLiteral => "sh:BlankNodeOrLiteral",
            NodeKind::IRIOrLiteral => "sh:IRIOrLiteral",
        };
        f.write_str(name)
    }
}

/// A compiled sh:pattern with its flags
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    flags: Option<String>,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern; supported flags are `i`, `m`, `s` and `x`
    pub fn new(source: impl Into<String>, flags: Option<&str>) -> Result<Self> {
        let source = source.into();
        let flags = flags.filter(|f| !f.is_empty()).map(str::to_string);

        // Build regex with optional flags
        let regex_pattern = if let Some(f) = &flags {
            let mut prefix = String::from("(?");
            for c in f.chars() {
                match c {
                    'i' | 'm' | 's' | 'x' => prefix.push(c),
                    other => {
                        return Err(ShaclError::InvalidPattern {
                            pattern: source,
                            message: format!("unsupported flag '{}'", other),
                        })
                    }
                }
            }
            prefix.push(')');
            format!("{}{}", prefix, source)
        } else {
            source.clone()
        };

        let regex = Regex::new(&regex_pattern).map_err(|e| ShaclError::InvalidPattern {
            pattern: source.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            source,
            flags,
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> Option<&str> {
        self.flags.as_deref()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

/// The SHACL constraint components, one per constraint kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintComponent {
    Class,
    Datatype,
    NodeKind,
    MinCount,
    MaxCount,
    MinExclusive,
    MinInclusive,
    MaxExclusive,
    MaxInclusive,
    MinLength,
    MaxLength,
    Pattern,
    LanguageIn,
    UniqueLang,
    In,
    HasValue,
    Equals,
    Disjoint,
    LessThan,
    LessThanOrEquals,
    Not,
    And,
    Or,
    Xone,
    Node,
    Property,
    QualifiedMinCount,
    QualifiedMaxCount,
    Closed,
}

impl ConstraintComponent {
    /// The `sh:*ConstraintComponent` IRI
    pub fn iri(self) -> &'static str {
        use ConstraintComponent as C;
        match self {
            C::Class => component::CLASS,
            C::Datatype => component::DATATYPE,
            C::NodeKind => component::NODE_KIND,
            C::MinCount => component::MIN_COUNT,
            C::MaxCount => component::MAX_COUNT,
            C::MinExclusive => component::MIN_EXCLUSIVE,
            C::MinInclusive => component::MIN_INCLUSIVE,
            C::MaxExclusive => component::MAX_EXCLUSIVE,
            C::MaxInclusive => component::MAX_INCLUSIVE,
            C::MinLength => component::MIN_LENGTH,
            C::MaxLength => component::MAX_LENGTH,
            C::Pattern => component::PATTERN,
            C::LanguageIn => component::LANGUAGE_IN,
            C::UniqueLang => component::UNIQUE_LANG,
            C::In => component::IN,
            C::HasValue => component::HAS_VALUE,
            C::Equals => component::EQUALS,
            C::Disjoint => component::DISJOINT,
            C::LessThan => component::LESS_THAN,
            C::LessThanOrEquals => component::LESS_THAN_OR_EQUALS,
            C::Not => component::NOT,
            C::And => component::AND,
            C::Or => component::OR,
            C::Xone => component::XONE,
            C::Node => component::NODE,
            C::Property => component::PROPERTY,
            C::QualifiedMinCount => component::QUALIFIED_MIN_COUNT,
            C::QualifiedMaxCount => component::QUALIFIED_MAX_COUNT,
            C::Closed => component::CLOSED,
        }
    }

    pub fn term(self) -> Term {
        Term::vocab(self.iri())
    }
}

impl fmt::Display for ConstraintComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri())
    }
}

impl Serialize for ConstraintComponent {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.iri())
    }
}

/// A single failure produced by a constraint validator
///
/// The engine turns it into a `ValidationResult` by adding the focus node,
/// source shape, severity and (unless overridden here) the shape's path.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    pub component: ConstraintComponent,
    /// The value node that failed, if the failure is about one value
    pub value: Option<Term>,
    /// Overrides the shape's path (sh:closed reports the offending predicate)
    pub path: Option<PropertyPath>,
    pub message: String,
}

impl ConstraintViolation {
    pub fn new(component: ConstraintComponent, value: Option<Term>, message: String) -> Self {
        Self {
            component,
            value,
            path: None,
            message,
        }
    }

    pub fn with_path(mut self, path: PropertyPath) -> Self {
        self.path = Some(path);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ex(s: &str) -> Term {
        Term::iri(format!("http://example.org/{}", s)).unwrap()
    }

    #[test]
    fn test_constructors_validate_arguments() {
        assert!(Constraint::class(Term::string("Person")).is_err());
        assert!(Constraint::datatype(Term::blank("b").unwrap()).is_err());
        assert!(Constraint::equals(Term::integer(1)).is_err());
        assert!(Constraint::and(vec![]).is_err());
        assert!(Constraint::or(vec![Term::string("s")]).is_err());
        assert!(Constraint::language_in([""]).is_err());
        assert!(Constraint::qualified_value_shape(ex("S"), None, None, false).is_err());
        assert!(Constraint::qualified_value_shape(ex("S"), Some(3), Some(1), false).is_err());
        assert!(matches!(
            Constraint::pattern("(unclosed", None),
            Err(ShaclError::InvalidPattern { .. })
        ));
        assert!(matches!(
            Constraint::pattern("a", Some("q")),
            Err(ShaclError::InvalidPattern { .. })
        ));

        assert!(Constraint::class(ex("Person")).is_ok());
        assert!(Constraint::not(Term::blank("s1").unwrap()).is_ok());
        assert!(Constraint::xone(vec![ex("A"), ex("B")]).is_ok());
    }

    #[test]
    fn test_components_and_parameters() {
        let c = Constraint::class(ex("Person")).unwrap();
        assert_eq!(
            c.component().iri(),
            "http://www.w3.org/ns/shacl#ClassConstraintComponent"
        );
        assert_eq!(c.parameter_iri(), shacl::CLASS);

        let q = Constraint::qualified_value_shape(ex("S"), None, Some(2), false).unwrap();
        assert_eq!(q.component(), ConstraintComponent::QualifiedMaxCount);
        assert_eq!(q.referenced_shapes(), vec![&ex("S")]);
    }

    #[test]
    fn test_pattern_flags() {
        let p = Pattern::new("^abc$", Some("i")).unwrap();
        assert!(p.is_match("ABC"));
        assert_eq!(p.flags(), Some("i"));
        assert_eq!(p, Pattern::new("^abc$", Some("i")).unwrap());
        assert_ne!(p, Pattern::new("^abc$", None).unwrap());
    }

    #[test]
    fn test_node_kind_matching() {
        let iri = ex("a");
        let blank = Term::blank("b").unwrap();
        let lit = Term::string("c");
        assert!(NodeKind::IRI.matches(&iri));
        assert!(!NodeKind::IRI.matches(&blank));
        assert!(NodeKind::BlankNodeOrIRI.matches(&blank));
        assert!(NodeKind::IRIOrLiteral.matches(&lit));
        assert!(!NodeKind::BlankNodeOrIRI.matches(&lit));
        assert_eq!(NodeKind::of(&lit), NodeKind::Literal);
    }
}
