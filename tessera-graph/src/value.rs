//! Literal values: parsing lexical forms and ordering them
//!
//! Terms carry lexical forms only. Range and pair constraints need the value
//! behind a literal, so this module interprets the XSD datatypes it knows:
//!
//! | Family   | Datatypes                                   | Representation            |
//! |----------|---------------------------------------------|---------------------------|
//! | numeric  | decimal and the integer types               | `BigDecimal` (exact)      |
//! | numeric  | float, double                               | `f64`                     |
//! | temporal | dateTime, date, time                        | `chrono` types            |
//! | boolean  | boolean                                     | `bool`                    |
//! | string   | plain literals, language-tagged literals    | lexical form              |
//!
//! Values of different families never compare. Within the numeric family an
//! exact comparison is used unless either side is a float/double.

use crate::term::{Term, TermKind};
use bigdecimal::BigDecimal;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use num_traits::ToPrimitive;
use std::cmp::Ordering;
use std::str::FromStr;
use tessera_vocab::xsd;

/// The interpreted value of a literal term
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue<'a> {
    /// xsd:decimal and every integer-derived type
    Decimal(BigDecimal),
    /// xsd:float and xsd:double
    Double(f64),
    /// xsd:dateTime with a timezone
    DateTime(DateTime<FixedOffset>),
    /// xsd:dateTime without a timezone
    LocalDateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Boolean(bool),
    /// Plain (xsd:string) literal
    String(&'a str),
    /// Language-tagged literal: (value, language)
    LangString(&'a str, &'a str),
}

impl<'a> LiteralValue<'a> {
    /// Interpret a term; `None` for IRIs, blank nodes, unknown datatypes and
    /// ill-typed lexical forms.
    pub fn from_term(term: &'a Term) -> Option<Self> {
        match term.kind() {
            TermKind::PlainLiteral {
                value,
                language: None,
            } => Some(LiteralValue::String(value)),
            TermKind::PlainLiteral {
                value,
                language: Some(lang),
            } => Some(LiteralValue::LangString(value, lang)),
            TermKind::TypedLiteral { value, datatype } => parse_typed(value, datatype),
            TermKind::Iri(_) | TermKind::BlankNode(_) => None,
        }
    }

    /// Order two values of the same family
    pub fn partial_cmp_value(&self, other: &Self) -> Option<Ordering> {
        use LiteralValue::*;
        match (self, other) {
            (Decimal(a), Decimal(b)) => a.partial_cmp(b),
            (Double(a), Double(b)) => a.partial_cmp(b),
            (Decimal(a), Double(b)) => a.to_f64()?.partial_cmp(b),
            (Double(a), Decimal(b)) => a.partial_cmp(&b.to_f64()?),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (LocalDateTime(a), LocalDateTime(b)) => Some(a.cmp(b)),
            (Date(a), Date(b)) => Some(a.cmp(b)),
            (Time(a), Time(b)) => Some(a.cmp(b)),
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (LangString(a, la), LangString(b, lb)) if la == lb => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Compare two terms by value
///
/// Returns `None` when either side is not a literal of a known datatype, or
/// when the two values belong to different families (a number and a date, a
/// string and a boolean, two strings in different languages).
pub fn compare_terms(a: &Term, b: &Term) -> Option<Ordering> {
    let a = LiteralValue::from_term(a)?;
    let b = LiteralValue::from_term(b)?;
    a.partial_cmp_value(&b)
}

/// Whether `lexical` is in the lexical space of `datatype`
///
/// Datatypes this module does not know are assumed valid.
pub fn is_valid_lexical(lexical: &str, datatype: &str) -> bool {
    if datatype == xsd::STRING || !is_known_datatype(datatype) {
        return true;
    }
    parse_typed(lexical, datatype).is_some()
}

fn is_known_datatype(datatype: &str) -> bool {
    xsd::is_numeric_type(datatype)
        || matches!(
            datatype,
            xsd::BOOLEAN | xsd::DATE_TIME | xsd::DATE | xsd::TIME
        )
}

fn parse_typed<'a>(lexical: &'a str, datatype: &str) -> Option<LiteralValue<'a>> {
    let lexical = lexical.trim();
    match datatype {
        xsd::DECIMAL => parse_decimal(lexical).map(LiteralValue::Decimal),
        xsd::FLOAT | xsd::DOUBLE => parse_double(lexical).map(LiteralValue::Double),
        xsd::BOOLEAN => match lexical {
            "true" | "1" => Some(LiteralValue::Boolean(true)),
            "false" | "0" => Some(LiteralValue::Boolean(false)),
            _ => None,
        },
        xsd::DATE_TIME => parse_date_time(lexical),
        xsd::DATE => NaiveDate::parse_from_str(strip_timezone(lexical), "%Y-%m-%d")
            .ok()
            .map(LiteralValue::Date),
        xsd::TIME => NaiveTime::parse_from_str(strip_timezone(lexical), "%H:%M:%S%.f")
            .ok()
            .map(LiteralValue::Time),
        dt if xsd::is_integer_type(dt) => parse_integer(lexical, dt).map(LiteralValue::Decimal),
        _ => None,
    }
}

fn parse_decimal(lexical: &str) -> Option<BigDecimal> {
    let digits = lexical.strip_prefix(['+', '-']).unwrap_or(lexical);
    let (int, frac) = digits.split_once('.').unwrap_or((digits, ""));
    let well_formed = !(int.is_empty() && frac.is_empty())
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit());
    if !well_formed {
        return None;
    }
    BigDecimal::from_str(lexical).ok()
}

fn parse_integer(lexical: &str, datatype: &str) -> Option<BigDecimal> {
    let digits = lexical.strip_prefix(['+', '-']).unwrap_or(lexical);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = BigDecimal::from_str(lexical).ok()?;
    let (min, max): (Option<i128>, Option<i128>) = match datatype {
        xsd::LONG => (Some(i64::MIN.into()), Some(i64::MAX.into())),
        xsd::INT => (Some(i32::MIN.into()), Some(i32::MAX.into())),
        xsd::SHORT => (Some(i16::MIN.into()), Some(i16::MAX.into())),
        xsd::BYTE => (Some(i8::MIN.into()), Some(i8::MAX.into())),
        xsd::UNSIGNED_LONG => (Some(0), Some(u64::MAX.into())),
        xsd::UNSIGNED_INT => (Some(0), Some(u32::MAX.into())),
        xsd::UNSIGNED_SHORT => (Some(0), Some(u16::MAX.into())),
        xsd::UNSIGNED_BYTE => (Some(0), Some(u8::MAX.into())),
        xsd::NON_NEGATIVE_INTEGER => (Some(0), None),
        xsd::POSITIVE_INTEGER => (Some(1), None),
        xsd::NON_POSITIVE_INTEGER => (None, Some(0)),
        xsd::NEGATIVE_INTEGER => (None, Some(-1)),
        _ => (None, None),
    };
    let in_range = min.map_or(true, |min| value >= BigDecimal::from(min))
        && max.map_or(true, |max| value <= BigDecimal::from(max));
    in_range.then_some(value)
}

fn parse_double(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => return Some(f64::INFINITY),
        "-INF" => return Some(f64::NEG_INFINITY),
        "NaN" => return Some(f64::NAN),
        _ => {}
    }
    // Rust also accepts "inf"/"nan" spellings that XSD does not
    if lexical
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return None;
    }
    lexical.parse().ok()
}

fn parse_date_time(lexical: &str) -> Option<LiteralValue<'_>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(LiteralValue::DateTime(dt));
    }
    NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(LiteralValue::LocalDateTime)
}

/// Drop a trailing `Z` or `±hh:mm` timezone from a date or time lexical
fn strip_timezone(lexical: &str) -> &str {
    if let Some(rest) = lexical.strip_suffix('Z') {
        return rest;
    }
    let bytes = lexical.as_bytes();
    if bytes.len() > 6 {
        let tz = &bytes[bytes.len() - 6..];
        if matches!(tz[0], b'+' | b'-') && tz[3] == b':' {
            return &lexical[..lexical.len() - 6];
        }
    }
    lexical
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(v: &str, dt: &str) -> Term {
        Term::typed_literal(v, dt).unwrap()
    }

    #[test]
    fn test_numeric_family_compares_across_types() {
        assert_eq!(
            compare_terms(&Term::integer(3), &typed("3.5", xsd::DECIMAL)),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_terms(&typed("4", xsd::INT), &typed("3.5", xsd::DOUBLE)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            compare_terms(&typed("5", xsd::LONG), &Term::integer(5)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_incomparable_families() {
        let iri = Term::iri("http://example.org/Bob").unwrap();
        assert_eq!(compare_terms(&iri, &Term::integer(1)), None);
        assert_eq!(compare_terms(&Term::string("1"), &Term::integer(1)), None);
        assert_eq!(
            compare_terms(&typed("2020-01-01", xsd::DATE), &Term::integer(1)),
            None
        );
        let en = Term::plain_literal("a", Some("en")).unwrap();
        let fr = Term::plain_literal("b", Some("fr")).unwrap();
        assert_eq!(compare_terms(&en, &fr), None);
    }

    #[test]
    fn test_temporal_and_string_ordering() {
        assert_eq!(
            compare_terms(
                &typed("2020-01-01", xsd::DATE),
                &typed("2021-06-30", xsd::DATE)
            ),
            Some(Ordering::Less)
        );
        assert_eq!(
            compare_terms(
                &typed("2020-01-01T10:00:00Z", xsd::DATE_TIME),
                &typed("2020-01-01T12:00:00+02:00", xsd::DATE_TIME)
            ),
            Some(Ordering::Equal)
        );
        assert_eq!(
            compare_terms(&Term::string("apple"), &Term::string("banana")),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_lexical_validity() {
        assert!(is_valid_lexical("42", xsd::INTEGER));
        assert!(!is_valid_lexical("4.2", xsd::INTEGER));
        assert!(!is_valid_lexical("abc", xsd::INTEGER));
        assert!(!is_valid_lexical("300", xsd::BYTE));
        assert!(!is_valid_lexical("-1", xsd::NON_NEGATIVE_INTEGER));
        assert!(is_valid_lexical("-0.5", xsd::DECIMAL));
        assert!(!is_valid_lexical("1e3", xsd::DECIMAL));
        assert!(is_valid_lexical("1e3", xsd::DOUBLE));
        assert!(is_valid_lexical("INF", xsd::DOUBLE));
        assert!(!is_valid_lexical("inf", xsd::DOUBLE));
        assert!(is_valid_lexical("1", xsd::BOOLEAN));
        assert!(!is_valid_lexical("yes", xsd::BOOLEAN));
        assert!(is_valid_lexical("2020-02-29", xsd::DATE));
        assert!(!is_valid_lexical("2021-02-29", xsd::DATE));
        assert!(is_valid_lexical("13:20:00", xsd::TIME));
        assert!(is_valid_lexical("anything", "http://example.org/customType"));
    }
}
