//! Language tag constraint validators (sh:languageIn, sh:uniqueLang)

use super::{ConstraintComponent, ConstraintViolation};
use tessera_graph::Term;

/// Validate sh:languageIn constraint
///
/// Uses basic language-range filtering: a range matches a tag that equals it
/// or starts with it followed by `-`, ignoring case. `*` matches any tag.
/// Values without a language tag fail.
pub fn validate_language_in(value: &Term, ranges: &[String]) -> Option<ConstraintViolation> {
    let matched = value
        .language()
        .is_some_and(|tag| ranges.iter().any(|range| language_matches(tag, range)));
    if matched {
        return None;
    }

    let found = value
        .language()
        .map(|tag| format!("language tag \"{}\"", tag))
        .unwrap_or_else(|| "no language tag".to_string());
    Some(ConstraintViolation::new(
        ConstraintComponent::LanguageIn,
        Some(value.clone()),
        format!(
            "Value {} has {} but must match one of [{}]",
            value,
            found,
            ranges.join(", ")
        ),
    ))
}

fn language_matches(tag: &str, range: &str) -> bool {
    if range == "*" {
        return !tag.is_empty();
    }
    let tag = tag.to_ascii_lowercase();
    let range = range.to_ascii_lowercase();
    tag == range
        || (tag.len() > range.len()
            && tag.starts_with(&range)
            && tag.as_bytes()[range.len()] == b'-')
}

/// Validate sh:uniqueLang constraint
///
/// Produces one violation per language tag carried by more than one value,
/// in order of first use.
pub fn validate_unique_lang(values: &[Term]) -> Vec<ConstraintViolation> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for tag in values.iter().filter_map(Term::language) {
        match counts.iter_mut().find(|(seen, _)| *seen == tag) {
            Some((_, n)) => *n += 1,
            None => counts.push((tag, 1)),
        }
    }

    counts
        .into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(tag, n)| {
            ConstraintViolation::new(
                ConstraintComponent::UniqueLang,
                None,
                format!("Language tag \"{}\" is used by {} values", tag, n),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lang(value: &str, tag: &str) -> Term {
        Term::plain_literal(value, Some(tag)).unwrap()
    }

    fn ranges(rs: &[&str]) -> Vec<String> {
        rs.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_filtering() {
        let allowed = ranges(&["en", "fr"]);
        assert!(validate_language_in(&lang("colour", "en-GB"), &allowed).is_none());
        assert!(validate_language_in(&lang("couleur", "FR"), &allowed).is_none());
        assert!(validate_language_in(&lang("Farbe", "de"), &allowed).is_some());
        // "en" must not match "eng"
        assert!(validate_language_in(&lang("x", "eng"), &allowed).is_some());
    }

    #[test]
    fn test_untagged_values_fail() {
        let allowed = ranges(&["*"]);
        assert!(validate_language_in(&lang("x", "de"), &allowed).is_none());
        let violation = validate_language_in(&Term::string("x"), &allowed).unwrap();
        assert!(violation.message.contains("no language tag"));
    }

    #[test]
    fn test_unique_lang() {
        let values = vec![
            lang("a", "en"),
            lang("b", "fr"),
            lang("c", "EN"),
            Term::string("d"),
            lang("e", "fr"),
            lang("f", "de"),
        ];
        let violations = validate_unique_lang(&values);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].message.contains("\"en\""));
        assert!(violations[1].message.contains("\"fr\""));
        assert!(violations.iter().all(|v| v.value.is_none()));

        assert!(validate_unique_lang(&values[..2]).is_empty());
    }
}
