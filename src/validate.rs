//! Structural admission rules for candidate triples.
//!
//! Rejections are named, counted, and non-fatal: a rejected triple never
//! reaches the graph, but the batch keeps going.

use serde::{Deserialize, Serialize};

use crate::extract::CandidateTriple;

/// Copular predicates carry no relational content.
const COPULAS: [&str; 5] = ["is", "are", "was", "were", "be"];

/// Why a candidate triple was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Subject, predicate, or object is empty after trimming.
    EmptyField,
    /// Subject and object are identical, case-insensitively.
    SubjectEqualsObject,
    /// Subject or object is shorter than two characters.
    FieldTooShort,
    /// Predicate is a bare copula (`is`, `are`, `was`, `were`, `be`).
    CopulaPredicate,
    /// Predicate contains a character outside `[a-zA-Z0-9_\s]`.
    PredicateInvalidChars,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RejectReason::EmptyField => "subject, predicate, or object is empty",
            RejectReason::SubjectEqualsObject => "subject and object are identical",
            RejectReason::FieldTooShort => "subject or object is too short",
            RejectReason::CopulaPredicate => "predicate is a bare copula",
            RejectReason::PredicateInvalidChars => "predicate contains invalid characters",
        };
        f.write_str(s)
    }
}

/// Check a candidate triple against the admission rules.
///
/// Returns the first failing rule, in the order the rules are documented on
/// [`RejectReason`], or `Ok(())` for an admissible triple.
pub fn validate(triple: &CandidateTriple) -> Result<(), RejectReason> {
    let subject = triple.subject.trim();
    let predicate = triple.predicate.trim();
    let object = triple.object.trim();

    if subject.is_empty() || predicate.is_empty() || object.is_empty() {
        return Err(RejectReason::EmptyField);
    }
    if subject.to_lowercase() == object.to_lowercase() {
        return Err(RejectReason::SubjectEqualsObject);
    }
    if subject.chars().count() < 2 || object.chars().count() < 2 {
        return Err(RejectReason::FieldTooShort);
    }
    if COPULAS.contains(&predicate.to_lowercase().as_str()) {
        return Err(RejectReason::CopulaPredicate);
    }
    if predicate
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()))
    {
        return Err(RejectReason::PredicateInvalidChars);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: &str, p: &str, o: &str) -> CandidateTriple {
        CandidateTriple {
            subject: s.into(),
            predicate: p.into(),
            object: o.into(),
        }
    }

    #[test]
    fn accepts_ordinary_triple() {
        assert!(validate(&triple("Alice", "knows", "Bob")).is_ok());
        assert!(validate(&triple("Alice", "works for", "ACME Corp")).is_ok());
    }

    #[test]
    fn rejects_empty_fields() {
        assert_eq!(
            validate(&triple("", "knows", "Bob")),
            Err(RejectReason::EmptyField)
        );
        assert_eq!(
            validate(&triple("Alice", "  ", "Bob")),
            Err(RejectReason::EmptyField)
        );
    }

    #[test]
    fn rejects_self_reference() {
        assert_eq!(
            validate(&triple("Paris", "is", "Paris")),
            Err(RejectReason::SubjectEqualsObject)
        );
        // Case-insensitive comparison.
        assert_eq!(
            validate(&triple("paris", "borders", "PARIS")),
            Err(RejectReason::SubjectEqualsObject)
        );
    }

    #[test]
    fn rejects_short_fields() {
        assert_eq!(
            validate(&triple("A", "located_in", "France")),
            Err(RejectReason::FieldTooShort)
        );
        assert_eq!(
            validate(&triple("France", "contains", "X")),
            Err(RejectReason::FieldTooShort)
        );
    }

    #[test]
    fn rejects_copulas() {
        for copula in ["is", "ARE", "Was", "were", "be"] {
            assert_eq!(
                validate(&triple("Alice", copula, "Bob")),
                Err(RejectReason::CopulaPredicate),
                "copula {copula} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_invalid_predicate_characters() {
        assert_eq!(
            validate(&triple("Alice", "knows!", "Bob")),
            Err(RejectReason::PredicateInvalidChars)
        );
        assert_eq!(
            validate(&triple("Alice", "lives-in", "Paris")),
            Err(RejectReason::PredicateInvalidChars)
        );
        // Whitespace and underscores are allowed.
        assert!(validate(&triple("Alice", "lives in", "Paris")).is_ok());
        assert!(validate(&triple("Alice", "lives_in", "Paris")).is_ok());
    }
}
