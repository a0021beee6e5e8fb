//! Candidate triple extraction from semi-structured strings.
//!
//! Input records look like `(subject, predicate, object)` optionally followed
//! by a timestamp token and a quoted or bare attribute list:
//!
//! ```text
//! (Alice, knows, Bob), 2024-5-3 10:00:00, "since childhood"
//! ```
//!
//! Extraction never fails: malformed input yields no candidates and the
//! pipeline counts the record as discarded.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// All `(s, p, o)` groups in one string. The object may contain commas up to
/// the closing parenthesis.
static RE_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^,]+),\s*([^,]+),\s*([^)]+)\)").unwrap());

/// A parsed but not yet validated or resolved triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTriple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

/// A candidate triple plus the optional trailing metadata of its record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub triple: CandidateTriple,
    /// Raw timestamp token, not yet normalized (see [`crate::temporal`]).
    pub timestamp: Option<String>,
    /// Quote-stripped attribute tokens.
    pub attributes: Vec<String>,
}

/// Extract every `(subject, predicate, object)` group in `raw` independently.
///
/// Used by the plain ingestion path, where one record may carry several
/// triples. Trailing metadata outside the parentheses is ignored here.
pub fn extract_triples(raw: &str) -> Vec<CandidateTriple> {
    RE_TRIPLE
        .captures_iter(raw)
        .map(|c| CandidateTriple {
            subject: c[1].trim().to_string(),
            predicate: c[2].trim().to_string(),
            object: c[3].trim().to_string(),
        })
        .collect()
}

/// Extract a single triple and its trailing metadata from `raw`.
///
/// The interior of the first `(...)` group is split on its first two commas;
/// the object runs greedily to the closing parenthesis. Everything after the
/// closing parenthesis is optional metadata: a timestamp token, then zero or
/// more attribute tokens. A double-quoted attribute keeps its embedded commas
/// as one token.
///
/// Returns `None` when there is no well-formed triple (missing parenthesis or
/// fewer than three interior fields).
pub fn extract_record(raw: &str) -> Option<CandidateRecord> {
    let open = raw.find('(')?;
    let close = raw[open + 1..].find(')')? + open + 1;

    let interior = &raw[open + 1..close];
    let mut fields = interior.splitn(3, ',');
    let subject = fields.next()?.trim();
    let predicate = fields.next()?.trim();
    let object = fields.next()?.trim();
    if subject.is_empty() && predicate.is_empty() && object.is_empty() {
        return None;
    }

    let triple = CandidateTriple {
        subject: subject.to_string(),
        predicate: predicate.to_string(),
        object: object.to_string(),
    };

    let trailing = raw[close + 1..].trim_start();
    let trailing = trailing.strip_prefix(',').unwrap_or(trailing);
    if trailing.trim().is_empty() {
        return Some(CandidateRecord {
            triple,
            timestamp: None,
            attributes: Vec::new(),
        });
    }

    let mut fields = split_quoted(trailing);
    let timestamp = if fields.is_empty() {
        None
    } else {
        Some(fields.remove(0))
    };
    let attributes = fields
        .into_iter()
        .map(|f| f.trim_matches('"').trim().to_string())
        .filter(|f| !f.is_empty())
        .collect();

    Some(CandidateRecord {
        triple,
        timestamp,
        attributes,
    })
}

/// Split on commas, but not inside double quotes.
fn split_quoted(s: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        fields.push(current.trim().to_string());
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_triple_with_timestamp_and_attribute() {
        let rec = extract_record(r#"(Alice, knows, Bob), 2024-5-3 10:00:00, "since childhood""#)
            .unwrap();
        assert_eq!(rec.triple.subject, "Alice");
        assert_eq!(rec.triple.predicate, "knows");
        assert_eq!(rec.triple.object, "Bob");
        assert_eq!(rec.timestamp.as_deref(), Some("2024-5-3 10:00:00"));
        assert_eq!(rec.attributes, vec!["since childhood"]);
    }

    #[test]
    fn object_may_contain_commas() {
        let rec = extract_record("(Alice, visited, Paris, France)").unwrap();
        assert_eq!(rec.triple.object, "Paris, France");
        assert!(rec.timestamp.is_none());
        assert!(rec.attributes.is_empty());
    }

    #[test]
    fn quoted_attribute_keeps_embedded_commas() {
        let rec =
            extract_record(r#"(a1, likes, b1), 2023-12-1 08:30:00, "loud, fast, frequent""#)
                .unwrap();
        assert_eq!(rec.attributes, vec!["loud, fast, frequent"]);
    }

    #[test]
    fn multiple_attributes() {
        let rec = extract_record(r#"(a1, likes, b1), 2023-2-7 12:00:00, "often", "a lot""#)
            .unwrap();
        assert_eq!(rec.attributes, vec!["often", "a lot"]);
    }

    #[test]
    fn malformed_input_yields_nothing() {
        assert!(extract_record("no parentheses here").is_none());
        assert!(extract_record("(only, two)").is_none());
        assert!(extract_record("(unclosed, for, ever").is_none());
        assert!(extract_triples("nothing to see").is_empty());
    }

    #[test]
    fn multiple_groups_extract_independently() {
        let triples = extract_triples("(Alice, knows, Bob) and (Bob, knows, Carol)");
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].subject, "Alice");
        assert_eq!(triples[1].object, "Carol");
    }

    #[test]
    fn record_without_metadata() {
        let rec = extract_record("(Alice, knows, Bob)").unwrap();
        assert!(rec.timestamp.is_none());
        assert!(rec.attributes.is_empty());
    }
}
