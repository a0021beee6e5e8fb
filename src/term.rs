//! Identifier normalization: free text to URI-safe tokens.
//!
//! An [`Identifier`] is the graph-node key derived from a raw term. Two terms
//! that normalize identically are the same node — a deliberate, lossy collapse
//! (e.g. `"Café"` and `"Cafè"` both become `caf`).

use serde::{Deserialize, Serialize};

/// A normalized, URI-safe token derived from a free-text term.
///
/// Normalization is total and idempotent: lowercase, every character outside
/// `[a-zA-Z0-9_]` replaced by `_`, runs of `_` collapsed, leading and trailing
/// `_` stripped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Normalize a raw term into an identifier.
    pub fn from_term(term: &str) -> Self {
        let lowered = term.trim().to_lowercase();
        let mut out = String::with_capacity(lowered.len());
        let mut last_underscore = false;
        for c in lowered.chars() {
            let mapped = if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            };
            if mapped == '_' {
                if !last_underscore {
                    out.push('_');
                }
                last_underscore = true;
            } else {
                out.push(mapped);
                last_underscore = false;
            }
        }
        Identifier(out.trim_matches('_').to_string())
    }

    /// Borrow the normalized token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the underlying `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Whether normalization left nothing behind (e.g. the term was all punctuation).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_replaces_punctuation() {
        assert_eq!(
            Identifier::from_term("Université de Paris!!").as_str(),
            "universit_de_paris"
        );
    }

    #[test]
    fn collapses_underscore_runs() {
        assert_eq!(Identifier::from_term("a -- b").as_str(), "a_b");
        assert_eq!(Identifier::from_term("x___y").as_str(), "x_y");
    }

    #[test]
    fn strips_leading_and_trailing_underscores() {
        assert_eq!(Identifier::from_term("  (hello)  ").as_str(), "hello");
        assert_eq!(Identifier::from_term("!wow!").as_str(), "wow");
    }

    #[test]
    fn idempotent() {
        let once = Identifier::from_term("New York City, NY");
        let twice = Identifier::from_term(once.as_str());
        assert_eq!(once, twice);
    }

    #[test]
    fn distinct_terms_may_collide() {
        // Accepted risk: lossy normalization maps distinct terms to one node.
        let a = Identifier::from_term("New York");
        let b = Identifier::from_term("new_york");
        assert_eq!(a, b);
    }

    #[test]
    fn all_punctuation_becomes_empty() {
        assert!(Identifier::from_term("!!!").is_empty());
        assert!(Identifier::from_term("").is_empty());
    }
}
