//! Predicate resolution: free-text predicates to ontology properties.
//!
//! Two interchangeable strategies share the same contract (predicate term in,
//! ontology property out):
//!
//! - [`DictionaryResolver`] — direct dictionary/lemma lookup with a literal
//!   fallback under the default namespace. Never fails.
//! - [`CategoryResolver`] — scored classification into a semantic category,
//!   then scored property selection within it. Each scoring tier is a small
//!   function so the heuristic stays auditable per tier.

pub mod category;
pub mod dictionary;

pub use category::{CategoryResolver, Resolution};
pub use dictionary::DictionaryResolver;

/// Preprocess a term for scoring: lowercase, drop ASCII punctuation, collapse
/// whitespace.
pub(crate) fn preprocess(term: &str) -> String {
    let no_punct: String = term
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    no_punct.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Dictionary key form: trimmed, lowercased, internal whitespace removed.
pub(crate) fn clean_key(predicate: &str) -> String {
    predicate
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preprocess_drops_punctuation_and_collapses_whitespace() {
        assert_eq!(preprocess("Works-For!"), "worksfor");
        assert_eq!(preprocess("  impressed   by "), "impressed by");
    }

    #[test]
    fn clean_key_removes_internal_spaces() {
        assert_eq!(clean_key(" Was Generated By "), "wasgeneratedby");
        assert_eq!(clean_key("knows"), "knows");
    }
}
