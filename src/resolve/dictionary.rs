//! Strategy A: direct dictionary lookup with lemma retry.

use crate::lexicon::{Lemmatizer, PartOfSpeech};
use crate::ontology::OntologyTerm;
use crate::registry::Registry;
use crate::term::Identifier;

use super::clean_key;

/// Resolves predicates through the curated predicate dictionary.
///
/// Lookup order: cleaned key verbatim, then its verb lemma. Anything still
/// unmapped becomes a literal local name under the default namespace, so
/// resolution is total.
pub struct DictionaryResolver<'a> {
    registry: &'a Registry,
}

impl<'a> DictionaryResolver<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn resolve(&self, predicate: &str, lemmatizer: &dyn Lemmatizer) -> OntologyTerm {
        let key = clean_key(predicate);
        if let Some(term) = self.registry.predicate(&key) {
            return term.clone();
        }

        let lemma = lemmatizer.lemmatize(&key, PartOfSpeech::Verb);
        if let Some(term) = self.registry.predicate(&lemma) {
            return term.clone();
        }

        self.registry
            .default_namespace
            .term(Identifier::from_term(predicate).into_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::RuleLemmatizer;

    fn resolve(predicate: &str) -> OntologyTerm {
        let registry = Registry::builtin();
        let resolver = DictionaryResolver::new(&registry);
        resolver.resolve(predicate, &RuleLemmatizer::new())
    }

    #[test]
    fn direct_hit() {
        assert_eq!(resolve("knows").curie(), "foaf:knows");
        assert_eq!(resolve("  Knows ").curie(), "foaf:knows");
    }

    #[test]
    fn space_stripped_hit() {
        assert_eq!(resolve("was generated by").curie(), "prov:wasGeneratedBy");
    }

    #[test]
    fn lemma_retry_hit() {
        // "colleagues" misses verbatim; its lemma "colleague" is mapped.
        assert_eq!(resolve("colleagues").curie(), "foaf:knows");
    }

    #[test]
    fn unmapped_becomes_default_namespace_literal() {
        let term = resolve("lives in");
        assert_eq!(term.curie(), "schema:lives_in");
    }

    #[test]
    fn never_fails_even_on_noise() {
        let term = resolve("@@@");
        assert_eq!(term.namespace.prefix, "schema");
    }
}
