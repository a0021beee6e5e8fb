//! Strategy B: scored category classification and in-category property
//! selection.
//!
//! Both phases reduce a list of `(candidate, score)` pairs by
//! max-score-then-first-declared: a later candidate replaces the running best
//! only on a strictly higher score, so registry declaration order breaks
//! ties. That ordering is part of the resolution contract and covered by
//! tests.

use crate::lexicon::{Lemmatizer, PartOfSpeech, SynonymLookup};
use crate::ontology::OntologyTerm;
use crate::registry::{Registry, SemanticCategory};

use super::preprocess;

/// Per-tier keyword scores for category classification.
const SCORE_KEYWORD_SUBSTRING: u32 = 5;
const SCORE_KEYWORD_TOKEN: u32 = 3;
const SCORE_KEYWORD_LEMMA: u32 = 2;
const SCORE_KEYWORD_SYNONYM: u32 = 2;

/// Per-tier role scores for property selection.
const SCORE_ROLE_EXACT: u32 = 10;
const SCORE_ROLE_IN_TERM: u32 = 5;
const SCORE_TERM_IN_ROLE: u32 = 3;
const SCORE_ROLE_TOKEN: u32 = 2;
const SCORE_ROLE_LEMMA: u32 = 2;

/// A fully resolved predicate with its scoring trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub term: OntologyTerm,
    /// Name of the chosen category.
    pub category: String,
    pub category_score: u32,
    /// Role of the winning property (`generic` when nothing matched).
    pub property_role: String,
    pub property_score: u32,
    /// Whether the resolved property is the category's generic fallback.
    /// Callers preserve the original predicate as a label in that case.
    pub generic_fallback: bool,
}

/// Scored category classifier + property selector.
pub struct CategoryResolver<'a> {
    registry: &'a Registry,
    lemmatizer: &'a dyn Lemmatizer,
    synonyms: &'a dyn SynonymLookup,
}

impl<'a> CategoryResolver<'a> {
    pub fn new(
        registry: &'a Registry,
        lemmatizer: &'a dyn Lemmatizer,
        synonyms: &'a dyn SynonymLookup,
    ) -> Self {
        Self {
            registry,
            lemmatizer,
            synonyms,
        }
    }

    /// Resolve a predicate to an ontology property.
    ///
    /// Returns `None` only when the chosen category has no `generic`
    /// property to fall back on — a registry configuration defect, which the
    /// caller reports without aborting the batch.
    pub fn resolve(&self, predicate: &str) -> Option<Resolution> {
        let term = preprocess(predicate);
        let term_lemma = self.lemmatizer.lemmatize(&term, PartOfSpeech::Noun);

        let (category, category_score) = self.classify(&term, &term_lemma)?;

        let mut best: Option<(&str, &OntologyTerm, u32)> = None;
        for property in &category.properties {
            let score = self.property_score(&property.role, &term, &term_lemma);
            if score > best.map_or(0, |(_, _, s)| s) {
                best = Some((&property.role, &property.term, score));
            }
        }

        let generic = category.generic();
        let (role, resolved, score) = match best {
            Some(found) => found,
            None => ("generic", generic?, 0),
        };
        let generic_fallback = generic.is_some_and(|g| g == resolved);

        Some(Resolution {
            term: resolved.clone(),
            category: category.name.clone(),
            category_score,
            property_role: role.to_string(),
            property_score: score,
            generic_fallback,
        })
    }

    /// Score every category against a raw predicate. Exposed for the CLI's
    /// resolution trace.
    pub fn score_categories(&self, predicate: &str) -> Vec<(String, u32)> {
        let term = preprocess(predicate);
        let term_lemma = self.lemmatizer.lemmatize(&term, PartOfSpeech::Noun);
        self.registry
            .categories
            .iter()
            .map(|c| (c.name.clone(), self.category_score(c, &term, &term_lemma)))
            .collect()
    }

    /// Pick the strictly-highest-scoring category; first declared wins ties.
    /// A best score of zero falls back to the `general` category.
    fn classify(&self, term: &str, term_lemma: &str) -> Option<(&'a SemanticCategory, u32)> {
        let mut best: Option<(&SemanticCategory, u32)> = None;
        for category in &self.registry.categories {
            let score = self.category_score(category, term, term_lemma);
            if score > best.map_or(0, |(_, s)| s) {
                best = Some((category, score));
            }
        }
        match best {
            Some(found) => Some(found),
            None => self
                .registry
                .general_category()
                .or_else(|| self.registry.categories.first())
                .map(|c| (c, 0)),
        }
    }

    fn category_score(&self, category: &SemanticCategory, term: &str, term_lemma: &str) -> u32 {
        category
            .keywords
            .iter()
            .map(|keyword| self.keyword_score(keyword, term, term_lemma))
            .sum()
    }

    /// One keyword's contribution: the tiers are tried strongest-first and
    /// only the first hit counts.
    fn keyword_score(&self, keyword: &str, term: &str, term_lemma: &str) -> u32 {
        if term.contains(keyword) {
            return SCORE_KEYWORD_SUBSTRING;
        }
        if term.split_whitespace().any(|token| token == keyword) {
            return SCORE_KEYWORD_TOKEN;
        }
        if self.lemmatizer.lemmatize(keyword, PartOfSpeech::Noun) == term_lemma {
            return SCORE_KEYWORD_LEMMA;
        }
        if self
            .synonyms
            .synonyms_of(keyword)
            .iter()
            .any(|synonym| term.contains(synonym.as_str()))
        {
            return SCORE_KEYWORD_SYNONYM;
        }
        0
    }

    fn property_score(&self, role: &str, term: &str, term_lemma: &str) -> u32 {
        if role == term {
            return SCORE_ROLE_EXACT;
        }
        if term.contains(role) {
            return SCORE_ROLE_IN_TERM;
        }
        if role.contains(term) {
            return SCORE_TERM_IN_ROLE;
        }
        if term.split_whitespace().any(|token| token == role) {
            return SCORE_ROLE_TOKEN;
        }
        if self.lemmatizer.lemmatize(role, PartOfSpeech::Noun) == term_lemma {
            return SCORE_ROLE_LEMMA;
        }
        0
    }
}
