//! Lexical collaborator interfaces: lemmatization and synonym lookup.
//!
//! The resolution heuristics only need two narrow capabilities, so they are
//! modeled as traits and injected. The bundled implementations are
//! lightweight, rule-based English transformations — not a full NLP
//! morphology engine. They cover the inflections that show up in extracted
//! predicates (`observes`, `watched`, `knew`), and a curated synonym table
//! keyed to the category keywords.

use std::collections::HashMap;

/// Part of speech hint for lemmatization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartOfSpeech {
    Noun,
    Verb,
}

/// Reduce a word to its base (dictionary) form.
pub trait Lemmatizer {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String;
}

/// Look up synonyms of a word. Returned order must be deterministic.
pub trait SynonymLookup {
    fn synonyms_of(&self, word: &str) -> Vec<String>;
}

// ---------------------------------------------------------------------------
// Rule-based lemmatizer
// ---------------------------------------------------------------------------

/// Irregular verb forms that suffix stripping cannot reach.
const IRREGULAR_VERBS: [(&str, &str); 22] = [
    ("is", "be"),
    ("are", "be"),
    ("was", "be"),
    ("were", "be"),
    ("been", "be"),
    ("being", "be"),
    ("has", "have"),
    ("had", "have"),
    ("went", "go"),
    ("gone", "go"),
    ("knew", "know"),
    ("known", "know"),
    ("saw", "see"),
    ("seen", "see"),
    ("made", "make"),
    ("did", "do"),
    ("done", "do"),
    ("felt", "feel"),
    ("wore", "wear"),
    ("worn", "wear"),
    ("gave", "give"),
    ("took", "take"),
];

/// Irregular noun plurals.
const IRREGULAR_NOUNS: [(&str, &str); 6] = [
    ("people", "person"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("mice", "mouse"),
    ("feet", "foot"),
];

/// Rule-based English lemmatizer.
///
/// Checks a small irregular table first, then applies suffix heuristics
/// (`-ies`, `-ied`, `-ing`, `-ed`, `-es`, `-s`). Unknown words pass through
/// unchanged, so lemmatization is total.
#[derive(Debug, Clone, Default)]
pub struct RuleLemmatizer;

impl RuleLemmatizer {
    pub fn new() -> Self {
        RuleLemmatizer
    }

    fn verb_lemma(word: &str) -> String {
        if let Some((_, lemma)) = IRREGULAR_VERBS.iter().find(|(form, _)| *form == word) {
            return (*lemma).to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = word.strip_suffix("ied") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = word.strip_suffix("ing") {
            if stem.len() >= 2 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("ed") {
            if stem.len() >= 2 {
                return Self::undouble(stem);
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            if Self::takes_es(stem) {
                return stem.to_string();
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            if stem.len() >= 2 && !stem.ends_with('s') {
                return stem.to_string();
            }
        }
        word.to_string()
    }

    fn noun_lemma(word: &str) -> String {
        if let Some((_, lemma)) = IRREGULAR_NOUNS.iter().find(|(form, _)| *form == word) {
            return (*lemma).to_string();
        }
        if let Some(stem) = word.strip_suffix("ies") {
            if !stem.is_empty() {
                return format!("{stem}y");
            }
        }
        if let Some(stem) = word.strip_suffix("es") {
            if Self::takes_es(stem) {
                return stem.to_string();
            }
        }
        if let Some(stem) = word.strip_suffix('s') {
            if stem.len() >= 2 && !stem.ends_with('s') {
                return stem.to_string();
            }
        }
        word.to_string()
    }

    /// Stems that pluralize/conjugate with `-es`.
    fn takes_es(stem: &str) -> bool {
        stem.ends_with('s')
            || stem.ends_with('x')
            || stem.ends_with('z')
            || stem.ends_with("ch")
            || stem.ends_with("sh")
    }

    /// Collapse a doubled final consonant left by `-ing`/`-ed` stripping
    /// (`stopped` → `stop`, `running` → `run`).
    fn undouble(stem: &str) -> String {
        let chars: Vec<char> = stem.chars().collect();
        if chars.len() >= 3 {
            let last = chars[chars.len() - 1];
            let prev = chars[chars.len() - 2];
            if last == prev && !matches!(last, 'a' | 'e' | 'i' | 'o' | 'u' | 's' | 'l') {
                return chars[..chars.len() - 1].iter().collect();
            }
        }
        stem.to_string()
    }
}

impl Lemmatizer for RuleLemmatizer {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> String {
        let lowered = word.trim().to_lowercase();
        match pos {
            PartOfSpeech::Verb => Self::verb_lemma(&lowered),
            PartOfSpeech::Noun => Self::noun_lemma(&lowered),
        }
    }
}

// ---------------------------------------------------------------------------
// Synonym lookup
// ---------------------------------------------------------------------------

/// In-memory synonym table with deterministic ordering.
#[derive(Debug, Clone, Default)]
pub struct StaticSynonyms {
    entries: HashMap<String, Vec<String>>,
}

impl StaticSynonyms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register synonyms for a word (lowercased on both sides).
    pub fn insert(&mut self, word: &str, synonyms: &[&str]) {
        self.entries.insert(
            word.to_lowercase(),
            synonyms.iter().map(|s| s.to_lowercase()).collect(),
        );
    }

    /// Curated table keyed to the built-in category keywords.
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert("observe", &["watch", "notice", "note", "monitor"]);
        table.insert("measure", &["gauge", "quantify", "meter"]);
        table.insert("monitor", &["track", "supervise", "observe"]);
        table.insert("detect", &["sense", "discover", "find"]);
        table.insert("create", &["make", "produce", "build", "generate"]);
        table.insert("generate", &["produce", "create", "yield"]);
        table.insert("derive", &["obtain", "infer", "deduce"]);
        table.insert("know", &["understand", "recognize"]);
        table.insert("friend", &["companion", "ally", "pal"]);
        table.insert("like", &["enjoy", "love", "prefer", "fancy"]);
        table.insert("feel", &["sense", "experience"]);
        table.insert("visit", &["tour", "attend", "see"]);
        table.insert("watch", &["view", "observe", "see"]);
        table.insert("play", &["compete", "perform"]);
        table
    }
}

impl SynonymLookup for StaticSynonyms {
    fn synonyms_of(&self, word: &str) -> Vec<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// A synonym source that knows nothing. Useful in tests and when running
/// without a lexicon.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSynonyms;

impl SynonymLookup for NoSynonyms {
    fn synonyms_of(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}
