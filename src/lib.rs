//! # seshat
//!
//! A semantic resolution engine: turns loosely structured, extracted
//! `(subject, predicate, object[, timestamp, attributes])` records into a
//! validated, typed graph of semantic statements.
//!
//! ## Architecture
//!
//! - **Extraction** (`extract`): parses candidate triples and trailing
//!   timestamp/attribute metadata out of semi-structured strings
//! - **Validation** (`validate`): admits or rejects candidates by structural rules
//! - **Resolution** (`resolve`): maps free-text predicates onto curated ontology
//!   properties — direct dictionary lookup or scored category classification
//! - **Typing** (`typing`): memoized semantic type inference per entity
//! - **Assembly** (`graph`): deduplicated statement graph with reified,
//!   attributed relationships and provenance timestamps
//! - **Registries** (`registry`): immutable curated configuration, loaded once
//!   and injected into the resolvers
//!
//! ## Library usage
//!
//! ```
//! use seshat::lexicon::{RuleLemmatizer, StaticSynonyms};
//! use seshat::ontology::MemoryOntology;
//! use seshat::pipeline::Pipeline;
//! use seshat::registry::Registry;
//!
//! let registry = Registry::builtin();
//! let lemmatizer = RuleLemmatizer::new();
//! let synonyms = StaticSynonyms::builtin();
//! let ontology = MemoryOntology::default();
//!
//! let mut pipeline = Pipeline::new(&registry, &lemmatizer, &synonyms, &ontology);
//! pipeline.ingest_plain("(Alice, knows, Bob)");
//! let (graph, report) = pipeline.finish();
//! assert_eq!(report.triples_added, 1);
//! assert!(!graph.is_empty());
//! ```

pub mod error;
pub mod export;
pub mod extract;
pub mod graph;
pub mod lexicon;
pub mod ontology;
pub mod pipeline;
pub mod registry;
pub mod resolve;
pub mod temporal;
pub mod term;
pub mod typing;
pub mod validate;
