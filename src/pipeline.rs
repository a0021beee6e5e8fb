//! Batch ingestion pipeline: extract → validate → resolve → type → assemble.
//!
//! Records are processed one at a time, fully, in input order; nothing in a
//! record's processing can halt the batch. Two ingestion paths share the
//! machinery:
//!
//! - **plain**: every `(s, p, o)` group in a record, dictionary resolution,
//!   subject typing
//! - **timestamped**: one record = one triple plus mandatory timestamp and
//!   optional attributes, category resolution, subject and object typing,
//!   reification, provenance stamps

use serde::Serialize;

use crate::extract::{self, CandidateTriple};
use crate::graph::assemble::GraphAssembler;
use crate::graph::{Node, StatementGraph};
use crate::lexicon::{Lemmatizer, SynonymLookup};
use crate::ontology::OntologySource;
use crate::registry::Registry;
use crate::resolve::{CategoryResolver, DictionaryResolver};
use crate::temporal::normalize_timestamp;
use crate::term::Identifier;
use crate::typing::EntityTyper;
use crate::validate::{validate, RejectReason};

/// Why a record or candidate triple was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardReason {
    /// Extraction found no well-formed triple.
    Malformed,
    /// A validation rule failed.
    Rejected(RejectReason),
    /// No ontology property could be resolved (or the predicate was the
    /// literal sentinel `none`).
    UnresolvablePredicate,
    /// The record requires a timestamp and it did not normalize.
    InvalidTimestamp,
}

impl std::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscardReason::Malformed => f.write_str("no well-formed triple"),
            DiscardReason::Rejected(reason) => write!(f, "rejected: {reason}"),
            DiscardReason::UnresolvablePredicate => f.write_str("unresolvable predicate"),
            DiscardReason::InvalidTimestamp => f.write_str("invalid timestamp"),
        }
    }
}

/// One dropped record/triple and why.
#[derive(Debug, Clone, Serialize)]
pub struct Discard {
    pub record: String,
    pub reason: DiscardReason,
}

/// Counters and discard log for one batch run.
///
/// Every seen candidate ends up exactly once in `triples_added` or
/// `triples_discarded` (a malformed record counts as one seen candidate).
/// Committing a duplicate statement still counts as added — deduplication is
/// the graph's concern, not the report's.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingReport {
    pub triples_seen: usize,
    pub triples_added: usize,
    pub triples_discarded: usize,
    pub discards: Vec<Discard>,
}

impl ProcessingReport {
    fn discard(&mut self, record: impl Into<String>, reason: DiscardReason) {
        let record = record.into();
        tracing::debug!(%record, %reason, "discarded");
        self.triples_discarded += 1;
        self.discards.push(Discard { record, reason });
    }
}

impl std::fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "triples seen:      {}", self.triples_seen)?;
        writeln!(f, "triples added:     {}", self.triples_added)?;
        writeln!(f, "triples discarded: {}", self.triples_discarded)?;
        for discard in &self.discards {
            writeln!(f, "  {} -> {}", discard.record, discard.reason)?;
        }
        Ok(())
    }
}

/// Single-pass batch pipeline. Owns the assembler and the type cache for the
/// duration of one run.
pub struct Pipeline<'a> {
    registry: &'a Registry,
    lemmatizer: &'a dyn Lemmatizer,
    dictionary: DictionaryResolver<'a>,
    categories: CategoryResolver<'a>,
    typer: EntityTyper<'a>,
    assembler: GraphAssembler,
    report: ProcessingReport,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        registry: &'a Registry,
        lemmatizer: &'a dyn Lemmatizer,
        synonyms: &'a dyn SynonymLookup,
        ontology: &'a dyn OntologySource,
    ) -> Self {
        Self {
            registry,
            lemmatizer,
            dictionary: DictionaryResolver::new(registry),
            categories: CategoryResolver::new(registry, lemmatizer, synonyms),
            typer: EntityTyper::new(registry, ontology),
            assembler: GraphAssembler::new(registry),
            report: ProcessingReport::default(),
        }
    }

    /// Process one plain record: every `(s, p, o)` group it contains,
    /// resolved through the predicate dictionary.
    pub fn ingest_plain(&mut self, record: &str) {
        let candidates = extract::extract_triples(record);
        if candidates.is_empty() {
            self.report.triples_seen += 1;
            self.report.discard(record.trim(), DiscardReason::Malformed);
            return;
        }

        for candidate in candidates {
            self.report.triples_seen += 1;
            if let Err(reason) = validate(&candidate) {
                self.report
                    .discard(render(&candidate), DiscardReason::Rejected(reason));
                continue;
            }

            let predicate = self.dictionary.resolve(&candidate.predicate, self.lemmatizer);
            let subject = self.entity_node(&candidate.subject);
            let object = self.entity_node(&candidate.object);

            self.assembler
                .add_statement(subject.clone(), predicate.clone(), object);
            self.report.triples_added += 1;
            tracing::debug!(
                subject = %candidate.subject,
                predicate = %predicate,
                object = %candidate.object,
                "statement added"
            );

            let class = self.typer.infer(&candidate.subject, None);
            self.assembler.add_typed(subject, class);
        }
    }

    /// Process one timestamped record: a single triple with a mandatory
    /// timestamp, optional attributes, category resolution, and provenance
    /// stamps.
    pub fn ingest_timestamped(&mut self, record: &str) {
        self.report.triples_seen += 1;
        let Some(parsed) = extract::extract_record(record) else {
            self.report.discard(record.trim(), DiscardReason::Malformed);
            return;
        };
        let candidate = parsed.triple;

        if let Err(reason) = validate(&candidate) {
            self.report
                .discard(render(&candidate), DiscardReason::Rejected(reason));
            return;
        }

        if candidate.predicate.trim().to_lowercase() == "none" {
            self.report
                .discard(render(&candidate), DiscardReason::UnresolvablePredicate);
            return;
        }

        let Some(resolution) = self.categories.resolve(&candidate.predicate) else {
            tracing::warn!(
                predicate = %candidate.predicate,
                "no property resolved; check the category registry for a missing generic"
            );
            self.report
                .discard(render(&candidate), DiscardReason::UnresolvablePredicate);
            return;
        };

        let Some(timestamp) = parsed
            .timestamp
            .as_deref()
            .and_then(normalize_timestamp)
        else {
            self.report
                .discard(render(&candidate), DiscardReason::InvalidTimestamp);
            return;
        };

        let subject = self.entity_node(&candidate.subject);
        let object = self.entity_node(&candidate.object);
        let predicate_node = Node::Term(resolution.term.clone());

        let subject_class = self.typer.infer(&candidate.subject, None);
        self.assembler.add_typed(subject.clone(), subject_class);
        let object_class = self
            .typer
            .infer(&candidate.object, Some(&candidate.predicate));
        self.assembler.add_typed(object.clone(), object_class);

        if parsed.attributes.is_empty() {
            self.assembler
                .add_statement(subject.clone(), resolution.term.clone(), object.clone());
        } else {
            self.assembler.add_attributed_relationship(
                subject.clone(),
                resolution.term.clone(),
                object.clone(),
                &parsed.attributes,
            );
        }
        self.report.triples_added += 1;

        // A generic-property fallback loses the original wording; keep it as
        // a label on both ends.
        if resolution.generic_fallback {
            let label = candidate.predicate.trim();
            self.assembler.add_label(subject.clone(), label);
            self.assembler.add_label(object.clone(), label);
        }

        self.assembler
            .stamp_provenance(&[subject, predicate_node, object], &timestamp);

        tracing::debug!(
            subject = %candidate.subject,
            predicate = %resolution.term,
            object = %candidate.object,
            category = %resolution.category,
            attributes = parsed.attributes.len(),
            "statement added"
        );
    }

    /// Run the plain path over a whole batch.
    pub fn run_plain<I, S>(&mut self, records: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for record in records {
            self.ingest_plain(record.as_ref());
        }
    }

    /// Run the timestamped path over a whole batch.
    pub fn run_timestamped<I, S>(&mut self, records: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for record in records {
            self.ingest_timestamped(record.as_ref());
        }
    }

    /// The graph assembled so far.
    pub fn graph(&self) -> &StatementGraph {
        self.assembler.graph()
    }

    /// The report accumulated so far.
    pub fn report(&self) -> &ProcessingReport {
        &self.report
    }

    /// Finish the run, releasing the graph to the serialization collaborator.
    pub fn finish(self) -> (StatementGraph, ProcessingReport) {
        tracing::info!(
            seen = self.report.triples_seen,
            added = self.report.triples_added,
            discarded = self.report.triples_discarded,
            statements = self.assembler.graph().len(),
            "batch complete"
        );
        (self.assembler.into_graph(), self.report)
    }

    fn entity_node(&self, term: &str) -> Node {
        Node::Term(
            self.registry
                .default_namespace
                .term(Identifier::from_term(term).into_string()),
        )
    }
}

fn render(candidate: &CandidateTriple) -> String {
    format!(
        "({}, {}, {})",
        candidate.subject, candidate.predicate, candidate.object
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{RuleLemmatizer, StaticSynonyms};
    use crate::ontology::MemoryOntology;

    struct Fixture {
        registry: Registry,
        lemmatizer: RuleLemmatizer,
        synonyms: StaticSynonyms,
        ontology: MemoryOntology,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: Registry::builtin(),
                lemmatizer: RuleLemmatizer::new(),
                synonyms: StaticSynonyms::builtin(),
                ontology: MemoryOntology::default(),
            }
        }

        fn pipeline(&self) -> Pipeline<'_> {
            Pipeline::new(&self.registry, &self.lemmatizer, &self.synonyms, &self.ontology)
        }
    }

    #[test]
    fn plain_record_adds_statement_and_type() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_plain("(Alice, knows, Bob)");
        let (graph, report) = pipeline.finish();

        assert_eq!(report.triples_seen, 1);
        assert_eq!(report.triples_added, 1);
        assert_eq!(report.triples_discarded, 0);
        // The triple itself plus the subject's rdf:type.
        assert_eq!(graph.len(), 2);
        assert!(graph
            .statements()
            .iter()
            .any(|s| s.predicate.curie() == "foaf:knows"));
    }

    #[test]
    fn plain_record_with_several_groups() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_plain("(Alice, knows, Bob) (Bob, knows, Carol)");
        let report = pipeline.report();
        assert_eq!(report.triples_seen, 2);
        assert_eq!(report.triples_added, 2);
    }

    #[test]
    fn malformed_and_rejected_records_are_counted() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_plain("not a triple at all");
        pipeline.ingest_plain("(Paris, is, Paris)");
        let (graph, report) = pipeline.finish();

        assert!(graph.is_empty());
        assert_eq!(report.triples_seen, 2);
        assert_eq!(report.triples_added, 0);
        assert_eq!(report.triples_discarded, 2);
        assert_eq!(report.discards[0].reason, DiscardReason::Malformed);
        assert!(matches!(
            report.discards[1].reason,
            DiscardReason::Rejected(RejectReason::SubjectEqualsObject)
        ));
    }

    #[test]
    fn counters_balance() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.run_plain([
            "(Alice, knows, Bob)",
            "garbage",
            "(A, knows, Bob)",
            "(Alice, likes, Alice)",
        ]);
        let report = pipeline.report();
        assert_eq!(
            report.triples_seen,
            report.triples_added + report.triples_discarded
        );
    }

    #[test]
    fn timestamped_record_gets_provenance_stamps() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_timestamped("(Alice, knows, Bob), 2024-5-3 10:00:00");
        let (graph, report) = pipeline.finish();

        assert_eq!(report.triples_added, 1);
        let stamps: Vec<_> = graph
            .statements()
            .iter()
            .filter(|s| s.predicate.curie() == "prov:generatedAtTime")
            .collect();
        // Subject, predicate, and object each carry a stamp.
        assert_eq!(stamps.len(), 3);
    }

    #[test]
    fn timestamped_record_requires_valid_timestamp() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_timestamped("(Alice, knows, Bob)");
        pipeline.ingest_timestamped("(Alice, knows, Bob), not a date");
        let (graph, report) = pipeline.finish();

        assert!(graph.is_empty());
        assert_eq!(report.triples_discarded, 2);
        assert!(report
            .discards
            .iter()
            .all(|d| d.reason == DiscardReason::InvalidTimestamp));
    }

    #[test]
    fn attributed_record_is_reified() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline
            .ingest_timestamped(r#"(Alice, knows, Bob), 2024-5-3 10:00:00, "since childhood""#);
        let (graph, _) = pipeline.finish();

        // No bare foaf:knows statement between the two entities.
        assert!(!graph.statements().iter().any(|s| {
            s.predicate.curie() == "foaf:knows"
                && matches!(&s.object, Node::Term(t) if t.local == "bob")
        }));
        // One qualifier on the relationship node.
        assert_eq!(
            graph
                .statements()
                .iter()
                .filter(|s| s.predicate.curie() == "schema:qualifierValue")
                .count(),
            1
        );
    }

    #[test]
    fn none_predicate_is_skipped() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_timestamped("(Alice, none, Bob), 2024-5-3 10:00:00");
        let report = pipeline.report();
        assert_eq!(
            report.discards[0].reason,
            DiscardReason::UnresolvablePredicate
        );
    }

    #[test]
    fn generic_fallback_keeps_original_predicate_as_label() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_timestamped("(a1, observes temperature, b2), 2024-5-3 10:00:00");
        let (graph, _) = pipeline.finish();

        let labels: Vec<_> = graph
            .statements()
            .iter()
            .filter(|s| s.predicate.curie() == "rdfs:label")
            .collect();
        assert_eq!(labels.len(), 2);
        match &labels[0].object {
            Node::Literal(lit) => assert_eq!(lit.value, "observes temperature"),
            other => panic!("expected literal, got {other}"),
        }
    }

    #[test]
    fn colliding_identifiers_are_one_node() {
        let fixture = Fixture::new();
        let mut pipeline = fixture.pipeline();
        pipeline.ingest_plain("(New York, location, USA)");
        pipeline.ingest_plain("(new_york, location, USA)");
        let (graph, report) = pipeline.finish();

        assert_eq!(report.triples_added, 2);
        // Same normalized subject and object: the second statement is a
        // set-semantics duplicate, so the graph has one triple and one type.
        assert_eq!(graph.len(), 2);
    }
}
