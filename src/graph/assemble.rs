//! Graph assembly: the only writer of the output graph.
//!
//! The assembler owns the [`StatementGraph`] for the duration of a run. It
//! adds typed entities idempotently, reifies relationships that carry
//! attributes, and stamps provenance timestamps.

use std::collections::HashSet;

use crate::ontology::{Namespace, OntologyTerm};
use crate::registry::Registry;

use super::{BlankAllocator, Literal, Node, Statement, StatementGraph};

/// Well-known vocabulary used by the assembler itself.
struct Vocabulary {
    rdf_type: OntologyTerm,
    label: OntologyTerm,
    qualitative_value: OntologyTerm,
    related_to: OntologyTerm,
    qualifier_value: OntologyTerm,
    generated_at_time: OntologyTerm,
}

impl Vocabulary {
    fn new() -> Self {
        let schema = Namespace::schema();
        Self {
            rdf_type: Namespace::rdf().term("type"),
            label: Namespace::rdfs().term("label"),
            qualitative_value: schema.term("QualitativeValue"),
            related_to: schema.term("relatedTo"),
            qualifier_value: schema.term("qualifierValue"),
            generated_at_time: Namespace::prov().term("generatedAtTime"),
        }
    }
}

/// Exclusive owner and sole mutator of the output graph.
pub struct GraphAssembler {
    graph: StatementGraph,
    typed: HashSet<Node>,
    blanks: BlankAllocator,
    vocab: Vocabulary,
}

impl GraphAssembler {
    /// Create an assembler with the registry's namespaces bound for output.
    pub fn new(registry: &Registry) -> Self {
        let mut graph = StatementGraph::new();
        for namespace in &registry.namespaces {
            graph.bind(namespace.clone());
        }
        Self {
            graph,
            typed: HashSet::new(),
            blanks: BlankAllocator::new(),
            vocab: Vocabulary::new(),
        }
    }

    /// Add an `rdf:type` statement for an entity, once.
    ///
    /// Returns `false` without touching the graph when the entity is already
    /// in the typed set.
    pub fn add_typed(&mut self, entity: Node, class: OntologyTerm) -> bool {
        if self.typed.contains(&entity) {
            return false;
        }
        self.typed.insert(entity.clone());
        self.graph.insert(Statement::new(
            entity,
            self.vocab.rdf_type.clone(),
            Node::Term(class),
        ))
    }

    /// Set-semantics statement insert. Duplicates are no-ops.
    pub fn add_statement(&mut self, subject: Node, predicate: OntologyTerm, object: Node) -> bool {
        self.graph
            .insert(Statement::new(subject, predicate, object))
    }

    /// Preserve a free-text label on a node (`rdfs:label`).
    pub fn add_label(&mut self, node: Node, label: &str) -> bool {
        self.graph.insert(Statement::new(
            node,
            self.vocab.label.clone(),
            Node::Literal(Literal::plain(label)),
        ))
    }

    /// Reify a relationship that carries attributes.
    ///
    /// Creates an anonymous relationship node `R` and adds
    /// `(subject, predicate, R)`, `(R, rdf:type, schema:QualitativeValue)`,
    /// `(R, schema:relatedTo, object)`, and one
    /// `(R, schema:qualifierValue, attribute)` per attribute — exactly
    /// `3 + attributes.len()` statements. The bare `(subject, predicate,
    /// object)` statement is never added for an attributed triple.
    pub fn add_attributed_relationship(
        &mut self,
        subject: Node,
        predicate: OntologyTerm,
        object: Node,
        attributes: &[String],
    ) -> usize {
        let relation = Node::Blank(self.blanks.next_id());
        let mut added = 0;

        added += usize::from(self.add_statement(subject, predicate, relation.clone()));
        added += usize::from(self.add_statement(
            relation.clone(),
            self.vocab.rdf_type.clone(),
            Node::Term(self.vocab.qualitative_value.clone()),
        ));
        added += usize::from(self.add_statement(
            relation.clone(),
            self.vocab.related_to.clone(),
            object,
        ));
        for attribute in attributes {
            added += usize::from(self.add_statement(
                relation.clone(),
                self.vocab.qualifier_value.clone(),
                Node::Literal(Literal::string(attribute.trim())),
            ));
        }
        added
    }

    /// Stamp each node with a `prov:generatedAtTime` provenance statement.
    ///
    /// `timestamp` must already be in canonical form (see
    /// [`crate::temporal::normalize_timestamp`]).
    pub fn stamp_provenance(&mut self, nodes: &[Node], timestamp: &str) {
        for node in nodes {
            self.graph.insert(Statement::new(
                node.clone(),
                self.vocab.generated_at_time.clone(),
                Node::Literal(Literal::date_time(timestamp)),
            ));
        }
    }

    /// Read-only view of the graph being assembled.
    pub fn graph(&self) -> &StatementGraph {
        &self.graph
    }

    /// Number of entities in the typed set.
    pub fn typed_count(&self) -> usize {
        self.typed.len()
    }

    /// Finish the run and hand the graph to the serialization collaborator.
    pub fn into_graph(self) -> StatementGraph {
        self.graph
    }
}

impl std::fmt::Debug for GraphAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphAssembler")
            .field("statements", &self.graph.len())
            .field("typed", &self.typed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> GraphAssembler {
        let registry = Registry::builtin();
        GraphAssembler::new(&registry)
    }

    fn node(local: &str) -> Node {
        Node::Term(Namespace::schema().term(local))
    }

    #[test]
    fn add_typed_is_idempotent() {
        let mut asm = assembler();
        let person = Namespace::schema().term("Person");
        assert!(asm.add_typed(node("alice"), person.clone()));
        assert!(!asm.add_typed(node("alice"), person.clone()));
        assert_eq!(asm.graph().len(), 1);
        assert_eq!(asm.typed_count(), 1);
    }

    #[test]
    fn duplicate_statement_is_a_no_op() {
        let mut asm = assembler();
        let knows = Namespace::foaf().term("knows");
        assert!(asm.add_statement(node("alice"), knows.clone(), node("bob")));
        assert!(!asm.add_statement(node("alice"), knows, node("bob")));
        assert_eq!(asm.graph().len(), 1);
    }

    #[test]
    fn attributed_relationship_adds_three_plus_k_statements() {
        for k in 1..=4usize {
            let mut asm = assembler();
            let attributes: Vec<String> =
                (0..k).map(|i| format!("attribute {i}")).collect();
            let added = asm.add_attributed_relationship(
                node("alice"),
                Namespace::foaf().term("knows"),
                node("bob"),
                &attributes,
            );
            assert_eq!(added, 3 + k);
            assert_eq!(asm.graph().len(), 3 + k);

            // The bare statement must not be present.
            let bare = Statement::new(
                node("alice"),
                Namespace::foaf().term("knows"),
                node("bob"),
            );
            assert!(!asm.graph().contains(&bare));
        }
    }

    #[test]
    fn reified_relationships_use_distinct_blank_nodes() {
        let mut asm = assembler();
        let knows = Namespace::foaf().term("knows");
        asm.add_attributed_relationship(node("alice"), knows.clone(), node("bob"), &[
            "close".to_string(),
        ]);
        asm.add_attributed_relationship(node("alice"), knows, node("carol"), &[
            "distant".to_string(),
        ]);
        // 2 × (3 + 1) statements, no collisions between the two blanks.
        assert_eq!(asm.graph().len(), 8);
    }

    #[test]
    fn provenance_stamps_each_node() {
        let mut asm = assembler();
        let nodes = [node("alice"), node("knows"), node("bob")];
        asm.stamp_provenance(&nodes, "2024-05-03T10:00:00");
        assert_eq!(asm.graph().len(), 3);
        let stamp = &asm.graph().statements()[0];
        assert_eq!(stamp.predicate.curie(), "prov:generatedAtTime");
        match &stamp.object {
            Node::Literal(lit) => {
                assert_eq!(lit.value, "2024-05-03T10:00:00");
                assert_eq!(lit.datatype.as_ref().unwrap().curie(), "xsd:dateTime");
            }
            other => panic!("expected literal, got {other}"),
        }
    }

    #[test]
    fn label_is_a_plain_literal() {
        let mut asm = assembler();
        assert!(asm.add_label(node("alice"), "impressed by"));
        let stmt = &asm.graph().statements()[0];
        assert_eq!(stmt.predicate.curie(), "rdfs:label");
    }

    #[test]
    fn namespaces_are_bound_for_output() {
        let asm = assembler();
        let prefixes: Vec<&str> = asm
            .graph()
            .prefixes()
            .iter()
            .map(|ns| ns.prefix.as_str())
            .collect();
        assert!(prefixes.contains(&"schema"));
        assert!(prefixes.contains(&"prov"));
        assert!(prefixes.contains(&"xsd"));
    }
}
