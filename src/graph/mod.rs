//! Statement graph: the deduplicated output of the resolution pipeline.
//!
//! A [`StatementGraph`] is a set of [`Statement`]s with deterministic
//! insertion order and a table of bound namespace prefixes. It is owned
//! exclusively by the [`assemble::GraphAssembler`] during a run and exposed
//! read-only to serialization afterwards.

pub mod assemble;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ontology::{Namespace, OntologyTerm};

/// Identifier for an anonymous (blank) graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlankId(u64);

impl BlankId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for BlankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "_:r{}", self.0)
    }
}

/// Sequential blank node allocator, starting from 1.
#[derive(Debug, Default)]
pub struct BlankAllocator {
    next: u64,
}

impl BlankAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> BlankId {
        self.next += 1;
        BlankId(self.next)
    }
}

/// A literal value with an optional datatype.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    pub datatype: Option<OntologyTerm>,
}

impl Literal {
    /// A plain (untyped) literal.
    pub fn plain(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: None,
        }
    }

    /// An `xsd:string` literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(Namespace::xsd().term("string")),
        }
    }

    /// An `xsd:dateTime` literal.
    pub fn date_time(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            datatype: Some(Namespace::xsd().term("dateTime")),
        }
    }
}

/// A node position in a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    /// A named node (full IRI via its ontology term).
    Term(OntologyTerm),
    /// An anonymous relationship node.
    Blank(BlankId),
    /// A literal value (only valid in object position).
    Literal(Literal),
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Term(term) => write!(f, "{term}"),
            Node::Blank(id) => write!(f, "{id}"),
            Node::Literal(lit) => write!(f, "{:?}", lit.value),
        }
    }
}

/// One subject–predicate–object statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub subject: Node,
    pub predicate: OntologyTerm,
    pub object: Node,
}

impl Statement {
    pub fn new(subject: Node, predicate: OntologyTerm, object: Node) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.subject, self.predicate, self.object)
    }
}

/// Set of statements with deterministic insertion order and bound prefixes.
#[derive(Default)]
pub struct StatementGraph {
    order: Vec<Statement>,
    seen: HashSet<Statement>,
    prefixes: Vec<Namespace>,
}

impl StatementGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a namespace prefix for serialization. Duplicate prefixes are
    /// ignored.
    pub fn bind(&mut self, namespace: Namespace) {
        if !self.prefixes.iter().any(|ns| ns.prefix == namespace.prefix) {
            self.prefixes.push(namespace);
        }
    }

    /// Bound namespaces in binding order.
    pub fn prefixes(&self) -> &[Namespace] {
        &self.prefixes
    }

    /// Insert a statement. Returns `false` for a duplicate (set semantics:
    /// cardinality is unchanged).
    pub fn insert(&mut self, statement: Statement) -> bool {
        if self.seen.contains(&statement) {
            return false;
        }
        self.seen.insert(statement.clone());
        self.order.push(statement);
        true
    }

    pub fn contains(&self, statement: &Statement) -> bool {
        self.seen.contains(statement)
    }

    /// Statements in insertion order.
    pub fn statements(&self) -> &[Statement] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl std::fmt::Debug for StatementGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatementGraph")
            .field("statements", &self.len())
            .field("prefixes", &self.prefixes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(local: &str) -> Node {
        Node::Term(Namespace::schema().term(local))
    }

    fn statement(s: &str, p: &str, o: &str) -> Statement {
        Statement::new(node(s), Namespace::schema().term(p), node(o))
    }

    #[test]
    fn insert_is_idempotent() {
        let mut graph = StatementGraph::new();
        assert!(graph.insert(statement("alice", "knows", "bob")));
        assert!(!graph.insert(statement("alice", "knows", "bob")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut graph = StatementGraph::new();
        graph.insert(statement("a1", "p", "b1"));
        graph.insert(statement("a2", "p", "b2"));
        graph.insert(statement("a3", "p", "b3"));
        let subjects: Vec<String> = graph
            .statements()
            .iter()
            .map(|s| s.subject.to_string())
            .collect();
        assert_eq!(subjects, ["schema:a1", "schema:a2", "schema:a3"]);
    }

    #[test]
    fn bind_ignores_duplicate_prefixes() {
        let mut graph = StatementGraph::new();
        graph.bind(Namespace::schema());
        graph.bind(Namespace::schema());
        graph.bind(Namespace::foaf());
        assert_eq!(graph.prefixes().len(), 2);
    }

    #[test]
    fn blank_ids_are_sequential_and_distinct() {
        let mut alloc = BlankAllocator::new();
        let a = alloc.next_id();
        let b = alloc.next_id();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "_:r1");
        assert_eq!(b.to_string(), "_:r2");
    }

    #[test]
    fn literal_constructors() {
        assert!(Literal::plain("x").datatype.is_none());
        assert_eq!(
            Literal::string("x").datatype.unwrap().curie(),
            "xsd:string"
        );
        assert_eq!(
            Literal::date_time("2024-05-03T10:00:00").datatype.unwrap().curie(),
            "xsd:dateTime"
        );
    }
}
