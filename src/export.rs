//! Serialization-facing output: Turtle text for the assembled graph and JSON
//! for the processing report.
//!
//! The graph itself only exposes `statements()` and `prefixes()`; this module
//! is one consumer of that read-only seam.

use std::io::Write;

use crate::error::ExportError;
use crate::graph::{Node, StatementGraph};
use crate::ontology::OntologyTerm;
use crate::pipeline::ProcessingReport;

/// Result type for export operations.
pub type ExportResult<T> = std::result::Result<T, ExportError>;

/// Write the graph as Turtle: prefix block, then one statement per line with
/// a blank separator line after each.
pub fn write_turtle<W: Write>(graph: &StatementGraph, out: &mut W) -> ExportResult<()> {
    let io = |source| ExportError::Io { source };

    for namespace in graph.prefixes() {
        writeln!(out, "@prefix {}: <{}> .", namespace.prefix, namespace.base).map_err(io)?;
    }
    writeln!(out).map_err(io)?;

    for statement in graph.statements() {
        writeln!(
            out,
            "{} {} {} .",
            render_node(&statement.subject, graph),
            render_term(&statement.predicate, graph),
            render_node(&statement.object, graph),
        )
        .map_err(io)?;
        writeln!(out).map_err(io)?;
    }
    Ok(())
}

/// The graph serialized to a Turtle string.
pub fn turtle_string(graph: &StatementGraph) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_turtle(graph, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// The processing report serialized as pretty JSON.
pub fn report_json(report: &ProcessingReport) -> ExportResult<String> {
    serde_json::to_string_pretty(report).map_err(|e| ExportError::Json {
        message: e.to_string(),
    })
}

fn render_term(term: &OntologyTerm, graph: &StatementGraph) -> String {
    if graph
        .prefixes()
        .iter()
        .any(|ns| ns.prefix == term.namespace.prefix)
    {
        term.curie()
    } else {
        format!("<{}>", term.iri())
    }
}

fn render_node(node: &Node, graph: &StatementGraph) -> String {
    match node {
        Node::Term(term) => render_term(term, graph),
        Node::Blank(id) => id.to_string(),
        Node::Literal(literal) => {
            let escaped = escape(&literal.value);
            match &literal.datatype {
                Some(datatype) => format!("\"{escaped}\"^^{}", render_term(datatype, graph)),
                None => format!("\"{escaped}\""),
            }
        }
    }
}

fn escape(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}
