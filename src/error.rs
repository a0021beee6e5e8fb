//! Rich diagnostic error types for the seshat engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text. Per-record problems (malformed input,
//! rejected triples, invalid timestamps) are deliberately *not* errors — they are
//! counted and logged by the pipeline report and never halt a batch.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the seshat engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source chains) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum SeshatError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ontology(#[from] OntologyError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Export(#[from] ExportError),
}

// ---------------------------------------------------------------------------
// Registry errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("cannot read registry file {path}")]
    #[diagnostic(
        code(seshat::registry::read),
        help("Check that the registry file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid registry file {path}: {message}")]
    #[diagnostic(
        code(seshat::registry::parse),
        help(
            "The registry file is not valid TOML, or does not match the expected \
             schema. Categories are `[[category]]` tables with `name`, `namespace`, \
             `keywords`, and an ordered `properties` array."
        )
    )]
    Parse { path: String, message: String },

    #[error("unknown namespace prefix: {prefix}")]
    #[diagnostic(
        code(seshat::registry::unknown_namespace),
        help(
            "Every namespace prefix used by a category or dictionary entry must be \
             declared in the `[[namespace]]` section or be one of the well-known \
             vocabularies (rdf, rdfs, xsd, schema, foaf, prov, sosa, ssn, emo)."
        )
    )]
    UnknownNamespace { prefix: String },

    #[error("category {category} has no `generic` property")]
    #[diagnostic(
        code(seshat::registry::missing_generic),
        help(
            "Each semantic category needs a property with role `generic` as the \
             fallback when no named property matches a predicate. Add one to the \
             category's `properties` array."
        )
    )]
    MissingGeneric { category: String },
}

// ---------------------------------------------------------------------------
// Ontology errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum OntologyError {
    #[error("failed to load ontology from {path}: {message}")]
    #[diagnostic(
        code(seshat::ontology::load),
        help(
            "The ontology file could not be read or parsed. Supported formats are \
             Turtle (.ttl), RDF/XML (.rdf, .owl, .xml), and N-Triples (.nt). \
             Callers that can proceed without the ontology should use \
             `RdfOntology::load_or_empty` to degrade to an empty source."
        )
    )]
    Load { path: String, message: String },

    #[error("ontology query failed: {message}")]
    #[diagnostic(
        code(seshat::ontology::query),
        help("The class/property scan over the loaded ontology graph failed.")
    )]
    Query { message: String },
}

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum PipelineError {
    #[error("cannot read input source {path}")]
    #[diagnostic(
        code(seshat::pipeline::input_source),
        help(
            "The input file could not be opened. This is the only fatal error in \
             the ingestion path; it is reported before any record is processed."
        )
    )]
    InputSource {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ExportError {
    #[error("failed to write serialized graph")]
    #[diagnostic(
        code(seshat::export::io),
        help("Check that the output path is writable and the disk is not full.")
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode report as JSON: {message}")]
    #[diagnostic(code(seshat::export::json))]
    Json { message: String },
}

/// Convenience alias for functions returning seshat results.
pub type SeshatResult<T> = std::result::Result<T, SeshatError>;
