//! Ontology vocabulary model and external ontology access.
//!
//! [`Namespace`] and [`OntologyTerm`] describe the curated vocabularies that
//! resolved predicates and inferred types are drawn from. [`OntologySource`]
//! is the capability interface over an external ontology graph — the core only
//! ever needs the class and property local names, so real RDF access (via
//! oxigraph) and the in-memory test stub are interchangeable.

use std::path::Path;

use oxigraph::io::RdfFormat;
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use serde::{Deserialize, Serialize};

use crate::error::OntologyError;

/// Result type for ontology access.
pub type OntologyResult<T> = std::result::Result<T, OntologyError>;

/// A prefix-bound URI namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    pub prefix: String,
    pub base: String,
}

impl Namespace {
    pub fn new(prefix: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            base: base.into(),
        }
    }

    /// Build a term in this namespace.
    pub fn term(&self, local: impl Into<String>) -> OntologyTerm {
        OntologyTerm {
            namespace: self.clone(),
            local: local.into(),
        }
    }

    /// Look up a well-known vocabulary by prefix.
    pub fn well_known(prefix: &str) -> Option<Namespace> {
        let base = match prefix {
            "rdf" => "http://www.w3.org/1999/02/22-rdf-syntax-ns#",
            "rdfs" => "http://www.w3.org/2000/01/rdf-schema#",
            "xsd" => "http://www.w3.org/2001/XMLSchema#",
            "schema" => "http://schema.org/",
            "foaf" => "http://xmlns.com/foaf/0.1/",
            "prov" => "http://www.w3.org/ns/prov#",
            "sosa" => "http://www.w3.org/ns/sosa/",
            "ssn" => "http://www.w3.org/ns/ssn/",
            "emo" => "http://www.semanticweb.org/emotion/",
            _ => return None,
        };
        Some(Namespace::new(prefix, base))
    }

    pub fn rdf() -> Namespace {
        Self::well_known("rdf").expect("rdf is well-known")
    }

    pub fn rdfs() -> Namespace {
        Self::well_known("rdfs").expect("rdfs is well-known")
    }

    pub fn xsd() -> Namespace {
        Self::well_known("xsd").expect("xsd is well-known")
    }

    pub fn schema() -> Namespace {
        Self::well_known("schema").expect("schema is well-known")
    }

    pub fn foaf() -> Namespace {
        Self::well_known("foaf").expect("foaf is well-known")
    }

    pub fn prov() -> Namespace {
        Self::well_known("prov").expect("prov is well-known")
    }

    pub fn sosa() -> Namespace {
        Self::well_known("sosa").expect("sosa is well-known")
    }

    pub fn ssn() -> Namespace {
        Self::well_known("ssn").expect("ssn is well-known")
    }

    pub fn emo() -> Namespace {
        Self::well_known("emo").expect("emo is well-known")
    }
}

/// A namespaced ontology identifier — a property or a class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OntologyTerm {
    pub namespace: Namespace,
    pub local: String,
}

impl OntologyTerm {
    /// The full IRI.
    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace.base, self.local)
    }

    /// The compact `prefix:local` form.
    pub fn curie(&self) -> String {
        format!("{}:{}", self.namespace.prefix, self.local)
    }
}

impl std::fmt::Display for OntologyTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace.prefix, self.local)
    }
}

// ---------------------------------------------------------------------------
// External ontology access
// ---------------------------------------------------------------------------

/// Capability interface over an external ontology graph.
///
/// The core only consumes class and property local names, scanned once at
/// load time. Order is deterministic (sorted).
pub trait OntologySource {
    /// Local names of every `rdfs:Class` in the source.
    fn classes(&self) -> &[String];

    /// Local names of every `rdf:Property` in the source.
    fn properties(&self) -> &[String];
}

/// In-memory ontology source. The empty default is the degraded fallback when
/// no external ontology is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryOntology {
    classes: Vec<String>,
    properties: Vec<String>,
}

impl MemoryOntology {
    pub fn new(mut classes: Vec<String>, mut properties: Vec<String>) -> Self {
        classes.sort();
        properties.sort();
        Self {
            classes,
            properties,
        }
    }
}

impl OntologySource for MemoryOntology {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }
}

/// Ontology source backed by an RDF file loaded into an oxigraph store.
///
/// Class and property names are scanned once at load time; queries against
/// the live store are not needed afterwards.
pub struct RdfOntology {
    classes: Vec<String>,
    properties: Vec<String>,
}

impl RdfOntology {
    /// Load an ontology file (Turtle, RDF/XML, or N-Triples by extension).
    pub fn load(path: &Path) -> OntologyResult<Self> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("ttl") => RdfFormat::Turtle,
            Some("nt") => RdfFormat::NTriples,
            Some("rdf") | Some("owl") | Some("xml") => RdfFormat::RdfXml,
            other => {
                return Err(OntologyError::Load {
                    path: path.display().to_string(),
                    message: format!("unsupported extension {other:?}"),
                });
            }
        };

        let file = std::fs::File::open(path).map_err(|e| OntologyError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let store = Store::new().map_err(|e| OntologyError::Load {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        store
            .load_from_reader(format, std::io::BufReader::new(file))
            .map_err(|e| OntologyError::Load {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let classes = scan_local_names(
            &store,
            "SELECT DISTINCT ?t WHERE { ?t <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2000/01/rdf-schema#Class> }",
        )?;
        let properties = scan_local_names(
            &store,
            "SELECT DISTINCT ?t WHERE { ?t <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/1999/02/22-rdf-syntax-ns#Property> }",
        )?;

        tracing::info!(
            path = %path.display(),
            classes = classes.len(),
            properties = properties.len(),
            "loaded external ontology"
        );

        Ok(Self {
            classes,
            properties,
        })
    }

    /// Load an ontology, degrading to an empty source on any failure.
    ///
    /// This is the collaborator-unavailable path: the run proceeds without
    /// ontology-backed lookups rather than aborting.
    pub fn load_or_empty(path: &Path) -> MemoryOntology {
        match Self::load(path) {
            Ok(source) => MemoryOntology::new(source.classes, source.properties),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "ontology unavailable, proceeding with empty source"
                );
                MemoryOntology::default()
            }
        }
    }
}

impl OntologySource for RdfOntology {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn properties(&self) -> &[String] {
        &self.properties
    }
}

impl std::fmt::Debug for RdfOntology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdfOntology")
            .field("classes", &self.classes.len())
            .field("properties", &self.properties.len())
            .finish()
    }
}

/// Run a single-variable SELECT and collect sorted IRI local names.
fn scan_local_names(store: &Store, sparql: &str) -> OntologyResult<Vec<String>> {
    let results = store.query(sparql).map_err(|e| OntologyError::Query {
        message: e.to_string(),
    })?;

    let mut names = Vec::new();
    match results {
        QueryResults::Solutions(solutions) => {
            for solution in solutions {
                let solution = solution.map_err(|e| OntologyError::Query {
                    message: e.to_string(),
                })?;
                if let Some(oxigraph::model::Term::NamedNode(node)) = solution.get("t") {
                    names.push(local_name(node.as_str()).to_string());
                }
            }
        }
        _ => {
            return Err(OntologyError::Query {
                message: "unexpected result type from class/property scan".into(),
            });
        }
    }
    names.sort();
    names.dedup();
    Ok(names)
}

/// The segment of an IRI after the last `#` or `/`.
fn local_name(iri: &str) -> &str {
    let after_hash = iri.rsplit('#').next().unwrap_or(iri);
    after_hash.rsplit('/').next().unwrap_or(after_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn term_iri_and_curie() {
        let knows = Namespace::foaf().term("knows");
        assert_eq!(knows.iri(), "http://xmlns.com/foaf/0.1/knows");
        assert_eq!(knows.curie(), "foaf:knows");
        assert_eq!(knows.to_string(), "foaf:knows");
    }

    #[test]
    fn well_known_prefixes() {
        assert!(Namespace::well_known("sosa").is_some());
        assert!(Namespace::well_known("saref").is_none());
    }

    #[test]
    fn local_name_extraction() {
        assert_eq!(local_name("http://schema.org/Person"), "Person");
        assert_eq!(
            local_name("http://www.w3.org/2000/01/rdf-schema#Class"),
            "Class"
        );
    }

    #[test]
    fn memory_ontology_sorts_names() {
        let source = MemoryOntology::new(
            vec!["Place".into(), "Emotion".into()],
            vec!["observes".into()],
        );
        assert_eq!(source.classes(), ["Emotion", "Place"]);
    }

    #[test]
    fn rdf_ontology_scans_classes_and_properties() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("mini.ttl");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> .\n\
             @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .\n\
             <http://schema.org/Emotion> rdf:type rdfs:Class .\n\
             <http://schema.org/observes> rdf:type rdf:Property ."
        )
        .unwrap();

        let source = RdfOntology::load(&path).unwrap();
        assert_eq!(source.classes(), ["Emotion"]);
        assert_eq!(source.properties(), ["observes"]);
    }

    #[test]
    fn missing_ontology_degrades_to_empty() {
        let source = RdfOntology::load_or_empty(Path::new("/nonexistent/onto.ttl"));
        assert!(source.classes().is_empty());
        assert!(source.properties().is_empty());
    }
}
