//! Curated resolution registries: immutable configuration loaded once at
//! startup and injected into the resolvers and the type inferrer.
//!
//! The built-in data covers five semantic categories (sensor, system,
//! provenance, person, general), a direct predicate dictionary, the
//! context-predicate type map, and the keyword lists used by entity typing.
//! A TOML file can replace any section; order within a section is
//! significant and preserved (first-declared wins scoring ties).

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::ontology::{Namespace, OntologyTerm};

/// Result type for registry loading.
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// The property role used as a category's fallback.
pub const GENERIC_ROLE: &str = "generic";

/// A named property within a semantic category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryProperty {
    /// Role name scored against predicates (e.g. `observation`, `host`).
    pub role: String,
    pub term: OntologyTerm,
}

/// A semantic category: keyword set plus an ordered property table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticCategory {
    pub name: String,
    pub namespace: Namespace,
    pub keywords: Vec<String>,
    /// Ordered; earlier entries win scoring ties.
    pub properties: Vec<CategoryProperty>,
}

impl SemanticCategory {
    /// The category's fallback property, if configured.
    pub fn generic(&self) -> Option<&OntologyTerm> {
        self.properties
            .iter()
            .find(|p| p.role == GENERIC_ROLE)
            .map(|p| &p.term)
    }
}

/// All curated configuration, loaded once and injected by reference.
#[derive(Debug, Clone)]
pub struct Registry {
    /// Namespaces bound into the output graph, in binding order.
    pub namespaces: Vec<Namespace>,
    /// Namespace for entity identifiers and unmapped predicate literals.
    pub default_namespace: Namespace,
    /// Direct predicate dictionary: cleaned key → property.
    pub predicates: Vec<(String, OntologyTerm)>,
    /// Semantic categories in declaration order (the order is part of the
    /// resolution contract).
    pub categories: Vec<SemanticCategory>,
    /// Context predicate → entity class (e.g. `visited` → `schema:Place`).
    pub context_types: Vec<(String, OntologyTerm)>,
    pub person_pronouns: Vec<String>,
    pub place_keywords: Vec<String>,
    pub organization_keywords: Vec<String>,
    pub stop_words: HashSet<String>,
}

impl Registry {
    /// The built-in curated registry.
    pub fn builtin() -> Self {
        let schema = Namespace::schema();
        let foaf = Namespace::foaf();
        let prov = Namespace::prov();
        let sosa = Namespace::sosa();
        let ssn = Namespace::ssn();
        let emo = Namespace::emo();

        let predicates = vec![
            ("knows", foaf.term("knows")),
            ("name", foaf.term("name")),
            ("homepage", foaf.term("homepage")),
            ("mbox", foaf.term("mbox")),
            ("interest", foaf.term("interest")),
            ("based_near", foaf.term("based_near")),
            ("wasgeneratedby", prov.term("wasGeneratedBy")),
            ("wasderivedfrom", prov.term("wasDerivedFrom")),
            ("used", prov.term("used")),
            ("wasattributedto", prov.term("wasAttributedTo")),
            ("wasassociatedwith", prov.term("wasAssociatedWith")),
            ("actedonbehalfof", prov.term("actedOnBehalfOf")),
            ("agent", prov.term("Agent")),
            ("author", schema.term("author")),
            ("creator", schema.term("creator")),
            ("member", schema.term("member")),
            ("worksfor", schema.term("worksFor")),
            ("knowsabout", schema.term("knowsAbout")),
            ("makesoffer", schema.term("makesOffer")),
            ("publisher", schema.term("publisher")),
            ("birthdate", schema.term("birthDate")),
            ("deathdate", schema.term("deathDate")),
            ("gender", schema.term("gender")),
            ("location", schema.term("location")),
            ("colleague", foaf.term("knows")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let categories = vec![
            SemanticCategory {
                name: "sensor".into(),
                namespace: sosa.clone(),
                keywords: strings(&[
                    "sensor",
                    "measure",
                    "observation",
                    "observe",
                    "sensing",
                    "monitor",
                    "detect",
                    "temperature",
                    "humidity",
                    "pressure",
                    "light",
                    "sound",
                    "motion",
                ]),
                properties: vec![
                    prop(GENERIC_ROLE, sosa.term("observes")),
                    prop("sensor", sosa.term("Sensor")),
                    prop("observation", sosa.term("Observation")),
                    prop("sample", sosa.term("Sample")),
                    prop("feature", sosa.term("hasFeatureOfInterest")),
                    prop("result", sosa.term("hasResult")),
                    prop("host", sosa.term("hosts")),
                    prop("platform", sosa.term("Platform")),
                ],
            },
            SemanticCategory {
                name: "system".into(),
                namespace: ssn.clone(),
                keywords: strings(&[
                    "system",
                    "network",
                    "property",
                    "condition",
                    "capability",
                    "feature",
                    "deployment",
                    "device",
                    "node",
                    "gateway",
                ]),
                properties: vec![
                    prop(GENERIC_ROLE, ssn.term("hasProperty")),
                    prop("system", ssn.term("System")),
                    prop("property", ssn.term("Property")),
                    prop("deployment", ssn.term("Deployment")),
                    prop("condition", ssn.term("Condition")),
                    prop("implemented", ssn.term("implementedBy")),
                ],
            },
            SemanticCategory {
                name: "provenance".into(),
                namespace: prov.clone(),
                keywords: strings(&[
                    "generate",
                    "create",
                    "produce",
                    "derive",
                    "source",
                    "origin",
                    "author",
                    "attribute",
                    "associate",
                    "time",
                    "start",
                    "end",
                    "initiated",
                    "completed",
                ]),
                properties: vec![
                    prop(GENERIC_ROLE, prov.term("wasGeneratedBy")),
                    prop("agent", prov.term("Agent")),
                    prop("entity", prov.term("Entity")),
                    prop("activity", prov.term("Activity")),
                    prop("generated", prov.term("wasGeneratedBy")),
                    prop("used", prov.term("used")),
                    prop("associated", prov.term("wasAssociatedWith")),
                    prop("time", prov.term("generatedAtTime")),
                    prop("attribution", prov.term("wasAttributedTo")),
                ],
            },
            SemanticCategory {
                name: "person".into(),
                namespace: foaf.clone(),
                keywords: strings(&[
                    "person",
                    "people",
                    "user",
                    "name",
                    "contact",
                    "email",
                    "homepage",
                    "profile",
                    "friend",
                    "know",
                    "acquaintance",
                    "group",
                    "organization",
                    "member",
                    "like",
                    "dislike",
                    "emotion",
                    "interest",
                    "relation",
                    "play",
                    "feel",
                ]),
                properties: vec![
                    prop(GENERIC_ROLE, foaf.term("made")),
                    prop("person", foaf.term("Person")),
                    prop("name", foaf.term("name")),
                    prop("knows", foaf.term("knows")),
                    prop("group", foaf.term("Group")),
                    prop("organization", foaf.term("Organization")),
                    prop("member", foaf.term("member")),
                    prop("contact", foaf.term("mbox")),
                ],
            },
            SemanticCategory {
                name: "general".into(),
                namespace: schema.clone(),
                keywords: strings(&[
                    "description",
                    "identifier",
                    "type",
                    "category",
                    "location",
                    "address",
                    "date",
                    "time",
                    "value",
                    "price",
                    "rating",
                    "review",
                    "comment",
                    "status",
                    "watch",
                    "visit",
                    "wear",
                    "impress",
                    "action",
                    "experience",
                ]),
                properties: vec![
                    prop(GENERIC_ROLE, schema.term("actionStatus")),
                    prop("name", schema.term("name")),
                    prop("description", schema.term("description")),
                    prop("value", schema.term("value")),
                    prop("location", schema.term("location")),
                    prop("time", schema.term("dateTime")),
                    prop("identifier", schema.term("identifier")),
                    prop("url", schema.term("url")),
                    prop("status", schema.term("status")),
                ],
            },
        ];

        let context_types = vec![
            ("visited", schema.term("Place")),
            ("works in", schema.term("Place")),
            ("watched", schema.term("CreativeWork")),
            ("impressed by", schema.term("CreativeWork")),
            ("interested in", schema.term("CreativeWork")),
            ("likes", schema.term("Thing")),
            ("hates", schema.term("Thing")),
            ("played", schema.term("SportsEvent")),
            ("feels", emo.term("Emotion")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Registry {
            namespaces: vec![
                Namespace::rdf(),
                Namespace::rdfs(),
                Namespace::xsd(),
                schema.clone(),
                foaf,
                prov,
                sosa,
                ssn,
                emo,
            ],
            default_namespace: schema,
            predicates,
            categories,
            context_types,
            person_pronouns: strings(&["i", "we", "he", "she", "they"]),
            place_keywords: strings(&[
                "place", "city", "country", "room", "location", "village", "town",
            ]),
            organization_keywords: strings(&[
                "company",
                "organization",
                "university",
                "school",
                "institute",
                "corporation",
            ]),
            stop_words: STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// Load registry overrides from a TOML file. Sections that are absent
    /// keep the built-in data.
    pub fn from_path(path: &Path) -> RegistryResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RegistryError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_toml(&content, &path.display().to_string())
    }

    /// Parse registry overrides from TOML text.
    pub fn from_toml(content: &str, origin: &str) -> RegistryResult<Self> {
        let file: RegistryFile = toml::from_str(content).map_err(|e| RegistryError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;

        let mut registry = Self::builtin();

        let mut declared = registry.namespaces.clone();
        for ns in &file.namespace {
            let namespace = Namespace::new(ns.prefix.clone(), ns.base.clone());
            declared.push(namespace.clone());
            registry.namespaces.push(namespace);
        }

        if !file.predicate.is_empty() {
            registry.predicates = file
                .predicate
                .iter()
                .map(|p| Ok((p.key.to_lowercase(), resolve_curie(&p.term, &declared)?)))
                .collect::<RegistryResult<_>>()?;
        }

        if !file.category.is_empty() {
            registry.categories = file
                .category
                .iter()
                .map(|c| {
                    let namespace = lookup_namespace(&c.namespace, &declared)?;
                    let properties = c
                        .properties
                        .iter()
                        .map(|p| {
                            Ok(CategoryProperty {
                                role: p.role.clone(),
                                term: resolve_curie(&p.term, &declared)?,
                            })
                        })
                        .collect::<RegistryResult<_>>()?;
                    Ok(SemanticCategory {
                        name: c.name.clone(),
                        namespace,
                        keywords: c.keywords.clone(),
                        properties,
                    })
                })
                .collect::<RegistryResult<_>>()?;
        }

        if !file.context.is_empty() {
            registry.context_types = file
                .context
                .iter()
                .map(|c| Ok((c.predicate.to_lowercase(), resolve_curie(&c.class, &declared)?)))
                .collect::<RegistryResult<_>>()?;
        }

        if let Some(words) = file.person_pronouns {
            registry.person_pronouns = words;
        }
        if let Some(words) = file.place_keywords {
            registry.place_keywords = words;
        }
        if let Some(words) = file.organization_keywords {
            registry.organization_keywords = words;
        }
        if let Some(words) = file.stop_words {
            registry.stop_words = words.into_iter().collect();
        }

        Ok(registry)
    }

    /// Direct dictionary lookup by cleaned key.
    pub fn predicate(&self, key: &str) -> Option<&OntologyTerm> {
        self.predicates
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, term)| term)
    }

    /// Context-predicate type lookup.
    pub fn context_type(&self, predicate: &str) -> Option<&OntologyTerm> {
        self.context_types
            .iter()
            .find(|(k, _)| k == predicate)
            .map(|(_, term)| term)
    }

    /// The category named `general`, the classification fallback.
    pub fn general_category(&self) -> Option<&SemanticCategory> {
        self.categories.iter().find(|c| c.name == "general")
    }

    /// Report categories that are missing a `generic` fallback property.
    ///
    /// A missing generic is a configuration defect: resolution in that
    /// category can come up empty-handed. The defect is reported, not fatal.
    pub fn check(&self) -> RegistryResult<()> {
        for category in &self.categories {
            if category.generic().is_none() {
                return Err(RegistryError::MissingGeneric {
                    category: category.name.clone(),
                });
            }
        }
        Ok(())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn prop(role: &str, term: OntologyTerm) -> CategoryProperty {
    CategoryProperty {
        role: role.to_string(),
        term,
    }
}

fn lookup_namespace(prefix: &str, declared: &[Namespace]) -> RegistryResult<Namespace> {
    declared
        .iter()
        .find(|ns| ns.prefix == prefix)
        .cloned()
        .or_else(|| Namespace::well_known(prefix))
        .ok_or_else(|| RegistryError::UnknownNamespace {
            prefix: prefix.to_string(),
        })
}

fn resolve_curie(curie: &str, declared: &[Namespace]) -> RegistryResult<OntologyTerm> {
    let (prefix, local) = curie.split_once(':').ok_or_else(|| {
        RegistryError::UnknownNamespace {
            prefix: curie.to_string(),
        }
    })?;
    Ok(lookup_namespace(prefix, declared)?.term(local))
}

// ---------------------------------------------------------------------------
// TOML schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    namespace: Vec<NamespaceDecl>,
    #[serde(default)]
    predicate: Vec<PredicateDecl>,
    #[serde(default)]
    category: Vec<CategoryDecl>,
    #[serde(default)]
    context: Vec<ContextDecl>,
    person_pronouns: Option<Vec<String>>,
    place_keywords: Option<Vec<String>>,
    organization_keywords: Option<Vec<String>>,
    stop_words: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct NamespaceDecl {
    prefix: String,
    base: String,
}

#[derive(Debug, Deserialize)]
struct PredicateDecl {
    key: String,
    term: String,
}

#[derive(Debug, Deserialize)]
struct CategoryDecl {
    name: String,
    namespace: String,
    keywords: Vec<String>,
    properties: Vec<PropertyDecl>,
}

#[derive(Debug, Deserialize)]
struct PropertyDecl {
    role: String,
    term: String,
}

#[derive(Debug, Deserialize)]
struct ContextDecl {
    predicate: String,
    class: String,
}

/// English stop words checked by entity typing.
const STOP_WORDS: [&str; 103] = [
    "a", "about", "after", "again", "all", "an", "and", "any", "are", "as", "at", "be",
    "because", "been", "before", "being", "below", "between", "both", "but", "by", "could",
    "did", "do", "does", "doing", "down", "during", "each", "few", "for", "from", "further",
    "had", "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "me", "more", "most", "my", "no", "nor",
    "not", "now", "of", "off", "on", "once", "only", "or", "other", "our", "out", "over",
    "own", "same", "she", "so", "some", "such", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under",
    "until", "up", "very", "was", "we", "were", "what", "when", "where", "which", "while",
    "who",
];
