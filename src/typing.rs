//! Memoized semantic type inference for entities.
//!
//! The first inference for an entity wins and is never revisited: the memo
//! table is write-once per key, so a later, more specific context predicate
//! cannot change an already-assigned type. That order dependence matches the
//! ingestion semantics this engine models and is deliberate.

use std::collections::HashMap;

use crate::ontology::{Namespace, OntologySource, OntologyTerm};
use crate::registry::Registry;
use crate::term::Identifier;

/// Infers a semantic type for each entity, caching by normalized identifier.
pub struct EntityTyper<'a> {
    registry: &'a Registry,
    ontology: &'a dyn OntologySource,
    cache: HashMap<Identifier, OntologyTerm>,
    person: OntologyTerm,
    place: OntologyTerm,
    organization: OntologyTerm,
    thing: OntologyTerm,
}

impl<'a> EntityTyper<'a> {
    pub fn new(registry: &'a Registry, ontology: &'a dyn OntologySource) -> Self {
        let schema = Namespace::schema();
        Self {
            registry,
            ontology,
            cache: HashMap::new(),
            person: schema.term("Person"),
            place: schema.term("Place"),
            organization: schema.term("Organization"),
            thing: schema.term("Thing"),
        }
    }

    /// Infer the semantic type of `entity`, optionally informed by the
    /// predicate it appeared under.
    ///
    /// First-wins: once an entity is typed, the cached type is returned and
    /// the context is ignored.
    pub fn infer(&mut self, entity: &str, context_predicate: Option<&str>) -> OntologyTerm {
        let key = Identifier::from_term(entity);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let inferred = self.evaluate(entity, context_predicate);
        tracing::debug!(entity, class = %inferred, "inferred entity type");
        self.cache.insert(key, inferred.clone());
        inferred
    }

    /// The cached type for an entity, if it has been inferred this run.
    pub fn cached(&self, entity: &str) -> Option<&OntologyTerm> {
        self.cache.get(&Identifier::from_term(entity))
    }

    fn evaluate(&self, entity: &str, context_predicate: Option<&str>) -> OntologyTerm {
        let lowered = entity.trim().to_lowercase();

        // Person-referring pronouns and plain non-stop-words read as people.
        if self.registry.person_pronouns.iter().any(|p| *p == lowered)
            || (!self.registry.stop_words.contains(&lowered)
                && lowered.chars().next().is_some_and(|c| c.is_alphabetic()))
        {
            return self.person.clone();
        }

        if let Some(predicate) = context_predicate {
            let predicate = predicate.trim().to_lowercase();
            if let Some(class) = self.registry.context_type(&predicate) {
                return class.clone();
            }
        }

        if self
            .registry
            .place_keywords
            .iter()
            .any(|kw| lowered.contains(kw.as_str()))
        {
            return self.place.clone();
        }
        if self
            .registry
            .organization_keywords
            .iter()
            .any(|kw| lowered.contains(kw.as_str()))
        {
            return self.organization.clone();
        }

        if let Some(class) = self.ontology_class(&lowered) {
            return class;
        }

        self.thing.clone()
    }

    /// Match the entity name against class names from the external ontology:
    /// exact first, then substring in either direction.
    fn ontology_class(&self, lowered: &str) -> Option<OntologyTerm> {
        let name = lowered.replace(' ', "_");
        let classes = self.ontology.classes();

        let hit = classes
            .iter()
            .find(|class| class.to_lowercase() == name)
            .or_else(|| {
                classes.iter().find(|class| {
                    let class = class.to_lowercase();
                    class.contains(&name) || name.contains(&class)
                })
            })?;

        Some(self.registry.default_namespace.term(hit.clone()))
    }
}

impl std::fmt::Debug for EntityTyper<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityTyper")
            .field("cached", &self.cache.len())
            .finish()
    }
}
