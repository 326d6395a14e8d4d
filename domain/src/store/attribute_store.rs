//! Immutable attribute store
//!
//! The store is built once per dataset load and is read-only afterwards,
//! so it can be shared between sessions behind an `Arc` without locking.

use crate::attribute::{Attribute, AttributeKind, AttributeValue, RawRating};
use crate::core::entity::Entity;
use crate::core::error::DomainError;
use std::collections::{BTreeMap, BTreeSet};

/// One entity as delivered by ingestion: its ratings and optional category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityRecord {
    pub name: String,
    pub category: Option<String>,
    pub ratings: BTreeMap<String, RawRating>,
}

impl EntityRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_rating(mut self, attribute: impl Into<String>, rating: RawRating) -> Self {
        self.ratings.insert(attribute.into(), rating);
        self
    }
}

#[derive(Debug, Clone, Default)]
struct EntityEntry {
    category: Option<String>,
    values: BTreeMap<String, AttributeValue>,
}

/// Queryable view of entities and their attribute values.
#[derive(Debug, Clone, Default)]
pub struct AttributeStore {
    entities: BTreeMap<Entity, EntityEntry>,
    /// Name-sorted; iteration order drives tie-breaking in question selection.
    attributes: Vec<Attribute>,
}

impl AttributeStore {
    /// Build a store from entity records and the declared attribute kinds.
    ///
    /// Fails with [`DomainError::DatasetInconsistency`] when a rating does not
    /// fit its attribute's kind, when an attribute has no declared kind, when
    /// an entity name is empty, or when an entity appears twice.
    pub fn build(
        records: impl IntoIterator<Item = EntityRecord>,
        kinds: &BTreeMap<String, AttributeKind>,
    ) -> Result<Self, DomainError> {
        let mut entities = BTreeMap::new();

        for record in records {
            let name = record.name.trim();
            if name.is_empty() {
                return Err(DomainError::inconsistency(
                    &record.name,
                    "",
                    "entity name is empty",
                ));
            }

            let mut values = BTreeMap::new();
            for (attribute, raw) in &record.ratings {
                let kind = kinds.get(attribute).ok_or_else(|| {
                    DomainError::inconsistency(name, attribute, "attribute has no declared kind")
                })?;
                let value = kind
                    .coerce(raw)
                    .map_err(|reason| DomainError::inconsistency(name, attribute, reason))?;
                values.insert(attribute.clone(), value);
            }

            let entry = EntityEntry {
                category: record.category.clone(),
                values,
            };
            if entities.insert(Entity::new(name), entry).is_some() {
                return Err(DomainError::inconsistency(
                    name,
                    "",
                    "entity appears more than once",
                ));
            }
        }

        let attributes = kinds
            .iter()
            .map(|(name, kind)| Attribute::new(name.clone(), *kind))
            .collect();

        Ok(Self {
            entities,
            attributes,
        })
    }

    /// All attributes in a fixed, name-sorted order
    pub fn all_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn kind_of(&self, attribute: &str) -> Option<AttributeKind> {
        self.attributes
            .binary_search_by(|a| a.name.as_str().cmp(attribute))
            .ok()
            .map(|i| self.attributes[i].kind)
    }

    /// Every recorded value of an entity, keyed by attribute name
    pub fn attributes_of(&self, entity: &Entity) -> Option<&BTreeMap<String, AttributeValue>> {
        self.entities.get(entity).map(|e| &e.values)
    }

    pub fn value_of(&self, entity: &Entity, attribute: &str) -> Option<AttributeValue> {
        self.entities
            .get(entity)
            .and_then(|e| e.values.get(attribute))
            .copied()
    }

    /// Values of `attribute` for the given entities.
    ///
    /// Entities without a recorded value are left out, so they never take
    /// part in split scoring.
    pub fn values_for<'e>(
        &self,
        attribute: &str,
        entities: impl IntoIterator<Item = &'e Entity>,
    ) -> Vec<(&'e Entity, AttributeValue)> {
        entities
            .into_iter()
            .filter_map(|entity| {
                self.value_of(entity, attribute)
                    .map(|value| (entity, value))
            })
            .collect()
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.keys()
    }

    /// The whole universe as a candidate set
    pub fn entity_set(&self) -> BTreeSet<Entity> {
        self.entities.keys().cloned().collect()
    }

    pub fn contains(&self, entity: &Entity) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn category_of(&self, entity: &Entity) -> Option<&str> {
        self.entities
            .get(entity)
            .and_then(|e| e.category.as_deref())
    }

    /// Entities labelled with `category` (exact match)
    pub fn entities_in_category(&self, category: &str) -> BTreeSet<Entity> {
        self.entities
            .iter()
            .filter(|(_, e)| e.category.as_deref() == Some(category))
            .map(|(entity, _)| entity.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
