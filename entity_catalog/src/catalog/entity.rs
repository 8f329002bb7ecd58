//! Catalog entity records.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::entities::{EntityId, ValueRef};

/// One guessable entity and the values of its forward attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    pub id: EntityId,

    /// Human-readable name shown when the entity is guessed.
    pub label: Option<String>,

    /// Predicate -> values the entity holds for it.
    pub attributes: HashMap<String, BTreeSet<ValueRef>>,
}

impl CatalogEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(id),
            label: None,
            attributes: HashMap::new(),
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add one value for a predicate.
    pub fn with_attribute(mut self, predicate: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .entry(predicate.into())
            .or_default()
            .insert(ValueRef::new(value));
        self
    }

    /// Add several values for a predicate.
    pub fn with_attributes<I, V>(mut self, predicate: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes
            .entry(predicate.into())
            .or_default()
            .extend(values.into_iter().map(ValueRef::new));
        self
    }

    pub fn values(&self, predicate: &str) -> Option<&BTreeSet<ValueRef>> {
        self.attributes.get(predicate)
    }

    pub fn has_value(&self, predicate: &str, value: &ValueRef) -> bool {
        self.values(predicate).is_some_and(|values| values.contains(value))
    }
}
