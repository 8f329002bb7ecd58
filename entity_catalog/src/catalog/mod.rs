//! In-memory catalog - an indexed entity set answering oracle queries.
//!
//! The catalog holds:
//! - **Entities**: the guessable things, each with forward attribute values
//! - **Links**: `subject --predicate--> entity` edges read as inverse attributes
//! - **Nodes**: types and labels for the non-entity subjects and values

mod entity;
mod loader;

pub use entity::*;
pub use loader::*;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;
use tracing::trace;

use crate::constraints::Constraint;
use crate::entities::{local_name, AttributeRef, Direction, EntityId, ValueRef};
use crate::oracle::{AttributeOracle, Deadline, OracleError, OracleResult, ValueCount};

/// Query budget applied when none is configured.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(20);

/// Entities scanned between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 256;

/// The main catalog structure.
///
/// Entities are kept in id order, so candidate listings are stable across calls.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// All entities by ID.
    entities: BTreeMap<EntityId, CatalogEntity>,

    /// Reverse index: entity -> predicate -> subjects linking to it.
    incoming: HashMap<EntityId, HashMap<String, BTreeSet<ValueRef>>>,

    /// Types of non-entity nodes (e.g. `Generation`).
    node_types: HashMap<ValueRef, BTreeSet<String>>,

    /// Labels of non-entity nodes.
    labels: HashMap<String, String>,

    query_timeout: Option<Duration>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            entities: BTreeMap::new(),
            incoming: HashMap::new(),
            node_types: HashMap::new(),
            labels: HashMap::new(),
            query_timeout: Some(DEFAULT_QUERY_TIMEOUT),
        }
    }
}

impl Catalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-query budget; `None` disables it.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout
    }

    /// Add an entity, replacing any entity with the same ID.
    pub fn add_entity(&mut self, entity: CatalogEntity) -> EntityId {
        let id = entity.id.clone();
        self.entities.insert(id.clone(), entity);
        id
    }

    /// Builder-style [`add_entity`](Self::add_entity).
    pub fn with_entity(mut self, entity: CatalogEntity) -> Self {
        self.add_entity(entity);
        self
    }

    pub fn get_entity(&self, id: &EntityId) -> Option<&CatalogEntity> {
        self.entities.get(id)
    }

    pub fn contains_entity(&self, id: &EntityId) -> bool {
        self.entities.contains_key(id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Record `subject --predicate--> object`, readable as the inverse attribute `^predicate`.
    pub fn add_link(&mut self, subject: ValueRef, predicate: impl Into<String>, object: EntityId) {
        self.incoming
            .entry(object)
            .or_default()
            .entry(predicate.into())
            .or_default()
            .insert(subject);
    }

    /// Declare `node` to be of type `node_type`.
    pub fn add_node_type(&mut self, node: ValueRef, node_type: impl Into<String>) {
        self.node_types.entry(node).or_default().insert(node_type.into());
    }

    pub fn has_type(&self, node: &ValueRef, node_type: &str) -> bool {
        self.node_types
            .get(node)
            .is_some_and(|types| types.contains(node_type))
    }

    /// Set the display label of a non-entity node.
    pub fn set_label(&mut self, id: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(id.into(), label.into());
    }

    /// Values `entity` holds for `attribute`, in either direction.
    pub fn values_of<'a>(
        &'a self,
        entity: &'a CatalogEntity,
        attribute: &AttributeRef,
    ) -> Option<&'a BTreeSet<ValueRef>> {
        match attribute.direction() {
            Direction::Forward => entity.values(attribute.predicate()),
            Direction::Inverse => self
                .incoming
                .get(&entity.id)
                .and_then(|by_predicate| by_predicate.get(attribute.predicate())),
        }
    }

    pub fn holds(&self, entity: &CatalogEntity, attribute: &AttributeRef, value: &ValueRef) -> bool {
        self.values_of(entity, attribute)
            .is_some_and(|values| values.contains(value))
    }

    /// Whether `entity` is consistent with every constraint.
    pub fn admits(&self, entity: &CatalogEntity, constraints: &[Constraint]) -> bool {
        constraints
            .iter()
            .all(|c| c.admits(self.holds(entity, &c.attribute, &c.value)))
    }

    /// All entities consistent with `constraints`, in id order.
    fn candidates(&self, constraints: &[Constraint], deadline: &Deadline) -> OracleResult<Vec<&CatalogEntity>> {
        let mut out = Vec::new();
        for (scanned, entity) in self.entities.values().enumerate() {
            if scanned % DEADLINE_CHECK_INTERVAL == 0 {
                deadline.check()?;
            }
            if self.admits(entity, constraints) {
                out.push(entity);
            }
        }
        Ok(out)
    }

    /// Count candidates per value of `attribute`, keeping values accepted by `keep`.
    fn tally<F>(
        &self,
        attribute: &AttributeRef,
        constraints: &[Constraint],
        limit: usize,
        keep: F,
    ) -> OracleResult<Vec<ValueCount>>
    where
        F: Fn(&ValueRef) -> bool,
    {
        let deadline = Deadline::new(self.query_timeout);
        let candidates = self.candidates(constraints, &deadline)?;

        let mut counts: HashMap<&ValueRef, u64> = HashMap::new();
        for entity in &candidates {
            if let Some(values) = self.values_of(entity, attribute) {
                for value in values.iter().filter(|v| keep(*v)) {
                    *counts.entry(value).or_default() += 1;
                }
            }
        }
        deadline.check()?;

        let mut out: Vec<_> = counts
            .into_iter()
            .map(|(value, count)| ValueCount::new(value.clone(), count))
            .collect();
        out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
        out.truncate(limit);

        trace!(
            attribute = %attribute,
            candidates = candidates.len(),
            values = out.len(),
            "counted attribute values"
        );
        Ok(out)
    }
}

impl AttributeOracle for Catalog {
    fn count_candidates(&self, constraints: &[Constraint]) -> OracleResult<u64> {
        let deadline = Deadline::new(self.query_timeout);
        let total = self.candidates(constraints, &deadline)?.len() as u64;
        trace!(constraints = constraints.len(), total, "counted candidates");
        Ok(total)
    }

    fn count_by_attribute_value(
        &self,
        attribute: &AttributeRef,
        constraints: &[Constraint],
        limit: usize,
    ) -> OracleResult<Vec<ValueCount>> {
        self.tally(attribute, constraints, limit, |_| true)
    }

    fn count_by_inverse_attribute(
        &self,
        attribute: &AttributeRef,
        subject_type: &str,
        constraints: &[Constraint],
        limit: usize,
    ) -> OracleResult<Vec<ValueCount>> {
        if !attribute.is_inverse() {
            return Err(OracleError::Malformed(format!(
                "{attribute} is not an inverse attribute"
            )));
        }
        self.tally(attribute, constraints, limit, |subject| {
            self.has_type(subject, subject_type)
        })
    }

    fn list_candidates(&self, constraints: &[Constraint], limit: usize) -> OracleResult<Vec<EntityId>> {
        let deadline = Deadline::new(self.query_timeout);
        Ok(self
            .candidates(constraints, &deadline)?
            .into_iter()
            .take(limit)
            .map(|entity| entity.id.clone())
            .collect())
    }

    fn resolve_label(&self, id: &str) -> OracleResult<String> {
        let entity_label = self
            .entities
            .get(&EntityId::new(id))
            .and_then(|entity| entity.label.clone());

        Ok(entity_label
            .or_else(|| self.labels.get(id).cloned())
            .unwrap_or_else(|| local_name(id).to_string()))
    }
}
