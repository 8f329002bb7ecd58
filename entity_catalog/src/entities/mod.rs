//! Identifiers for catalog entities and their categorical attributes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Identifier of an entity in the catalog (an IRI or a short name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an attribute value, or of any node an attribute can point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueRef(pub String);

impl ValueRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Read this value as an entity identifier (guess questions carry entities as values).
    pub fn to_entity(&self) -> EntityId {
        EntityId(self.0.clone())
    }
}

impl From<EntityId> for ValueRef {
    fn from(id: EntityId) -> Self {
        Self(id.0)
    }
}

impl std::fmt::Display for ValueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction in which an attribute is traversed from the candidate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    /// `entity --predicate--> value`
    Forward,
    /// `value --predicate--> entity`, e.g. a generation that features a species.
    Inverse,
}

/// Error returned when an attribute reference cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid attribute reference: {0:?}")]
pub struct AttributeParseError(pub String);

/// Reference to a categorical property of an entity.
///
/// The textual form is the predicate itself, or the predicate prefixed with `^`
/// when it is traversed in reverse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeRef {
    predicate: String,
    direction: Direction,
}

impl AttributeRef {
    /// An attribute read directly off the entity.
    pub fn direct(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            direction: Direction::Forward,
        }
    }

    /// A relation traversed from its object back to the subject.
    pub fn inverse(predicate: impl Into<String>) -> Self {
        Self {
            predicate: predicate.into(),
            direction: Direction::Inverse,
        }
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_inverse(&self) -> bool {
        self.direction == Direction::Inverse
    }
}

impl std::fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Direction::Forward => write!(f, "{}", self.predicate),
            Direction::Inverse => write!(f, "^{}", self.predicate),
        }
    }
}

impl FromStr for AttributeRef {
    type Err = AttributeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let attribute = match trimmed.strip_prefix('^') {
            Some(rest) => Self::inverse(rest.trim()),
            None => Self::direct(trimmed),
        };
        if attribute.predicate.is_empty() {
            return Err(AttributeParseError(s.to_string()));
        }
        Ok(attribute)
    }
}

impl TryFrom<String> for AttributeRef {
    type Error = AttributeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AttributeRef> for String {
    fn from(attribute: AttributeRef) -> Self {
        attribute.to_string()
    }
}

/// The last `#` or `/` separated segment of an IRI, or the whole string.
pub fn local_name(iri: &str) -> &str {
    match iri.rfind(['#', '/']) {
        Some(idx) if idx + 1 < iri.len() => &iri[idx + 1..],
        _ => iri,
    }
}
