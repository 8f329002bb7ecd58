//! Questions as issued to the player.

use entity_catalog::{AttributeRef, EntityId, ValueRef};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for issued questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub Uuid);

impl QuestionId {
    /// Create a new random question ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionKind {
    /// "Does the entity have this attribute value?"
    AttributeQuestion,
    /// "Is it this entity?"
    Guess,
}

/// A yes/no question put to the player.
///
/// For attribute questions `attribute` and `value` name the constraint a reply
/// records. For guesses `value` is the proposed entity and `attribute` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    pub attribute: Option<AttributeRef>,
    pub value: Option<ValueRef>,
}

impl Question {
    pub fn about(attribute: AttributeRef, value: ValueRef, text: impl Into<String>) -> Self {
        Self {
            id: QuestionId::new(),
            text: text.into(),
            kind: QuestionKind::AttributeQuestion,
            attribute: Some(attribute),
            value: Some(value),
        }
    }

    pub fn guess(entity: &EntityId, label: &str) -> Self {
        Self {
            id: QuestionId::new(),
            text: format!("Is it {label}?"),
            kind: QuestionKind::Guess,
            attribute: None,
            value: Some(entity.clone().into()),
        }
    }

    pub fn is_guess(&self) -> bool {
        self.kind == QuestionKind::Guess
    }

    /// The attribute/value pair a reply constrains, if this is a usable attribute question.
    pub fn target(&self) -> Option<(&AttributeRef, &ValueRef)> {
        if self.is_guess() {
            return None;
        }
        match (&self.attribute, &self.value) {
            (Some(attribute), Some(value)) if !value.as_str().is_empty() => Some((attribute, value)),
            _ => None,
        }
    }

    /// The proposed entity, if this is a guess.
    pub fn guessed_entity(&self) -> Option<EntityId> {
        if !self.is_guess() {
            return None;
        }
        self.value
            .as_ref()
            .filter(|value| !value.as_str().is_empty())
            .map(ValueRef::to_entity)
    }
}
