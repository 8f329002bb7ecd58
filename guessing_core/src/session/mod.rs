//! Per-session game state.

mod store;

pub use store::*;

use entity_catalog::{AttributeRef, Constraint, ConstraintSet, EntityId, ValueRef};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::GameError;
use crate::question::{Question, QuestionKind};

/// Unique identifier for game sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = GameError;

    /// A string that is not a UUID cannot name a live session.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| GameError::SessionNotFound(s.to_string()))
    }
}

/// Attribute/value pairs already offered to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskedKeys(HashSet<(AttributeRef, ValueRef)>);

impl AskedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the pair had already been asked.
    pub fn mark(&mut self, attribute: &AttributeRef, value: &ValueRef) -> bool {
        self.0.insert((attribute.clone(), value.clone()))
    }

    pub fn contains(&self, attribute: &AttributeRef, value: &ValueRef) -> bool {
        self.0.contains(&(attribute.clone(), value.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The player confirmed the guess, or it was the only candidate left.
    Guessed(EntityId),
    /// The answers ruled out every candidate.
    NoCandidates,
}

/// Where a session stands, inferred from its last question and outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase<'a> {
    NotStarted,
    AwaitingAttributeAnswer,
    AwaitingGuessConfirmation,
    Finished(&'a Outcome),
}

/// The mutable state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub(crate) session_id: SessionId,
    pub(crate) constraints: ConstraintSet,
    pub(crate) asked: AskedKeys,
    pub(crate) last_question: Option<Question>,
    /// Questions issued so far. Diagnostic only.
    pub(crate) step: u32,
    pub(crate) outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            constraints: ConstraintSet::new(),
            asked: AskedKeys::new(),
            last_question: None,
            step: 0,
            outcome: None,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    /// Record an answer. Returns `false` if the same constraint was already recorded.
    pub fn add_constraint(&mut self, constraint: Constraint) -> bool {
        self.constraints.push(constraint)
    }

    pub fn asked(&self) -> &AskedKeys {
        &self.asked
    }

    pub fn mark_asked(&mut self, attribute: &AttributeRef, value: &ValueRef) -> bool {
        self.asked.mark(attribute, value)
    }

    pub fn was_asked(&self, attribute: &AttributeRef, value: &ValueRef) -> bool {
        self.asked.contains(attribute, value)
    }

    pub fn last_question(&self) -> Option<&Question> {
        self.last_question.as_ref()
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn phase(&self) -> Phase<'_> {
        if let Some(outcome) = &self.outcome {
            return Phase::Finished(outcome);
        }
        match self.last_question.as_ref().map(|q| q.kind) {
            None => Phase::NotStarted,
            Some(QuestionKind::AttributeQuestion) => Phase::AwaitingAttributeAnswer,
            Some(QuestionKind::Guess) => Phase::AwaitingGuessConfirmation,
        }
    }

    /// Make `question` the one awaiting an answer.
    pub(crate) fn issue(&mut self, question: Question) {
        self.last_question = Some(question);
        self.step += 1;
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.outcome = Some(outcome);
    }
}
