//! Player answers and the constraints they accumulate into.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;

use crate::entities::{AttributeRef, ValueRef};

/// A player's reply to a yes/no question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Answer {
    Yes,
    No,
    /// The player does not know. Recorded, but filters nothing.
    Unknown,
}

/// Error returned when a reply cannot be read as an [`Answer`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized answer {0:?}, expected YES, NO or UNKNOWN")]
pub struct ParseAnswerError(pub String);

impl FromStr for Answer {
    type Err = ParseAnswerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            "unknown" | "?" => Ok(Answer::Unknown),
            _ => Err(ParseAnswerError(s.to_string())),
        }
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Answer::Yes => "YES",
            Answer::No => "NO",
            Answer::Unknown => "UNKNOWN",
        };
        f.write_str(text)
    }
}

/// One confirmed fact about the hidden entity: its `attribute` does (or does not) have `value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    pub attribute: AttributeRef,
    pub value: ValueRef,
    pub answer: Answer,
}

impl Constraint {
    pub fn new(attribute: AttributeRef, value: ValueRef, answer: Answer) -> Self {
        Self {
            attribute,
            value,
            answer,
        }
    }

    pub fn yes(attribute: AttributeRef, value: ValueRef) -> Self {
        Self::new(attribute, value, Answer::Yes)
    }

    pub fn no(attribute: AttributeRef, value: ValueRef) -> Self {
        Self::new(attribute, value, Answer::No)
    }

    /// Whether an entity for which the fact is `holds` satisfies this constraint.
    pub fn admits(&self, holds: bool) -> bool {
        match self.answer {
            Answer::Yes => holds,
            Answer::No => !holds,
            Answer::Unknown => true,
        }
    }
}

/// The ordered, duplicate-free constraints accumulated over one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSet {
    constraints: Vec<Constraint>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constraint. Returns `false` if an equal one was already present.
    pub fn push(&mut self, constraint: Constraint) -> bool {
        if self.constraints.contains(&constraint) {
            return false;
        }
        self.constraints.push(constraint);
        true
    }

    /// Builder-style append.
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.push(constraint);
        self
    }

    pub fn contains(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    /// Values already constrained for `attribute`, whatever the answer.
    pub fn values_for(&self, attribute: &AttributeRef) -> HashSet<&ValueRef> {
        self.constraints
            .iter()
            .filter(|c| &c.attribute == attribute)
            .map(|c| &c.value)
            .collect()
    }

    pub fn as_slice(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Constraint> {
        self.constraints.iter()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a Constraint;
    type IntoIter = std::slice::Iter<'a, Constraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Constraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = Constraint>>(iter: I) -> Self {
        let mut set = Self::new();
        for constraint in iter {
            set.push(constraint);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colour(value: &str, answer: Answer) -> Constraint {
        Constraint::new(AttributeRef::direct("hasColour"), ValueRef::new(value), answer)
    }

    #[test]
    fn test_answer_parsing() {
        assert_eq!("YES".parse::<Answer>().unwrap(), Answer::Yes);
        assert_eq!(" no ".parse::<Answer>().unwrap(), Answer::No);
        assert_eq!("Unknown".parse::<Answer>().unwrap(), Answer::Unknown);
        assert_eq!("y".parse::<Answer>().unwrap(), Answer::Yes);
        assert!("maybe".parse::<Answer>().is_err());
        assert!("".parse::<Answer>().is_err());
    }

    #[test]
    fn test_push_is_idempotent() {
        let mut set = ConstraintSet::new();
        assert!(set.push(colour("red", Answer::Yes)));
        assert!(!set.push(colour("red", Answer::Yes)));
        assert_eq!(set.len(), 1);

        // Same pair with another answer is a distinct constraint.
        assert!(set.push(colour("red", Answer::No)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_order_is_preserved() {
        let set: ConstraintSet = vec![
            colour("red", Answer::Yes),
            colour("blue", Answer::No),
            colour("red", Answer::Yes),
        ]
        .into_iter()
        .collect();

        let values: Vec<_> = set.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["red", "blue"]);
    }

    #[test]
    fn test_values_for_ignores_answer() {
        let set = ConstraintSet::new()
            .with(colour("red", Answer::Yes))
            .with(colour("blue", Answer::Unknown))
            .with(Constraint::no(AttributeRef::direct("hasShape"), ValueRef::new("ball")));

        let values = set.values_for(&AttributeRef::direct("hasColour"));
        assert_eq!(values.len(), 2);
        assert!(values.contains(&ValueRef::new("blue")));
        assert!(!values.contains(&ValueRef::new("ball")));
    }

    #[test]
    fn test_admits() {
        assert!(colour("red", Answer::Yes).admits(true));
        assert!(!colour("red", Answer::Yes).admits(false));
        assert!(colour("red", Answer::No).admits(false));
        assert!(colour("red", Answer::Unknown).admits(false));
    }
}
