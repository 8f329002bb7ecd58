//! The read-only query surface the guessing engine narrows candidates through.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::constraints::Constraint;
use crate::entities::{AttributeRef, EntityId, ValueRef};

/// A distinct attribute value and how many current candidates hold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: ValueRef,
    pub count: u64,
}

impl ValueCount {
    pub fn new(value: ValueRef, count: u64) -> Self {
        Self { value, count }
    }
}

/// Failure of a single oracle query. Never a game-ending condition on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("query exceeded its {limit:?} budget after {elapsed:?}")]
    Timeout { elapsed: Duration, limit: Duration },

    #[error("malformed query: {0}")]
    Malformed(String),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

pub type OracleResult<T> = Result<T, OracleError>;

/// Counts and samples catalog entities under a set of constraints.
///
/// YES constraints require the attribute/value fact to hold, NO constraints
/// require it to be absent and UNKNOWN constraints filter nothing.
pub trait AttributeOracle: Send + Sync {
    /// Number of entities consistent with every constraint.
    fn count_candidates(&self, constraints: &[Constraint]) -> OracleResult<u64>;

    /// Distinct values of `attribute` among the candidates, each with the number of
    /// candidates holding it, most common first, at most `limit` of them.
    fn count_by_attribute_value(
        &self,
        attribute: &AttributeRef,
        constraints: &[Constraint],
        limit: usize,
    ) -> OracleResult<Vec<ValueCount>>;

    /// Like [`count_by_attribute_value`](Self::count_by_attribute_value) for a relation
    /// traversed in reverse, counting only subjects of type `subject_type`.
    fn count_by_inverse_attribute(
        &self,
        attribute: &AttributeRef,
        subject_type: &str,
        constraints: &[Constraint],
        limit: usize,
    ) -> OracleResult<Vec<ValueCount>>;

    /// Up to `limit` candidates, in a stable order.
    fn list_candidates(&self, constraints: &[Constraint], limit: usize) -> OracleResult<Vec<EntityId>>;

    /// Display label for an entity or value, falling back to its local name.
    fn resolve_label(&self, id: &str) -> OracleResult<String>;
}

/// Cooperative query budget, checked while a query scans the catalog.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn new(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    /// A deadline that never expires.
    pub fn unbounded() -> Self {
        Self::new(None)
    }

    pub fn check(&self) -> OracleResult<()> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        let elapsed = self.started.elapsed();
        if elapsed >= limit {
            return Err(OracleError::Timeout { elapsed, limit });
        }
        Ok(())
    }
}
