//! Question Selector - picks the next yes/no question for a set of answers.
//!
//! The selection works as follows:
//! 1. **Total**: Count the candidates still consistent with the answers
//! 2. **Gather**: For each attribute family, fetch value counts among the candidates
//! 3. **Filter**: Drop values already constrained or asked, and values everyone or no one holds
//! 4. **Rank**: Order by distance from an even split, `|total/2 - yes|`
//! 5. **Draw**: Pick uniformly among the best `top_k` to avoid a fixed question order

mod label;

pub use label::*;

use entity_catalog::{AttributeOracle, AttributeRef, ConstraintSet, OracleResult, ValueCount, ValueRef};
use rand::Rng;
use tracing::debug;

use crate::config::{AttributeFamily, SelectorConfig};
use crate::question::Question;
use crate::session::AskedKeys;

/// Result of asking the selector for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// A question that splits the candidates.
    Ask(Question),
    /// At most one candidate is left; there is nothing to discriminate.
    AlreadyNarrowed { total: u64 },
    /// No family offers a value that splits the candidates.
    NoQuestionAvailable,
}

/// A question under consideration, with its yes-count.
#[derive(Debug, Clone)]
struct CandidateQuestion {
    attribute: AttributeRef,
    value: ValueRef,
    yes_count: u64,
    text: String,
}

impl CandidateQuestion {
    /// Distance from a perfect halving of `total`.
    fn split_distance(&self, total: u64) -> u64 {
        (total / 2).abs_diff(self.yes_count)
    }
}

/// Ranked candidate questions for one set of answers, ready to draw from.
///
/// Building a shortlist runs every oracle query; drawing from it runs none.
#[derive(Debug, Clone)]
pub struct Shortlist {
    total: u64,
    ranked: Vec<CandidateQuestion>,
    top_k: usize,
}

impl Shortlist {
    /// Candidates consistent with the answers.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of discriminating questions on offer.
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    /// Pick uniformly among the best `top_k` and mark the pick in `asked`.
    pub fn draw<R: Rng + ?Sized>(mut self, asked: &mut AskedKeys, rng: &mut R) -> Selection {
        if self.total <= 1 {
            return Selection::AlreadyNarrowed { total: self.total };
        }
        if self.ranked.is_empty() {
            return Selection::NoQuestionAvailable;
        }

        let offered = self.ranked.len();
        let k = self.top_k.clamp(1, offered);
        let chosen = self.ranked.swap_remove(rng.gen_range(0..k));
        asked.mark(&chosen.attribute, &chosen.value);

        debug!(
            attribute = %chosen.attribute,
            value = %chosen.value,
            yes = chosen.yes_count,
            total = self.total,
            pool = offered,
            "question selected"
        );
        Selection::Ask(Question::about(chosen.attribute, chosen.value, chosen.text))
    }
}

/// Proposes the most informative next question.
#[derive(Debug, Clone)]
pub struct QuestionSelector {
    config: SelectorConfig,
}

impl QuestionSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Choose the next question under `constraints`, never one in `asked`.
    ///
    /// The chosen pair is marked in `asked`. Oracle failures are returned as-is.
    pub fn next_question<O, R>(
        &self,
        oracle: &O,
        constraints: &ConstraintSet,
        asked: &mut AskedKeys,
        rng: &mut R,
    ) -> OracleResult<Selection>
    where
        O: AttributeOracle + ?Sized,
        R: Rng + ?Sized,
    {
        Ok(self.shortlist(oracle, constraints, asked)?.draw(asked, rng))
    }

    /// Query the oracle and rank every discriminating question, closest to an
    /// even split first. `asked` is only read.
    pub fn shortlist<O>(&self, oracle: &O, constraints: &ConstraintSet, asked: &AskedKeys) -> OracleResult<Shortlist>
    where
        O: AttributeOracle + ?Sized,
    {
        let total = oracle.count_candidates(constraints.as_slice())?;
        let mut ranked = Vec::new();

        if total <= 1 {
            debug!(total, "already narrowed down");
        } else {
            for family in &self.config.families {
                ranked.extend(self.family_candidates(oracle, family, constraints, asked, total)?);
            }
            if ranked.is_empty() {
                debug!(total, constraints = constraints.len(), "no discriminating question left");
            }
            // Stable: equal splits keep family order, then count order.
            ranked.sort_by_key(|c| c.split_distance(total));
        }

        Ok(Shortlist {
            total,
            ranked,
            top_k: self.config.top_k,
        })
    }

    /// Discriminating questions offered by one family.
    fn family_candidates<O>(
        &self,
        oracle: &O,
        family: &AttributeFamily,
        constraints: &ConstraintSet,
        asked: &AskedKeys,
        total: u64,
    ) -> OracleResult<Vec<CandidateQuestion>>
    where
        O: AttributeOracle + ?Sized,
    {
        let attribute = &family.attribute;
        let counts = match &family.subject_type {
            Some(subject_type) if attribute.is_inverse() => oracle.count_by_inverse_attribute(
                attribute,
                subject_type,
                constraints.as_slice(),
                self.config.value_limit,
            )?,
            _ => oracle.count_by_attribute_value(
                attribute,
                constraints.as_slice(),
                self.config.value_limit,
            )?,
        };

        let constrained = constraints.values_for(attribute);
        let unconstrained: Vec<&ValueCount> = counts
            .iter()
            .filter(|vc| !constrained.contains(&vc.value))
            .collect();
        let fresh: Vec<&ValueCount> = unconstrained
            .iter()
            .copied()
            .filter(|vc| !asked.contains(attribute, &vc.value))
            .collect();

        // Asked-but-unconstrained values come back only when nothing fresh is left.
        let offered = if fresh.is_empty() { unconstrained } else { fresh };

        offered
            .into_iter()
            .filter(|vc| vc.count > 0 && vc.count < total)
            .map(|vc| -> OracleResult<CandidateQuestion> {
                let label = normalize_label(
                    &oracle.resolve_label(vc.value.as_str())?,
                    &self.config.label_prefixes,
                );
                Ok(CandidateQuestion {
                    attribute: attribute.clone(),
                    value: vc.value.clone(),
                    yes_count: vc.count,
                    text: family.render(&label),
                })
            })
            .collect()
    }
}
