//! Game Engine - the answer-driven state machine.
//!
//! Every call locks the session, works on a draft copy of its state and writes
//! the draft back only once all oracle queries have succeeded.

use entity_catalog::{Answer, AttributeOracle, Constraint, EntityId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::{GameError, GameResult};
use crate::question::Question;
use crate::selector::{QuestionSelector, Selection};
use crate::session::{GameState, Outcome, SessionId, SessionStore, SharedState};

/// A freshly started game and its first question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStart {
    pub session_id: SessionId,
    pub question: Question,
}

/// What the engine does after an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NextStep {
    /// Another question; a guess question when `question.kind` is `GUESS`.
    #[serde(rename = "QUESTION")]
    NextQuestion {
        remaining_candidates: u64,
        question: Question,
    },
    /// The game ended on this entity.
    Guess { entity: EntityId, label: String },
    /// The answers ruled out every candidate.
    NoCandidates,
}

/// A remaining candidate with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub entity: EntityId,
    pub label: String,
}

/// Runs twenty-questions games against an attribute oracle.
pub struct GameEngine<O, R = StdRng> {
    oracle: O,
    config: EngineConfig,
    selector: QuestionSelector,
    sessions: SessionStore,
    rng: Mutex<R>,
}

impl<O: AttributeOracle> GameEngine<O, StdRng> {
    /// Create an engine drawing question order from system entropy.
    pub fn new(oracle: O, config: EngineConfig) -> Self {
        Self::with_rng(oracle, config, StdRng::from_entropy())
    }

    /// Create an engine with a reproducible question order.
    pub fn seeded(oracle: O, config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(oracle, config, StdRng::seed_from_u64(seed))
    }
}

impl<O: AttributeOracle, R: Rng + Send> GameEngine<O, R> {
    /// Create an engine with an explicit random source for tie-breaking.
    pub fn with_rng(oracle: O, config: EngineConfig, rng: R) -> Self {
        let selector = QuestionSelector::new(config.selector.clone());
        Self {
            oracle,
            config,
            selector,
            sessions: SessionStore::new(),
            rng: Mutex::new(rng),
        }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Start a game and issue its first question.
    pub fn start(&self) -> GameResult<GameStart> {
        let (session_id, shared) = self.sessions.create();
        match self.open(&session_id, &shared) {
            Ok(question) => {
                info!(session = %session_id, kind = ?question.kind, "game started");
                Ok(GameStart {
                    session_id,
                    question,
                })
            }
            Err(e) => {
                warn!(session = %session_id, error = %e, "game failed to start");
                self.sessions.remove(&session_id);
                Err(e)
            }
        }
    }

    /// Apply the player's answer to the last question of `session_id`.
    pub fn answer(&self, session_id: &SessionId, answer: Answer) -> GameResult<NextStep> {
        let shared = self.sessions.get(session_id)?;
        let mut state = lock_state(&shared, session_id)?;

        if let Some(outcome) = state.outcome() {
            debug!(session = %session_id, "answer on finished game");
            return self.report(outcome);
        }

        let mut draft = state.clone();
        let step = self.advance(&mut draft, answer).inspect_err(|e| {
            warn!(session = %session_id, error = %e, "answer not applied");
        })?;

        if let Some(outcome) = draft.outcome() {
            info!(session = %session_id, steps = draft.step(), ?outcome, "game finished");
        }
        *state = draft;
        Ok(step)
    }

    /// Parse a raw reply and apply it. Missing or unrecognized replies are invalid input.
    pub fn answer_raw(&self, session_id: &str, answer: Option<&str>) -> GameResult<NextStep> {
        let answer: Answer = answer
            .ok_or_else(|| GameError::InvalidInput("answer is required: YES|NO|UNKNOWN".into()))?
            .parse()?;
        let session_id: SessionId = session_id.parse()?;
        self.answer(&session_id, answer)
    }

    /// Candidates still consistent with the session's answers, with labels.
    pub fn list_candidates(&self, session_id: &SessionId) -> GameResult<Vec<Candidate>> {
        let shared = self.sessions.get(session_id)?;
        let constraints = lock_state(&shared, session_id)?.constraints().clone();

        self.oracle
            .list_candidates(constraints.as_slice(), self.config.candidate_list_limit)?
            .into_iter()
            .map(|entity| {
                let label = self.oracle.resolve_label(entity.as_str())?;
                Ok(Candidate { entity, label })
            })
            .collect()
    }

    /// Forget a session. Ending an unknown session is a no-op.
    pub fn end(&self, session_id: &SessionId) -> bool {
        self.sessions.remove(session_id)
    }

    fn open(&self, session_id: &SessionId, shared: &SharedState) -> GameResult<Question> {
        let mut state = lock_state(shared, session_id)?;
        let mut draft = state.clone();

        let question = match self.select(&mut draft)? {
            Selection::Ask(question) => question,
            Selection::AlreadyNarrowed { .. } | Selection::NoQuestionAvailable => {
                self.build_guess(&draft)?.ok_or(GameError::EmptyCatalog)?
            }
        };

        draft.issue(question.clone());
        *state = draft;
        Ok(question)
    }

    fn advance(&self, draft: &mut GameState, answer: Answer) -> GameResult<NextStep> {
        let Some(last) = draft.last_question().cloned() else {
            return self.next_or_guess(draft);
        };

        if last.is_guess() {
            return self.resolve_guess(draft, &last, answer);
        }

        let Some((attribute, value)) = last.target() else {
            return self.next_or_guess(draft);
        };

        draft.add_constraint(Constraint::new(attribute.clone(), value.clone(), answer));
        let remaining = self.oracle.count_candidates(draft.constraints().as_slice())?;
        debug!(
            session = %draft.session_id(),
            attribute = %attribute,
            value = %value,
            %answer,
            remaining,
            "answer recorded"
        );
        self.ask_or_guess(draft, remaining)
    }

    fn next_or_guess(&self, draft: &mut GameState) -> GameResult<NextStep> {
        let remaining = self.oracle.count_candidates(draft.constraints().as_slice())?;
        self.ask_or_guess(draft, remaining)
    }

    fn ask_or_guess(&self, draft: &mut GameState, remaining: u64) -> GameResult<NextStep> {
        if remaining <= self.config.guess_threshold {
            return self.issue_guess(draft, remaining);
        }

        match self.select(draft)? {
            Selection::Ask(question) => {
                draft.issue(question.clone());
                Ok(NextStep::NextQuestion {
                    remaining_candidates: remaining,
                    question,
                })
            }
            selection => {
                debug!(session = %draft.session_id(), ?selection, remaining, "falling back to a guess");
                self.issue_guess(draft, remaining)
            }
        }
    }

    fn resolve_guess(&self, draft: &mut GameState, last: &Question, answer: Answer) -> GameResult<NextStep> {
        let Some(guessed) = last.guessed_entity() else {
            draft.finish(Outcome::NoCandidates);
            return Ok(NextStep::NoCandidates);
        };

        if answer == Answer::Yes {
            return self.conclude(draft, guessed);
        }

        // A rejected guess adds no constraint; with exactly two left, the other one wins.
        let candidates = self
            .oracle
            .list_candidates(draft.constraints().as_slice(), 2)?;
        let other = match candidates.as_slice() {
            [a, b] => [a, b].into_iter().find(|c| **c != guessed).cloned(),
            _ => None,
        };

        match other {
            Some(entity) => self.conclude(draft, entity),
            None => {
                draft.finish(Outcome::NoCandidates);
                Ok(NextStep::NoCandidates)
            }
        }
    }

    fn conclude(&self, draft: &mut GameState, entity: EntityId) -> GameResult<NextStep> {
        let label = self.oracle.resolve_label(entity.as_str())?;
        draft.finish(Outcome::Guessed(entity.clone()));
        Ok(NextStep::Guess { entity, label })
    }

    fn issue_guess(&self, draft: &mut GameState, remaining: u64) -> GameResult<NextStep> {
        match self.build_guess(draft)? {
            Some(question) => {
                draft.issue(question.clone());
                Ok(NextStep::NextQuestion {
                    remaining_candidates: remaining,
                    question,
                })
            }
            None => {
                draft.finish(Outcome::NoCandidates);
                Ok(NextStep::NoCandidates)
            }
        }
    }

    /// A guess at the first remaining candidate, or `None` if none remain.
    fn build_guess(&self, state: &GameState) -> GameResult<Option<Question>> {
        let candidates = self.oracle.list_candidates(state.constraints().as_slice(), 2)?;
        let Some(entity) = candidates.into_iter().next() else {
            return Ok(None);
        };
        let label = self.oracle.resolve_label(entity.as_str())?;
        Ok(Some(Question::guess(&entity, &label)))
    }

    /// Rank questions without the RNG lock; hold it only for the draw.
    fn select(&self, draft: &mut GameState) -> GameResult<Selection> {
        let shortlist = self
            .selector
            .shortlist(&self.oracle, &draft.constraints, &draft.asked)?;
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| GameError::LockPoisoned("question rng".into()))?;
        Ok(shortlist.draw(&mut draft.asked, &mut *rng))
    }

    fn report(&self, outcome: &Outcome) -> GameResult<NextStep> {
        match outcome {
            Outcome::Guessed(entity) => Ok(NextStep::Guess {
                entity: entity.clone(),
                label: self.oracle.resolve_label(entity.as_str())?,
            }),
            Outcome::NoCandidates => Ok(NextStep::NoCandidates),
        }
    }
}

fn lock_state<'a>(shared: &'a SharedState, session_id: &SessionId) -> GameResult<MutexGuard<'a, GameState>> {
    shared
        .lock()
        .map_err(|_| GameError::LockPoisoned(session_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AttributeFamily, SelectorConfig};
    use crate::question::QuestionKind;
    use entity_catalog::{
        AttributeRef, Catalog, CatalogEntity, OracleError, OracleResult, ValueCount, ValueRef,
    };
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::{Duration, Instant};

    const TYPE: &str = "hasType";
    const COLOUR: &str = "hasColour";

    fn config() -> EngineConfig {
        EngineConfig {
            selector: SelectorConfig {
                families: vec![
                    AttributeFamily::direct(TYPE, "Is it {label} type?"),
                    AttributeFamily::direct(COLOUR, "Is it {label} color?"),
                ],
                ..SelectorConfig::default()
            },
            ..EngineConfig::default()
        }
    }

    fn starters() -> Catalog {
        let mut catalog = Catalog::new();
        for (id, label, ty, colour) in [
            ("bulbasaur", "Bulbasaur", "type/grass", "colour/green"),
            ("charmander", "Charmander", "type/fire", "colour/red"),
            ("squirtle", "Squirtle", "type/water", "colour/blue"),
            ("pikachu", "Pikachu", "type/electric", "colour/yellow"),
            ("oddish", "Oddish", "type/grass", "colour/blue"),
        ] {
            catalog.add_entity(
                CatalogEntity::new(id)
                    .with_label(label)
                    .with_attribute(TYPE, ty)
                    .with_attribute(COLOUR, colour),
            );
        }
        catalog
    }

    fn lone() -> Catalog {
        Catalog::new().with_entity(CatalogEntity::new("mew").with_label("Mew").with_attribute(TYPE, "type/psychic"))
    }

    fn twins() -> Catalog {
        Catalog::new()
            .with_entity(CatalogEntity::new("nidoran-f").with_label("Nidoran F").with_attribute(TYPE, "type/poison"))
            .with_entity(CatalogEntity::new("nidoran-m").with_label("Nidoran M").with_attribute(TYPE, "type/poison"))
    }

    fn state_of<O: AttributeOracle>(engine: &GameEngine<O>, id: &SessionId) -> GameState {
        engine.sessions().get(id).unwrap().lock().unwrap().clone()
    }

    /// Wraps a catalog and fails every query while `down` is set.
    struct Flaky {
        inner: Catalog,
        down: AtomicBool,
    }

    impl Flaky {
        fn new(inner: Catalog) -> Self {
            Self {
                inner,
                down: AtomicBool::new(false),
            }
        }

        fn check(&self) -> OracleResult<()> {
            if self.down.load(Ordering::SeqCst) {
                return Err(OracleError::Unavailable("connection refused".into()));
            }
            Ok(())
        }
    }

    impl AttributeOracle for Flaky {
        fn count_candidates(&self, constraints: &[Constraint]) -> OracleResult<u64> {
            self.check()?;
            self.inner.count_candidates(constraints)
        }

        fn count_by_attribute_value(
            &self,
            attribute: &AttributeRef,
            constraints: &[Constraint],
            limit: usize,
        ) -> OracleResult<Vec<ValueCount>> {
            self.check()?;
            self.inner.count_by_attribute_value(attribute, constraints, limit)
        }

        fn count_by_inverse_attribute(
            &self,
            attribute: &AttributeRef,
            subject_type: &str,
            constraints: &[Constraint],
            limit: usize,
        ) -> OracleResult<Vec<ValueCount>> {
            self.check()?;
            self.inner
                .count_by_inverse_attribute(attribute, subject_type, constraints, limit)
        }

        fn list_candidates(&self, constraints: &[Constraint], limit: usize) -> OracleResult<Vec<EntityId>> {
            self.check()?;
            self.inner.list_candidates(constraints, limit)
        }

        fn resolve_label(&self, id: &str) -> OracleResult<String> {
            self.check()?;
            self.inner.resolve_label(id)
        }
    }

    /// Wraps a catalog and stalls every value-count query.
    struct Slow {
        inner: Catalog,
        delay: Duration,
    }

    impl AttributeOracle for Slow {
        fn count_candidates(&self, constraints: &[Constraint]) -> OracleResult<u64> {
            self.inner.count_candidates(constraints)
        }

        fn count_by_attribute_value(
            &self,
            attribute: &AttributeRef,
            constraints: &[Constraint],
            limit: usize,
        ) -> OracleResult<Vec<ValueCount>> {
            thread::sleep(self.delay);
            self.inner.count_by_attribute_value(attribute, constraints, limit)
        }

        fn count_by_inverse_attribute(
            &self,
            attribute: &AttributeRef,
            subject_type: &str,
            constraints: &[Constraint],
            limit: usize,
        ) -> OracleResult<Vec<ValueCount>> {
            thread::sleep(self.delay);
            self.inner
                .count_by_inverse_attribute(attribute, subject_type, constraints, limit)
        }

        fn list_candidates(&self, constraints: &[Constraint], limit: usize) -> OracleResult<Vec<EntityId>> {
            self.inner.list_candidates(constraints, limit)
        }

        fn resolve_label(&self, id: &str) -> OracleResult<String> {
            self.inner.resolve_label(id)
        }
    }

    #[test]
    fn test_start_issues_attribute_question() {
        let engine = GameEngine::seeded(starters(), config(), 1);
        let start = engine.start().unwrap();

        assert_eq!(start.question.kind, QuestionKind::AttributeQuestion);
        let state = state_of(&engine, &start.session_id);
        assert_eq!(state.step(), 1);
        assert_eq!(state.last_question(), Some(&start.question));
        let (attribute, value) = start.question.target().unwrap();
        assert!(state.was_asked(attribute, value));
    }

    #[test]
    fn test_single_candidate_starts_with_guess() {
        let engine = GameEngine::seeded(lone(), config(), 1);
        let start = engine.start().unwrap();

        assert!(start.question.is_guess());
        assert_eq!(start.question.text, "Is it Mew?");
        assert_eq!(start.question.guessed_entity(), Some(EntityId::new("mew")));
    }

    #[test]
    fn test_empty_catalog_cannot_start() {
        let engine = GameEngine::seeded(Catalog::new(), config(), 1);
        assert!(matches!(engine.start(), Err(GameError::EmptyCatalog)));
        assert!(engine.sessions().is_empty());
    }

    #[test]
    fn test_confirmed_guess_ends_game() {
        let engine = GameEngine::seeded(lone(), config(), 1);
        let start = engine.start().unwrap();

        let step = engine.answer(&start.session_id, Answer::Yes).unwrap();
        assert_eq!(
            step,
            NextStep::Guess {
                entity: EntityId::new("mew"),
                label: "Mew".into()
            }
        );
        let state = state_of(&engine, &start.session_id);
        assert_eq!(state.outcome(), Some(&Outcome::Guessed(EntityId::new("mew"))));
    }

    #[test]
    fn test_rejected_guess_swaps_to_other_candidate() {
        let engine = GameEngine::seeded(twins(), config(), 1);
        let start = engine.start().unwrap();

        // No attribute separates the twins, so the first question is already a guess.
        assert_eq!(start.question.guessed_entity(), Some(EntityId::new("nidoran-f")));
        let step = engine.answer(&start.session_id, Answer::No).unwrap();
        assert!(matches!(step, NextStep::Guess { entity, .. } if entity.as_str() == "nidoran-m"));
    }

    #[test]
    fn test_rejected_last_guess_means_no_candidates() {
        let engine = GameEngine::seeded(lone(), config(), 1);
        let start = engine.start().unwrap();

        let step = engine.answer(&start.session_id, Answer::No).unwrap();
        assert_eq!(step, NextStep::NoCandidates);

        // Unknown on a guess is a rejection too, and a finished game replays its outcome.
        let again = engine.answer(&start.session_id, Answer::Unknown).unwrap();
        assert_eq!(again, NextStep::NoCandidates);
    }

    #[test]
    fn test_answer_records_constraint() {
        let engine = GameEngine::seeded(starters(), config(), 3);
        let start = engine.start().unwrap();
        let (attribute, value) = start.question.target().unwrap();

        let step = engine.answer(&start.session_id, Answer::No).unwrap();
        let state = state_of(&engine, &start.session_id);

        assert_eq!(
            state.constraints().as_slice(),
            &[Constraint::no(attribute.clone(), value.clone())]
        );
        assert_eq!(state.step(), 2);
        match step {
            NextStep::NextQuestion { question, .. } => assert_eq!(state.last_question(), Some(&question)),
            other => panic!("expected another question, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_answer_does_not_narrow() {
        let engine = GameEngine::seeded(starters(), config(), 3);
        let start = engine.start().unwrap();

        let step = engine.answer(&start.session_id, Answer::Unknown).unwrap();
        assert!(matches!(step, NextStep::NextQuestion { remaining_candidates: 5, .. }));
        assert_eq!(state_of(&engine, &start.session_id).constraints().len(), 1);
    }

    #[test]
    fn test_small_remainder_switches_to_guess() {
        let engine = GameEngine::seeded(starters(), config(), 5);
        let start = engine.start().unwrap();
        let session = start.session_id;

        // Grass narrows five starters to two.
        {
            let shared = engine.sessions().get(&session).unwrap();
            let mut state = shared.lock().unwrap();
            state.issue(Question::about(
                AttributeRef::direct(TYPE),
                ValueRef::new("type/grass"),
                "Is it grass type?",
            ));
        }

        match engine.answer(&session, Answer::Yes).unwrap() {
            NextStep::NextQuestion {
                remaining_candidates,
                question,
            } => {
                assert_eq!(remaining_candidates, 2);
                assert!(question.is_guess());
                assert_eq!(question.guessed_entity(), Some(EntityId::new("bulbasaur")));
            }
            other => panic!("expected a guess question, got {other:?}"),
        }

        let step = engine.answer(&session, Answer::No).unwrap();
        assert!(matches!(step, NextStep::Guess { entity, .. } if entity.as_str() == "oddish"));
    }

    #[test]
    fn test_answers_ruling_out_everything_end_the_game() {
        let engine = GameEngine::seeded(starters(), config(), 5);
        let start = engine.start().unwrap();
        let session = start.session_id;

        let ghost = Question::about(
            AttributeRef::direct(TYPE),
            ValueRef::new("type/ghost"),
            "Is it ghost type?",
        );
        {
            let shared = engine.sessions().get(&session).unwrap();
            shared.lock().unwrap().issue(ghost.clone());
        }

        let step = engine.answer(&session, Answer::Yes).unwrap();
        assert_eq!(step, NextStep::NoCandidates);

        let state = state_of(&engine, &session);
        assert_eq!(state.outcome(), Some(&Outcome::NoCandidates));
        assert_eq!(state.last_question(), Some(&ghost));
        assert_eq!(state.constraints().len(), 1);
    }

    #[test]
    fn test_sessions_select_in_parallel() {
        let delay = Duration::from_millis(150);
        let oracle = Slow {
            inner: starters(),
            delay,
        };
        let engine = GameEngine::seeded(oracle, config(), 2);
        let families = engine.config().selector.families.len() as u32;
        let sessions = 4;

        let started = Instant::now();
        thread::scope(|scope| {
            let handles: Vec<_> = (0..sessions).map(|_| scope.spawn(|| engine.start())).collect();
            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }
        });
        let elapsed = started.elapsed();

        // One start sleeps once per family; run back to back they would take `sessions` times that.
        let serial = delay * families * sessions;
        assert!(elapsed < serial * 3 / 4, "starts took {elapsed:?}, serial would be {serial:?}");
        assert_eq!(engine.sessions().len(), sessions as usize);
    }

    #[test]
    fn test_oracle_failure_leaves_session_untouched() {
        let engine = GameEngine::seeded(Flaky::new(starters()), config(), 9);
        let start = engine.start().unwrap();
        let before = state_of(&engine, &start.session_id);

        engine.oracle().down.store(true, Ordering::SeqCst);
        let result = engine.answer(&start.session_id, Answer::Yes);
        assert!(matches!(result, Err(GameError::Oracle(OracleError::Unavailable(_)))));

        let after = state_of(&engine, &start.session_id);
        assert!(after.constraints().is_empty());
        assert_eq!(after.last_question(), before.last_question());
        assert_eq!(after.step(), before.step());
        assert_eq!(after.asked(), before.asked());

        engine.oracle().down.store(false, Ordering::SeqCst);
        assert!(engine.answer(&start.session_id, Answer::Yes).is_ok());
        assert_eq!(state_of(&engine, &start.session_id).constraints().len(), 1);
    }

    #[test]
    fn test_failed_start_leaves_no_session() {
        let oracle = Flaky::new(starters());
        oracle.down.store(true, Ordering::SeqCst);
        let engine = GameEngine::seeded(oracle, config(), 9);

        assert!(matches!(engine.start(), Err(GameError::Oracle(_))));
        assert!(engine.sessions().is_empty());
    }

    #[test]
    fn test_unknown_session() {
        let engine = GameEngine::seeded(starters(), config(), 1);
        assert!(matches!(
            engine.answer(&SessionId::new(), Answer::Yes),
            Err(GameError::SessionNotFound(_))
        ));
        assert!(matches!(
            engine.list_candidates(&SessionId::new()),
            Err(GameError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_answer_raw_validation() {
        let engine = GameEngine::seeded(starters(), config(), 1);
        let start = engine.start().unwrap();
        let id = start.session_id.to_string();

        assert!(matches!(engine.answer_raw(&id, None), Err(GameError::InvalidInput(_))));
        assert!(matches!(engine.answer_raw(&id, Some("maybe")), Err(GameError::InvalidInput(_))));
        assert!(matches!(
            engine.answer_raw("not-a-session", Some("yes")),
            Err(GameError::SessionNotFound(_))
        ));
        assert!(engine.answer_raw(&id, Some("no")).is_ok());
    }

    #[test]
    fn test_list_candidates() {
        let engine = GameEngine::seeded(twins(), config(), 1);
        let start = engine.start().unwrap();

        let candidates = engine.list_candidates(&start.session_id).unwrap();
        assert_eq!(
            candidates,
            vec![
                Candidate {
                    entity: EntityId::new("nidoran-f"),
                    label: "Nidoran F".into()
                },
                Candidate {
                    entity: EntityId::new("nidoran-m"),
                    label: "Nidoran M".into()
                },
            ]
        );
    }

    #[test]
    fn test_end_session() {
        let engine = GameEngine::seeded(starters(), config(), 1);
        let start = engine.start().unwrap();

        assert!(engine.end(&start.session_id));
        assert!(!engine.end(&start.session_id));
        assert!(matches!(
            engine.answer(&start.session_id, Answer::Yes),
            Err(GameError::SessionNotFound(_))
        ));
    }

    #[test]
    fn test_wire_shape() {
        let no_candidates = serde_json::to_value(NextStep::NoCandidates).unwrap();
        assert_eq!(no_candidates, serde_json::json!({ "kind": "NO_CANDIDATES" }));

        let guess = serde_json::to_value(NextStep::Guess {
            entity: EntityId::new("mew"),
            label: "Mew".into(),
        })
        .unwrap();
        assert_eq!(guess, serde_json::json!({ "kind": "GUESS", "entity": "mew", "label": "Mew" }));

        let question = Question::guess(&EntityId::new("mew"), "Mew");
        let step = serde_json::to_value(NextStep::NextQuestion {
            remaining_candidates: 1,
            question,
        })
        .unwrap();
        assert_eq!(step["kind"], "QUESTION");
        assert_eq!(step["remaining_candidates"], 1);
        assert_eq!(step["question"]["kind"], "GUESS");
        assert_eq!(step["question"]["value"], "mew");
    }
}
