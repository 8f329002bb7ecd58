//! Concurrent session store.

use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

use super::{GameState, SessionId};
use crate::error::{GameError, GameResult};

/// A session's state, locked for the duration of each engine call on it.
pub type SharedState = Arc<Mutex<GameState>>;

/// Maps session ids to their game state.
///
/// Different sessions never contend beyond a map shard. Calls for one session
/// are serialized by that session's mutex, which the engine holds for a whole call.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SharedState>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh, empty game under a new unique id.
    pub fn create(&self) -> (SessionId, SharedState) {
        let id = SessionId::new();
        let state = Arc::new(Mutex::new(GameState::new(id)));
        self.sessions.insert(id, Arc::clone(&state));
        debug!(session = %id, "session created");
        (id, state)
    }

    pub fn get(&self, id: &SessionId) -> GameResult<SharedState> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| GameError::SessionNotFound(id.to_string()))
    }

    /// Drop a session. Removing an unknown id is a no-op; returns whether one was removed.
    pub fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            debug!(session = %id, "session removed");
        }
        removed
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
