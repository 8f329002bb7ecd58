//! # Guessing Core
//!
//! The decision-making half of the twenty-questions game. Given a catalog
//! behind an [`AttributeOracle`](entity_catalog::AttributeOracle), it keeps
//! one game state per session, picks the most discriminating yes/no question
//! for the answers accumulated so far, and decides after every answer whether
//! to ask again, to guess, or to give up.
//!
//! ## Core Components
//!
//! - **config**: Engine settings and the attribute-family table, loaded from TOML
//! - **question**: Questions as issued to the player
//! - **selector**: Next-question heuristic (closest to an even split wins)
//! - **session**: Per-session game state and the concurrent session store
//! - **engine**: The answer-driven state machine tying it all together
//!
//! ## Design Philosophy
//!
//! - **Oracle-Agnostic**: Storage and query technology stay behind the oracle trait
//! - **All-or-Nothing**: A failed call leaves the session exactly as it was
//! - **Table-Driven**: New attribute families are configuration, not code

pub mod config;
pub mod engine;
pub mod error;
pub mod question;
pub mod selector;
pub mod session;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use question::*;
pub use selector::*;
pub use session::*;
