//! # Entity Catalog
//!
//! The vocabulary crate of the guessing game. It defines what a catalog entity
//! is, how its categorical attributes are referenced, what an accumulated
//! player answer looks like, and the read-only query surface the guessing
//! engine narrows candidates through.
//!
//! ## Core Components
//!
//! - **entities**: Identifiers for entities, attribute values and attributes
//! - **constraints**: Player answers and the append-only constraint set
//! - **oracle**: The `AttributeOracle` trait and its error type
//! - **catalog**: An indexed in-memory catalog implementing the oracle, with a TOML loader

pub mod catalog;
pub mod constraints;
pub mod entities;
pub mod oracle;

pub use catalog::*;
pub use constraints::*;
pub use entities::*;
pub use oracle::*;
