//! Data-driven content definitions and loaders.
//!
//! This crate reads the tunable parts of a run from data files:
//! - Game configuration (TOML)
//! - Spawn tables for standard levels (RON)
//!
//! The entity catalogue itself stays in code; files only override numbers
//! and weights. Content is handed to the engine at construction time and
//! never appears in saved game state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, TablesLoader};
