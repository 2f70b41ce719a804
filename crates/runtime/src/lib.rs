//! Runtime shell around the deterministic simulation.
//!
//! This crate wires content loading, save repositories and logging into a
//! [`Session`] that frontends drive with intents.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the main-menu / playing lifecycle
//! - [`repository`] persists whole-game snapshots
//! - [`config`] reads process configuration from the environment
//! - [`logging`] installs the tracing subscriber for binaries
//! - [`autoplay`] drives a session with seeded random intents
pub mod autoplay;
pub mod config;
pub mod logging;
pub mod repository;
pub mod session;

pub use autoplay::{Autoplay, RunSummary};
pub use config::RuntimeConfig;
pub use repository::{
    FileSaveRepository, InMemorySaveRepository, RepositoryError, SaveRepository,
};
pub use session::{SAVE_SLOT, Screen, Session, SessionError};
