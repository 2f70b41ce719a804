//! In-memory SaveRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use game_core::GameState;

use super::{RepositoryError, Result, SaveRepository};

/// Keeps saves in a map keyed by slot name.
#[derive(Default)]
pub struct InMemorySaveRepository {
    saves: RwLock<HashMap<String, GameState>>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository with `state` already saved in `slot`.
    pub fn with_save(slot: &str, state: GameState) -> Self {
        let mut saves = HashMap::new();
        saves.insert(slot.to_owned(), state);
        Self {
            saves: RwLock::new(saves),
        }
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.insert(slot.to_owned(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let saves = self
            .saves
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(state) = saves.get(slot).cloned() else {
            return Ok(None);
        };
        state.validate()?;
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        self.saves
            .read()
            .map(|saves| saves.contains_key(slot))
            .unwrap_or(false)
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let mut saves = self
            .saves
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        saves.remove(slot);
        Ok(())
    }
}
