//! Repository contract for saving and loading games.

use game_core::GameState;

use super::Result;

/// Storage for whole-game snapshots, one per named slot.
pub trait SaveRepository: Send + Sync {
    /// Stores `state` in `slot`, replacing any previous save.
    fn save(&self, slot: &str, state: &GameState) -> Result<()>;

    /// Loads the game in `slot`, or `None` if nothing was saved there.
    ///
    /// A loaded game has passed [`GameState::validate`].
    fn load(&self, slot: &str) -> Result<Option<GameState>>;

    fn exists(&self, slot: &str) -> bool;

    fn delete(&self, slot: &str) -> Result<()>;
}
