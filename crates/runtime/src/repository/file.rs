//! File-based SaveRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use game_core::GameState;

use super::{RepositoryError, Result, SaveRepository};

/// Stores each slot as `{slot}.sav` in bincode format.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-save leaves the previous save intact.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    /// Create a new file-based repository, creating `base_dir` if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.base_dir.join(format!("{slot}.sav"))
    }
}

impl SaveRepository for FileSaveRepository {
    fn save(&self, slot: &str, state: &GameState) -> Result<()> {
        let path = self.slot_path(slot);
        let temp_path = path.with_extension("sav.tmp");

        let bytes =
            bincode::serialize(state).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved game[{}] to {}", slot, path.display());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>> {
        let path = self.slot_path(slot);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let state: GameState = bincode::deserialize(&bytes)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        state.validate()?;

        tracing::debug!("Loaded game[{}] from {}", slot, path.display());
        Ok(Some(state))
    }

    fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    fn delete(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted game[{}]", slot);
        }
        Ok(())
    }
}
