//! Content factory for loading a run's data from a directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, SpawnTables};

use crate::loaders::{ConfigLoader, LoadResult, TablesLoader};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── spawn_tables.ron
/// ```
///
/// Either file may be absent, in which case the built-in values are used.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub const CONFIG_FILE: &'static str = "config.toml";
    pub const TABLES_FILE: &'static str = "spawn_tables.ron";

    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join(Self::CONFIG_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load spawn tables from `spawn_tables.ron`.
    pub fn load_tables(&self) -> LoadResult<SpawnTables> {
        let path = self.data_dir.join(Self::TABLES_FILE);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no spawn tables, using defaults");
            return Ok(SpawnTables::default());
        }
        TablesLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("config"), GameConfig::default());
        assert_eq!(factory.load_tables().expect("tables"), SpawnTables::default());
    }

    #[test]
    fn files_in_the_directory_are_used() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join(ContentFactory::CONFIG_FILE), "boss_depth = 4\n")
            .expect("write config");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("config").boss_depth, 4);
    }
}
