//! Runtime configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Configuration required to bootstrap a session.
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// Seed for new games; drawn from the clock when absent.
    pub seed: Option<u64>,
    pub save_data_dir: Option<PathBuf>,
    /// Directory holding `config.toml` and `spawn_tables.ron`.
    pub content_dir: Option<PathBuf>,
    /// Directory for log files; logs only go to stderr when absent.
    pub log_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `GAME_SEED` - Seed for new games (default: current time)
    /// - `SAVE_DATA_DIR` - Directory for save data (default: platform-specific)
    /// - `CONTENT_DIR` - Directory with content data files (default: built-in content)
    /// - `LOG_DIR` - Directory for log files (default: none)
    pub fn from_env() -> Self {
        Self {
            seed: read_env::<u64>("GAME_SEED"),
            save_data_dir: env::var("SAVE_DATA_DIR").ok().map(PathBuf::from),
            content_dir: env::var("CONTENT_DIR").ok().map(PathBuf::from),
            log_dir: env::var("LOG_DIR").ok().map(PathBuf::from),
        }
    }

    /// Save directory, falling back to the platform data directory and then
    /// to `./saves`.
    pub fn resolved_save_dir(&self) -> PathBuf {
        if let Some(dir) = &self.save_data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", "runner")
            .map(|dirs| dirs.data_dir().join("saves"))
            .unwrap_or_else(|| PathBuf::from("saves"))
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
