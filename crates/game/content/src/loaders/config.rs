//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;
use game_core::GameState;
use game_core::dungeon::{BossRooms, Rect};

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to the built-in defaults, so a config file only
/// needs the values it changes.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded game config");
        Ok(config)
    }

    /// Parse and check config data already in memory.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Self::check(&config)?;
        Ok(config)
    }

    /// Rejects settings the generator cannot honor.
    pub fn check(config: &GameConfig) -> LoadResult<()> {
        if config.room_min_size < 3 || config.room_min_size > config.room_max_size {
            anyhow::bail!(
                "room sizes must satisfy 3 <= min ({}) <= max ({})",
                config.room_min_size,
                config.room_max_size
            );
        }
        if config.room_max_size + 2 > config.map_width || config.room_max_size + 2 > config.map_height
        {
            anyhow::bail!(
                "rooms up to {} tiles do not fit a {}x{} map",
                config.room_max_size,
                config.map_width,
                config.map_height
            );
        }
        if config.inventory_capacity == 0 {
            anyhow::bail!("inventory_capacity must be at least 1");
        }
        if config.message_log_height == 0 || config.message_width == 0 {
            anyhow::bail!("message log needs a non-zero height and width");
        }
        if config.boss_depth < 2 {
            anyhow::bail!("boss_depth must be at least 2, got {}", config.boss_depth);
        }

        let probe = GameState::empty(config.clone(), 0);
        let rooms = BossRooms::for_state(&probe);
        let inside = |room: &Rect| {
            room.x1 >= 0 && room.y1 >= 0 && room.x2 < config.map_width && room.y2 < config.map_height
        };
        if ![rooms.entrance, rooms.chamber, rooms.left, rooms.right]
            .iter()
            .all(inside)
        {
            anyhow::bail!(
                "the boss level does not fit a {}x{} map",
                config.map_width,
                config.map_height
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse("torch_radius = 8\nheal_amount = 6\n").expect("valid");
        assert_eq!(config.torch_radius, 8);
        assert_eq!(config.heal_amount, 6);
        assert_eq!(config.map_width, GameConfig::DEFAULT_MAP_WIDTH);
        assert_eq!(config.boss_depth, GameConfig::DEFAULT_BOSS_DEPTH);
    }

    #[test]
    fn empty_file_is_the_default_config() {
        assert_eq!(ConfigLoader::parse("").expect("valid"), GameConfig::new());
    }

    #[test]
    fn inverted_room_sizes_are_rejected() {
        let error = ConfigLoader::parse("room_min_size = 10\nroom_max_size = 6\n").unwrap_err();
        assert!(error.to_string().contains("room sizes"));
    }

    #[test]
    fn tiny_maps_cannot_hold_the_boss_level() {
        let error = ConfigLoader::parse("map_width = 30\nmap_height = 20\n").unwrap_err();
        assert!(error.to_string().contains("boss level"));
    }

    #[test]
    fn malformed_toml_is_reported() {
        let error = ConfigLoader::parse("torch_radius = \"far\"").unwrap_err();
        assert!(error.to_string().contains("Failed to parse config TOML"));
    }
}
