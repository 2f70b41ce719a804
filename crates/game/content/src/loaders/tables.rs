//! Spawn tables loader.

use std::path::Path;

use game_core::{EntityKind, SpawnEntry, SpawnTables};

use crate::loaders::{LoadResult, read_file};

/// Loader for standard-level spawn tables from RON files.
pub struct TablesLoader;

impl TablesLoader {
    /// Load spawn tables from a RON file.
    pub fn load(path: &Path) -> LoadResult<SpawnTables> {
        let content = read_file(path)?;
        let tables = Self::parse(&content)?;
        tracing::debug!(
            path = %path.display(),
            monsters = tables.monsters.len(),
            items = tables.items.len(),
            "loaded spawn tables"
        );
        Ok(tables)
    }

    /// Parse and check spawn tables already in memory.
    pub fn parse(content: &str) -> LoadResult<SpawnTables> {
        let tables: SpawnTables = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spawn tables RON: {}", e))?;
        Self::check(&tables)?;
        Ok(tables)
    }

    /// Monster entries must name monsters, item entries must name floor
    /// items, and every depth table must list ascending depths.
    pub fn check(tables: &SpawnTables) -> LoadResult<()> {
        for entry in &tables.monsters {
            if !entry.kind.is_monster() {
                anyhow::bail!("'{}' is not a monster", entry.kind);
            }
            check_depths(entry)?;
        }
        for entry in &tables.items {
            if entry.kind.is_monster()
                || matches!(entry.kind, EntityKind::Player | EntityKind::Stairs)
            {
                anyhow::bail!("'{}' is not an item", entry.kind);
            }
            check_depths(entry)?;
        }
        for (name, table) in [("max_monsters", &tables.max_monsters), ("max_items", &tables.max_items)] {
            if !ascending(&table.0) {
                anyhow::bail!("{name} depths must be ascending");
            }
        }
        Ok(())
    }
}

fn check_depths(entry: &SpawnEntry) -> LoadResult<()> {
    if ascending(&entry.weight.0) {
        Ok(())
    } else {
        anyhow::bail!("weights for '{}' must list ascending depths", entry.kind)
    }
}

fn ascending(pairs: &[(u32, u32)]) -> bool {
    pairs.windows(2).all(|pair| pair[0].1 < pair[1].1)
}
