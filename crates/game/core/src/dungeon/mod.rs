//! Level generation and the entity catalogue.
//!
//! Standard levels are random rooms chained by tunnels and populated from
//! depth-scaled tables. The configured boss depth uses a fixed layout instead.

mod boss;
mod factory;
mod generator;
mod rect;
mod tables;

pub use boss::{BossRooms, generate_boss};
pub use factory::{EntityKind, build, spawn};
pub use generator::{LevelLayout, generate_standard};
pub use rect::Rect;
pub use tables::{DepthTable, SpawnEntry, SpawnTables, weighted_choice};

use crate::state::GameState;

/// Regenerates the map for `state.depth`, keeping the player and inventory.
pub fn generate_level(state: &mut GameState, tables: &SpawnTables) -> LevelLayout {
    if state.depth == state.config.boss_depth {
        generate_boss(state)
    } else {
        generate_standard(state, tables)
    }
}
