//! Authoritative game state representation.
//!
//! This module owns the data structures that describe the map, entities,
//! inventory and message log. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
pub mod types;

pub use types::{
    Color, DeathKind, Direction, EntitiesState, Entity, EntityId, Equipment, EquipmentSlot,
    Fighter, Grid, InventoryState, Item, ItemEffect, Message, MessageLog, Position, RenderLayer,
    Tile, TileFlags, capitalize,
};

use crate::config::GameConfig;
use crate::env::PcgRng;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::{EquipmentBonuses, StatsSnapshot};

/// Coarse game lifecycle as seen by the turn scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    #[default]
    Playing,
    /// The player died; only exit is accepted.
    Dead,
}

/// Canonical snapshot of the deterministic game state.
///
/// Everything a save needs lives here, including the RNG stream position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,
    pub rng: PcgRng,

    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,

    pub grid: Grid,
    /// World entities in tick order. The player is always among them.
    pub entities: EntitiesState,
    pub inventory: InventoryState,
    pub messages: MessageLog,

    pub depth: u32,
    pub player_level: u32,
    pub lifecycle: Lifecycle,
    /// Stairs of the current level; absent on the boss level until the boss dies.
    pub stairs: Option<EntityId>,
    /// Number of world ticks that have elapsed.
    pub turn: u64,
}

impl GameState {
    /// Creates an empty world (all walls, no entities) for the given config and seed.
    pub fn empty(config: GameConfig, seed: u64) -> Self {
        Self {
            grid: Grid::filled(config.map_width, config.map_height),
            entities: EntitiesState::empty(),
            inventory: InventoryState::new(config.inventory_capacity),
            messages: MessageLog::new(config.message_log_height, config.message_width),
            rng: PcgRng::from_seed(seed),
            next_entity_id: EntityId::PLAYER.0 + 1,
            depth: 1,
            player_level: 1,
            lifecycle: Lifecycle::Playing,
            stairs: None,
            turn: 0,
            config,
        }
    }

    /// Allocates a new unique EntityId. The player id is never handed out.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id += 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }

    pub fn player(&self) -> Option<&Entity> {
        self.entities.get(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities.get_mut(EntityId::PLAYER)
    }

    /// Player position, or the origin if the player is missing (never in a valid state).
    pub fn player_position(&self) -> Position {
        self.player()
            .map(|player| player.position)
            .unwrap_or_default()
    }

    pub fn is_dead(&self) -> bool {
        self.lifecycle == Lifecycle::Dead
    }

    /// Passability: walls, out-of-bounds cells and blocking entities all block.
    pub fn is_blocked(&self, position: Position) -> bool {
        self.grid.is_wall(position) || self.entities.blocking_at(position)
    }

    /// Moves an entity by `(dx, dy)` unless the destination is blocked.
    ///
    /// Returns true if the entity moved.
    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> bool {
        let Some(origin) = self.entities.get(id).map(|entity| entity.position) else {
            return false;
        };
        let destination = origin.offset(dx, dy);
        if (dx, dy) == (0, 0) || self.is_blocked(destination) {
            return false;
        }
        if let Some(entity) = self.entities.get_mut(id) {
            entity.position = destination;
        }
        true
    }

    /// Steps an entity one cell toward `target` (normalized and rounded).
    pub fn move_towards(&mut self, id: EntityId, target: Position) -> bool {
        let Some(origin) = self.entities.get(id).map(|entity| entity.position) else {
            return false;
        };
        let (dx, dy) = origin.step_toward(target);
        self.move_entity(id, dx, dy)
    }

    /// Effective stats of a fighter. Equipment bonuses apply to the player only.
    pub fn stats(&self, id: EntityId) -> Option<StatsSnapshot> {
        let fighter = self.entities.get(id)?.fighter.as_ref()?;
        let bonuses = if id.is_player() {
            EquipmentBonuses::from_inventory(&self.inventory)
        } else {
            EquipmentBonuses::default()
        };
        Some(StatsSnapshot::create(fighter, &bonuses))
    }

    /// Appends a line to the message log.
    pub fn message(&mut self, text: impl AsRef<str>, color: Color) {
        self.messages.add(text, color);
    }

    /// Checks identity references after a load.
    ///
    /// The player must exist with a fighter, the stairs reference (if any)
    /// must resolve, and no entity id may be at or beyond the allocator.
    pub fn validate(&self) -> Result<(), StateError> {
        let player = self.player().ok_or(StateError::MissingPlayer)?;
        if player.fighter.is_none() {
            return Err(StateError::PlayerWithoutFighter);
        }
        if let Some(stairs) = self.stairs
            && !self.entities.contains(stairs)
        {
            return Err(StateError::DanglingStairs(stairs));
        }
        let max_id = self
            .entities
            .iter()
            .chain(self.inventory.iter())
            .map(|entity| entity.id.0)
            .max()
            .unwrap_or(0);
        if max_id >= self.next_entity_id {
            return Err(StateError::IdAllocatorBehind {
                max_id,
                next: self.next_entity_id,
            });
        }
        if self.grid.width() != self.config.map_width || self.grid.height() != self.config.map_height
        {
            return Err(StateError::GridSizeMismatch);
        }
        Ok(())
    }
}

/// Inconsistencies detected in a (typically freshly loaded) state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("player entity is missing")]
    MissingPlayer,

    #[error("player entity has no fighter capability")]
    PlayerWithoutFighter,

    #[error("stairs reference {0} does not resolve to an entity")]
    DanglingStairs(EntityId),

    #[error("entity id {max_id} is not below the allocator ({next})")]
    IdAllocatorBehind { max_id: u32, next: u32 },

    #[error("grid dimensions do not match the configured map size")]
    GridSizeMismatch,
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingPlayer | Self::PlayerWithoutFighter => ErrorSeverity::Fatal,
            Self::DanglingStairs(_) | Self::IdAllocatorBehind { .. } | Self::GridSizeMismatch => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingPlayer => "STATE_MISSING_PLAYER",
            Self::PlayerWithoutFighter => "STATE_PLAYER_WITHOUT_FIGHTER",
            Self::DanglingStairs(_) => "STATE_DANGLING_STAIRS",
            Self::IdAllocatorBehind { .. } => "STATE_ID_ALLOCATOR_BEHIND",
            Self::GridSizeMismatch => "STATE_GRID_SIZE_MISMATCH",
        }
    }
}
