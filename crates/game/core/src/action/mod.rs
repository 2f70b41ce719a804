//! Player actions.
//!
//! An [`Intent`] is what the input source asks for; the functions in this
//! module resolve one intent against the world and report whether it used up
//! the player's turn. Refusals come back as [`ActionError`] with the state
//! left as it was, apart from prompt instructions already written to the log.
//!
//! # Module Structure
//!
//! - `error`: refusal reasons and their log lines
//! - `movement`: bump-to-attack movement
//! - `inventory`: pick up, use, drop, equip and dequip
//! - `effects`: consumable item effects
//! - `targeting`: target selection through the prompt oracle

pub mod effects;
pub mod error;
pub mod inventory;
pub mod movement;
pub mod targeting;

pub use effects::apply_effect;
pub use error::ActionError;
pub use inventory::{dequip, drop_item, equip, pick_up, toggle_equip, use_item};
pub use movement::{MoveOutcome, move_or_attack};
pub use targeting::{closest_monster, target_monster, target_tile};

use crate::state::{Direction, Position};

/// One request from the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    /// Step one cell, attacking whatever fighter stands there.
    Move(Direction),
    Wait,
    PickUp,
    /// Use (or toggle, for equipment) the item in an inventory slot.
    UseItem { slot: usize },
    DropItem { slot: usize },
    /// Take the stairs under the player.
    Descend,
    /// Names of the visible entities on a cell.
    Inspect(Position),
    CharacterInfo,
    Cancel,
    /// Leave the game; the session saves on the way out.
    Exit,
}

impl Intent {
    /// Returns the snake_case name of the intent, for logging.
    pub const fn as_snake_case(&self) -> &'static str {
        match self {
            Self::Move(_) => "move",
            Self::Wait => "wait",
            Self::PickUp => "pick_up",
            Self::UseItem { .. } => "use_item",
            Self::DropItem { .. } => "drop_item",
            Self::Descend => "descend",
            Self::Inspect(_) => "inspect",
            Self::CharacterInfo => "character_info",
            Self::Cancel => "cancel",
            Self::Exit => "exit",
        }
    }
}

/// Whether a resolved intent used up the player's turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnCost {
    /// Every AI acts once afterwards.
    Consumed,
    /// The world does not advance.
    Free,
}

impl TurnCost {
    pub const fn is_consumed(self) -> bool {
        matches!(self, Self::Consumed)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by the action tests.
    use crate::GameConfig;
    use crate::dungeon::{EntityKind, Rect, build, spawn};
    use crate::state::{EntityId, GameState, Position};

    /// Open 20x20 room with the catalogue player at (10, 10) and a log wide
    /// enough that no line wraps or scrolls away.
    pub fn room() -> GameState {
        let mut config = GameConfig::with_map_size(20, 20);
        config.message_width = 200;
        config.message_log_height = 64;
        let mut state = GameState::empty(config, 11);
        state.grid.carve_room(&Rect::new(0, 0, 19, 19));
        let player = build(&mut state, EntityKind::Player, Position::new(10, 10));
        state.entities.push(player);
        state
    }

    pub fn place(state: &mut GameState, kind: EntityKind, position: Position) -> EntityId {
        spawn(state, kind, position)
    }

    /// Puts a freshly built item straight into the inventory; returns its slot.
    pub fn carry(state: &mut GameState, kind: EntityKind) -> usize {
        let position = state.player_position();
        let item = build(state, kind, position);
        let id = item.id;
        assert!(state.inventory.push(item).is_ok(), "inventory full in fixture");
        state.inventory.slot_of(id).unwrap_or_default()
    }

    pub fn hp_of(state: &GameState, id: EntityId) -> i32 {
        state
            .entities
            .get(id)
            .and_then(|entity| entity.fighter.as_ref())
            .map_or(0, |fighter| fighter.hp)
    }
}
