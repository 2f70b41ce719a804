//! Action execution errors.
//!
//! Every variant is a gameplay condition the player can recover from by
//! choosing another intent. The `Display` text is the line shown in the
//! message log; [`ActionError::log_color`] decides whether it is shown at all.

use crate::error::{ErrorSeverity, GameError};
use crate::state::Color;

/// Reasons an intent was refused. A refused intent never consumes a turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// No room left for the item under the player.
    #[error("Your inventory is full, cannot pick up {item}.")]
    InventoryFull { item: String },

    /// Nothing with an item capability lies under the player.
    #[error("There is nothing here to pick up.")]
    NothingToPickUp,

    /// The item has neither an effect nor an equipment slot.
    #[error("The {item} cannot be used.")]
    InvalidUse { item: String },

    /// The inventory slot is empty.
    #[error("There is no item in slot {0}.")]
    InvalidSlot(usize),

    /// Healing at full health would waste the item.
    #[error("You are already at full health.")]
    AlreadyAtFullHealth,

    /// No suitable enemy is in range (or the targeting prompt gave up).
    #[error("No enemy is close enough to strike.")]
    NoValidTarget,

    /// The targeting prompt never produced a cell in range and in view.
    #[error("That spot is out of reach.")]
    OutOfRange,

    /// The player backed out of a prompt.
    #[error("Cancelled.")]
    Cancelled,

    /// Descend requested away from the stairs.
    #[error("There are no stairs here.")]
    NoStairsHere,

    /// The player entity is absent from the world.
    #[error("The player is missing from the world.")]
    PlayerMissing,
}

impl ActionError {
    /// Message-log color for this refusal, or `None` for silent ones.
    pub fn log_color(&self) -> Option<Color> {
        use ActionError::*;
        match self {
            InventoryFull { .. } | AlreadyAtFullHealth | NoValidTarget | OutOfRange => {
                Some(Color::RED)
            }
            NothingToPickUp | InvalidUse { .. } | NoStairsHere => Some(Color::WHITE),
            InvalidSlot(_) | Cancelled | PlayerMissing => None,
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            InventoryFull { .. } | AlreadyAtFullHealth | NoValidTarget | OutOfRange => {
                ErrorSeverity::Recoverable
            }
            Cancelled => ErrorSeverity::Recoverable,
            NothingToPickUp | InvalidUse { .. } | InvalidSlot(_) | NoStairsHere => {
                ErrorSeverity::Validation
            }
            PlayerMissing => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            InventoryFull { .. } => "ACTION_INVENTORY_FULL",
            NothingToPickUp => "ACTION_NOTHING_TO_PICK_UP",
            InvalidUse { .. } => "ACTION_INVALID_USE",
            InvalidSlot(_) => "ACTION_INVALID_SLOT",
            AlreadyAtFullHealth => "ACTION_ALREADY_AT_FULL_HEALTH",
            NoValidTarget => "ACTION_NO_VALID_TARGET",
            OutOfRange => "ACTION_OUT_OF_RANGE",
            Cancelled => "ACTION_CANCELLED",
            NoStairsHere => "ACTION_NO_STAIRS_HERE",
            PlayerMissing => "ACTION_PLAYER_MISSING",
        }
    }
}
