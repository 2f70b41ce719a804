//! Derived combat statistics.
//!
//! Fighters store base values only. Effective max hp, power and defense are
//! recomputed on demand from the base values plus the bonuses of every
//! equipped item in the player's inventory, so they can never go stale.

pub mod bonus;
pub mod snapshot;

pub use bonus::EquipmentBonuses;
pub use snapshot::{CharacterSheet, StatsSnapshot};
