//! Point-in-time view of a fighter's effective stats.

use super::EquipmentBonuses;
use crate::state::Fighter;

/// Effective stats of one fighter at the moment of the query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub hp: i32,
    pub max_hp: i32,
    pub power: i32,
    pub defense: i32,
}

impl StatsSnapshot {
    pub fn create(fighter: &Fighter, bonuses: &EquipmentBonuses) -> Self {
        Self {
            hp: fighter.hp,
            max_hp: fighter.base_max_hp + bonuses.max_hp,
            power: fighter.base_power + bonuses.power,
            defense: fighter.base_defense + bonuses.defense,
        }
    }
}

/// Character screen contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterSheet {
    pub level: u32,
    pub xp: u32,
    /// Experience required for the next level.
    pub next_level_xp: u32,
    pub max_hp: i32,
    pub power: i32,
    pub defense: i32,
}
