//! Equipment bonus aggregation.

use crate::state::{Entity, InventoryState};

/// Sum of bonuses granted by currently equipped items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquipmentBonuses {
    pub power: i32,
    pub defense: i32,
    pub max_hp: i32,
}

impl EquipmentBonuses {
    /// Aggregates every equipped item in the inventory.
    pub fn from_inventory(inventory: &InventoryState) -> Self {
        Self::from_items(inventory.iter())
    }

    /// Aggregates equipped items from any collection; unequipped ones are skipped.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Entity>) -> Self {
        items
            .into_iter()
            .filter_map(|item| item.equipment.as_ref())
            .filter(|equipment| equipment.equipped)
            .fold(Self::default(), |acc, equipment| Self {
                power: acc.power + equipment.power_bonus,
                defense: acc.defense + equipment.defense_bonus,
                max_hp: acc.max_hp + equipment.max_hp_bonus,
            })
    }
}
