use super::{Entity, EntityId, EquipmentSlot};

/// The player's carried items, in pickup order.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryState {
    items: Vec<Entity>,
    capacity: usize,
}

impl InventoryState {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Adds an item, handing it back if there is no room.
    pub fn push(&mut self, item: Entity) -> Result<(), Entity> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, slot: usize) -> Option<&Entity> {
        self.items.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.items.get_mut(slot)
    }

    /// Slot currently holding the item with `id`.
    pub fn slot_of(&self, id: EntityId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn remove(&mut self, slot: usize) -> Option<Entity> {
        (slot < self.items.len()).then(|| self.items.remove(slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter()
    }

    /// Index of the item currently equipped in `slot`, if any.
    pub fn equipped_in(&self, slot: EquipmentSlot) -> Option<usize> {
        self.items.iter().position(|item| {
            item.equipment
                .as_ref()
                .is_some_and(|eq| eq.equipped && eq.slot == slot)
        })
    }

    /// Iterates over equipped items only.
    pub fn equipped(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter().filter(|item| item.is_equipped())
    }
}
