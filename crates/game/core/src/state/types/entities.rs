use super::{Entity, EntityId, Position};

/// Every entity on the current level, in world order.
///
/// World order is the AI tick order and is never rearranged; draw order
/// comes from [`super::RenderLayer`] instead.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    entities: Vec<Entity>,
}

impl EntitiesState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn push(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Entity at a world-order index (used by the turn loop, which tolerates growth).
    pub fn at_index(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// Removes an entity from the world, preserving the order of the rest.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }

    /// Drops every entity except the one given (used when leaving a level).
    pub fn retain_only(&mut self, keep: EntityId) {
        self.entities.retain(|entity| entity.id == keep);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Entities standing on `position`, in world order.
    pub fn at(&self, position: Position) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(move |entity| entity.position == position)
    }

    /// True when a blocking entity occupies `position`.
    pub fn blocking_at(&self, position: Position) -> bool {
        self.at(position).any(|entity| entity.blocks)
    }

    /// Living fighter at `position`, excluding the player.
    pub fn monster_at(&self, position: Position) -> Option<&Entity> {
        self.at(position)
            .find(|entity| entity.fighter.is_some() && !entity.is_player())
    }
}
