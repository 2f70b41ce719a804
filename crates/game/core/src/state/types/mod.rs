pub mod common;
pub mod entities;
pub mod entity;
pub mod grid;
pub mod inventory;
pub mod message;

// Re-export common types
pub use common::{Color, Direction, EntityId, Position};

// Re-export entity and capability types
pub use entity::{
    DeathKind, Entity, Equipment, EquipmentSlot, Fighter, Item, ItemEffect, RenderLayer,
    capitalize,
};

// Re-export collections
pub use entities::EntitiesState;
pub use inventory::InventoryState;

// Re-export map types
pub use grid::{Grid, Tile, TileFlags};

pub use message::{Message, MessageLog};
