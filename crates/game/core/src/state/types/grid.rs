use bitflags::bitflags;

use super::{EntityId, Position};
use crate::dungeon::Rect;

bitflags! {
    /// Static and exploration properties of a single map cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TileFlags: u8 {
        const BLOCKED     = 1 << 0;
        const BLOCK_SIGHT = 1 << 1;
        const EXPLORED    = 1 << 2;
    }
}

/// One map cell.
///
/// `targeted_by` is a multiset: the same attacker may mark a cell more than
/// once, and each mark is cleared individually.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    flags: TileFlags,
    targeted_by: Vec<EntityId>,
}

impl Tile {
    /// A solid wall: blocks movement and sight.
    pub fn wall() -> Self {
        Self {
            flags: TileFlags::BLOCKED | TileFlags::BLOCK_SIGHT,
            targeted_by: Vec::new(),
        }
    }

    /// An open floor cell.
    pub fn floor() -> Self {
        Self::default()
    }

    /// Builds a tile where sight-blocking follows `blocked` unless overridden.
    pub fn new(blocked: bool, block_sight: Option<bool>) -> Self {
        let mut flags = TileFlags::empty();
        flags.set(TileFlags::BLOCKED, blocked);
        flags.set(TileFlags::BLOCK_SIGHT, block_sight.unwrap_or(blocked));
        Self {
            flags,
            targeted_by: Vec::new(),
        }
    }

    pub fn flags(&self) -> TileFlags {
        self.flags
    }

    pub fn is_blocked(&self) -> bool {
        self.flags.contains(TileFlags::BLOCKED)
    }

    pub fn blocks_sight(&self) -> bool {
        self.flags.contains(TileFlags::BLOCK_SIGHT)
    }

    pub fn is_explored(&self) -> bool {
        self.flags.contains(TileFlags::EXPLORED)
    }

    pub fn is_targeted(&self) -> bool {
        !self.targeted_by.is_empty()
    }

    pub fn targeted_by(&self) -> &[EntityId] {
        &self.targeted_by
    }

    fn carve(&mut self) {
        self.flags.remove(TileFlags::BLOCKED | TileFlags::BLOCK_SIGHT);
    }
}

/// Rectangular map of tiles addressed by [`Position`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid filled with walls.
    pub fn filled(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let tiles = (0..width * height).map(|_| Tile::wall()).collect();
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.in_bounds(position)
            .then(|| (position.y * self.width + position.x) as usize)
    }

    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(move |index| &mut self.tiles[index])
    }

    /// True for walls and anything outside the map.
    pub fn is_wall(&self, position: Position) -> bool {
        self.tile(position).is_none_or(Tile::is_blocked)
    }

    /// True when the cell blocks sight; outside the map counts as opaque.
    pub fn blocks_sight(&self, position: Position) -> bool {
        self.tile(position).is_none_or(Tile::blocks_sight)
    }

    pub fn is_explored(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_explored)
    }

    pub fn is_targeted(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_targeted)
    }

    pub fn mark_explored(&mut self, position: Position) {
        if let Some(tile) = self.tile_mut(position) {
            tile.flags.insert(TileFlags::EXPLORED);
        }
    }

    /// Opens a single cell.
    pub fn carve(&mut self, position: Position) {
        if let Some(tile) = self.tile_mut(position) {
            tile.carve();
        }
    }

    /// Opens the interior of a room, leaving its outline as wall.
    pub fn carve_room(&mut self, room: &Rect) {
        for x in (room.x1 + 1)..room.x2 {
            for y in (room.y1 + 1)..room.y2 {
                self.carve(Position::new(x, y));
            }
        }
    }

    /// Opens a horizontal corridor, inclusive of both ends.
    pub fn carve_h_tunnel(&mut self, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.carve(Position::new(x, y));
        }
    }

    /// Opens a vertical corridor, inclusive of both ends.
    pub fn carve_v_tunnel(&mut self, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.carve(Position::new(x, y));
        }
    }

    /// Adds one telegraph mark by `attacker`. Out-of-bounds cells are ignored.
    pub fn target(&mut self, position: Position, attacker: EntityId) -> bool {
        match self.tile_mut(position) {
            Some(tile) => {
                tile.targeted_by.push(attacker);
                true
            }
            None => false,
        }
    }

    /// Removes one telegraph mark by `attacker`, if present.
    pub fn untarget(&mut self, position: Position, attacker: EntityId) {
        if let Some(tile) = self.tile_mut(position)
            && let Some(index) = tile.targeted_by.iter().position(|id| *id == attacker)
        {
            tile.targeted_by.remove(index);
        }
    }

    /// Removes every mark placed by `attacker` across the whole map.
    pub fn untarget_all(&mut self, attacker: EntityId) {
        for tile in &mut self.tiles {
            tile.targeted_by.retain(|id| *id != attacker);
        }
    }

    /// Iterates over every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Positions of every cell currently carrying a telegraph mark.
    pub fn targeted_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions().filter(|position| self.is_targeted(*position))
    }

    /// Returns `(explored, total)` counts over floor cells.
    pub fn floor_counts(&self) -> (usize, usize) {
        self.tiles
            .iter()
            .filter(|tile| !tile.is_blocked())
            .fold((0, 0), |(explored, total), tile| {
                (explored + usize::from(tile.is_explored()), total + 1)
            })
    }
}
