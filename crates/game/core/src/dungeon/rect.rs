//! Axis-aligned room rectangles used during generation.

use crate::state::Position;

/// A room outline. The interior (`x1+1..x2`, `y1+1..y2`) is what gets carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    /// Center cell, rounded toward the top-left.
    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Overlap test. Rectangles that merely share an edge count as intersecting.
    pub fn intersect(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }

    /// True if `position` lies in the carved interior.
    pub fn interior_contains(&self, position: Position) -> bool {
        position.x > self.x1 && position.x < self.x2 && position.y > self.y1 && position.y < self.y2
    }

    /// Every interior cell in row-major order.
    pub fn interior(&self) -> impl Iterator<Item = Position> + '_ {
        ((self.y1 + 1)..self.y2)
            .flat_map(move |y| ((self.x1 + 1)..self.x2).map(move |x| Position::new(x, y)))
    }
}
