//! Field-of-view oracle.
//!
//! Visibility geometry is supplied from outside the core. The engine only
//! asks for a recompute when the player moves or a level is entered, and then
//! queries individual cells.

use std::collections::HashSet;

use crate::state::{Grid, Position};

/// Computes and answers per-cell visibility for one observer.
pub trait VisibilityOracle {
    /// Recomputes the visible set around `origin`.
    fn compute(&mut self, grid: &Grid, origin: Position, radius: i32);

    /// Whether `position` was visible at the last recompute.
    fn is_visible(&self, position: Position) -> bool;

    /// Every cell visible at the last recompute, in no particular order.
    fn visible_cells(&self) -> Vec<Position>;
}

/// Straight-ray field of view: a cell is visible when the Bresenham line from
/// the observer reaches it before hitting a sight-blocking cell. Walls that
/// stop a ray are themselves visible.
#[derive(Clone, Debug, Default)]
pub struct RayCastVisibility {
    visible: HashSet<Position>,
}

impl RayCastVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    fn cast(&mut self, grid: &Grid, origin: Position, target: Position, radius: i32) {
        let radius = f64::from(radius);
        for cell in line(origin, target) {
            if !grid.in_bounds(cell) || origin.distance(cell) > radius {
                break;
            }
            self.visible.insert(cell);
            if cell != origin && grid.blocks_sight(cell) {
                break;
            }
        }
    }
}

impl VisibilityOracle for RayCastVisibility {
    fn compute(&mut self, grid: &Grid, origin: Position, radius: i32) {
        self.visible.clear();
        if !grid.in_bounds(origin) {
            return;
        }
        self.visible.insert(origin);
        let radius = radius.max(0);
        for offset in -radius..=radius {
            self.cast(grid, origin, origin.offset(offset, -radius), radius);
            self.cast(grid, origin, origin.offset(offset, radius), radius);
            self.cast(grid, origin, origin.offset(-radius, offset), radius);
            self.cast(grid, origin, origin.offset(radius, offset), radius);
        }
    }

    fn is_visible(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    fn visible_cells(&self) -> Vec<Position> {
        self.visible.iter().copied().collect()
    }
}

/// Bresenham line from `from` to `to`, inclusive of both ends.
fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut error = dx + dy;
    let mut current = from;
    let mut cells = Vec::with_capacity((dx - dy + 1) as usize);
    loop {
        cells.push(current);
        if current == to {
            break;
        }
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += sx;
        }
        if doubled <= dx {
            error += dx;
            current.y += sy;
        }
    }
    cells
}
