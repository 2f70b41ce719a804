//! Random room-and-corridor levels.

use super::{EntityKind, Rect, SpawnTables, spawn, weighted_choice};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{EntityId, GameState, Grid, Position};

/// Result of carving a level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    /// Accepted rooms in acceptance order.
    pub rooms: Vec<Rect>,
    /// Where the player was placed.
    pub spawn: Position,
}

/// Clears the map and every entity except the player.
pub(crate) fn reset_level(state: &mut GameState) {
    state.grid = Grid::filled(state.config.map_width, state.config.map_height);
    state.entities.retain_only(EntityId::PLAYER);
    state.stairs = None;
}

pub(crate) fn place_player(state: &mut GameState, position: Position) {
    if let Some(player) = state.player_mut() {
        player.position = position;
    }
}

/// Carves a standard level: non-overlapping rooms chained by L-shaped
/// tunnels, populated from `tables`, with stairs in the last room.
pub fn generate_standard(state: &mut GameState, tables: &SpawnTables) -> LevelLayout {
    reset_level(state);

    let config = state.config.clone();
    let mut rooms: Vec<Rect> = Vec::new();

    for _ in 0..config.max_rooms {
        let width = state.rng.range(config.room_min_size, config.room_max_size);
        let height = state.rng.range(config.room_min_size, config.room_max_size);
        let x = state.rng.range(0, config.map_width - width - 1);
        let y = state.rng.range(0, config.map_height - height - 1);
        let room = Rect::new(x, y, width, height);

        if rooms.iter().any(|other| room.intersect(other)) {
            continue;
        }
        state.grid.carve_room(&room);
        let center = room.center();

        match rooms.last() {
            None => place_player(state, center),
            Some(previous) => {
                let prev = previous.center();
                if state.rng.coin() {
                    state.grid.carve_h_tunnel(prev.x, center.x, prev.y);
                    state.grid.carve_v_tunnel(prev.y, center.y, center.x);
                } else {
                    state.grid.carve_v_tunnel(prev.y, center.y, prev.x);
                    state.grid.carve_h_tunnel(prev.x, center.x, center.y);
                }
            }
        }

        populate_room(state, &room, tables);
        rooms.push(room);
    }

    // A map too small for even one proposal still needs somewhere to stand.
    if rooms.is_empty() {
        let center = Position::new(config.map_width / 2, config.map_height / 2);
        let room = Rect::new(center.x - 1, center.y - 1, 2, 2);
        state.grid.carve_room(&room);
        place_player(state, center);
        rooms.push(room);
    }

    let spawn_point = state.player_position();
    if let Some(last) = rooms.last() {
        let stairs = spawn(state, EntityKind::Stairs, last.center());
        state.stairs = Some(stairs);
    }

    tracing::debug!(
        depth = state.depth,
        rooms = rooms.len(),
        entities = state.entities.len(),
        "standard level generated"
    );
    LevelLayout {
        rooms,
        spawn: spawn_point,
    }
}

/// Drops a depth-scaled number of monsters and items into a room's interior.
fn populate_room(state: &mut GameState, room: &Rect, tables: &SpawnTables) {
    let depth = state.depth;

    let max_monsters = tables.max_monsters.at_depth(depth) as i32;
    let monster_count = state.rng.range(0, max_monsters);
    let monster_weights = tables.monster_weights(depth);
    for _ in 0..monster_count {
        let Some(cell) = free_cell_in(state, room) else {
            break;
        };
        if let Some(kind) = weighted_choice(&mut state.rng, &monster_weights) {
            spawn(state, kind, cell);
        }
    }

    let max_items = tables.max_items.at_depth(depth) as i32;
    let item_count = state.rng.range(0, max_items);
    let item_weights = tables.item_weights(depth);
    for _ in 0..item_count {
        let Some(cell) = free_cell_in(state, room) else {
            break;
        };
        if let Some(kind) = weighted_choice(&mut state.rng, &item_weights) {
            spawn(state, kind, cell);
        }
    }
}

/// Random unblocked interior cell, giving up after a bounded number of tries.
fn free_cell_in(state: &mut GameState, room: &Rect) -> Option<Position> {
    (0..GameConfig::PLACEMENT_ATTEMPTS).find_map(|_| {
        let x = state.rng.range(room.x1 + 1, room.x2 - 1);
        let y = state.rng.range(room.y1 + 1, room.y2 - 1);
        let cell = Position::new(x, y);
        (!state.is_blocked(cell)).then_some(cell)
    })
}
