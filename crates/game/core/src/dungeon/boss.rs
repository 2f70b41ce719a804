//! Fixed boss-level layout.
//!
//! Entrance room at the bottom, the boss chamber above it with a gateway in
//! each interior corner, and two guard rooms on either side, each holding
//! three trolls. All rooms are joined by straight tunnels. There are no
//! stairs until the boss dies.

use super::generator::{LevelLayout, place_player, reset_level};
use super::{EntityKind, Rect, spawn};
use crate::state::{GameState, Position};

/// Room geometry derived from the map and room-size settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BossRooms {
    pub entrance: Rect,
    pub chamber: Rect,
    pub left: Rect,
    pub right: Rect,
}

impl BossRooms {
    pub fn for_state(state: &GameState) -> Self {
        let config = &state.config;
        let (w, h) = (config.map_width, config.map_height);
        let small = config.room_min_size;
        let chamber_size = config.room_max_size + 4;
        let side_y = h - small - 8 - config.room_max_size / 2;

        Self {
            entrance: Rect::new(w / 2 - small / 2, h - small - 2, small, small),
            chamber: Rect::new(
                w / 2 - chamber_size / 2,
                h - small - 8 - config.room_max_size,
                chamber_size,
                chamber_size,
            ),
            left: Rect::new(w / 2 - chamber_size / 2 - 4 - small, side_y, small, small),
            right: Rect::new(w / 2 + chamber_size / 2 + 4, side_y, small, small),
        }
    }
}

pub fn generate_boss(state: &mut GameState) -> LevelLayout {
    reset_level(state);
    let rooms = BossRooms::for_state(state);

    state.grid.carve_room(&rooms.entrance);
    let entrance = rooms.entrance.center();
    place_player(state, entrance);

    state.grid.carve_room(&rooms.chamber);
    let chamber = rooms.chamber.center();
    state.grid.carve_v_tunnel(entrance.y, chamber.y, chamber.x);

    spawn(state, EntityKind::GoblinKing, chamber);
    let Rect { x1, y1, x2, y2 } = rooms.chamber;
    for corner in [
        Position::new(x1 + 1, y1 + 1),
        Position::new(x2 - 1, y1 + 1),
        Position::new(x1 + 1, y2 - 1),
        Position::new(x2 - 1, y2 - 1),
    ] {
        spawn(state, EntityKind::FletchlingGateway, corner);
    }

    state.grid.carve_room(&rooms.left);
    let left = rooms.left.center();
    state.grid.carve_h_tunnel(chamber.x, left.x, left.y);
    for (dx, dy) in [(0, -1), (-1, 0), (0, 1)] {
        spawn(state, EntityKind::Troll, left.offset(dx, dy));
    }

    // The right tunnel starts from the left room, crossing the chamber.
    state.grid.carve_room(&rooms.right);
    let right = rooms.right.center();
    state.grid.carve_h_tunnel(left.x, right.x, right.y);
    for (dx, dy) in [(0, -1), (1, 0), (0, 1)] {
        spawn(state, EntityKind::Troll, right.offset(dx, dy));
    }

    tracing::info!(depth = state.depth, "boss level generated");
    LevelLayout {
        rooms: vec![rooms.entrance, rooms.chamber, rooms.left, rooms.right],
        spawn: entrance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::dungeon::build;
    use crate::state::EntityId;

    fn boss_level() -> (GameState, LevelLayout) {
        let mut state = GameState::empty(GameConfig::new(), 4);
        let player = build(&mut state, EntityKind::Player, Position::ORIGIN);
        state.entities.push(player);
        let layout = generate_boss(&mut state);
        (state, layout)
    }

    #[test]
    fn default_geometry_matches_the_classic_arena() {
        let state = GameState::empty(GameConfig::new(), 0);
        let rooms = BossRooms::for_state(&state);
        assert_eq!(rooms.entrance, Rect::new(37, 35, 6, 6));
        assert_eq!(rooms.chamber, Rect::new(31, 15, 18, 18));
        assert_eq!(rooms.left, Rect::new(21, 22, 6, 6));
        assert_eq!(rooms.right, Rect::new(53, 22, 6, 6));
    }

    #[test]
    fn boss_and_gateways_are_placed() {
        let (state, _) = boss_level();
        assert_eq!(state.player_position(), Position::new(40, 38));

        let king = state.entities.iter().find(|e| e.name == "Goblin King").expect("boss");
        assert_eq!(king.position, Position::new(40, 24));

        let mut gateways: Vec<_> = state
            .entities
            .iter()
            .filter(|e| e.name == "fletchling gateway")
            .map(|e| e.position)
            .collect();
        gateways.sort();
        let mut expected = vec![
            Position::new(32, 16),
            Position::new(48, 16),
            Position::new(32, 32),
            Position::new(48, 32),
        ];
        expected.sort();
        assert_eq!(gateways, expected);

        assert_eq!(state.entities.iter().filter(|e| e.name == "troll").count(), 6);
        assert_eq!(state.stairs, None);
    }

    #[test]
    fn every_room_is_reachable_from_the_entrance() {
        let (state, layout) = boss_level();
        for room in &layout.rooms {
            assert!(room.interior().all(|cell| !state.grid.is_wall(cell)));
        }
        // tunnels: entrance-chamber vertical, chamber-left and left-right horizontal
        for x in 24..=56 {
            assert!(!state.grid.is_wall(Position::new(x, 25)));
        }
        for y in 24..=38 {
            assert!(!state.grid.is_wall(Position::new(40, y)));
        }
        assert!(state.entities.contains(EntityId::PLAYER));
    }
}
