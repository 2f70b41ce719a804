//! Death handlers.
//!
//! Non-player deaths turn the entity into a passive floor decoration in
//! place (the world order never changes) and then give the player a chance
//! to level up.

use super::progression::check_level_up;
use crate::dungeon::{EntityKind, spawn};
use crate::env::{GameEnv, RngOracle};
use crate::state::{Color, DeathKind, EntityId, GameState, Lifecycle, RenderLayer, capitalize};

/// Runs the handler selected by `death` for an entity whose hp just reached zero.
pub fn handle_death(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    id: EntityId,
    death: DeathKind,
    reward: u32,
) {
    match death {
        DeathKind::Player => player_death(state, id),
        DeathKind::Monster => {
            remains(state, id, reward, |name| {
                (
                    format!("{} is dead! You gained {reward} experience.", capitalize(name)),
                    format!("remains of {name}"),
                )
            });
            check_level_up(state, env);
        }
        DeathKind::Gateway => {
            remains(state, id, reward, |name| {
                (
                    format!("The {name} is destroyed! You gained {reward} experience."),
                    "rubble".to_owned(),
                )
            });
            check_level_up(state, env);
        }
        DeathKind::Boss => {
            remains(state, id, reward, |name| {
                (
                    format!("You defeated the {name}! Your reward is {reward} experience!"),
                    format!("remnants of {name}"),
                )
            });
            place_late_stairs(state);
            check_level_up(state, env);
        }
    }
}

fn player_death(state: &mut GameState, id: EntityId) {
    state.message("You died!", Color::GOLD);
    state.lifecycle = Lifecycle::Dead;
    if let Some(player) = state.entities.get_mut(id) {
        player.glyph = '%';
        player.color = Color::DARK_RED;
    }
    tracing::info!(turn = state.turn, depth = state.depth, "player died");
}

/// Strips the combat capabilities, renames the entity and drops it to the floor layer.
fn remains(
    state: &mut GameState,
    id: EntityId,
    reward: u32,
    describe: impl FnOnce(&str) -> (String, String),
) {
    let Some(entity) = state.entities.get_mut(id) else {
        return;
    };
    let (text, new_name) = describe(&entity.name);
    entity.glyph = '%';
    entity.color = Color::DARK_RED;
    entity.blocks = false;
    entity.fighter = None;
    entity.ai = None;
    entity.name = new_name;
    entity.layer = RenderLayer::Floor;

    state.grid.untarget_all(id);
    state.message(text, Color::DARK_ORANGE);
    tracing::debug!(%id, reward, "remains left behind");
}

/// Stairs appear on a random passable cell once the boss falls.
fn place_late_stairs(state: &mut GameState) {
    let free: Vec<_> = state
        .grid
        .positions()
        .filter(|&cell| !state.is_blocked(cell))
        .collect();
    if free.is_empty() {
        tracing::warn!("no passable cell for the late stairs");
        return;
    }
    let index = state.rng.range(0, free.len() as i32 - 1) as usize;
    let stairs = spawn(state, EntityKind::Stairs, free[index]);
    state.stairs = Some(stairs);
}
