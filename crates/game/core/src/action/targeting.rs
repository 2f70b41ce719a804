//! Target selection.
//!
//! Automatic targeting picks the closest visible enemy. Manual targeting goes
//! through the prompt oracle, which is re-asked when its answer is unusable
//! (out of view, out of range, no monster there) up to a fixed number of
//! times. A `None` answer cancels at once.

use super::ActionError;
use crate::env::{GameEnv, PromptOracle, TargetKind, TargetRequest};
use crate::state::{EntityId, GameState, ItemEffect, Position};

/// How many unusable answers a targeting prompt tolerates before giving up.
const MAX_TARGET_PROMPTS: usize = 16;

/// Closest visible non-player fighter strictly nearer than `max_range + 1`.
/// Ties keep the earliest entity in world order.
pub fn closest_monster(state: &GameState, env: &GameEnv<'_>, max_range: u32) -> Option<EntityId> {
    let player = state.player()?;
    let mut closest = None;
    let mut closest_distance = f64::from(max_range) + 1.0;

    for entity in state.entities.iter() {
        if entity.fighter.is_none() || entity.is_player() || !env.is_visible(entity.position) {
            continue;
        }
        let distance = player.distance_to(entity);
        if distance < closest_distance {
            closest = Some(entity.id);
            closest_distance = distance;
        }
    }
    closest
}

fn in_reach(state: &GameState, env: &GameEnv<'_>, cell: Position, max_range: Option<u32>) -> bool {
    env.is_visible(cell)
        && max_range.is_none_or(|range| state.player_position().distance(cell) <= f64::from(range))
}

/// Asks for a visible cell, optionally within `max_range` of the player.
pub fn target_tile(
    state: &GameState,
    env: &mut GameEnv<'_>,
    effect: ItemEffect,
    max_range: Option<u32>,
) -> Result<Position, ActionError> {
    let request = TargetRequest {
        effect,
        kind: TargetKind::Tile,
        max_range,
    };
    for _ in 0..MAX_TARGET_PROMPTS {
        let cell = env.prompts().select_target(&request).ok_or(ActionError::Cancelled)?;
        if in_reach(state, env, cell, max_range) {
            return Ok(cell);
        }
        tracing::debug!(%cell, "target out of reach, asking again");
    }
    Err(ActionError::OutOfRange)
}

/// Asks for a visible cell holding a monster with an AI, within `max_range`.
pub fn target_monster(
    state: &GameState,
    env: &mut GameEnv<'_>,
    effect: ItemEffect,
    max_range: Option<u32>,
) -> Result<EntityId, ActionError> {
    let request = TargetRequest {
        effect,
        kind: TargetKind::Monster,
        max_range,
    };
    for _ in 0..MAX_TARGET_PROMPTS {
        let cell = env.prompts().select_target(&request).ok_or(ActionError::Cancelled)?;
        if !in_reach(state, env, cell, max_range) {
            continue;
        }
        if let Some(monster) = state
            .entities
            .at(cell)
            .find(|entity| entity.fighter.is_some() && entity.ai.is_some() && !entity.is_player())
        {
            return Ok(monster.id);
        }
    }
    Err(ActionError::NoValidTarget)
}
