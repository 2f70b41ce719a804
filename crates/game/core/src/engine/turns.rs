use crate::dungeon::generate_level;
use crate::env::{GameEnv, VisibilityOracle};
use crate::state::{Color, GameState};

use super::GameEngine;

/// Recomputes the field of view around the player and explores what it sees.
pub fn refresh_vision(state: &mut GameState, env: &mut GameEnv<'_>) {
    let origin = state.player_position();
    env.vision_mut()
        .compute(&state.grid, origin, state.config.torch_radius);
    for cell in env.vision().visible_cells() {
        state.grid.mark_explored(cell);
    }
}

/// World-tick methods for GameEngine.
impl<'a> GameEngine<'a> {
    /// Gives every AI-carrying entity exactly one turn, in world order.
    ///
    /// Entities appended during the tick (spawns, corpses keep their place)
    /// are reached by the same pass. Ticking stops as soon as the player dies.
    pub(crate) fn tick_world(&mut self, env: &mut GameEnv<'_>) {
        let state = &mut *self.state;
        let mut index = 0;
        while let Some(id) = state.entities.at_index(index).map(|entity| entity.id) {
            index += 1;
            if state.is_dead() {
                break;
            }
            let Some(ai) = state.entities.get_mut(id).and_then(|entity| entity.ai.take()) else {
                continue;
            };
            let next = ai.take_turn(id, state, env);
            // A fighter that died during its own turn stays without an AI.
            if let Some(entity) = state.entities.get_mut(id)
                && entity.fighter.is_some()
            {
                entity.ai = Some(next);
            }
        }
        state.turn += 1;
        tracing::trace!(turn = state.turn, "world tick complete");
    }

    /// Leaves the current level by its stairs and generates the next one.
    pub(crate) fn enter_next_level(&mut self, env: &mut GameEnv<'_>) {
        let state = &mut *self.state;
        state.message(
            format!("Congratulations on passing test #{}.", state.depth),
            Color::LIGHT_VIOLET,
        );
        state.depth += 1;
        state.message("On to the next trial, Runner #43!", Color::DARK_VIOLET);

        generate_level(state, self.tables);
        refresh_vision(state, env);
        tracing::info!(depth = state.depth, "entered next level");
    }
}
