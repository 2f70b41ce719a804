//! Bump-to-attack movement.

use super::ActionError;
use crate::combat::{self, AttackOutcome};
use crate::env::GameEnv;
use crate::state::{Direction, EntityId, GameState};

/// What a movement intent turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// A fighter stood on the destination and was attacked instead.
    Attacked(AttackOutcome),
    /// Wall or non-fighting blocker. Still costs the turn.
    Bumped,
}

/// Moves the player one step, or attacks the fighter standing there.
pub fn move_or_attack(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    direction: Direction,
) -> Result<MoveOutcome, ActionError> {
    let origin = state.player().ok_or(ActionError::PlayerMissing)?.position;
    let (dx, dy) = direction.delta();
    let destination = origin.offset(dx, dy);

    if let Some(target) = state.entities.monster_at(destination).map(|entity| entity.id) {
        let outcome = combat::attack(state, env, EntityId::PLAYER, target);
        return Ok(MoveOutcome::Attacked(outcome));
    }

    if state.move_entity(EntityId::PLAYER, dx, dy) {
        Ok(MoveOutcome::Moved)
    } else {
        Ok(MoveOutcome::Bumped)
    }
}
