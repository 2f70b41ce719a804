use super::{Bearings, TickCounter, player_alive, wander};
use crate::combat;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState};

/// Chases and strikes the player while visible, wanders otherwise.
///
/// Visibility is symmetric: if the player can see the monster, the monster
/// can see the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasicAi {
    pub counter: TickCounter,
}

impl BasicAi {
    pub const DEFAULT_PERIOD: u32 = 3;

    pub const fn new(period: u32) -> Self {
        Self {
            counter: TickCounter::new(period),
        }
    }

    pub fn take_turn(mut self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) -> Self {
        if !self.counter.tick() {
            return self;
        }
        let Some(bearings) = Bearings::of(owner, state) else {
            return self;
        };

        if env.is_visible(bearings.owner) {
            if bearings.distance() >= 2.0 {
                state.move_towards(owner, bearings.player);
            } else if player_alive(state) {
                combat::attack(state, env, owner, EntityId::PLAYER);
            }
        } else {
            wander(owner, state);
        }
        self
    }
}

impl Default for BasicAi {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}
