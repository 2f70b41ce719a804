use super::{Bearings, MISS_COLOR, TELEGRAPH_COLOR, TickCounter, name_of, player_alive};
use crate::combat;
use crate::env::GameEnv;
use crate::state::{EntityId, GameState, Position, capitalize};

/// Two-phase shooter.
///
/// On the tick before its period completes it captures the player's cell and
/// marks it targeted; on the completing tick it clears the mark and hits only
/// if the player is still standing on the captured cell. A period of 1 leaves
/// no aiming tick, so such a shooter never fires.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedAi {
    pub counter: TickCounter,
    pub shoot_range: u32,
    /// Cell captured during the aiming tick.
    pub aim: Option<Position>,
}

impl RangedAi {
    pub const DEFAULT_PERIOD: u32 = 4;

    pub const fn new(period: u32, shoot_range: u32) -> Self {
        Self {
            counter: TickCounter::new(period),
            shoot_range,
            aim: None,
        }
    }

    pub fn take_turn(mut self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) -> Self {
        self.counter.count += 1;
        let firing = self.counter.count >= self.counter.period;
        let aiming = !firing && self.counter.count + 1 == self.counter.period;
        if firing {
            self.counter.count = 0;
        } else if !aiming {
            return self;
        }

        if !player_alive(state) {
            return self;
        }
        let Some(bearings) = Bearings::of(owner, state) else {
            return self;
        };

        if aiming {
            if bearings.distance() <= f64::from(self.shoot_range) {
                self.aim = Some(bearings.player);
                state.grid.target(bearings.player, owner);
                let name = capitalize(&name_of(state, owner));
                state.message(format!("{name} takes aim!"), TELEGRAPH_COLOR);
                tracing::debug!(%owner, cell = %bearings.player, "ranged attacker aiming");
            }
        } else if let Some(aim) = self.aim.take() {
            state.grid.untarget(aim, owner);
            if bearings.player == aim {
                combat::attack(state, env, owner, EntityId::PLAYER);
            } else {
                let name = name_of(state, owner);
                state.message(format!("The {name} missed!"), MISS_COLOR);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Ai;
    use crate::ai::testing::{add_monster, arena, player_hp};
    use crate::env::{Env, RayCastVisibility, ScriptedPrompts};
    use crate::state::{DeathKind, Fighter};

    fn archer(state: &mut GameState, ai: &RangedAi) -> EntityId {
        add_monster(
            state,
            Position::new(10, 5),
            Fighter::new(60, 2, 10, 300, DeathKind::Monster),
            Ai::Ranged(ai.clone()),
        )
    }

    #[test]
    fn aims_then_hits_a_stationary_player() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let mut ai = RangedAi::new(4, 6);
        let owner = archer(&mut state, &ai);

        for _ in 0..2 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        }
        assert!(!state.grid.is_targeted(Position::new(10, 10)));

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.aim, Some(Position::new(10, 10)));
        assert!(state.grid.is_targeted(Position::new(10, 10)));

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert!(!state.grid.is_targeted(Position::new(10, 10)));
        assert_eq!(ai.aim, None);
        assert_eq!(player_hp(&state), 20);
    }

    #[test]
    fn misses_when_the_player_steps_away() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let mut ai = RangedAi::new(2, 6);
        let owner = archer(&mut state, &ai);

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert!(state.grid.is_targeted(Position::new(10, 10)));
        state.move_entity(EntityId::PLAYER, 1, 0);

        ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert!(!state.grid.is_targeted(Position::new(10, 10)));
        assert_eq!(player_hp(&state), 30);
        assert!(state.messages.contains("The monster missed!"));
    }

    #[test]
    fn does_not_aim_out_of_range() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let mut ai = RangedAi::new(2, 3);
        let owner = archer(&mut state, &ai);

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.aim, None);
        assert_eq!(state.grid.targeted_positions().count(), 0);
    }

    #[test]
    fn single_tick_period_never_aims_or_fires() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let mut ai = RangedAi::new(1, 6);
        let owner = archer(&mut state, &ai);

        for _ in 0..6 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
            assert_eq!(ai.aim, None);
            assert_eq!(ai.counter.count, 0);
        }
        assert_eq!(state.grid.targeted_positions().count(), 0);
        assert_eq!(player_hp(&state), 30);
        assert_eq!(state.messages.iter().count(), 0);
    }
}
