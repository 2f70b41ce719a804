use super::{Ai, TickCounter, name_of, wander};
use crate::state::{Color, EntityId, GameState};

/// Random walking that wraps, and later restores, the previous behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusedAi {
    pub prior: Box<Ai>,
    /// Period-gated moves left before the prior AI is restored.
    pub remaining: u32,
    pub counter: TickCounter,
}

impl ConfusedAi {
    /// Wraps `prior`, inheriting its period and current count.
    pub fn wrap(prior: Ai, turns: u32) -> Self {
        let counter = *prior.counter();
        Self {
            prior: Box::new(prior),
            remaining: turns,
            counter,
        }
    }

    pub fn take_turn(mut self, owner: EntityId, state: &mut GameState) -> Ai {
        if self.remaining > 0 {
            if self.counter.tick() {
                self.remaining -= 1;
                wander(owner, state);
            }
            return Ai::Confused(self);
        }

        let mut prior = *self.prior;
        prior.counter_mut().count = self.counter.count;
        let name = name_of(state, owner);
        state.message(
            format!("The {name} is no longer disoriented."),
            Color::LIGHT_YELLOW,
        );
        tracing::debug!(%owner, "confusion wore off");
        prior
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::{add_monster, arena};
    use crate::ai::{BasicAi, RangedAi};
    use crate::state::{DeathKind, Fighter, Position};

    #[test]
    fn restores_prior_with_counter_propagated() {
        let mut state = arena();
        let mut prior = BasicAi::new(3);
        prior.counter.count = 1;
        let owner = add_monster(
            &mut state,
            Position::new(4, 4),
            Fighter::new(20, 0, 4, 20, DeathKind::Monster),
            Ai::Basic(prior),
        );

        let mut ai = Ai::Confused(ConfusedAi::wrap(Ai::Basic(prior), 2));
        // counts 2, 3(act) | 1, 2, 3(act) | restore
        let mut ticks = 0;
        while ai.is_confused() {
            ai = match ai {
                Ai::Confused(confused) => confused.take_turn(owner, &mut state),
                other => other,
            };
            ticks += 1;
            assert!(ticks < 20, "confusion never wore off");
        }
        assert_eq!(ticks, 6);
        match ai {
            Ai::Basic(basic) => {
                assert_eq!(basic.counter.period, 3);
                assert_eq!(basic.counter.count, 0);
            }
            other => panic!("expected basic ai, got {other:?}"),
        }
        assert!(state.messages.contains("The monster is no longer disoriented."));
    }

    #[test]
    fn wrapping_inherits_period_and_count() {
        let mut ranged = RangedAi::new(4, 6);
        ranged.counter.count = 2;
        let confused = ConfusedAi::wrap(Ai::Ranged(ranged.clone()), 2);
        assert_eq!(confused.counter, ranged.counter);
        assert_eq!(*confused.prior, Ai::Ranged(ranged));
    }

    #[test]
    fn zero_turns_restores_immediately() {
        let mut state = arena();
        let owner = add_monster(
            &mut state,
            Position::new(4, 4),
            Fighter::new(20, 0, 4, 20, DeathKind::Monster),
            Ai::Basic(BasicAi::new(2)),
        );
        let ai = ConfusedAi::wrap(Ai::Basic(BasicAi::new(2)), 0).take_turn(owner, &mut state);
        assert_eq!(ai, Ai::Basic(BasicAi::new(2)));
    }
}
