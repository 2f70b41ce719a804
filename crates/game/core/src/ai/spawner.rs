use super::{Bearings, TickCounter};
use crate::config::GameConfig;
use crate::dungeon::{EntityKind, spawn};
use crate::env::RngOracle;
use crate::state::{EntityId, GameState};

/// Stationary gateway that emits monsters while the player is nearby.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnerAi {
    pub spawn: EntityKind,
    pub spawn_range: u32,
    pub counter: TickCounter,
}

impl SpawnerAi {
    pub const DEFAULT_PERIOD: u32 = 8;
    pub const DEFAULT_RANGE: u32 = 15;

    pub const fn new(spawn: EntityKind) -> Self {
        Self {
            spawn,
            spawn_range: Self::DEFAULT_RANGE,
            counter: TickCounter::new(Self::DEFAULT_PERIOD),
        }
    }

    pub fn take_turn(mut self, owner: EntityId, state: &mut GameState) -> Self {
        let Some(bearings) = Bearings::of(owner, state) else {
            return self;
        };
        // The clock only runs while the player is within range.
        if bearings.distance() > f64::from(self.spawn_range) || !self.counter.tick() {
            return self;
        }

        for _ in 0..GameConfig::SPAWN_ATTEMPTS {
            let (dx, dy) = state.rng.step();
            let cell = bearings.owner.offset(dx, dy);
            if !state.is_blocked(cell) {
                let spawned = spawn(state, self.spawn, cell);
                tracing::debug!(%owner, %spawned, kind = %self.spawn, %cell, "gateway spawned");
                return self;
            }
        }

        // Every neighbor was blocked: retry two ticks sooner than a full period.
        self.counter.count = self.counter.period.saturating_sub(2);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Ai;
    use crate::ai::testing::{add_monster, arena};
    use crate::state::{DeathKind, Fighter, Position};

    fn gateway(state: &mut GameState, position: Position) -> EntityId {
        add_monster(
            state,
            position,
            Fighter::new(75, 0, 0, 1000, DeathKind::Gateway),
            Ai::Spawner(SpawnerAi::new(EntityKind::Fletchling)),
        )
    }

    #[test]
    fn spawns_on_period_tick_next_to_itself() {
        let mut state = arena();
        let owner = gateway(&mut state, Position::new(5, 5));
        let before = state.entities.len();

        let mut ai = SpawnerAi::new(EntityKind::Fletchling);
        for _ in 0..7 {
            ai = ai.take_turn(owner, &mut state);
        }
        assert_eq!(state.entities.len(), before);

        ai.take_turn(owner, &mut state);
        assert_eq!(state.entities.len(), before + 1);
        let spawned = state
            .entities
            .iter()
            .last()
            .expect("spawned entity");
        assert_eq!(spawned.name, "fletchling");
        assert!(spawned.position.distance(Position::new(5, 5)) < 1.5);
    }

    #[test]
    fn idle_while_player_out_of_range() {
        let mut state = arena();
        let owner = gateway(&mut state, Position::new(5, 5));
        let mut ai = SpawnerAi::new(EntityKind::Fletchling);
        ai.spawn_range = 2;
        for _ in 0..20 {
            ai = ai.take_turn(owner, &mut state);
        }
        assert_eq!(ai.counter.count, 0);
        assert_eq!(state.entities.len(), 2);
    }

    #[test]
    fn backs_off_when_surrounded() {
        let mut state = arena();
        // Gateway in the wall corner: neighbors are walls or the blockers below.
        let owner = gateway(&mut state, Position::new(1, 1));
        for cell in [Position::new(2, 1), Position::new(1, 2), Position::new(2, 2)] {
            add_monster(
                &mut state,
                cell,
                Fighter::new(10, 0, 0, 0, DeathKind::Monster),
                Ai::Spawner(SpawnerAi::new(EntityKind::Goblin)),
            );
        }
        let before = state.entities.len();

        let mut ai = SpawnerAi::new(EntityKind::Fletchling);
        ai.counter.count = ai.counter.period - 1;
        ai = ai.take_turn(owner, &mut state);
        assert_eq!(state.entities.len(), before);
        assert_eq!(ai.counter.count, ai.counter.period - 2);
    }
}
