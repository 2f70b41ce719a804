use arrayvec::ArrayVec;

use super::{Ai, Bearings, MISS_COLOR, TELEGRAPH_COLOR, TickCounter, name_of};
use crate::combat;
use crate::config::GameConfig;
use crate::env::{GameEnv, RngOracle};
use crate::state::{Color, EntityId, GameState, Position};

const TELEGRAPH_CELLS: usize = GameConfig::TELEGRAPH_CELLS;

/// The four attacks a boss chooses between uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BossAttack {
    /// Immediate hit if adjacent.
    Melee,
    /// Three cells across the boss-player axis, one step in front of the boss.
    Perpendicular,
    /// Three cells along the boss-player axis, starting next to the boss.
    Axis,
    /// Horizontal or vertical line centered on the player.
    Overhead,
}

impl BossAttack {
    fn roll(state: &mut GameState) -> Self {
        match state.rng.range(1, 4) {
            1 => Self::Melee,
            2 => Self::Perpendicular,
            3 => Self::Axis,
            _ => Self::Overhead,
        }
    }
}

/// Telegraphed attack waiting for resolution on the next tick.
///
/// The cells are frozen at telegraph time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAttack {
    pub kind: BossAttack,
    pub cells: ArrayVec<Position, TELEGRAPH_CELLS>,
}

/// Composite boss behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossAi {
    pub counter: TickCounter,
    /// One-shot: once set, the boss acts one tick earlier in every period.
    pub enraged: bool,
    pub pending: Option<PendingAttack>,
    /// Secondary behavior ticked before the boss's own logic.
    pub sub_ai: Option<Box<Ai>>,
}

impl BossAi {
    pub const DEFAULT_PERIOD: u32 = 4;

    pub fn new(sub_ai: Option<Ai>) -> Self {
        Self {
            counter: TickCounter::new(Self::DEFAULT_PERIOD),
            enraged: false,
            pending: None,
            sub_ai: sub_ai.map(Box::new),
        }
    }

    pub fn take_turn(mut self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) -> Self {
        if let Some(sub_ai) = self.sub_ai.take() {
            self.sub_ai = Some(Box::new((*sub_ai).take_turn(owner, state, env)));
        }

        self.resolve_pending(owner, state, env);

        self.counter.count += 1;
        let period = self.counter.period;
        let acting = (self.enraged && self.counter.count + 1 == period) || self.counter.count >= period;
        if !acting {
            return self;
        }
        if self.counter.count >= period {
            self.counter.count = 0;
        }
        self.check_enrage(owner, state);

        let Some(bearings) = Bearings::of(owner, state) else {
            return self;
        };
        if env.is_visible(bearings.owner) {
            if bearings.distance() >= 2.0 {
                state.move_towards(owner, bearings.player);
            }
            if self.pending.is_none() {
                self.begin_attack(owner, state, env);
            }
        }
        self
    }

    fn check_enrage(&mut self, owner: EntityId, state: &mut GameState) {
        if self.enraged {
            return;
        }
        let Some(stats) = state.stats(owner) else {
            return;
        };
        if stats.hp * 2 < stats.max_hp {
            self.enraged = true;
            self.counter.period += 1;
            let name = name_of(state, owner);
            state.message(format!("The {name} has become enraged!"), Color::LIGHT_RED);
            tracing::info!(%owner, period = self.counter.period, "boss enraged");
        }
    }

    /// Clears the previous telegraph and hits the player once if they stand on any marked cell.
    fn resolve_pending(&mut self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        for &cell in &pending.cells {
            state.grid.untarget(cell, owner);
        }
        let player = state.player_position();
        if pending.cells.contains(&player) {
            combat::attack(state, env, owner, EntityId::PLAYER);
        } else {
            let name = name_of(state, owner);
            state.message(format!("The {name} attacks, but he missed!"), MISS_COLOR);
        }
    }

    fn begin_attack(&mut self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) {
        let kind = BossAttack::roll(state);
        self.telegraph(kind, owner, state, env);
    }

    /// Performs a melee swing at once, or marks the cells `kind` will hit next tick.
    fn telegraph(&mut self, kind: BossAttack, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) {
        let Some(bearings) = Bearings::of(owner, state) else {
            return;
        };
        let name = name_of(state, owner);
        tracing::debug!(%owner, %kind, "boss attack chosen");

        let (cells, announcement) = match kind {
            BossAttack::Melee => {
                if bearings.distance() == 1.0 {
                    state.message(format!("The {name} charges at you!"), MISS_COLOR);
                    combat::attack(state, env, owner, EntityId::PLAYER);
                } else {
                    state.message(
                        format!("The {name} swings his fist, but you were out of range."),
                        MISS_COLOR,
                    );
                }
                return;
            }
            BossAttack::Perpendicular => (
                perpendicular_line(bearings.owner, bearings.player),
                Some(format!("The {name} prepares to swing his hammer!")),
            ),
            BossAttack::Axis => (
                axis_line(bearings.owner, bearings.player),
                Some(format!("The {name} lifts his hammer over his head!")),
            ),
            BossAttack::Overhead => {
                if bearings.distance() <= 4.0 {
                    let horizontal = state.rng.coin();
                    (
                        overhead_line(bearings.player, horizontal),
                        Some(format!("The {name} throws his hammer into the air!")),
                    )
                } else {
                    // Out of reach: nothing is marked and the attack whiffs next tick.
                    (ArrayVec::new(), None)
                }
            }
        };

        let cells: ArrayVec<Position, TELEGRAPH_CELLS> = cells
            .into_iter()
            .filter(|&cell| state.grid.in_bounds(cell))
            .collect();
        for &cell in &cells {
            state.grid.target(cell, owner);
        }
        if let Some(text) = announcement {
            state.message(text, TELEGRAPH_COLOR);
        }
        self.pending = Some(PendingAttack { kind, cells });
    }
}

/// Unit step pointing from the player back toward the boss.
fn away_from_player(boss: Position, player: Position) -> (i32, i32) {
    player.step_toward(boss)
}

pub(crate) fn perpendicular_line(boss: Position, player: Position) -> ArrayVec<Position, TELEGRAPH_CELLS> {
    let (nx, ny) = away_from_player(boss, player);
    let front = boss.offset(-nx, -ny);
    let cells = if nx == 0 {
        [front.offset(-1, 0), front, front.offset(1, 0)]
    } else if ny == 0 {
        [front.offset(0, -1), front, front.offset(0, 1)]
    } else {
        [front.offset(nx.signum(), 0), front, front.offset(0, ny.signum())]
    };
    ArrayVec::from(cells)
}

pub(crate) fn axis_line(boss: Position, player: Position) -> ArrayVec<Position, TELEGRAPH_CELLS> {
    let (nx, ny) = away_from_player(boss, player);
    (1..=TELEGRAPH_CELLS as i32)
        .map(|step| boss.offset(-nx * step, -ny * step))
        .collect()
}

pub(crate) fn overhead_line(center: Position, horizontal: bool) -> ArrayVec<Position, TELEGRAPH_CELLS> {
    if horizontal {
        ArrayVec::from([center.offset(-1, 0), center, center.offset(1, 0)])
    } else {
        ArrayVec::from([center.offset(0, -1), center, center.offset(0, 1)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::testing::{add_monster, arena, player_hp, position_of};
    use crate::env::{Env, RayCastVisibility, ScriptedPrompts, VisibilityOracle};
    use crate::state::{DeathKind, Fighter};

    fn cells(list: &[(i32, i32)]) -> Vec<Position> {
        list.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn axis_line_runs_from_boss_toward_player() {
        let line = axis_line(Position::new(5, 5), Position::new(5, 8));
        assert_eq!(line.to_vec(), cells(&[(5, 6), (5, 7), (5, 8)]));
    }

    #[test]
    fn perpendicular_line_crosses_in_front() {
        let line = perpendicular_line(Position::new(5, 5), Position::new(5, 8));
        assert_eq!(line.to_vec(), cells(&[(4, 6), (5, 6), (6, 6)]));

        let line = perpendicular_line(Position::new(5, 5), Position::new(2, 5));
        assert_eq!(line.to_vec(), cells(&[(4, 4), (4, 5), (4, 6)]));
    }

    #[test]
    fn perpendicular_line_on_a_diagonal() {
        // Player to the south-east: front cell is (6, 6).
        let line = perpendicular_line(Position::new(5, 5), Position::new(8, 8));
        assert_eq!(line.to_vec(), cells(&[(5, 6), (6, 6), (6, 5)]));
    }

    #[test]
    fn overhead_line_is_centered_on_player() {
        let center = Position::new(3, 3);
        assert_eq!(overhead_line(center, true).to_vec(), cells(&[(2, 3), (3, 3), (4, 3)]));
        assert_eq!(overhead_line(center, false).to_vec(), cells(&[(3, 2), (3, 3), (3, 4)]));
    }

    fn king(state: &mut GameState, position: Position, hp: i32) -> EntityId {
        let mut fighter = Fighter::new(400, 4, 12, 5000, DeathKind::Boss);
        fighter.hp = hp;
        add_monster(state, position, fighter, Ai::Boss(BossAi::new(None)))
    }

    fn telegraphed(kind: BossAttack, cells: &[(i32, i32)]) -> PendingAttack {
        PendingAttack {
            kind,
            cells: cells
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        }
    }

    #[test]
    fn pending_attack_hits_player_on_marked_cell() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 7), 400);

        let mut ai = BossAi::new(None);
        let pending = telegraphed(BossAttack::Axis, &[(10, 8), (10, 9), (10, 10)]);
        for &cell in &pending.cells {
            state.grid.target(cell, owner);
        }
        ai.pending = Some(pending);

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.pending, None);
        assert_eq!(state.grid.targeted_positions().count(), 0);
        // power 12 against defense 0
        assert_eq!(player_hp(&state), 18);
    }

    #[test]
    fn pending_attack_misses_a_player_who_moved() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 7), 400);

        let mut ai = BossAi::new(None);
        let pending = telegraphed(BossAttack::Overhead, &[(9, 9), (10, 9), (11, 9)]);
        for &cell in &pending.cells {
            state.grid.target(cell, owner);
        }
        ai.pending = Some(pending);

        ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(player_hp(&state), 30);
        assert_eq!(state.grid.targeted_positions().count(), 0);
        assert!(state.messages.contains("attacks, but he missed!"));
    }

    fn move_player(state: &mut GameState, to: Position) {
        if let Some(player) = state.player_mut() {
            player.position = to;
        }
    }

    fn marked(state: &GameState) -> Vec<Position> {
        let mut cells: Vec<Position> = state.grid.targeted_positions().collect();
        cells.sort_by_key(|cell| (cell.x, cell.y));
        cells
    }

    #[test]
    fn enraged_boss_acts_one_tick_early_every_period() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        vision.compute(&state.grid, Position::new(10, 10), 10);
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 1), 150);

        // A visible boss far from the player steps forward on every acting tick.
        let mut ai = BossAi::new(None);
        let mut acted = Vec::new();
        for tick in 1..=14 {
            let before = position_of(&state, owner);
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
            if position_of(&state, owner) != before {
                acted.push(tick);
            }
        }

        assert_eq!(acted, vec![4, 8, 9, 13, 14]);
        assert!(ai.enraged);
        assert_eq!(ai.counter.period, 5);
        let enraged_lines = state
            .messages
            .iter()
            .filter(|line| line.text.contains("has become enraged"))
            .count();
        assert_eq!(enraged_lines, 1);
    }

    #[test]
    fn enrage_is_one_shot() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(3, 3), 150);

        let mut ai = BossAi::new(None);
        for _ in 0..4 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        }
        assert!(ai.enraged);
        assert_eq!(ai.counter.period, 5);
        assert_eq!(ai.counter.count, 0);

        for _ in 0..20 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        }
        assert_eq!(ai.counter.period, 5);
        let enraged_lines = state
            .messages
            .iter()
            .filter(|line| line.text.contains("has become enraged"))
            .count();
        assert_eq!(enraged_lines, 1);
    }

    #[test]
    fn healthy_boss_keeps_its_period() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(3, 3), 200);

        let mut ai = BossAi::new(None);
        for _ in 0..12 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        }
        assert!(!ai.enraged);
        assert_eq!(ai.counter.period, BossAi::DEFAULT_PERIOD);
        assert!(!state.messages.contains("has become enraged"));
    }

    #[test]
    fn visible_boss_closes_distance_and_attacks() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        vision.compute(&state.grid, Position::new(10, 10), 6);
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 6), 400);

        let mut ai = BossAi::new(None);
        for _ in 0..4 {
            ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        }
        assert_eq!(position_of(&state, owner), Position::new(10, 7));
        match &ai.pending {
            Some(pending) => {
                assert_ne!(pending.kind, BossAttack::Melee);
                for cell in &pending.cells {
                    assert!(state.grid.is_targeted(*cell));
                }
            }
            // Three cells away, a melee roll whiffs without marking anything.
            None => {
                assert!(state.messages.contains("swings his fist, but you were out of range."));
                assert_eq!(state.grid.targeted_positions().count(), 0);
            }
        }
        assert_eq!(player_hp(&state), 30);
    }

    #[test]
    fn adjacent_melee_hits_at_once() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 9), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Melee, owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.pending, None);
        assert!(state.messages.contains("The monster charges at you!"));
        assert_eq!(player_hp(&state), 18);
    }

    #[test]
    fn perpendicular_swing_marks_the_row_in_front_and_misses_a_player_behind_it() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 7), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Perpendicular, owner, &mut state, &mut env.as_game_env());
        assert_eq!(marked(&state), cells(&[(9, 8), (10, 8), (11, 8)]));
        assert!(state.messages.contains("prepares to swing his hammer!"));

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.pending, None);
        assert_eq!(state.grid.targeted_positions().count(), 0);
        assert_eq!(player_hp(&state), 30);
        assert!(state.messages.contains("attacks, but he missed!"));
    }

    #[test]
    fn perpendicular_swing_hits_a_player_who_steps_into_it() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 7), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Perpendicular, owner, &mut state, &mut env.as_game_env());
        move_player(&mut state, Position::new(11, 8));

        ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(player_hp(&state), 18);
        assert_eq!(state.grid.targeted_positions().count(), 0);
    }

    #[test]
    fn axis_strike_marks_three_cells_toward_the_player_and_hits() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 7), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Axis, owner, &mut state, &mut env.as_game_env());
        assert_eq!(marked(&state), cells(&[(10, 8), (10, 9), (10, 10)]));
        assert_eq!(ai.pending.as_ref().map(|pending| pending.kind), Some(BossAttack::Axis));
        assert!(state.messages.contains("lifts his hammer over his head!"));

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.pending, None);
        assert_eq!(state.grid.targeted_positions().count(), 0);
        assert_eq!(player_hp(&state), 18);
    }

    #[test]
    fn overhead_throw_centers_on_the_player_within_reach() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 6), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Overhead, owner, &mut state, &mut env.as_game_env());
        let player = Position::new(10, 10);
        let line = marked(&state);
        let horizontal = cells(&[(9, 10), (10, 10), (11, 10)]);
        let vertical = cells(&[(10, 9), (10, 10), (10, 11)]);
        assert!(line == horizontal || line == vertical, "unexpected line {line:?}");
        assert!(state.grid.is_targeted(player));
        assert!(state.messages.contains("throws his hammer into the air!"));

        ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(player_hp(&state), 18);
        assert_eq!(state.grid.targeted_positions().count(), 0);
    }

    #[test]
    fn overhead_throw_out_of_reach_marks_nothing_and_misses() {
        let mut state = arena();
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let owner = king(&mut state, Position::new(10, 5), 400);

        let mut ai = BossAi::new(None);
        ai.telegraph(BossAttack::Overhead, owner, &mut state, &mut env.as_game_env());
        let pending = ai.pending.clone().expect("empty telegraph still pends");
        assert_eq!(pending.kind, BossAttack::Overhead);
        assert!(pending.cells.is_empty());
        assert_eq!(state.grid.targeted_positions().count(), 0);
        assert!(!state.messages.contains("throws his hammer into the air!"));

        ai = ai.take_turn(owner, &mut state, &mut env.as_game_env());
        assert_eq!(ai.pending, None);
        assert_eq!(player_hp(&state), 30);
        assert!(state.messages.contains("attacks, but he missed!"));
    }
}
