//! Monster decision-making.
//!
//! Every AI-carrying entity is ticked exactly once per world turn. An AI is a
//! plain value: the engine takes it out of its owner, runs [`Ai::take_turn`],
//! and stores whatever comes back. Returning a different variant is how a
//! state machine swaps itself out (confusion wearing off, for instance).
//!
//! All variants are period-gated by a [`TickCounter`]: the counter advances
//! every tick and the AI only acts on the tick where it reaches its period.

mod basic;
mod boss;
mod confused;
mod ranged;
mod spawner;

pub use basic::BasicAi;
pub use boss::{BossAi, BossAttack, PendingAttack};
pub use confused::ConfusedAi;
pub use ranged::RangedAi;
pub use spawner::SpawnerAi;

use crate::env::{GameEnv, RngOracle};
use crate::state::{Color, EntityId, GameState, Position};

/// Color used for telegraph announcements.
pub(crate) const TELEGRAPH_COLOR: Color = Color::rgb(114, 114, 255);
/// Color used for attack misses and confusion messages.
pub(crate) const MISS_COLOR: Color = Color::LIGHT_BLUE;

/// Period-gated internal clock shared by every AI variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickCounter {
    /// Ticks between actions ("speed"; larger is slower).
    pub period: u32,
    /// Ticks elapsed since the last action.
    pub count: u32,
}

impl TickCounter {
    pub const fn new(period: u32) -> Self {
        Self { period, count: 0 }
    }

    /// Advances one tick. Returns true, and resets, when the period completes.
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.period {
            self.count = 0;
            true
        } else {
            false
        }
    }
}

/// Closed set of AI behaviors.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Ai {
    /// Chase the player when seen, wander otherwise.
    Basic(BasicAi),
    /// Temporary random walking wrapped around the previous behavior.
    Confused(ConfusedAi),
    /// Stationary spawner that emits new monsters near the player.
    Spawner(SpawnerAi),
    /// Telegraphs a shot one tick ahead, then fires at the captured cell.
    Ranged(RangedAi),
    /// Composite boss with a sub-behavior and telegraphed area attacks.
    Boss(BossAi),
}

impl Ai {
    pub fn counter(&self) -> &TickCounter {
        match self {
            Self::Basic(ai) => &ai.counter,
            Self::Confused(ai) => &ai.counter,
            Self::Spawner(ai) => &ai.counter,
            Self::Ranged(ai) => &ai.counter,
            Self::Boss(ai) => &ai.counter,
        }
    }

    pub fn counter_mut(&mut self) -> &mut TickCounter {
        match self {
            Self::Basic(ai) => &mut ai.counter,
            Self::Confused(ai) => &mut ai.counter,
            Self::Spawner(ai) => &mut ai.counter,
            Self::Ranged(ai) => &mut ai.counter,
            Self::Boss(ai) => &mut ai.counter,
        }
    }

    pub fn is_confused(&self) -> bool {
        matches!(self, Self::Confused(_))
    }

    /// Runs one tick for `owner` and returns the AI the owner should carry next.
    pub fn take_turn(self, owner: EntityId, state: &mut GameState, env: &mut GameEnv<'_>) -> Ai {
        match self {
            Self::Basic(ai) => Self::Basic(ai.take_turn(owner, state, env)),
            Self::Confused(ai) => ai.take_turn(owner, state),
            Self::Spawner(ai) => Self::Spawner(ai.take_turn(owner, state)),
            Self::Ranged(ai) => Self::Ranged(ai.take_turn(owner, state, env)),
            Self::Boss(ai) => Self::Boss(ai.take_turn(owner, state, env)),
        }
    }
}

/// Snapshot of the two positions most behaviors need.
pub(crate) struct Bearings {
    pub owner: Position,
    pub player: Position,
}

impl Bearings {
    pub fn of(owner: EntityId, state: &GameState) -> Option<Self> {
        let owner = state.entities.get(owner)?.position;
        let player = state.player()?.position;
        Some(Self { owner, player })
    }

    pub fn distance(&self) -> f64 {
        self.owner.distance(self.player)
    }
}

/// Display name of an entity for messages.
pub(crate) fn name_of(state: &GameState, id: EntityId) -> String {
    state
        .entities
        .get(id)
        .map(|entity| entity.name.clone())
        .unwrap_or_default()
}

/// True while the player still has hit points.
pub(crate) fn player_alive(state: &GameState) -> bool {
    state
        .player()
        .and_then(|player| player.fighter.as_ref())
        .is_some_and(|fighter| fighter.is_alive())
}

/// One random step in {-1, 0, 1}²; blocked steps are silently dropped.
pub(crate) fn wander(owner: EntityId, state: &mut GameState) {
    let (dx, dy) = state.rng.step();
    state.move_entity(owner, dx, dy);
}
