//! Deterministic dungeon-run simulation shared across frontends.
//!
//! `game-core` defines the canonical rules (intents, combat, AI, level
//! generation) and exposes pure APIs that can be driven by the runtime, a
//! terminal client or a test harness alike. All state mutation flows through
//! [`engine::GameEngine`]; rendering and input live behind the oracles in
//! [`env`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod dungeon;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;
pub mod stats;

pub use action::{ActionError, Intent, MoveOutcome, TurnCost};
pub use ai::{Ai, BasicAi, BossAi, ConfusedAi, RangedAi, SpawnerAi};
pub use config::GameConfig;
pub use dungeon::{DepthTable, EntityKind, SpawnEntry, SpawnTables, generate_level};
pub use engine::{ExecuteError, GameEngine, TurnOutcome, new_game, refresh_vision};
pub use env::{
    Env, GameEnv, LevelReward, PcgRng, PromptOracle, RayCastVisibility, RngOracle,
    ScriptedPrompts, TargetKind, TargetRequest, VisibilityOracle,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use state::{
    Color, Direction, EntitiesState, Entity, EntityId, EquipmentSlot, GameState, Grid,
    InventoryState, ItemEffect, Lifecycle, MessageLog, Position, StateError,
};
pub use stats::{CharacterSheet, StatsSnapshot};
