//! Turn scheduling and intent execution.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. One call
//! to [`GameEngine::execute`] resolves exactly one player intent and, if that
//! intent used up the turn, gives every AI one tick. Refused intents are
//! resolved in place (the reason goes to the message log) and never reach the
//! caller as errors.

mod errors;
mod turns;
pub mod views;

pub use errors::ExecuteError;
pub use turns::refresh_vision;

use crate::action::{
    ActionError, Intent, TurnCost, drop_item, move_or_attack, pick_up, use_item,
};
use crate::config::GameConfig;
use crate::dungeon::{EntityKind, SpawnTables, build, generate_level};
use crate::env::GameEnv;
use crate::error::GameError;
use crate::state::{Color, GameState, Position};
use crate::stats::CharacterSheet;

/// What happened to the world as a result of one intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The player's turn was used and every AI acted once.
    Advanced,
    /// Nothing in the world moved.
    Idle,
    /// The intent was refused; the reason is already in the message log.
    Rejected(ActionError),
    /// A new level was generated.
    Descended { depth: u32 },
    /// Names of the visible entities on the inspected cell.
    Inspected(String),
    Character(CharacterSheet),
    /// The player asked to leave.
    Exit,
}

/// Creates a fresh game: player, first level, field of view, welcome line.
pub fn new_game(
    config: GameConfig,
    seed: u64,
    tables: &SpawnTables,
    env: &mut GameEnv<'_>,
) -> GameState {
    let mut state = GameState::empty(config, seed);
    let player = build(&mut state, EntityKind::Player, Position::ORIGIN);
    state.entities.push(player);

    generate_level(&mut state, tables);
    refresh_vision(&mut state, env);
    state.message(
        "Welcome, Runner #43! Please refrain from spilling your blood on the walls!",
        Color::RED,
    );
    tracing::info!(seed, "new game started");
    state
}

/// Game engine that resolves intents and schedules AI turns.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    tables: &'a SpawnTables,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given state. `tables` populate any
    /// level generated by a descent.
    pub fn new(state: &'a mut GameState, tables: &'a SpawnTables) -> Self {
        Self { state, tables }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes one intent.
    ///
    /// While the player is dead only [`Intent::Exit`] is accepted.
    pub fn execute(
        &mut self,
        mut env: GameEnv<'_>,
        intent: Intent,
    ) -> Result<TurnOutcome, ExecuteError> {
        let turn = self.state.turn;
        if self.state.player().is_none() {
            return Err(ExecuteError::missing_player(turn));
        }
        if self.state.is_dead() && intent != Intent::Exit {
            return Err(ExecuteError::not_accepted(intent, self.state.lifecycle, turn));
        }
        tracing::debug!(intent = intent.as_snake_case(), turn, "executing intent");

        match self.resolve(&mut env, intent) {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                if let Some(color) = error.log_color() {
                    self.state.message(error.to_string(), color);
                }
                tracing::debug!(code = error.error_code(), %error, "intent rejected");
                Ok(TurnOutcome::Rejected(error))
            }
        }
    }

    fn resolve(
        &mut self,
        env: &mut GameEnv<'_>,
        intent: Intent,
    ) -> Result<TurnOutcome, ActionError> {
        let cost = match intent {
            Intent::Move(direction) => {
                move_or_attack(self.state, env, direction)?;
                TurnCost::Consumed
            }
            Intent::Wait => TurnCost::Consumed,
            Intent::PickUp => pick_up(self.state)?,
            Intent::UseItem { slot } => use_item(self.state, env, slot)?,
            Intent::DropItem { slot } => drop_item(self.state, slot)?,
            Intent::Descend => {
                if !self.on_stairs() {
                    return Err(ActionError::NoStairsHere);
                }
                self.enter_next_level(env);
                return Ok(TurnOutcome::Descended {
                    depth: self.state.depth,
                });
            }
            Intent::Inspect(cell) => {
                return Ok(TurnOutcome::Inspected(views::names_at(self.state, env, cell)));
            }
            Intent::CharacterInfo => {
                return views::character_sheet(self.state)
                    .map(TurnOutcome::Character)
                    .ok_or(ActionError::PlayerMissing);
            }
            Intent::Cancel => return Ok(TurnOutcome::Idle),
            Intent::Exit => return Ok(TurnOutcome::Exit),
        };

        if !cost.is_consumed() {
            return Ok(TurnOutcome::Idle);
        }
        refresh_vision(self.state, env);
        if !self.state.is_dead() {
            self.tick_world(env);
        }
        Ok(TurnOutcome::Advanced)
    }

    fn on_stairs(&self) -> bool {
        let position = self.state.player_position();
        self.state
            .stairs
            .and_then(|id| self.state.entities.get(id))
            .is_some_and(|stairs| stairs.position == position)
    }
}
