//! Session lifecycle: main menu, play, save on exit.
//!
//! A [`Session`] owns at most one game at a time together with the field of
//! view that goes with it. Frontends drive it with intents and answer prompts
//! through whatever [`PromptOracle`] they hold.

use thiserror::Error;

use game_core::error::{ErrorSeverity, GameError};
use game_core::{
    Env, ExecuteError, GameConfig, GameEngine, GameState, Intent, PromptOracle,
    RayCastVisibility, ScriptedPrompts, SpawnTables, TurnOutcome, new_game, refresh_vision,
};

use crate::repository::{RepositoryError, SaveRepository};

/// Slot used by "continue last game" and by saving on exit.
pub const SAVE_SLOT: &str = "savegame";

/// Which top-level screen the session is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Playing,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No saved game to load.")]
    NoSavedGame,

    #[error("failed to load saved game")]
    LoadFailure(#[source] RepositoryError),

    #[error("failed to save game")]
    SaveFailure(#[source] RepositoryError),

    #[error("no game in progress")]
    NotPlaying,

    #[error(transparent)]
    Execute(#[from] ExecuteError),
}

impl GameError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSavedGame | Self::LoadFailure(_) | Self::SaveFailure(_) => {
                ErrorSeverity::Recoverable
            }
            Self::NotPlaying => ErrorSeverity::Validation,
            Self::Execute(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoSavedGame => "SESSION_NO_SAVED_GAME",
            Self::LoadFailure(_) => "SESSION_LOAD_FAILURE",
            Self::SaveFailure(_) => "SESSION_SAVE_FAILURE",
            Self::NotPlaying => "SESSION_NOT_PLAYING",
            Self::Execute(error) => error.error_code(),
        }
    }
}

pub struct Session<R: SaveRepository> {
    repository: R,
    config: GameConfig,
    tables: SpawnTables,
    vision: RayCastVisibility,
    game: Option<GameState>,
}

impl<R: SaveRepository> Session<R> {
    /// Creates a session at the main menu.
    pub fn new(repository: R, config: GameConfig, tables: SpawnTables) -> Self {
        Self {
            repository,
            config,
            tables,
            vision: RayCastVisibility::new(),
            game: None,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.game.is_some() {
            Screen::Playing
        } else {
            Screen::MainMenu
        }
    }

    /// The game in progress, if any.
    pub fn state(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    /// Field of view of the game in progress, for renderers.
    pub fn vision(&self) -> &RayCastVisibility {
        &self.vision
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Starts a fresh game, discarding any game in progress without saving.
    pub fn start_new_game(&mut self, seed: u64) -> &GameState {
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut self.vision, &mut prompts);
        let state = new_game(self.config.clone(), seed, &self.tables, &mut env.as_game_env());
        tracing::info!(seed, "session started a new game");
        self.game.insert(state)
    }

    /// Loads the last saved game. On failure the session stays where it was.
    pub fn continue_game(&mut self) -> Result<&GameState, SessionError> {
        let mut state = match self.repository.load(SAVE_SLOT) {
            Ok(Some(state)) => state,
            Ok(None) => return Err(SessionError::NoSavedGame),
            Err(error) => {
                tracing::warn!(code = error.error_code(), %error, "could not load saved game");
                return Err(SessionError::LoadFailure(error));
            }
        };

        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut self.vision, &mut prompts);
        refresh_vision(&mut state, &mut env.as_game_env());
        tracing::info!(depth = state.depth, turn = state.turn, "session resumed a saved game");
        Ok(&*self.game.insert(state))
    }

    /// Saves the game in progress to [`SAVE_SLOT`].
    pub fn save(&self) -> Result<(), SessionError> {
        let state = self.game.as_ref().ok_or(SessionError::NotPlaying)?;
        self.repository
            .save(SAVE_SLOT, state)
            .map_err(SessionError::SaveFailure)
    }

    /// Executes one intent in the game in progress.
    ///
    /// [`Intent::Exit`] saves the game and returns to the main menu; if the
    /// save fails the game stays in progress.
    pub fn submit<P: PromptOracle>(
        &mut self,
        intent: Intent,
        prompts: &mut P,
    ) -> Result<TurnOutcome, SessionError> {
        let state = self.game.as_mut().ok_or(SessionError::NotPlaying)?;
        let mut env = Env::new(&mut self.vision, prompts);
        let outcome = GameEngine::new(state, &self.tables).execute(env.as_game_env(), intent)?;

        if outcome == TurnOutcome::Exit {
            self.save()?;
            self.game = None;
            tracing::info!("game saved, back to the main menu");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemorySaveRepository;
    use game_core::{Direction, Lifecycle};

    fn session() -> Session<InMemorySaveRepository> {
        Session::new(
            InMemorySaveRepository::new(),
            GameConfig::new(),
            SpawnTables::default(),
        )
    }

    #[test]
    fn starts_at_the_main_menu() {
        let session = session();
        assert_eq!(session.screen(), Screen::MainMenu);
        assert!(session.state().is_none());
    }

    #[test]
    fn continue_without_a_save_stays_at_the_menu() {
        let mut session = session();
        assert!(matches!(session.continue_game(), Err(SessionError::NoSavedGame)));
        assert_eq!(session.screen(), Screen::MainMenu);
    }

    #[test]
    fn exit_saves_and_continue_resumes() {
        let mut session = session();
        let mut prompts = ScriptedPrompts::new();
        session.start_new_game(12);
        session
            .submit(Intent::Move(Direction::East), &mut prompts)
            .expect("move");
        let before_exit = session.state().cloned().expect("playing");

        let outcome = session.submit(Intent::Exit, &mut prompts).expect("exit");
        assert_eq!(outcome, TurnOutcome::Exit);
        assert_eq!(session.screen(), Screen::MainMenu);
        assert!(session.repository().exists(SAVE_SLOT));

        let resumed = session.continue_game().expect("continue").clone();
        assert_eq!(resumed, before_exit);
        assert_eq!(session.screen(), Screen::Playing);
    }

    #[test]
    fn corrupt_save_is_a_load_failure() {
        // no player entity
        let broken = GameState::empty(GameConfig::new(), 1);
        let mut session = Session::new(
            InMemorySaveRepository::with_save(SAVE_SLOT, broken),
            GameConfig::new(),
            SpawnTables::default(),
        );
        let error = session.continue_game().unwrap_err();
        assert!(matches!(error, SessionError::LoadFailure(RepositoryError::Invalid(_))));
        assert_eq!(error.error_code(), "SESSION_LOAD_FAILURE");
        assert_eq!(session.screen(), Screen::MainMenu);
    }

    #[test]
    fn intents_need_a_game() {
        let mut session = session();
        let mut prompts = ScriptedPrompts::new();
        assert!(matches!(
            session.submit(Intent::Wait, &mut prompts),
            Err(SessionError::NotPlaying)
        ));
    }

    #[test]
    fn a_dead_runner_can_still_exit() {
        let mut session = session();
        let mut prompts = ScriptedPrompts::new();
        session.start_new_game(3);
        if let Some(state) = session.game.as_mut() {
            state.lifecycle = Lifecycle::Dead;
        }
        assert!(matches!(
            session.submit(Intent::Wait, &mut prompts),
            Err(SessionError::Execute(ExecuteError::NotAccepted { .. }))
        ));
        assert_eq!(session.submit(Intent::Exit, &mut prompts).expect("exit"), TurnOutcome::Exit);
        assert_eq!(session.screen(), Screen::MainMenu);
    }
}
