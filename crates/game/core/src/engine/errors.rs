//! Errors surfaced by the engine itself.
//!
//! Gameplay refusals are not errors at this level: they are resolved in place
//! and reported through [`super::TurnOutcome::Rejected`]. What remains is
//! misuse of the engine by its caller.

use crate::action::Intent;
use crate::error::{ErrorContext, ErrorSeverity, GameError};
use crate::state::Lifecycle;

/// Errors surfaced while executing an intent through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    /// Only exit is accepted once the player has died.
    #[error("intent '{}' is not accepted while {lifecycle:?}", intent.as_snake_case())]
    NotAccepted {
        intent: Intent,
        lifecycle: Lifecycle,
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },

    /// The player entity has gone missing from the world.
    #[error("player entity is missing")]
    MissingPlayer {
        #[cfg_attr(feature = "serde", serde(skip))]
        context: ErrorContext,
    },
}

impl ExecuteError {
    pub fn not_accepted(intent: Intent, lifecycle: Lifecycle, turn: u64) -> Self {
        Self::NotAccepted {
            intent,
            lifecycle,
            context: ErrorContext::new(turn),
        }
    }

    pub fn missing_player(turn: u64) -> Self {
        Self::MissingPlayer {
            context: ErrorContext::new(turn),
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotAccepted { .. } => ErrorSeverity::Validation,
            Self::MissingPlayer { .. } => ErrorSeverity::Fatal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::NotAccepted { context, .. } => Some(context),
            Self::MissingPlayer { context } => Some(context),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotAccepted { .. } => "EXECUTE_NOT_ACCEPTED",
            Self::MissingPlayer { .. } => "EXECUTE_MISSING_PLAYER",
        }
    }
}
