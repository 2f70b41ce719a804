//! Common error infrastructure for game-core.
//!
//! Domain-specific errors (e.g. [`crate::action::ActionError`]) live next to
//! the code that raises them; this module only provides the shared
//! classification used by the runtime to decide how to surface a failure.

use crate::state::{EntityId, Position};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player can pick another intent and carry on
/// - **Validation**: the intent itself was malformed for the current state
/// - **Internal**: the world state is inconsistent with itself
/// - **Fatal**: the world state cannot be used any further
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: inventory full, no target in range, prompt cancelled.
    Recoverable,

    /// Examples: empty inventory slot, not standing on stairs.
    Validation,

    /// Examples: dangling entity reference, item without item capability.
    Internal,

    /// Examples: player entity missing from a loaded save.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Contextual information attached to errors for debugging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    /// Entity that triggered the error (if applicable).
    pub actor: Option<EntityId>,

    /// Position where the error occurred (if applicable).
    pub position: Option<Position>,

    /// World turn counter at the time of error.
    pub turn: u64,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(turn: u64) -> Self {
        Self {
            actor: None,
            position: None,
            turn,
        }
    }

    #[must_use]
    pub const fn with_actor(mut self, actor: EntityId) -> Self {
        self.actor = Some(actor);
        self
    }

    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

/// Common trait for all game-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns the context information for this error, if available.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
