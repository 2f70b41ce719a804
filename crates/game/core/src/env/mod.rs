//! Traits describing the collaborators the simulation consults.
//!
//! The visibility oracle answers field-of-view queries and the prompt oracle
//! answers modal dialogs. The [`Env`] aggregate bundles them so the engine
//! can reach everything it needs without coupling to concrete frontends.
mod prompt;
mod rng;
mod vision;

pub use prompt::{LevelReward, PromptOracle, ScriptedPrompts, TargetKind, TargetRequest};
pub use rng::{PcgRng, RngOracle};
pub use vision::{RayCastVisibility, VisibilityOracle};

use crate::state::Position;

/// Aggregates the oracles required by the engine.
pub struct Env<'a, V, P>
where
    V: VisibilityOracle + ?Sized,
    P: PromptOracle + ?Sized,
{
    vision: &'a mut V,
    prompts: &'a mut P,
}

pub type GameEnv<'a> = Env<'a, dyn VisibilityOracle + 'a, dyn PromptOracle + 'a>;

impl<'a, V, P> Env<'a, V, P>
where
    V: VisibilityOracle + ?Sized,
    P: PromptOracle + ?Sized,
{
    pub fn new(vision: &'a mut V, prompts: &'a mut P) -> Self {
        Self { vision, prompts }
    }

    pub fn vision(&self) -> &V {
        &*self.vision
    }

    pub fn vision_mut(&mut self) -> &mut V {
        &mut *self.vision
    }

    pub fn prompts(&mut self) -> &mut P {
        &mut *self.prompts
    }

    /// Shorthand for the visibility oracle's per-cell query.
    pub fn is_visible(&self, position: Position) -> bool {
        self.vision.is_visible(position)
    }
}

impl<'a, V, P> Env<'a, V, P>
where
    V: VisibilityOracle,
    P: PromptOracle,
{
    /// Reborrows this environment as a trait-object based `GameEnv`.
    ///
    /// Use this when you need to convert multiple times (e.g., in a loop).
    pub fn as_game_env(&mut self) -> GameEnv<'_> {
        let vision: &mut dyn VisibilityOracle = &mut *self.vision;
        let prompts: &mut dyn PromptOracle = &mut *self.prompts;
        Env::new(vision, prompts)
    }
}
