//! Modal prompts answered outside the core.
//!
//! Targeting and level-up rewards are synchronous sub-dialogues: the engine
//! asks, the frontend answers, and no world tick passes while it waits.

use std::collections::VecDeque;

use crate::state::{ItemEffect, Position};

/// Reward offered on every level-up.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LevelReward {
    /// +15 max hp and +10 current hp.
    Survival,
    /// +1 power.
    Force,
    /// +1 defense.
    Protection,
    /// Two single-shot ray guns; needs two free inventory slots.
    RayGuns,
}

impl LevelReward {
    /// Menu label shown to the player.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Survival => "Medal of Survival (+15 Max HP, +10 HP)",
            Self::Force => "Medal of Force (+1 attack)",
            Self::Protection => "Medal of Protection (+1 defense)",
            Self::RayGuns => "Ray Gun x2",
        }
    }
}

/// What kind of cell the targeting prompt must resolve to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetKind {
    /// Any visible cell.
    Tile,
    /// A visible cell holding a monster.
    Monster,
}

/// Describes a pending targeting prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetRequest {
    pub effect: ItemEffect,
    pub kind: TargetKind,
    /// Maximum distance from the player, if limited.
    pub max_range: Option<u32>,
}

/// Answers modal prompts.
pub trait PromptOracle {
    /// Picks a level-up reward. Called again if the choice is rejected.
    fn choose_level_reward(&mut self, level: u32) -> LevelReward;

    /// Picks a target cell, or `None` to cancel.
    fn select_target(&mut self, request: &TargetRequest) -> Option<Position>;
}

/// Queue-backed prompt answers for headless play and tests.
///
/// When the reward queue runs dry it answers [`LevelReward::Survival`]; when
/// the target queue runs dry it cancels.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompts {
    rewards: VecDeque<LevelReward>,
    targets: VecDeque<Option<Position>>,
}

impl ScriptedPrompts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rewards(mut self, rewards: impl IntoIterator<Item = LevelReward>) -> Self {
        self.rewards.extend(rewards);
        self
    }

    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Option<Position>>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn push_reward(&mut self, reward: LevelReward) {
        self.rewards.push_back(reward);
    }

    pub fn push_target(&mut self, target: Option<Position>) {
        self.targets.push_back(target);
    }

    /// Answers not yet consumed, as `(rewards, targets)`.
    pub fn remaining(&self) -> (usize, usize) {
        (self.rewards.len(), self.targets.len())
    }
}

impl PromptOracle for ScriptedPrompts {
    fn choose_level_reward(&mut self, _level: u32) -> LevelReward {
        self.rewards.pop_front().unwrap_or(LevelReward::Survival)
    }

    fn select_target(&mut self, _request: &TargetRequest) -> Option<Position> {
        self.targets.pop_front().flatten()
    }
}
