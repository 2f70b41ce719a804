//! Experience and level-up rewards.

use crate::dungeon::{EntityKind, build};
use crate::env::{GameEnv, LevelReward, PromptOracle};
use crate::state::{Color, GameState};

/// How many times a rejected reward is re-offered before falling back to survival.
pub(crate) const MAX_REWARD_PROMPTS: usize = 8;

/// Converts surplus experience into levels, one reward per level gained.
///
/// Returns the number of levels gained.
pub fn check_level_up(state: &mut GameState, env: &mut GameEnv<'_>) -> u32 {
    let mut gained = 0;
    loop {
        let threshold = state.config.level_up_threshold(state.player_level);
        let Some(fighter) = state.player_mut().and_then(|p| p.fighter.as_mut()) else {
            return gained;
        };
        if fighter.xp < threshold {
            return gained;
        }
        fighter.xp -= threshold;
        state.player_level += 1;
        gained += 1;

        let level = state.player_level;
        state.message(
            format!("You're making things interesting, Runner! You've become level {level}."),
            Color::YELLOW,
        );
        tracing::info!(level, "player levelled up");

        let mut granted = false;
        for _ in 0..MAX_REWARD_PROMPTS {
            let reward = env.prompts().choose_level_reward(level);
            if apply_reward(state, reward) {
                granted = true;
                break;
            }
        }
        if !granted {
            tracing::warn!(
                level,
                attempts = MAX_REWARD_PROMPTS,
                "no grantable reward chosen, falling back to survival"
            );
            apply_reward(state, LevelReward::Survival);
        }
    }
}

/// Grants one reward. Returns false, leaving the state untouched apart from
/// the log, when the reward cannot be granted.
pub fn apply_reward(state: &mut GameState, reward: LevelReward) -> bool {
    if reward == LevelReward::RayGuns {
        if state.inventory.free_slots() < 2 {
            state.message("You do not have room in your inventory.", Color::RED);
            return false;
        }
        let position = state.player_position();
        for _ in 0..2 {
            let gun = build(state, EntityKind::RayGun, position);
            if let Err(gun) = state.inventory.push(gun) {
                tracing::warn!(id = %gun.id, "ray gun did not fit after the free-slot check");
            }
        }
        state.message("You received two ray guns!", Color::SKY);
        return true;
    }

    let Some(fighter) = state.player_mut().and_then(|p| p.fighter.as_mut()) else {
        return false;
    };
    let (text, color) = match reward {
        LevelReward::Survival => {
            fighter.base_max_hp += 15;
            fighter.hp += 10;
            ("You received a medal of survival!", Color::LIGHT_GREEN)
        }
        LevelReward::Force => {
            fighter.base_power += 1;
            ("You received a medal of force!", Color::LIGHT_RED)
        }
        LevelReward::Protection => {
            fighter.base_defense += 1;
            ("You received a medal of protection!", Color::ORANGE)
        }
        LevelReward::RayGuns => return false,
    };
    state.message(text, color);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::env::{Env, RayCastVisibility, ScriptedPrompts};
    use crate::state::{DeathKind, Entity, EntityId, Fighter, ItemEffect, MessageLog, Position};
    use proptest::prelude::*;

    fn player_state(xp: u32, level: u32) -> GameState {
        let mut state = GameState::empty(GameConfig::with_map_size(10, 10), 5);
        let mut fighter = Fighter::new(30, 2, 5, 0, DeathKind::Player);
        fighter.xp = xp;
        state.entities.push(
            Entity::new(EntityId::PLAYER, Position::new(2, 2), '@', "player", Color::WHITE)
                .actor(fighter),
        );
        state.player_level = level;
        state
    }

    fn run(state: &mut GameState, rewards: &[LevelReward]) -> u32 {
        let mut vision = RayCastVisibility::new();
        let mut prompts = ScriptedPrompts::new().with_rewards(rewards.iter().copied());
        let mut env = Env::new(&mut vision, &mut prompts);
        check_level_up(state, &mut env.as_game_env())
    }

    fn xp(state: &GameState) -> u32 {
        state.player().and_then(|p| p.fighter.as_ref()).map_or(0, |f| f.xp)
    }

    #[test]
    fn exact_threshold_levels_once() {
        let mut state = player_state(400, 1);
        assert_eq!(run(&mut state, &[LevelReward::Survival]), 1);
        assert_eq!(state.player_level, 2);
        assert_eq!(xp(&state), 0);
        let stats = state.stats(EntityId::PLAYER).expect("player stats");
        assert_eq!(stats.max_hp, 45);
        assert_eq!(stats.hp, 40);
    }

    #[test]
    fn second_level_needs_eight_hundred() {
        let mut state = player_state(800, 2);
        assert_eq!(run(&mut state, &[LevelReward::Protection]), 1);
        assert_eq!(state.player_level, 3);
        assert_eq!(xp(&state), 0);
        assert_eq!(state.stats(EntityId::PLAYER).map(|s| s.defense), Some(3));
    }

    #[test]
    fn surplus_xp_yields_several_levels_sequentially() {
        // 400 + 800 + 1200 = 2400
        let mut state = player_state(2450, 1);
        let gained = run(
            &mut state,
            &[LevelReward::Force, LevelReward::Force, LevelReward::Protection],
        );
        assert_eq!(gained, 3);
        assert_eq!(state.player_level, 4);
        assert_eq!(xp(&state), 50);
        assert_eq!(state.stats(EntityId::PLAYER).map(|s| s.power), Some(7));
    }

    #[test]
    fn ray_guns_need_two_free_slots() {
        let mut state = player_state(400, 1);
        for _ in 0..state.inventory.capacity() - 1 {
            let filler = build(&mut state, EntityKind::Heal, Position::ORIGIN);
            assert!(state.inventory.push(filler).is_ok());
        }
        run(&mut state, &[LevelReward::RayGuns, LevelReward::Force]);
        assert_eq!(state.inventory.free_slots(), 1);
        assert_eq!(state.stats(EntityId::PLAYER).map(|s| s.power), Some(6));
        assert!(state.messages.contains("You do not have room in your inventory."));
    }

    #[test]
    fn repeated_rejections_fall_back_to_survival() {
        let mut state = player_state(400, 1);
        for _ in 0..state.inventory.capacity() - 1 {
            let filler = build(&mut state, EntityKind::Heal, Position::ORIGIN);
            assert!(state.inventory.push(filler).is_ok());
        }
        state.messages = MessageLog::new(2 * MAX_REWARD_PROMPTS, 80);
        let mut rewards = vec![LevelReward::RayGuns; MAX_REWARD_PROMPTS];
        rewards.push(LevelReward::Force);

        assert_eq!(run(&mut state, &rewards), 1);
        let stats = state.stats(EntityId::PLAYER).expect("player stats");
        assert_eq!(stats.max_hp, 45);
        assert_eq!(stats.hp, 40);
        assert_eq!(stats.power, 5);
        assert_eq!(state.inventory.free_slots(), 1);
        let refusals = state
            .messages
            .iter()
            .filter(|line| line.text == "You do not have room in your inventory.")
            .count();
        assert_eq!(refusals, MAX_REWARD_PROMPTS);
        assert!(state.messages.contains("You received a medal of survival!"));
    }

    #[test]
    fn ray_guns_are_single_shot_lightning() {
        let mut state = player_state(400, 1);
        run(&mut state, &[LevelReward::RayGuns]);
        assert_eq!(state.inventory.len(), 2);
        for gun in state.inventory.iter() {
            assert_eq!(gun.name, "ray gun (1 shot)");
            assert_eq!(gun.item.as_ref().and_then(|item| item.effect), Some(ItemEffect::Lightning));
        }
    }

    proptest! {
        #[test]
        fn xp_stays_below_next_threshold(start in 0u32..20_000) {
            let mut state = player_state(start, 1);
            run(&mut state, &[]);
            let threshold = state.config.level_up_threshold(state.player_level);
            prop_assert!(xp(&state) < threshold);
            prop_assert!(state.player_level >= 1);
        }
    }
}
