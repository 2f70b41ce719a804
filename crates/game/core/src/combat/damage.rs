//! Damage calculation and application.

use super::death::handle_death;
use crate::env::GameEnv;
use crate::state::{Color, EntityId, GameState, capitalize};
use crate::stats::StatsSnapshot;

/// What a single melee exchange did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Damage was applied. `killed` is set when this hit ran the death handler.
    Hit { damage: i32, killed: bool },
    /// Defense absorbed everything; nothing changed.
    NoEffect,
    /// Either side is missing or has no fighter capability.
    Invalid,
}

/// Raw melee damage: attacker power minus defender defense.
///
/// May be zero or negative, in which case the attack has no effect.
pub fn calculate_damage(attacker: &StatsSnapshot, defender: &StatsSnapshot) -> i32 {
    attacker.power - defender.defense
}

/// Resolves one attack from `attacker` against `target` using effective stats.
pub fn attack(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    attacker: EntityId,
    target: EntityId,
) -> AttackOutcome {
    let (Some(attacker_stats), Some(target_stats)) = (state.stats(attacker), state.stats(target))
    else {
        return AttackOutcome::Invalid;
    };
    let (Some(attacker_name), Some(target_name)) = (
        state.entities.get(attacker).map(|e| capitalize(&e.name)),
        state.entities.get(target).map(|e| e.name.clone()),
    ) else {
        return AttackOutcome::Invalid;
    };

    let damage = calculate_damage(&attacker_stats, &target_stats);
    if damage > 0 {
        state.message(
            format!("{attacker_name} attacks {target_name} for {damage} hit points."),
            Color::LIGHT_RED,
        );
        let killed = take_damage(state, env, target, damage);
        AttackOutcome::Hit { damage, killed }
    } else {
        state.message(
            format!("{attacker_name} attacks {target_name} but it has no effect!"),
            Color::LIGHT_RED,
        );
        AttackOutcome::NoEffect
    }
}

/// Subtracts `amount` from the target's hit points, clamping at zero.
///
/// When this brings a living fighter to zero, the player is credited with the
/// victim's experience (unless the victim is the player) and the death handler
/// runs. Already-dead fighters are left untouched, so a death is handled once.
/// Returns true if this call killed the target.
pub fn take_damage(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    target: EntityId,
    amount: i32,
) -> bool {
    if amount <= 0 {
        return false;
    }
    let Some(fighter) = state
        .entities
        .get_mut(target)
        .and_then(|entity| entity.fighter.as_mut())
    else {
        return false;
    };
    if !fighter.is_alive() {
        return false;
    }

    fighter.hp = (fighter.hp - amount).max(0);
    if fighter.is_alive() {
        return false;
    }

    let reward = fighter.xp;
    let death = fighter.death;
    if !target.is_player()
        && let Some(player) = state.player_mut().and_then(|p| p.fighter.as_mut())
    {
        player.xp = player.xp.saturating_add(reward);
    }
    tracing::debug!(%target, ?death, reward, "fighter died");
    handle_death(state, env, target, death, reward);
    true
}

/// Restores hit points without exceeding the effective maximum.
pub fn heal(state: &mut GameState, target: EntityId, amount: i32) {
    let Some(max_hp) = state.stats(target).map(|stats| stats.max_hp) else {
        return;
    };
    if let Some(fighter) = state.entities.get_mut(target).and_then(|e| e.fighter.as_mut()) {
        fighter.hp = (fighter.hp + amount).min(max_hp);
    }
}

/// Pulls current hit points back under the effective maximum.
///
/// Needed after a max-hp bonus disappears (dequipping or dropping gear).
pub fn clamp_hp(state: &mut GameState, target: EntityId) {
    let Some(max_hp) = state.stats(target).map(|stats| stats.max_hp) else {
        return;
    };
    if let Some(fighter) = state.entities.get_mut(target).and_then(|e| e.fighter.as_mut()) {
        fighter.hp = fighter.hp.min(max_hp);
    }
}
