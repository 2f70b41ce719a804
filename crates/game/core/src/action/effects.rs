//! Consumable item effects.
//!
//! An effect either happens completely or is refused with the world left as
//! it was; only a refused effect keeps the item.

use super::{ActionError, closest_monster, target_monster, target_tile};
use crate::ai::{Ai, ConfusedAi};
use crate::combat::{heal, take_damage};
use crate::env::GameEnv;
use crate::state::{Color, EntityId, GameState, ItemEffect};

/// Runs one item effect on behalf of the player.
pub fn apply_effect(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    effect: ItemEffect,
) -> Result<(), ActionError> {
    tracing::debug!(%effect, "applying item effect");
    match effect {
        ItemEffect::Heal => cast_heal(state),
        ItemEffect::Lightning => cast_lightning(state, env),
        ItemEffect::Confuse => cast_confuse(state, env),
        ItemEffect::Fireball => cast_fireball(state, env),
    }
}

fn cast_heal(state: &mut GameState) -> Result<(), ActionError> {
    let stats = state.stats(EntityId::PLAYER).ok_or(ActionError::PlayerMissing)?;
    if stats.hp >= stats.max_hp {
        return Err(ActionError::AlreadyAtFullHealth);
    }
    let amount = state.config.heal_amount;
    state.message("Your wounds start to feel better!", Color::LIGHT_VIOLET);
    heal(state, EntityId::PLAYER, amount);
    Ok(())
}

fn cast_lightning(state: &mut GameState, env: &mut GameEnv<'_>) -> Result<(), ActionError> {
    let target = closest_monster(state, env, state.config.lightning_range)
        .ok_or(ActionError::NoValidTarget)?;
    let damage = state.config.lightning_damage;
    let name = state
        .entities
        .get(target)
        .map(|entity| entity.name.clone())
        .unwrap_or_default();
    state.message(
        format!("You shot a bolt of lightning at the {name}! The damage is {damage} hit points."),
        Color::LIGHT_BLUE,
    );
    take_damage(state, env, target, damage);
    Ok(())
}

fn cast_confuse(state: &mut GameState, env: &mut GameEnv<'_>) -> Result<(), ActionError> {
    state.message(
        "Left-click an enemy to confuse it, or right-click to cancel.",
        Color::LIGHT_YELLOW,
    );
    let range = state.config.confuse_range;
    let target = target_monster(state, env, ItemEffect::Confuse, Some(range))?;

    let turns = state.config.confuse_turns;
    let default_period = state.config.confuse_default_speed;
    let Some(monster) = state.entities.get_mut(target) else {
        return Err(ActionError::NoValidTarget);
    };
    let Some(prior) = monster.ai.take() else {
        return Err(ActionError::NoValidTarget);
    };
    let mut confused = ConfusedAi::wrap(prior, turns);
    if confused.counter.period == 0 {
        confused.counter.period = default_period;
    }
    monster.ai = Some(Ai::Confused(confused));
    let text = format!(
        "The {} was caught in the flashbang, and has become disoriented!",
        monster.name
    );
    state.message(text, Color::LIGHT_YELLOW);
    tracing::debug!(%target, turns, "monster confused");
    Ok(())
}

fn cast_fireball(state: &mut GameState, env: &mut GameEnv<'_>) -> Result<(), ActionError> {
    state.message(
        "Left-click a target tile for the poison vial, or right-click to cancel.",
        Color::LIGHT_GREEN,
    );
    let center = target_tile(state, env, ItemEffect::Fireball, None)?;
    let radius = state.config.fireball_radius;
    let damage = state.config.fireball_damage;
    state.message(
        format!("The noxious cloud rapidly expands {radius} tiles from where you threw the vial."),
        Color::LIGHT_GREEN,
    );

    let victims: Vec<(EntityId, String)> = state
        .entities
        .iter()
        .filter(|entity| {
            entity.fighter.is_some() && entity.position.distance(center) <= f64::from(radius)
        })
        .map(|entity| (entity.id, entity.name.clone()))
        .collect();
    for (id, name) in victims {
        state.message(
            format!("The {name} is poisoned, dealing {damage} hit points."),
            Color::LIGHT_GREEN,
        );
        take_damage(state, env, id, damage);
    }
    Ok(())
}
