//! Inventory handling: pick up, use, drop and equipment toggling.
//!
//! Equipment only affects stats while equipped, and a slot holds at most one
//! equipped item. Every change that can lower the effective max hp re-clamps
//! the player's current hp.

use super::{ActionError, TurnCost, apply_effect};
use crate::combat::clamp_hp;
use crate::env::GameEnv;
use crate::state::{Color, EntityId, GameState};

/// Picks up the first item lying under the player.
///
/// Equipment is equipped straight away when its slot is free.
pub fn pick_up(state: &mut GameState) -> Result<TurnCost, ActionError> {
    let position = state.player().ok_or(ActionError::PlayerMissing)?.position;
    let Some((id, name)) = state
        .entities
        .at(position)
        .find(|entity| entity.item.is_some() && !entity.is_player())
        .map(|entity| (entity.id, entity.name.clone()))
    else {
        return Err(ActionError::NothingToPickUp);
    };

    if state.inventory.is_full() {
        return Err(ActionError::InventoryFull { item: name });
    }
    let Some(item) = state.entities.remove(id) else {
        return Err(ActionError::NothingToPickUp);
    };
    let slot = item.equipment.as_ref().map(|equipment| equipment.slot);
    if let Err(item) = state.inventory.push(item) {
        state.entities.push(item);
        return Err(ActionError::InventoryFull { item: name });
    }
    state.message(format!("You picked up a {name}!"), Color::GREEN);
    tracing::debug!(%id, item = %name, "picked up");

    if let Some(slot) = slot
        && state.inventory.equipped_in(slot).is_none()
        && let Some(index) = state.inventory.slot_of(id)
    {
        equip(state, index);
    }
    Ok(TurnCost::Consumed)
}

/// Uses the item in `slot`: equipment toggles, consumables apply their effect
/// and are spent. A cancelled or refused effect keeps the item.
pub fn use_item(
    state: &mut GameState,
    env: &mut GameEnv<'_>,
    slot: usize,
) -> Result<TurnCost, ActionError> {
    let item = state.inventory.get(slot).ok_or(ActionError::InvalidSlot(slot))?;
    if item.equipment.is_some() {
        toggle_equip(state, slot);
        return Ok(TurnCost::Consumed);
    }

    let id = item.id;
    let Some(effect) = item.item.as_ref().and_then(|capability| capability.effect) else {
        return Err(ActionError::InvalidUse {
            item: item.name.clone(),
        });
    };

    apply_effect(state, env, effect)?;
    // Effects may append rewards to the inventory, so look the slot up again.
    if let Some(index) = state.inventory.slot_of(id) {
        state.inventory.remove(index);
    }
    Ok(TurnCost::Consumed)
}

/// Drops the item in `slot` at the player's feet, dequipping it first.
pub fn drop_item(state: &mut GameState, slot: usize) -> Result<TurnCost, ActionError> {
    if state.inventory.get(slot).is_none() {
        return Err(ActionError::InvalidSlot(slot));
    }
    dequip(state, slot);

    let position = state.player_position();
    let Some(mut item) = state.inventory.remove(slot) else {
        return Err(ActionError::InvalidSlot(slot));
    };
    item.position = position;
    state.message(format!("You dropped a {}.", item.name), item.color);
    state.entities.push(item);
    Ok(TurnCost::Consumed)
}

/// Equips if unequipped, dequips otherwise. Non-equipment is ignored.
pub fn toggle_equip(state: &mut GameState, slot: usize) {
    match state.inventory.get(slot).map(|item| item.is_equipped()) {
        Some(true) => dequip(state, slot),
        Some(false) => equip(state, slot),
        None => {}
    }
}

/// Equips the item in `slot`, dequipping whatever occupied its equipment slot.
/// Equipping an already-equipped item changes nothing.
pub fn equip(state: &mut GameState, slot: usize) {
    let Some(item) = state.inventory.get(slot) else {
        return;
    };
    let Some(equipment_slot) = item.equipment.as_ref().map(|equipment| equipment.slot) else {
        return;
    };
    if item.is_equipped() {
        return;
    }

    if let Some(occupant) = state.inventory.equipped_in(equipment_slot) {
        dequip(state, occupant);
    }

    let Some(item) = state.inventory.get_mut(slot) else {
        return;
    };
    let Some(equipment) = item.equipment.as_mut() else {
        return;
    };
    equipment.equipped = true;
    let text = format!("Equipped {} on {}.", item.name, equipment_slot);
    state.message(text, Color::LIGHT_GREEN);
}

/// Dequips the item in `slot`. Dequipping an unequipped item changes nothing.
pub fn dequip(state: &mut GameState, slot: usize) {
    let Some(item) = state.inventory.get_mut(slot) else {
        return;
    };
    let Some(equipment) = item.equipment.as_mut().filter(|equipment| equipment.equipped) else {
        return;
    };
    equipment.equipped = false;
    let text = format!("Dequipped {} from {}.", item.name, equipment.slot);
    state.message(text, Color::LIGHT_GREEN);
    clamp_hp(state, EntityId::PLAYER);
}
