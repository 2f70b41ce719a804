//! Read-only projections of the world for renderers.
//!
//! Nothing here mutates state; a frontend can call these between intents as
//! often as it likes.

use crate::env::GameEnv;
use crate::state::{Entity, EntityId, GameState, Position, capitalize};
use crate::stats::CharacterSheet;

/// A value against its maximum, as drawn in a status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bar {
    pub value: i32,
    pub maximum: i32,
}

impl Bar {
    /// Filled cells of a bar `width` cells wide.
    pub fn filled(&self, width: usize) -> usize {
        if self.maximum <= 0 {
            return 0;
        }
        let value = self.value.clamp(0, self.maximum) as usize;
        value * width / self.maximum as usize
    }
}

/// Everything the side panel shows besides the message log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub hp: Bar,
    pub depth: u32,
    pub explored: usize,
    pub floor_tiles: usize,
    pub remaining_enemies: usize,
    pub remaining_items: usize,
}

pub fn hp_bar(state: &GameState) -> Option<Bar> {
    let stats = state.stats(EntityId::PLAYER)?;
    Some(Bar {
        value: stats.hp,
        maximum: stats.max_hp,
    })
}

/// Living non-player fighters on the level.
pub fn remaining_enemies(state: &GameState) -> usize {
    state
        .entities
        .iter()
        .filter(|entity| entity.fighter.is_some() && !entity.is_player())
        .count()
}

/// Items lying on the level (not carried).
pub fn remaining_items(state: &GameState) -> usize {
    state.entities.iter().filter(|entity| entity.item.is_some()).count()
}

pub fn hud(state: &GameState) -> Option<Hud> {
    let (explored, floor_tiles) = state.grid.floor_counts();
    Some(Hud {
        hp: hp_bar(state)?,
        depth: state.depth,
        explored,
        floor_tiles,
        remaining_enemies: remaining_enemies(state),
        remaining_items: remaining_items(state),
    })
}

/// Comma-separated names of the visible entities on `cell`, first letter
/// capitalized. Empty when nothing visible stands there.
pub fn names_at(state: &GameState, env: &GameEnv<'_>, cell: Position) -> String {
    if !env.is_visible(cell) {
        return String::new();
    }
    let names: Vec<&str> = state.entities.at(cell).map(|entity| entity.name.as_str()).collect();
    capitalize(&names.join(", "))
}

pub fn character_sheet(state: &GameState) -> Option<CharacterSheet> {
    let stats = state.stats(EntityId::PLAYER)?;
    let xp = state.player()?.fighter.as_ref()?.xp;
    Some(CharacterSheet {
        level: state.player_level,
        xp,
        next_level_xp: state.config.level_up_threshold(state.player_level),
        max_hp: stats.max_hp,
        power: stats.power,
        defense: stats.defense,
    })
}

/// Entities to draw, bottom layer first. Within a layer the world order is
/// kept. Out-of-view entities are only drawn when always visible and standing
/// on an explored cell.
pub fn drawables<'s>(state: &'s GameState, env: &GameEnv<'_>) -> Vec<&'s Entity> {
    let mut visible: Vec<&Entity> = state
        .entities
        .iter()
        .filter(|entity| {
            env.is_visible(entity.position)
                || (entity.always_visible && state.grid.is_explored(entity.position))
        })
        .collect();
    visible.sort_by_key(|entity| entity.layer);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::testing::{carry, place, room};
    use crate::dungeon::EntityKind;
    use crate::env::{Env, RayCastVisibility, ScriptedPrompts, VisibilityOracle};
    use crate::state::RenderLayer;

    fn sighted(state: &GameState) -> RayCastVisibility {
        let mut vision = RayCastVisibility::new();
        vision.compute(&state.grid, state.player_position(), 6);
        vision
    }

    #[test]
    fn bar_fills_proportionally() {
        let bar = Bar {
            value: 15,
            maximum: 30,
        };
        assert_eq!(bar.filled(20), 10);
        assert_eq!(Bar { value: 0, maximum: 0 }.filled(20), 0);
        assert_eq!(Bar { value: 40, maximum: 30 }.filled(20), 20);
    }

    #[test]
    fn hud_counts_enemies_and_floor_items() {
        let mut state = room();
        place(&mut state, EntityKind::Orc, Position::new(3, 3));
        place(&mut state, EntityKind::Troll, Position::new(4, 3));
        place(&mut state, EntityKind::Heal, Position::new(5, 3));
        carry(&mut state, EntityKind::Confuse);

        let hud = hud(&state).expect("player present");
        assert_eq!(hud.hp, Bar { value: 30, maximum: 30 });
        assert_eq!(hud.depth, 1);
        assert_eq!(hud.remaining_enemies, 2);
        assert_eq!(hud.remaining_items, 1);
        assert_eq!(hud.floor_tiles, 18 * 18);
        assert_eq!(hud.explored, 0);
    }

    #[test]
    fn names_list_visible_entities_only() {
        let mut state = room();
        place(&mut state, EntityKind::Heal, Position::new(11, 10));
        place(&mut state, EntityKind::Goblin, Position::new(11, 10));
        place(&mut state, EntityKind::Orc, Position::new(18, 18));
        let mut vision = sighted(&state);
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);
        let env = env.as_game_env();

        assert_eq!(names_at(&state, &env, Position::new(11, 10)), "First-aid kit, goblin");
        assert_eq!(names_at(&state, &env, Position::new(18, 18)), "");
        assert_eq!(names_at(&state, &env, Position::new(12, 12)), "");
    }

    #[test]
    fn sheet_reports_effective_stats() {
        let mut state = room();
        let pole = carry(&mut state, EntityKind::RustyPole);
        crate::action::equip(&mut state, pole);
        let sheet = character_sheet(&state).expect("player present");
        assert_eq!(sheet.level, 1);
        assert_eq!(sheet.next_level_xp, 400);
        assert_eq!(sheet.power, 7);
        assert_eq!(sheet.defense, 2);
        assert_eq!(sheet.max_hp, 30);
    }

    #[test]
    fn drawables_are_layered_and_filtered() {
        let mut state = room();
        place(&mut state, EntityKind::Goblin, Position::new(11, 10));
        place(&mut state, EntityKind::Heal, Position::new(11, 11));
        let stairs = place(&mut state, EntityKind::Stairs, Position::new(18, 18));
        let mut vision = sighted(&state);
        let mut prompts = ScriptedPrompts::new();
        let mut env = Env::new(&mut vision, &mut prompts);

        let layers: Vec<RenderLayer> = drawables(&state, &env.as_game_env())
            .iter()
            .map(|entity| entity.layer)
            .collect();
        assert_eq!(layers, vec![RenderLayer::Item, RenderLayer::Actor, RenderLayer::Actor]);

        state.grid.mark_explored(Position::new(18, 18));
        let ids: Vec<EntityId> = drawables(&state, &env.as_game_env())
            .iter()
            .map(|entity| entity.id)
            .collect();
        assert_eq!(ids.first(), Some(&stairs));
    }
}
