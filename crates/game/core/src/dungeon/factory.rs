//! Entity catalogue.
//!
//! Every creature, item and fixture that can appear in the world is built
//! here from its [`EntityKind`].

use crate::ai::{Ai, BasicAi, BossAi, RangedAi, SpawnerAi};
use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{
    Color, DeathKind, Entity, EntityId, Equipment, EquipmentSlot, Fighter, GameState, Item,
    ItemEffect, Position, RenderLayer,
};

/// Catalogue keys. The snake_case names are what content files use.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EntityKind {
    Player,

    // monsters
    Goblin,
    /// Two goblins side by side.
    GoblinPair,
    Orc,
    Troll,
    Nightmare,
    Fletchling,
    FletchlingGateway,
    GoblinPrince,
    Archer,
    EliteArcher,
    GoblinKing,

    // consumables
    Heal,
    Lightning,
    Confuse,
    Fireball,
    /// Single-shot lightning item granted as a level-up reward.
    RayGun,

    // equipment
    RustyPole,
    MetalPlate,
    ThickVest,

    Stairs,
}

impl EntityKind {
    pub fn is_monster(self) -> bool {
        !matches!(
            self,
            Self::Player
                | Self::Heal
                | Self::Lightning
                | Self::Confuse
                | Self::Fireball
                | Self::RayGun
                | Self::RustyPole
                | Self::MetalPlate
                | Self::ThickVest
                | Self::Stairs
        )
    }
}

fn monster(
    id: EntityId,
    position: Position,
    glyph: char,
    name: &str,
    color: Color,
    fighter: Fighter,
    ai: Ai,
) -> Entity {
    Entity::new(id, position, glyph, name, color)
        .actor(fighter)
        .with_ai(ai)
}

fn consumable(id: EntityId, position: Position, glyph: char, name: &str, color: Color, effect: ItemEffect) -> Entity {
    Entity::new(id, position, glyph, name, color).with_item(Item::with_effect(effect))
}

/// Builds a single entity without adding it to the world.
///
/// A [`EntityKind::GoblinPair`] builds just the first goblin; use [`spawn`]
/// to place both.
pub fn build(state: &mut GameState, kind: EntityKind, position: Position) -> Entity {
    let id = if kind == EntityKind::Player {
        EntityId::PLAYER
    } else {
        state.allocate_entity_id()
    };
    let p = position;

    match kind {
        EntityKind::Player => Entity::new(id, p, '@', "player", Color::WHITE)
            .actor(Fighter::new(30, 2, 5, 0, DeathKind::Player)),

        EntityKind::Goblin | EntityKind::GoblinPair => monster(
            id,
            p,
            'g',
            "goblin",
            Color::DARK_RED,
            Fighter::new(10, 0, 3, 10, DeathKind::Monster),
            Ai::Basic(BasicAi::new(2)),
        ),
        EntityKind::Orc => monster(
            id,
            p,
            'o',
            "orc",
            Color::DESATURATED_GREEN,
            Fighter::new(20, 0, 4, 20, DeathKind::Monster),
            Ai::Basic(BasicAi::new(3)),
        ),
        EntityKind::Troll => monster(
            id,
            p,
            'T',
            "troll",
            Color::DARKER_GREEN,
            Fighter::new(40, 1, 10, 50, DeathKind::Monster),
            Ai::Basic(BasicAi::new(4)),
        ),
        EntityKind::Nightmare => monster(
            id,
            p,
            'N',
            "nightmare",
            Color::rgb(191, 47, 0),
            Fighter::new(100, 10, 10, 1000, DeathKind::Monster),
            Ai::Basic(BasicAi::new(1)),
        ),
        EntityKind::Fletchling => monster(
            id,
            p,
            'f',
            "fletchling",
            Color::DARK_ORANGE,
            Fighter::new(2, 5, 7, 0, DeathKind::Monster),
            Ai::Basic(BasicAi::new(2)),
        ),
        EntityKind::FletchlingGateway => monster(
            id,
            p,
            'G',
            "fletchling gateway",
            Color::DARK_ORANGE,
            Fighter::new(75, 0, 0, 1000, DeathKind::Gateway),
            Ai::Spawner(SpawnerAi::new(EntityKind::Fletchling)),
        ),
        EntityKind::GoblinPrince => monster(
            id,
            p,
            'P',
            "goblin prince",
            Color::DARK_GREY,
            Fighter::new(200, 3, 10, 1500, DeathKind::Monster),
            Ai::Boss(BossAi::new(Some(Ai::Ranged(RangedAi::new(RangedAi::DEFAULT_PERIOD, 8))))),
        ),
        EntityKind::Archer => monster(
            id,
            p,
            'a',
            "archer",
            Color::WHITE,
            Fighter::new(60, 2, 10, 300, DeathKind::Monster),
            Ai::Ranged(RangedAi::new(RangedAi::DEFAULT_PERIOD, GameConfig::DEFAULT_TORCH_RADIUS as u32)),
        ),
        EntityKind::EliteArcher => monster(
            id,
            p,
            'A',
            "elite archer",
            Color::SILVER,
            Fighter::new(100, 2, 10, 500, DeathKind::Monster),
            Ai::Ranged(RangedAi::new(2, GameConfig::DEFAULT_TORCH_RADIUS as u32)),
        ),
        EntityKind::GoblinKing => monster(
            id,
            p,
            'K',
            "Goblin King",
            Color::DARK_GREY,
            Fighter::new(400, 4, 12, 5000, DeathKind::Boss),
            Ai::Boss(BossAi::new(Some(Ai::Ranged(RangedAi::new(RangedAi::DEFAULT_PERIOD, 15))))),
        ),

        EntityKind::Heal => consumable(id, p, '!', "first-aid kit", Color::LIGHT_GREEN, ItemEffect::Heal),
        EntityKind::Lightning => consumable(id, p, '#', "ray gun", Color::SKY, ItemEffect::Lightning),
        EntityKind::RayGun => {
            consumable(id, p, '#', "ray gun (1 shot)", Color::SKY, ItemEffect::Lightning)
        }
        EntityKind::Confuse => {
            consumable(id, p, '#', "flashbang", Color::LIGHT_YELLOW, ItemEffect::Confuse)
        }
        EntityKind::Fireball => {
            consumable(id, p, '#', "cloud of poison", Color::LIGHT_GREEN, ItemEffect::Fireball)
        }

        EntityKind::RustyPole => Entity::new(id, p, '/', "rusty pole", Color::BRASS)
            .with_equipment(Equipment::new(EquipmentSlot::RightHand).power(2)),
        EntityKind::MetalPlate => Entity::new(id, p, '+', "metal plate", Color::SILVER)
            .with_equipment(Equipment::new(EquipmentSlot::LeftHand).defense(2)),
        EntityKind::ThickVest => Entity::new(id, p, '&', "thick vest", Color::DARK_SEPIA)
            .with_equipment(Equipment::new(EquipmentSlot::Chest).max_hp(30)),

        EntityKind::Stairs => {
            let mut stairs = Entity::new(id, p, '<', "stairs", Color::WHITE).always_visible();
            stairs.layer = RenderLayer::Floor;
            stairs
        }
    }
}

/// Builds an entity and appends it to the world. Returns the id of the
/// (first) entity placed.
///
/// A goblin pair places its second goblin on a random free neighbor; if none
/// turns up within the placement budget the second goblin is skipped.
pub fn spawn(state: &mut GameState, kind: EntityKind, position: Position) -> EntityId {
    let entity = build(state, kind, position);
    let id = entity.id;
    state.entities.push(entity);

    if kind == EntityKind::GoblinPair {
        for _ in 0..GameConfig::PLACEMENT_ATTEMPTS {
            let (dx, dy) = state.rng.step();
            let cell = position.offset(dx, dy);
            if cell != position && !state.is_blocked(cell) {
                let second = build(state, EntityKind::Goblin, cell);
                state.entities.push(second);
                break;
            }
        }
    }
    id
}
