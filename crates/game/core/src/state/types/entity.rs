use super::{Color, EntityId, Position};
use crate::ai::Ai;

/// Draw stacking. Lower layers are drawn first and end up underneath.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderLayer {
    /// Corpses, rubble, stairs.
    #[default]
    Floor,
    Item,
    Actor,
}

/// Which death handler runs when a fighter's hp reaches zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeathKind {
    Player,
    Monster,
    Gateway,
    Boss,
}

/// Combat capability.
///
/// Stores base values only; effective stats are derived on demand by
/// [`crate::stats`] so equipment changes are always reflected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fighter {
    pub base_max_hp: i32,
    pub hp: i32,
    pub base_defense: i32,
    pub base_power: i32,
    /// Reward granted on death for monsters, accumulated experience for the player.
    pub xp: u32,
    pub death: DeathKind,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32, xp: u32, death: DeathKind) -> Self {
        Self {
            base_max_hp: hp,
            hp,
            base_defense: defense,
            base_power: power,
            xp,
            death,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Effect applied when an item is used from the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ItemEffect {
    Heal,
    Lightning,
    Confuse,
    Fireball,
}

/// Item capability. Items without an effect cannot be used (equipment toggles instead).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub effect: Option<ItemEffect>,
}

impl Item {
    pub fn with_effect(effect: ItemEffect) -> Self {
        Self {
            effect: Some(effect),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    #[strum(serialize = "right hand")]
    RightHand,
    #[strum(serialize = "left hand")]
    LeftHand,
    #[strum(serialize = "chest")]
    Chest,
}

/// Equipment capability. Only counts toward stats while `equipped` and
/// carried in the player's inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    pub slot: EquipmentSlot,
    pub equipped: bool,
    pub power_bonus: i32,
    pub defense_bonus: i32,
    pub max_hp_bonus: i32,
}

impl Equipment {
    pub fn new(slot: EquipmentSlot) -> Self {
        Self {
            slot,
            equipped: false,
            power_bonus: 0,
            defense_bonus: 0,
            max_hp_bonus: 0,
        }
    }

    pub fn power(mut self, bonus: i32) -> Self {
        self.power_bonus = bonus;
        self
    }

    pub fn defense(mut self, bonus: i32) -> Self {
        self.defense_bonus = bonus;
        self
    }

    pub fn max_hp(mut self, bonus: i32) -> Self {
        self.max_hp_bonus = bonus;
        self
    }
}

/// Generic world object: player, monster, item, stairs, corpse.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id: EntityId,
    pub position: Position,
    pub glyph: char,
    pub color: Color,
    pub name: String,
    pub blocks: bool,
    pub always_visible: bool,
    pub layer: RenderLayer,

    pub fighter: Option<Fighter>,
    pub ai: Option<Ai>,
    pub item: Option<Item>,
    pub equipment: Option<Equipment>,
}

impl Entity {
    pub fn new(
        id: EntityId,
        position: Position,
        glyph: char,
        name: impl Into<String>,
        color: Color,
    ) -> Self {
        Self {
            id,
            position,
            glyph,
            color,
            name: name.into(),
            blocks: false,
            always_visible: false,
            layer: RenderLayer::Floor,
            fighter: None,
            ai: None,
            item: None,
            equipment: None,
        }
    }

    /// Marks the entity as a blocking actor.
    pub fn actor(mut self, fighter: Fighter) -> Self {
        self.blocks = true;
        self.layer = RenderLayer::Actor;
        self.fighter = Some(fighter);
        self
    }

    pub fn with_ai(mut self, ai: Ai) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.layer = RenderLayer::Item;
        self.item = Some(item);
        self
    }

    /// Equipment always carries an effect-less item capability.
    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.layer = RenderLayer::Item;
        self.item = Some(self.item.take().unwrap_or_default());
        self.equipment = Some(equipment);
        self
    }

    pub fn always_visible(mut self) -> Self {
        self.always_visible = true;
        self
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn is_equipped(&self) -> bool {
        self.equipment.as_ref().is_some_and(|eq| eq.equipped)
    }

    pub fn distance_to(&self, other: &Entity) -> f64 {
        self.position.distance(other.position)
    }
}

/// Uppercases the first character, leaving the rest untouched.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
