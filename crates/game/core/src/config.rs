/// Game configuration constants and tunable parameters.
///
/// Every field has a default matching the classic ruleset, so partial TOML
/// files only need to list the values they override.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Map width in tiles.
    pub map_width: i32,
    /// Map height in tiles.
    pub map_height: i32,

    /// Smallest room edge proposed by the generator (inclusive).
    pub room_min_size: i32,
    /// Largest room edge proposed by the generator (inclusive).
    pub room_max_size: i32,
    /// Number of room proposals per standard level.
    pub max_rooms: u32,
    /// Depth at which the fixed boss layout replaces the random generator.
    pub boss_depth: u32,

    /// Radius handed to the visibility oracle around the player.
    pub torch_radius: i32,
    /// Number of inventory slots.
    pub inventory_capacity: usize,
    /// Number of wrapped lines retained in the message log.
    pub message_log_height: usize,
    /// Column width used when wrapping messages.
    pub message_width: usize,

    /// Experience needed to leave level 1.
    pub level_up_base: u32,
    /// Additional experience needed per level after the first.
    pub level_up_factor: u32,

    pub heal_amount: i32,
    pub lightning_range: u32,
    pub lightning_damage: i32,
    pub confuse_range: u32,
    pub confuse_turns: u32,
    /// Period used for a confused entity whose prior AI has no period.
    pub confuse_default_speed: u32,
    pub fireball_radius: u32,
    pub fireball_damage: i32,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Cells in a telegraphed line attack.
    pub const TELEGRAPH_CELLS: usize = 3;
    /// Random neighbor attempts a spawner makes per acting tick.
    pub const SPAWN_ATTEMPTS: u32 = 12;
    /// Upper bound on random placement attempts before giving up.
    pub const PLACEMENT_ATTEMPTS: u32 = 32;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAP_WIDTH: i32 = 80;
    pub const DEFAULT_MAP_HEIGHT: i32 = 43;
    pub const DEFAULT_ROOM_MIN_SIZE: i32 = 6;
    pub const DEFAULT_ROOM_MAX_SIZE: i32 = 14;
    pub const DEFAULT_MAX_ROOMS: u32 = 60;
    pub const DEFAULT_BOSS_DEPTH: u32 = 10;
    pub const DEFAULT_TORCH_RADIUS: i32 = 6;
    pub const DEFAULT_INVENTORY_CAPACITY: usize = 26;
    pub const DEFAULT_MESSAGE_LOG_HEIGHT: usize = 6;
    pub const DEFAULT_MESSAGE_WIDTH: usize = 58;
    pub const DEFAULT_LEVEL_UP_BASE: u32 = 400;
    pub const DEFAULT_LEVEL_UP_FACTOR: u32 = 400;
    pub const DEFAULT_HEAL_AMOUNT: i32 = 4;
    pub const DEFAULT_LIGHTNING_RANGE: u32 = 5;
    pub const DEFAULT_LIGHTNING_DAMAGE: i32 = 50;
    pub const DEFAULT_CONFUSE_RANGE: u32 = 3;
    pub const DEFAULT_CONFUSE_TURNS: u32 = 2;
    pub const DEFAULT_CONFUSE_SPEED: u32 = 2;
    pub const DEFAULT_FIREBALL_RADIUS: u32 = 2;
    pub const DEFAULT_FIREBALL_DAMAGE: i32 = 15;

    pub fn new() -> Self {
        Self {
            map_width: Self::DEFAULT_MAP_WIDTH,
            map_height: Self::DEFAULT_MAP_HEIGHT,
            room_min_size: Self::DEFAULT_ROOM_MIN_SIZE,
            room_max_size: Self::DEFAULT_ROOM_MAX_SIZE,
            max_rooms: Self::DEFAULT_MAX_ROOMS,
            boss_depth: Self::DEFAULT_BOSS_DEPTH,
            torch_radius: Self::DEFAULT_TORCH_RADIUS,
            inventory_capacity: Self::DEFAULT_INVENTORY_CAPACITY,
            message_log_height: Self::DEFAULT_MESSAGE_LOG_HEIGHT,
            message_width: Self::DEFAULT_MESSAGE_WIDTH,
            level_up_base: Self::DEFAULT_LEVEL_UP_BASE,
            level_up_factor: Self::DEFAULT_LEVEL_UP_FACTOR,
            heal_amount: Self::DEFAULT_HEAL_AMOUNT,
            lightning_range: Self::DEFAULT_LIGHTNING_RANGE,
            lightning_damage: Self::DEFAULT_LIGHTNING_DAMAGE,
            confuse_range: Self::DEFAULT_CONFUSE_RANGE,
            confuse_turns: Self::DEFAULT_CONFUSE_TURNS,
            confuse_default_speed: Self::DEFAULT_CONFUSE_SPEED,
            fireball_radius: Self::DEFAULT_FIREBALL_RADIUS,
            fireball_damage: Self::DEFAULT_FIREBALL_DAMAGE,
        }
    }

    /// Small map preset used by tests and quick headless runs.
    pub fn with_map_size(map_width: i32, map_height: i32) -> Self {
        Self {
            map_width,
            map_height,
            ..Self::new()
        }
    }

    /// Experience required to advance from `level` to `level + 1`.
    pub fn level_up_threshold(&self, level: u32) -> u32 {
        self.level_up_base + level.saturating_sub(1) * self.level_up_factor
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
