use std::fmt;

/// Unique identifier for any entity tracked in the state.
///
/// Identifiers are never reused within a game, so they double as stable
/// references across save/load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance between two cells.
    pub fn distance(self, other: Position) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit step from `self` toward `target`, rounding the normalized vector.
    ///
    /// Returns `(0, 0)` when both positions coincide.
    pub fn step_toward(self, target: Position) -> (i32, i32) {
        let distance = self.distance(target);
        if distance == 0.0 {
            return (0, 0);
        }
        let dx = f64::from(target.x - self.x) / distance;
        let dy = f64::from(target.y - self.y) / distance;
        (dx.round() as i32, dy.round() as i32)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions a single step can take.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Grid delta for one step (y grows downward).
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}

/// Display color carried by entities; interpretation is up to the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const DARK_RED: Self = Self::rgb(127, 0, 0);
    pub const DESATURATED_GREEN: Self = Self::rgb(63, 127, 63);
    pub const DARKER_GREEN: Self = Self::rgb(0, 127, 0);
    pub const LIGHT_GREEN: Self = Self::rgb(114, 255, 114);
    pub const DARK_GREEN: Self = Self::rgb(0, 191, 0);
    pub const ORANGE: Self = Self::rgb(255, 127, 0);
    pub const DARK_ORANGE: Self = Self::rgb(191, 95, 0);
    pub const DARK_VIOLET: Self = Self::rgb(95, 0, 191);
    pub const VIOLET: Self = Self::rgb(127, 0, 255);
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    pub const LIGHT_YELLOW: Self = Self::rgb(255, 255, 114);
    pub const LIGHT_CYAN: Self = Self::rgb(114, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const LIGHT_RED: Self = Self::rgb(255, 114, 114);
    pub const DARK_GREY: Self = Self::rgb(95, 95, 95);
    pub const SKY: Self = Self::rgb(0, 191, 255);
    pub const BRASS: Self = Self::rgb(191, 151, 96);
    pub const DARK_SEPIA: Self = Self::rgb(95, 79, 63);
    pub const SILVER: Self = Self::rgb(203, 203, 203);
    pub const GOLD: Self = Self::rgb(229, 191, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const LIGHT_BLUE: Self = Self::rgb(114, 114, 255);
    pub const LIGHT_VIOLET: Self = Self::rgb(185, 114, 255);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_rounds_each_axis() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step_toward(Position::new(5, 0)), (1, 0));
        assert_eq!(origin.step_toward(Position::new(3, 3)), (1, 1));
        // (2, 1) normalizes to (0.894, 0.447)
        assert_eq!(origin.step_toward(Position::new(2, 1)), (1, 0));
        assert_eq!(origin.step_toward(Position::new(-4, -4)), (-1, -1));
        assert_eq!(origin.step_toward(origin), (0, 0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Position::new(1, 1);
        assert_eq!(a.distance(Position::new(4, 5)), 5.0);
        assert_eq!(a.distance(a), 0.0);
    }
}
