//! Combat resolution.
//!
//! All hit-point changes flow through this module so that death handling,
//! experience awards and level-ups happen exactly once and in a fixed order.
//!
//! # Core Functions
//!
//! - `attack`: power minus defense, applied through `take_damage`
//! - `take_damage`: clamps at zero, awards experience, runs the death handler
//! - `heal`: adds hit points up to the effective maximum
//! - `check_level_up`: converts surplus experience into levels and rewards

pub mod damage;
pub mod death;
pub mod progression;

pub use damage::{AttackOutcome, attack, calculate_damage, clamp_hp, heal, take_damage};
pub use death::handle_death;
pub use progression::{apply_reward, check_level_up};
