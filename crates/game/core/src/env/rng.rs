//! Deterministic random number generation.
//!
//! The world owns a single stateful generator. Identical seeds plus identical
//! intent sequences replay identically, and the generator state is part of a
//! save so a loaded game continues the same stream.

/// Source of randomness for game mechanics.
///
/// Implementations must be deterministic: the same seed yields the same
/// sequence of values.
pub trait RngOracle {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }

    /// Generate a random value in range [min, max] inclusive.
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        let span = (i64::from(max) - i64::from(min) + 1) as u64;
        let offset = u64::from(self.next_u32()) % span;
        (i64::from(min) + offset as i64) as i32
    }

    /// Fair coin flip.
    fn coin(&mut self) -> bool {
        self.range(0, 1) == 1
    }

    /// Random step in {-1, 0, 1} on each axis.
    fn step(&mut self) -> (i32, i32) {
        let dx = self.range(-1, 1);
        let dy = self.range(-1, 1);
        (dx, dy)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed always produces
/// the same output.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Seeds the generator, scrambling the seed so nearby seeds diverge quickly.
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = Self {
            state: Self::pcg_step(seed.wrapping_add(Self::INCREMENT)),
        };
        rng.next_u32();
        rng
    }

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}
