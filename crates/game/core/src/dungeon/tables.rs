//! Depth-scaled spawn tables and weighted choice.

use super::EntityKind;
use crate::env::RngOracle;

/// Ordered `(value, min_depth)` pairs.
///
/// Lookup scans from the last entry backwards and returns the first value
/// whose minimum depth is reached, or zero below every threshold.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DepthTable(pub Vec<(u32, u32)>);

impl DepthTable {
    pub fn new(entries: &[(u32, u32)]) -> Self {
        Self(entries.to_vec())
    }

    /// A value that applies from depth 1 onward.
    pub fn constant(value: u32) -> Self {
        Self(vec![(value, 1)])
    }

    pub fn at_depth(&self, depth: u32) -> u32 {
        self.0
            .iter()
            .rev()
            .find(|(_, min_depth)| depth >= *min_depth)
            .map_or(0, |(value, _)| *value)
    }
}

/// One outcome of a weighted table together with its depth-scaled weight.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnEntry {
    pub kind: EntityKind,
    pub weight: DepthTable,
}

impl SpawnEntry {
    pub fn new(kind: EntityKind, weight: &[(u32, u32)]) -> Self {
        Self {
            kind,
            weight: DepthTable::new(weight),
        }
    }
}

/// Population rules for standard levels.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnTables {
    /// Upper bound (inclusive) on monsters per room.
    pub max_monsters: DepthTable,
    pub monsters: Vec<SpawnEntry>,
    /// Upper bound (inclusive) on items per room.
    pub max_items: DepthTable,
    pub items: Vec<SpawnEntry>,
}

impl SpawnTables {
    /// Weights of every monster at `depth`, in table order.
    pub fn monster_weights(&self, depth: u32) -> Vec<(EntityKind, u32)> {
        Self::weights(&self.monsters, depth)
    }

    /// Weights of every item at `depth`, in table order.
    pub fn item_weights(&self, depth: u32) -> Vec<(EntityKind, u32)> {
        Self::weights(&self.items, depth)
    }

    fn weights(entries: &[SpawnEntry], depth: u32) -> Vec<(EntityKind, u32)> {
        entries
            .iter()
            .map(|entry| (entry.kind, entry.weight.at_depth(depth)))
            .collect()
    }
}

impl Default for SpawnTables {
    fn default() -> Self {
        Self {
            max_monsters: DepthTable::new(&[(2, 1), (3, 4), (5, 6), (7, 9), (0, 10)]),
            monsters: vec![
                SpawnEntry::new(EntityKind::Goblin, &[(80, 1), (40, 3), (20, 5), (0, 8)]),
                SpawnEntry::new(EntityKind::GoblinPair, &[(20, 3), (30, 5), (30, 8)]),
                SpawnEntry::new(EntityKind::Orc, &[(19, 1), (25, 3), (29, 5), (34, 8)]),
                SpawnEntry::new(EntityKind::Troll, &[(14, 3), (19, 5), (33, 8)]),
                SpawnEntry::new(EntityKind::Nightmare, &[(1, 1), (2, 5), (3, 8)]),
            ],
            max_items: DepthTable::new(&[(1, 1), (2, 4), (3, 7), (0, 10)]),
            items: vec![
                SpawnEntry::new(EntityKind::Heal, &[(46, 1), (50, 2), (50, 4), (20, 6)]),
                SpawnEntry::new(EntityKind::Lightning, &[(4, 1), (3, 2), (2, 4), (1, 6)]),
                SpawnEntry::new(EntityKind::Confuse, &[(22, 2), (28, 4), (30, 6)]),
                SpawnEntry::new(EntityKind::Fireball, &[(20, 4), (49, 6)]),
                SpawnEntry::new(EntityKind::RustyPole, &[(1, 1)]),
                SpawnEntry::new(EntityKind::MetalPlate, &[(1, 1)]),
                SpawnEntry::new(EntityKind::ThickVest, &[(1, 1)]),
            ],
        }
    }
}

/// Picks an outcome with probability proportional to its weight.
///
/// Draws uniformly in `[1, sum]` and returns the first outcome whose running
/// total reaches the draw. Returns `None` when every weight is zero.
pub fn weighted_choice<T: Copy>(rng: &mut impl RngOracle, entries: &[(T, u32)]) -> Option<T> {
    let total: u32 = entries.iter().map(|(_, weight)| *weight).sum();
    if total == 0 {
        return None;
    }
    let draw = rng.range(1, i32::try_from(total).unwrap_or(i32::MAX)) as u32;
    let mut running = 0;
    entries.iter().find_map(|&(outcome, weight)| {
        running += weight;
        (draw <= running).then_some(outcome)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use proptest::prelude::*;

    #[test]
    fn depth_lookup_scans_from_deepest() {
        let table = DepthTable::new(&[(80, 1), (40, 3)]);
        assert_eq!(table.at_depth(0), 0);
        assert_eq!(table.at_depth(1), 80);
        assert_eq!(table.at_depth(2), 80);
        assert_eq!(table.at_depth(3), 40);
        assert_eq!(table.at_depth(30), 40);
    }

    #[test]
    fn missing_low_entries_default_to_zero() {
        let tables = SpawnTables::default();
        let weights = tables.monster_weights(1);
        assert!(weights.contains(&(EntityKind::GoblinPair, 0)));
        assert!(weights.contains(&(EntityKind::Goblin, 80)));
        assert_eq!(tables.max_monsters.at_depth(10), 0);
    }

    #[test]
    fn zero_weights_yield_nothing() {
        let mut rng = PcgRng::from_seed(1);
        assert_eq!(weighted_choice::<u8>(&mut rng, &[(1, 0), (2, 0)]), None);
        assert_eq!(weighted_choice::<u8>(&mut rng, &[]), None);
    }

    #[test]
    fn frequencies_follow_weights() {
        let mut rng = PcgRng::from_seed(42);
        let entries = [('a', 1), ('b', 3), ('c', 0), ('d', 6)];
        let mut counts = [0u32; 4];
        let draws = 20_000;
        for _ in 0..draws {
            match weighted_choice(&mut rng, &entries) {
                Some('a') => counts[0] += 1,
                Some('b') => counts[1] += 1,
                Some('c') => counts[2] += 1,
                Some(_) => counts[3] += 1,
                None => panic!("non-zero total must choose"),
            }
        }
        assert_eq!(counts[2], 0);
        let share = |n: u32| f64::from(n) / f64::from(draws);
        assert!((share(counts[0]) - 0.1).abs() < 0.02);
        assert!((share(counts[1]) - 0.3).abs() < 0.02);
        assert!((share(counts[3]) - 0.6).abs() < 0.02);
    }

    proptest! {
        #[test]
        fn choice_never_picks_a_zero_weight(seed in any::<u64>(), weights in proptest::collection::vec(0u32..5, 1..8)) {
            let mut rng = PcgRng::from_seed(seed);
            let entries: Vec<(usize, u32)> = weights.iter().copied().enumerate().collect();
            match weighted_choice(&mut rng, &entries) {
                Some(index) => prop_assert!(weights[index] > 0),
                None => prop_assert!(weights.iter().all(|w| *w == 0)),
            }
        }
    }
}
