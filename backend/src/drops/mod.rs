//! Drop generation
//!
//! Each reward tier has a table of guaranteed items and random candidates.
//! A roll always contains every guaranteed item, then pads with uniform
//! random picks up to [`ITEMS_PER_TIER`] entries. A random candidate may
//! appear at most [`MAX_DUPLICATES`] times in one roll; if every candidate
//! is capped the roll stops short, which is a normal outcome.
//!
//! All randomness comes from the caller's `RngManager`.

use crate::models::item::{Item, Tier};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

/// Target number of entries per tier per cycle
pub const ITEMS_PER_TIER: usize = 3;

/// Cap on how many times one random candidate can appear in a roll
pub const MAX_DUPLICATES: usize = 2;

/// Drop table for one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDrops {
    pub random: Vec<Item>,
    pub guaranteed: Vec<Item>,
}

impl TierDrops {
    pub fn new(random: Vec<Item>, guaranteed: Vec<Item>) -> Self {
        Self { random, guaranteed }
    }
}

/// Drop tables for all four tiers
///
/// # Example
///
/// ```
/// use loot_simulator_core_rs::{DropTable, Item, RngManager, Tier};
///
/// let table = DropTable::standard();
/// let mut rng = RngManager::new(42);
///
/// let drops = table.roll(Tier::new(4).unwrap(), &mut rng);
/// assert_eq!(drops, vec![Item::Weapon, Item::Chest]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropTable {
    /// Indexed by tier, ascending
    tiers: [TierDrops; Tier::COUNT],
}

impl DropTable {
    pub fn new(tiers: [TierDrops; Tier::COUNT]) -> Self {
        Self { tiers }
    }

    pub fn standard() -> Self {
        Self::new([
            TierDrops::new(vec![Item::Earring, Item::Neck, Item::Ring, Item::Wrist], vec![]),
            TierDrops::new(vec![Item::Head, Item::Hands, Item::Feet], vec![Item::Glaze]),
            TierDrops::new(vec![Item::Head, Item::Hands, Item::Feet, Item::Legs], vec![Item::Twine]),
            TierDrops::new(vec![], vec![Item::Weapon, Item::Chest]),
        ])
    }

    pub fn tier(&self, tier: Tier) -> &TierDrops {
        &self.tiers[usize::from(tier.get() - 1)]
    }

    /// Roll this cycle's drops for `tier`.
    pub fn roll(&self, tier: Tier, rng: &mut RngManager) -> Vec<Item> {
        let table = self.tier(tier);
        let mut drops = table.guaranteed.clone();

        while drops.len() < ITEMS_PER_TIER {
            let options: Vec<Item> = table
                .random
                .iter()
                .copied()
                .filter(|candidate| drops.iter().filter(|d| *d == candidate).count() < MAX_DUPLICATES)
                .collect();
            match rng.choose(&options) {
                Some(item) => drops.push(*item),
                None => break,
            }
        }

        drops
    }
}

impl Default for DropTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(n: u8) -> Tier {
        Tier::new(n).unwrap()
    }

    #[test]
    fn test_guaranteed_only_tier() {
        let table = DropTable::standard();
        let mut rng = RngManager::new(5);
        for _ in 0..50 {
            assert_eq!(table.roll(tier(4), &mut rng), vec![Item::Weapon, Item::Chest]);
        }
    }

    #[test]
    fn test_guaranteed_item_comes_first() {
        let table = DropTable::standard();
        let mut rng = RngManager::new(8);
        for _ in 0..50 {
            let drops = table.roll(tier(2), &mut rng);
            assert_eq!(drops.len(), ITEMS_PER_TIER);
            assert_eq!(drops[0], Item::Glaze);
            assert!(drops[1..].iter().all(|d| [Item::Head, Item::Hands, Item::Feet].contains(d)));
        }
    }

    #[test]
    fn test_roll_stops_when_candidates_exhausted() {
        let table = DropTable::new([
            TierDrops::new(vec![Item::Ring], vec![]),
            TierDrops::new(vec![], vec![]),
            TierDrops::new(vec![], vec![]),
            TierDrops::new(vec![], vec![]),
        ]);
        let mut rng = RngManager::new(1);
        assert_eq!(table.roll(tier(1), &mut rng), vec![Item::Ring, Item::Ring]);
        assert!(table.roll(tier(2), &mut rng).is_empty());
    }

    #[test]
    fn test_roll_deterministic() {
        let table = DropTable::standard();
        let mut rng1 = RngManager::new(42);
        let mut rng2 = RngManager::new(42);
        for _ in 0..20 {
            assert_eq!(table.roll(tier(3), &mut rng1), table.roll(tier(3), &mut rng2));
        }
    }
}
