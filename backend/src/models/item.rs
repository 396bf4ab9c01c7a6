//! Gear items, upgrade currencies and reward tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Anything that can drop from a reward tier or be bought with currency.
///
/// Gear variants name a slot; `Glaze` and `Twine` are the two
/// currency-purchasable upgrade materials (accessory and armor
/// respectively). The declaration order is the catalog iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Item {
    Weapon,
    Head,
    Chest,
    Hands,
    Legs,
    Feet,
    Earring,
    Neck,
    Wrist,
    Ring,
    /// Accessory upgrade material
    Glaze,
    /// Armor upgrade material
    Twine,
}

impl Item {
    pub const ALL: [Item; 12] = [
        Item::Weapon,
        Item::Head,
        Item::Chest,
        Item::Hands,
        Item::Legs,
        Item::Feet,
        Item::Earring,
        Item::Neck,
        Item::Wrist,
        Item::Ring,
        Item::Glaze,
        Item::Twine,
    ];

    /// Parse a gear slot name from a roster file.
    ///
    /// Left and right ring slots collapse to [`Item::Ring`]. Upgrade
    /// materials are not slots and are rejected.
    pub fn from_slot_name(name: &str) -> Option<Item> {
        let item = match name {
            "weapon" => Item::Weapon,
            "head" => Item::Head,
            "chest" => Item::Chest,
            "hands" => Item::Hands,
            "legs" => Item::Legs,
            "feet" => Item::Feet,
            "earring" => Item::Earring,
            "neck" => Item::Neck,
            "wrist" => Item::Wrist,
            "ring" | "ring_l" | "ring_r" => Item::Ring,
            _ => return None,
        };
        Some(item)
    }

    pub fn name(self) -> &'static str {
        match self {
            Item::Weapon => "weapon",
            Item::Head => "head",
            Item::Chest => "chest",
            Item::Hands => "hands",
            Item::Legs => "legs",
            Item::Feet => "feet",
            Item::Earring => "earring",
            Item::Neck => "neck",
            Item::Wrist => "wrist",
            Item::Ring => "ring",
            Item::Glaze => "glaze",
            Item::Twine => "twine",
        }
    }

    /// True for the two upgrade materials.
    pub fn is_currency(self) -> bool {
        matches!(self, Item::Glaze | Item::Twine)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Reward tier (1-4). Each tier has its own drop table and grants one unit
/// of its own currency per cycle, so a tier doubles as a currency kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(pub(crate) u8);

impl Tier {
    pub const COUNT: usize = 4;

    /// All tiers in ascending order.
    pub const ALL: [Tier; Tier::COUNT] = [Tier(1), Tier(2), Tier(3), Tier(4)];

    pub fn new(value: u8) -> Option<Tier> {
        (1..=Tier::COUNT as u8).contains(&value).then_some(Tier(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(value).ok_or_else(|| format!("tier must be in 1..={}, got {}", Tier::COUNT, value))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One non-negative amount per currency kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAmounts([u32; Tier::COUNT]);

impl TierAmounts {
    pub fn iter(&self) -> impl Iterator<Item = (Tier, u32)> + '_ {
        Tier::ALL.into_iter().map(move |tier| (tier, self[tier]))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Index<Tier> for TierAmounts {
    type Output = u32;

    fn index(&self, tier: Tier) -> &u32 {
        &self.0[tier.index()]
    }
}

impl IndexMut<Tier> for TierAmounts {
    fn index_mut(&mut self, tier: Tier) -> &mut u32 {
        &mut self.0[tier.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_sides_normalize() {
        assert_eq!(Item::from_slot_name("ring_l"), Some(Item::Ring));
        assert_eq!(Item::from_slot_name("ring_r"), Some(Item::Ring));
        assert_eq!(Item::from_slot_name("glaze"), None);
        assert_eq!(Item::from_slot_name("belt"), None);
    }

    #[test]
    fn test_tier_bounds() {
        assert!(Tier::new(0).is_none());
        assert!(Tier::new(5).is_none());
        assert_eq!(Tier::new(3).map(Tier::get), Some(3));
    }

    #[test]
    fn test_item_serde_names() {
        let json = serde_json::to_string(&Item::Glaze).unwrap();
        assert_eq!(json, "\"glaze\"");
        let back: Item = serde_json::from_str("\"earring\"").unwrap();
        assert_eq!(back, Item::Earring);
    }
}
