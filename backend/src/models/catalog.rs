//! Currency prices and slot classification.
//!
//! The catalog is built once and shared (via `Arc`) by every character in
//! every trial. Both the affordability check and auto-purchase read it.

use crate::models::item::{Item, Tier};
use std::collections::BTreeSet;

/// Cost of an item in units of one tier's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price {
    pub cost: u32,
    pub tier: Tier,
}

impl Price {
    pub const fn new(cost: u32, tier: Tier) -> Self {
        Self { cost, tier }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    /// Ordered price list; auto-purchase walks it in this order.
    entries: Vec<(Item, Price)>,
    /// Slots upgraded with `Item::Twine` when sourced from currency.
    armor: BTreeSet<Item>,
    /// Slots upgraded with `Item::Glaze` when sourced from currency.
    accessories: BTreeSet<Item>,
}

impl Catalog {
    pub fn new(entries: Vec<(Item, Price)>, armor: BTreeSet<Item>, accessories: BTreeSet<Item>) -> Self {
        Self {
            entries,
            armor,
            accessories,
        }
    }

    /// The price list used by every bundled simulation.
    pub fn standard() -> Self {
        let entries = vec![
            (Item::Weapon, Price::new(8, Tier(4))),
            (Item::Head, Price::new(6, Tier(2))),
            (Item::Chest, Price::new(8, Tier(4))),
            (Item::Hands, Price::new(6, Tier(2))),
            (Item::Legs, Price::new(8, Tier(3))),
            (Item::Feet, Price::new(6, Tier(2))),
            (Item::Earring, Price::new(4, Tier(1))),
            (Item::Neck, Price::new(4, Tier(1))),
            (Item::Wrist, Price::new(4, Tier(1))),
            (Item::Ring, Price::new(4, Tier(1))),
            (Item::Glaze, Price::new(4, Tier(2))),
            (Item::Twine, Price::new(4, Tier(3))),
        ];
        let armor = [Item::Head, Item::Chest, Item::Hands, Item::Legs, Item::Feet]
            .into_iter()
            .collect();
        let accessories = [Item::Earring, Item::Neck, Item::Wrist, Item::Ring]
            .into_iter()
            .collect();
        Self::new(entries, armor, accessories)
    }

    pub fn entries(&self) -> &[(Item, Price)] {
        &self.entries
    }

    pub fn price(&self, item: Item) -> Option<Price> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == item)
            .map(|(_, price)| *price)
    }

    /// Upgrade material needed for a currency-sourced slot, if any.
    ///
    /// Weapons are in neither set, so a currency-sourced weapon needs nothing.
    pub fn upgrade_material(&self, slot: Item) -> Option<Item> {
        if self.armor.contains(&slot) {
            Some(Item::Twine)
        } else if self.accessories.contains(&slot) {
            Some(Item::Glaze)
        } else {
            None
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
