//! Character (party member) model
//!
//! Tracks one character's outstanding gear needs and banked currency.
//!
//! Needs come in two shapes:
//! - **Raid needs**: a set of distinct slots only a drop can fill
//! - **Currency needs**: counts of `Glaze` (accessory) and `Twine` (armor)
//!   upgrade materials
//!
//! # Critical Invariants
//!
//! 1. Needs never grow after construction (`give` only removes)
//! 2. `give` on something not needed is a contract violation and returns
//!    `CharacterError::NotNeeded`; callers must filter with `needs` first
//! 3. Currency balances never go negative (purchases check affordability)

use crate::models::catalog::Catalog;
use crate::models::item::{Item, Tier, TierAmounts};
use crate::rng::RngManager;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;

/// Total number of distinct gear slots; caps outstanding needs and
/// normalizes `bis_completion_fraction`.
pub const MAX_NEED_COUNT: u32 = 11;

/// Errors raised by character state changes
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CharacterError {
    #[error("{character} was given {item} but does not need it")]
    NotNeeded { character: String, item: Item },

    #[error("{character} lists {item} as a raid need, but it is an upgrade material")]
    NotRaidSlot { character: String, item: Item },

    #[error("character name must not be empty")]
    EmptyName,

    #[error("{character} has {count} needs, more than the {max} gear slots")]
    TooManyNeeds { character: String, count: u32, max: u32 },
}

/// Outstanding needs used to construct a character.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Needs {
    pub raid: BTreeSet<Item>,
    pub glaze: u32,
    pub twine: u32,
}

impl Needs {
    pub fn is_empty(&self) -> bool {
        self.raid.is_empty() && self.glaze == 0 && self.twine == 0
    }
}

/// A party member working toward best-in-slot.
///
/// # Example
/// ```
/// use loot_simulator_core_rs::{Catalog, Character, Item, Needs};
/// use std::sync::Arc;
///
/// let needs = Needs { raid: [Item::Weapon].into_iter().collect(), glaze: 1, twine: 0 };
/// let mut character = Character::new("Alys", needs, Arc::new(Catalog::standard())).unwrap();
///
/// assert!(character.needs(Item::Weapon));
/// character.give(Item::Weapon).unwrap();
/// assert!(!character.needs(Item::Weapon));
/// assert!(character.give(Item::Weapon).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Character {
    name: String,
    needed_raid: BTreeSet<Item>,
    needed_glaze: u32,
    needed_twine: u32,
    balances: TierAmounts,
    catalog: Arc<Catalog>,

    /// Spend banked currency automatically after each currency grant
    auto_purchase: bool,
}

impl Character {
    /// Create a character with the given outstanding needs.
    ///
    /// # Errors
    /// `EmptyName` for a blank name, `NotRaidSlot` if an upgrade material
    /// appears in the raid set, `TooManyNeeds` past [`MAX_NEED_COUNT`].
    pub fn new(name: impl Into<String>, needs: Needs, catalog: Arc<Catalog>) -> Result<Self, CharacterError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CharacterError::EmptyName);
        }
        if let Some(item) = needs.raid.iter().find(|item| item.is_currency()) {
            return Err(CharacterError::NotRaidSlot {
                character: name,
                item: *item,
            });
        }
        let count = needs.raid.len() as u32 + needs.glaze + needs.twine;
        if count > MAX_NEED_COUNT {
            return Err(CharacterError::TooManyNeeds {
                character: name,
                count,
                max: MAX_NEED_COUNT,
            });
        }
        Ok(Self {
            name,
            needed_raid: needs.raid,
            needed_glaze: needs.glaze,
            needed_twine: needs.twine,
            balances: TierAmounts::default(),
            catalog,
            auto_purchase: false,
        })
    }

    pub fn with_auto_purchase(mut self, enabled: bool) -> Self {
        self.auto_purchase = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn needed_raid(&self) -> &BTreeSet<Item> {
        &self.needed_raid
    }

    pub fn needed_glaze(&self) -> u32 {
        self.needed_glaze
    }

    pub fn needed_twine(&self) -> u32 {
        self.needed_twine
    }

    /// Remaining need for one upgrade material (0 for gear items).
    pub fn currency_need(&self, item: Item) -> u32 {
        match item {
            Item::Glaze => self.needed_glaze,
            Item::Twine => self.needed_twine,
            _ => 0,
        }
    }

    pub fn balances(&self) -> &TierAmounts {
        &self.balances
    }

    pub fn balance(&self, tier: Tier) -> u32 {
        self.balances[tier]
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn auto_purchase(&self) -> bool {
        self.auto_purchase
    }

    pub fn needs(&self, item: Item) -> bool {
        match item {
            Item::Glaze => self.needed_glaze > 0,
            Item::Twine => self.needed_twine > 0,
            _ => self.needed_raid.contains(&item),
        }
    }

    /// Apply an item grant.
    ///
    /// # Errors
    /// `NotNeeded` if the character does not currently need `item`. State is
    /// left untouched in that case.
    pub fn give(&mut self, item: Item) -> Result<(), CharacterError> {
        let satisfied = match item {
            Item::Glaze => decrement(&mut self.needed_glaze),
            Item::Twine => decrement(&mut self.needed_twine),
            _ => self.needed_raid.remove(&item),
        };
        if satisfied {
            Ok(())
        } else {
            Err(CharacterError::NotNeeded {
                character: self.name.clone(),
                item,
            })
        }
    }

    /// Bank one unit of `tier` currency.
    ///
    /// With auto-purchase enabled, afterwards picks uniformly among every
    /// needed catalog entry the character can now afford, spends its price
    /// and applies it. Returns the purchased item, if any.
    pub fn grant_currency(&mut self, tier: Tier, rng: &mut RngManager) -> Result<Option<Item>, CharacterError> {
        self.balances[tier] += 1;
        if !self.auto_purchase {
            return Ok(None);
        }

        let options: Vec<Item> = self
            .catalog
            .entries()
            .iter()
            .filter(|(item, price)| self.needs(*item) && self.balances[price.tier] >= price.cost)
            .map(|(item, _)| *item)
            .collect();

        let Some(&purchased) = rng.choose(&options) else {
            return Ok(None);
        };
        if let Some(price) = self.catalog.price(purchased) {
            self.balances[price.tier] -= price.cost;
        }
        self.give(purchased)?;
        Ok(Some(purchased))
    }

    /// Number of discrete needs still outstanding (raid slots + materials).
    pub fn outstanding_needs(&self) -> u32 {
        self.needed_raid.len() as u32 + self.needed_glaze + self.needed_twine
    }

    pub fn has_needs(&self) -> bool {
        self.outstanding_needs() > 0
    }

    /// Currency per tier required to buy every outstanding need outright.
    pub fn currency_required(&self) -> TierAmounts {
        let mut required = TierAmounts::default();
        for item in &self.needed_raid {
            if let Some(price) = self.catalog.price(*item) {
                required[price.tier] += price.cost;
            }
        }
        for (material, count) in [(Item::Glaze, self.needed_glaze), (Item::Twine, self.needed_twine)] {
            if let Some(price) = self.catalog.price(material) {
                required[price.tier] += price.cost * count;
            }
        }
        required
    }

    /// Feasibility check only: nothing is spent.
    pub fn can_afford_remaining(&self) -> bool {
        self.currency_required()
            .iter()
            .all(|(tier, required)| self.balances[tier] >= required)
    }

    /// Fraction of the required currency not yet banked, summed over tiers.
    ///
    /// Banked surplus in one tier does not offset a shortfall in another.
    /// Returns 1.0 when nothing is required.
    pub fn missing_currency_ratio(&self) -> f64 {
        let required = self.currency_required();
        let total = required.total();
        if total == 0 {
            return 1.0;
        }
        let missing: u32 = required
            .iter()
            .map(|(tier, needed)| needed.saturating_sub(self.balances[tier]))
            .sum();
        f64::from(missing) / f64::from(total)
    }

    pub fn is_bis(&self) -> bool {
        !self.has_needs() || self.can_afford_remaining()
    }

    /// Progress estimate in [0, 1].
    ///
    /// `1 - outstanding_needs * missing_currency_ratio / 11`, and exactly 1.0
    /// when no currency is required at all. Stays in range because needs
    /// never exceed [`MAX_NEED_COUNT`] and the ratio never exceeds 1.
    pub fn bis_completion_fraction(&self) -> f64 {
        if self.currency_required().total() == 0 {
            return 1.0;
        }
        let missing = f64::from(self.outstanding_needs()) * self.missing_currency_ratio();
        1.0 - missing / f64::from(MAX_NEED_COUNT)
    }
}

fn decrement(count: &mut u32) -> bool {
    if *count == 0 {
        return false;
    }
    *count -= 1;
    true
}
