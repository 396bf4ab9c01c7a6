//! Party state
//!
//! The fixed group of characters a trial distributes loot to. Characters are
//! addressed by index; names are unique within a party.

use crate::models::character::{Character, CharacterError};
use crate::models::item::{Item, Tier};
use crate::rng::RngManager;

/// A purchase made by auto-purchase during a currency grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Purchase {
    pub character: usize,
    pub item: Item,
}

/// # Example
///
/// ```rust
/// use loot_simulator_core_rs::{Catalog, Character, Item, Needs, Party};
/// use std::sync::Arc;
///
/// let catalog = Arc::new(Catalog::standard());
/// let done = Character::new("Done", Needs::default(), catalog.clone()).unwrap();
/// let needy = Character::new(
///     "Needy",
///     Needs { raid: [Item::Chest].into_iter().collect(), ..Needs::default() },
///     catalog,
/// )
/// .unwrap();
///
/// let party = Party::new(vec![done, needy]);
/// assert_eq!(party.how_many_bis(), 1);
/// assert!(!party.is_party_bis());
/// assert_eq!(party.needing(Item::Chest), vec![1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Party {
    characters: Vec<Character>,
}

impl Party {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    /// Apply the auto-purchase toggle to every character.
    pub fn with_auto_purchase(self, enabled: bool) -> Self {
        Self {
            characters: self
                .characters
                .into_iter()
                .map(|c| c.with_auto_purchase(enabled))
                .collect(),
        }
    }

    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Indices of every character that currently needs `item`, in party order.
    pub fn needing(&self, item: Item) -> Vec<usize> {
        self.characters
            .iter()
            .enumerate()
            .filter(|(_, c)| c.needs(item))
            .map(|(i, _)| i)
            .collect()
    }

    /// Grant `item` to the character at `index`.
    ///
    /// # Errors
    /// Propagates the character's contract violation if it does not need it.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds; policies only pass indices from
    /// [`Party::needing`].
    pub fn give(&mut self, index: usize, item: Item) -> Result<(), CharacterError> {
        self.characters[index].give(item)
    }

    /// Participation currency: one unit of `tier` to every character.
    pub fn grant_currency(&mut self, tier: Tier, rng: &mut RngManager) -> Result<Vec<Purchase>, CharacterError> {
        let mut purchases = Vec::new();
        for (index, character) in self.characters.iter_mut().enumerate() {
            if let Some(item) = character.grant_currency(tier, rng)? {
                purchases.push(Purchase {
                    character: index,
                    item,
                });
            }
        }
        Ok(purchases)
    }

    pub fn how_many_bis(&self) -> usize {
        self.characters.iter().filter(|c| c.is_bis()).count()
    }

    pub fn is_party_bis(&self) -> bool {
        self.how_many_bis() == self.characters.len()
    }

    /// Mean completion fraction over all characters (1.0 for an empty party).
    pub fn pct_bis(&self) -> f64 {
        if self.characters.is_empty() {
            return 1.0;
        }
        let sum: f64 = self.characters.iter().map(Character::bis_completion_fraction).sum();
        sum / self.characters.len() as f64
    }
}
