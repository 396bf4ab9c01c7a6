//! Round-robin policy
//!
//! Among characters who need the item, only those with the fewest grants so
//! far in the item's category group are eligible; one of them is chosen
//! uniformly at random and their count for that group goes up by one.
//!
//! The group table is data (`CategoryGroups`), so the flat, granular and
//! less-granular variants are the same type with different tables.
//!
//! # Invariant
//!
//! With every character perpetually eligible, per-character counts within
//! one group never differ by more than 1.

use super::groups::{CategoryGroups, GroupId};
use super::LootPolicy;
use crate::models::{CharacterError, Item, Party};
use crate::rng::RngManager;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct RoundRobinPolicy {
    groups: CategoryGroups,
    /// Grants so far, keyed by (group, character name)
    counts: HashMap<(GroupId, String), u32>,
}

impl RoundRobinPolicy {
    pub fn new(groups: CategoryGroups) -> Self {
        Self {
            groups,
            counts: HashMap::new(),
        }
    }

    pub fn groups(&self) -> &CategoryGroups {
        &self.groups
    }

    /// Grants recorded for `name` in `group`.
    pub fn granted_count(&self, group: GroupId, name: &str) -> u32 {
        self.counts.get(&(group, name.to_string())).copied().unwrap_or(0)
    }

    /// Give `item` to `index` and record the grant against its group.
    pub(crate) fn grant(&mut self, party: &mut Party, index: usize, item: Item) -> Result<(), CharacterError> {
        party.give(index, item)?;
        let name = party.characters()[index].name().to_string();
        *self.counts.entry((self.groups.group_of(item), name)).or_insert(0) += 1;
        Ok(())
    }

    /// Pick uniformly from `options` and grant; `None` when `options` is empty.
    pub(crate) fn grant_any(
        &mut self,
        party: &mut Party,
        options: &[usize],
        item: Item,
        rng: &mut RngManager,
    ) -> Result<Option<usize>, CharacterError> {
        match rng.choose(options) {
            Some(&winner) => {
                self.grant(party, winner, item)?;
                Ok(Some(winner))
            }
            None => Ok(None),
        }
    }
}

impl LootPolicy for RoundRobinPolicy {
    fn distribute(&mut self, party: &mut Party, item: Item, rng: &mut RngManager) -> Result<Option<usize>, CharacterError> {
        let options = party.needing(item);
        if options.is_empty() {
            return Ok(None);
        }

        let group = self.groups.group_of(item);
        let count_of = |index: &usize| self.granted_count(group, party.characters()[*index].name());
        let min_count = options.iter().map(count_of).min().unwrap_or(0);
        let least_served: Vec<usize> = options.into_iter().filter(|i| count_of(i) == min_count).collect();

        self.grant_any(party, &least_served, item, rng)
    }

    fn reset(&mut self) {
        self.counts.clear();
    }
}
