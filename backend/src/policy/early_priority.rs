//! Early-priority overlay
//!
//! Wraps a round-robin policy. When an upgrade material drops and the
//! override is enabled for it, characters who still need more than
//! [`EARLY_PRIORITY_THRESHOLD`] units of that material are served first
//! (uniformly at random, counted in the round-robin bookkeeping). If nobody
//! qualifies, the wrapped round-robin rule decides as usual.

use super::round_robin::RoundRobinPolicy;
use super::LootPolicy;
use crate::models::{CharacterError, Item, Party};
use crate::rng::RngManager;

/// A character must need strictly more than this many units to jump the queue
pub const EARLY_PRIORITY_THRESHOLD: u32 = 2;

#[derive(Debug, Clone)]
pub struct EarlyPriorityPolicy {
    inner: RoundRobinPolicy,
    glaze: bool,
    twine: bool,
}

impl EarlyPriorityPolicy {
    pub fn new(inner: RoundRobinPolicy, glaze: bool, twine: bool) -> Self {
        Self { inner, glaze, twine }
    }

    pub fn inner(&self) -> &RoundRobinPolicy {
        &self.inner
    }

    fn overrides(&self, item: Item) -> bool {
        match item {
            Item::Glaze => self.glaze,
            Item::Twine => self.twine,
            _ => false,
        }
    }
}

impl LootPolicy for EarlyPriorityPolicy {
    fn distribute(&mut self, party: &mut Party, item: Item, rng: &mut RngManager) -> Result<Option<usize>, CharacterError> {
        if self.overrides(item) {
            let early: Vec<usize> = party
                .characters()
                .iter()
                .enumerate()
                .filter(|(_, c)| c.currency_need(item) > EARLY_PRIORITY_THRESHOLD)
                .map(|(i, _)| i)
                .collect();
            if let Some(winner) = self.inner.grant_any(party, &early, item, rng)? {
                return Ok(Some(winner));
            }
        }
        self.inner.distribute(party, item, rng)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }
}
