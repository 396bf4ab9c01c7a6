//! Trial summary
//!
//! Numeric record of one finished trial, ready for aggregation or any
//! renderer. Serializes to JSON for the CLI's `--json` output.

use crate::models::{EventLog, Item, Party};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completion fraction history of one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProgress {
    pub name: String,
    /// Entry `w` is the fraction after week `w + 1`
    pub by_week: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    /// Display name of the policy that ran
    pub policy: String,

    /// Seed of the trial's RNG
    pub seed: u64,

    /// Weeks simulated before the trial stopped
    pub weeks: usize,

    /// Whether every character ended BIS (false means the week limit hit)
    pub party_bis: bool,

    /// Mean party completion fraction after each week
    pub bis_by_week: Vec<f64>,

    /// Party completion fraction when the trial stopped
    pub final_fraction: f64,

    /// Per-character completion fraction after each week, in party order
    pub character_bis_by_week: Vec<CharacterProgress>,

    /// Drops nobody needed, counted per item
    pub wasted_by_item: BTreeMap<Item, u32>,

    /// Allocation history, when recording was enabled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<EventLog>,
}

impl TrialSummary {
    pub(crate) fn new(policy: String, seed: u64, party: &Party, record_events: bool) -> Self {
        Self {
            policy,
            seed,
            weeks: 0,
            party_bis: party.is_party_bis(),
            bis_by_week: Vec::new(),
            final_fraction: party.pct_bis(),
            character_bis_by_week: party
                .characters()
                .iter()
                .map(|c| CharacterProgress {
                    name: c.name().to_string(),
                    by_week: Vec::new(),
                })
                .collect(),
            wasted_by_item: BTreeMap::new(),
            events: record_events.then(EventLog::new),
        }
    }

    /// Append the end-of-week snapshot.
    pub(crate) fn record_week(&mut self, party: &Party) {
        for (progress, character) in self.character_bis_by_week.iter_mut().zip(party.characters()) {
            progress.by_week.push(character.bis_completion_fraction());
        }
        self.final_fraction = party.pct_bis();
        self.bis_by_week.push(self.final_fraction);
        self.party_bis = party.is_party_bis();
    }

    pub(crate) fn record_waste(&mut self, item: Item) {
        *self.wasted_by_item.entry(item).or_insert(0) += 1;
    }

    pub fn total_wasted(&self) -> u32 {
        self.wasted_by_item.values().sum()
    }

    pub fn progress_for(&self, name: &str) -> Option<&[f64]> {
        self.character_bis_by_week
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.by_week.as_slice())
    }
}
