//! Head-to-head policy comparison
//!
//! Runs two policies on matched seeds and reports, per character and per
//! week, how much further along policy B left the character than policy A
//! (`mean_b - mean_a`, positive favours B).
//!
//! Per-week histories have different lengths across trials; accumulated
//! sums are truncated to the shortest history seen so every week averages
//! over all trials.

use super::aggregate::BatchConfig;
use super::mean;
use crate::drops::DropTable;
use crate::models::Party;
use crate::orchestrator::{sample_weeks_to_bis, SimulationError, TrialSummary};
use crate::policy::PolicyConfig;
use crate::rng::derive_seed;
use serde::{Deserialize, Serialize};

/// Delta curve for one character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDelta {
    pub name: String,
    pub by_week: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadToHeadReport {
    pub policy_a: String,
    pub policy_b: String,
    pub rounds: usize,
    pub characters: Vec<CharacterDelta>,
    /// Mean delta across characters, per week
    pub week_means: Vec<f64>,
    /// Mean of `week_means`
    pub overall_mean: f64,
}

#[derive(Debug, Clone)]
pub struct HeadToHead {
    policy_a: String,
    policy_b: String,
    rounds: usize,
    names: Vec<String>,
    sums_a: Vec<Vec<f64>>,
    sums_b: Vec<Vec<f64>>,
}

impl HeadToHead {
    pub fn new(policy_a: impl Into<String>, policy_b: impl Into<String>) -> Self {
        Self {
            policy_a: policy_a.into(),
            policy_b: policy_b.into(),
            rounds: 0,
            names: Vec::new(),
            sums_a: Vec::new(),
            sums_b: Vec::new(),
        }
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Add one matched pair of trials.
    pub fn add_pair(&mut self, a: &TrialSummary, b: &TrialSummary) {
        if self.rounds == 0 {
            self.names = a.character_bis_by_week.iter().map(|p| p.name.clone()).collect();
            self.sums_a = a.character_bis_by_week.iter().map(|p| p.by_week.clone()).collect();
            self.sums_b = b.character_bis_by_week.iter().map(|p| p.by_week.clone()).collect();
        } else {
            accumulate(&mut self.sums_a, a);
            accumulate(&mut self.sums_b, b);
        }
        self.rounds += 1;
    }

    /// Mean per-week delta (`b - a`) for each character.
    pub fn deltas(&self) -> Vec<CharacterDelta> {
        if self.rounds == 0 {
            return Vec::new();
        }
        let rounds = self.rounds as f64;
        self.names
            .iter()
            .zip(self.sums_a.iter().zip(&self.sums_b))
            .map(|(name, (a, b))| CharacterDelta {
                name: name.clone(),
                by_week: a.iter().zip(b).map(|(a, b)| (b - a) / rounds).collect(),
            })
            .collect()
    }

    pub fn report(&self) -> HeadToHeadReport {
        let characters = self.deltas();
        let weeks = characters.iter().map(|c| c.by_week.len()).min().unwrap_or(0);
        let week_means: Vec<f64> = (0..weeks)
            .map(|week| {
                let column: Vec<f64> = characters.iter().map(|c| c.by_week[week]).collect();
                mean(&column)
            })
            .collect();
        HeadToHeadReport {
            policy_a: self.policy_a.clone(),
            policy_b: self.policy_b.clone(),
            rounds: self.rounds,
            overall_mean: mean(&week_means),
            characters,
            week_means,
        }
    }
}

fn accumulate(sums: &mut [Vec<f64>], summary: &TrialSummary) {
    for (sum, progress) in sums.iter_mut().zip(&summary.character_bis_by_week) {
        sum.truncate(progress.by_week.len());
        for (total, value) in sum.iter_mut().zip(&progress.by_week) {
            *total += value;
        }
    }
}

/// Run `batch.trials` matched pairs of `policy_a` and `policy_b`.
pub fn compare(
    party: &Party,
    drop_table: &DropTable,
    policy_a: &PolicyConfig,
    policy_b: &PolicyConfig,
    batch: &BatchConfig,
) -> Result<HeadToHead, SimulationError> {
    let mut h2h = HeadToHead::new(policy_a.name(), policy_b.name());
    for trial in 0..batch.trials {
        let seed = derive_seed(batch.seed, trial as u64);
        let a = sample_weeks_to_bis(party.clone(), policy_a, drop_table, &batch.trial, seed)?;
        let b = sample_weeks_to_bis(party.clone(), policy_b, drop_table, &batch.trial, seed)?;
        h2h.add_pair(&a, &b);
    }
    Ok(h2h)
}
