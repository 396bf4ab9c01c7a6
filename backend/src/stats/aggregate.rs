//! Per-policy aggregation over many independent trials.

use super::{mean, pstdev};
use crate::drops::DropTable;
use crate::models::{Item, Party};
use crate::orchestrator::{sample_weeks_to_bis, SimulationError, TrialConfig, TrialSummary};
use crate::policy::PolicyConfig;
use crate::rng::derive_seed;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Batch settings shared by every policy in a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub trials: usize,
    pub seed: u64,
    pub trial: TrialConfig,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            seed: 42,
            trial: TrialConfig::default(),
        }
    }
}

/// Running totals for one policy
///
/// Only completed trials are added. Two aggregators of the same policy can
/// be combined with [`PolicyStats::merge`] in any order.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyStats {
    policy: String,
    tracked_weeks: usize,
    weeks: Vec<usize>,
    wasted: Vec<u32>,
    party_bis: usize,
    /// Sum of party fraction per tracked week across trials
    bis_sums: Vec<f64>,
    wasted_by_item: BTreeMap<Item, u64>,
}

/// Rendered numbers for one policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsReport {
    pub policy: String,
    pub trials: usize,
    pub weeks_mean: f64,
    pub weeks_pstdev: f64,
    pub weeks_max: usize,
    /// Trials that took more than `slow_threshold` weeks
    pub weeks_over_threshold: usize,
    pub slow_threshold: usize,
    pub wasted_mean: f64,
    pub wasted_pstdev: f64,
    /// Share of trials that ended with the whole party BIS
    pub party_bis_rate: f64,
    pub mean_bis_by_week: Vec<f64>,
    pub wasted_by_item: BTreeMap<Item, u64>,
}

impl PolicyStats {
    /// Weeks of the mean completion curve kept by default
    pub const DEFAULT_TRACKED_WEEKS: usize = 10;

    /// Trials slower than this many weeks are counted in reports by default
    pub const DEFAULT_SLOW_THRESHOLD: usize = 8;

    pub fn new(policy: impl Into<String>) -> Self {
        Self::with_tracked_weeks(policy, Self::DEFAULT_TRACKED_WEEKS)
    }

    pub fn with_tracked_weeks(policy: impl Into<String>, tracked_weeks: usize) -> Self {
        Self {
            policy: policy.into(),
            tracked_weeks,
            weeks: Vec::new(),
            wasted: Vec::new(),
            party_bis: 0,
            bis_sums: vec![0.0; tracked_weeks],
            wasted_by_item: BTreeMap::new(),
        }
    }

    pub fn policy(&self) -> &str {
        &self.policy
    }

    pub fn trials(&self) -> usize {
        self.weeks.len()
    }

    pub fn weeks(&self) -> &[usize] {
        &self.weeks
    }

    pub fn wasted(&self) -> &[u32] {
        &self.wasted
    }

    /// Fold in one finished trial.
    ///
    /// A trial that stopped before a tracked week contributes its final
    /// fraction to the remaining weeks, so every trial covers every week.
    pub fn add(&mut self, summary: &TrialSummary) {
        self.weeks.push(summary.weeks);
        self.wasted.push(summary.total_wasted());
        if summary.party_bis {
            self.party_bis += 1;
        }
        for (week, sum) in self.bis_sums.iter_mut().enumerate() {
            *sum += summary.bis_by_week.get(week).copied().unwrap_or(summary.final_fraction);
        }
        for (item, count) in &summary.wasted_by_item {
            *self.wasted_by_item.entry(*item).or_insert(0) += u64::from(*count);
        }
    }

    /// Combine with another aggregator (concatenation of trial results).
    ///
    /// The completion curve keeps the shorter of the two tracked lengths.
    pub fn merge(&mut self, other: PolicyStats) {
        self.weeks.extend(other.weeks);
        self.wasted.extend(other.wasted);
        self.party_bis += other.party_bis;
        self.tracked_weeks = self.tracked_weeks.min(other.tracked_weeks);
        self.bis_sums.truncate(self.tracked_weeks);
        for (sum, theirs) in self.bis_sums.iter_mut().zip(other.bis_sums) {
            *sum += theirs;
        }
        for (item, count) in other.wasted_by_item {
            *self.wasted_by_item.entry(item).or_insert(0) += count;
        }
    }

    fn weeks_f64(&self) -> Vec<f64> {
        self.weeks.iter().map(|w| *w as f64).collect()
    }

    fn wasted_f64(&self) -> Vec<f64> {
        self.wasted.iter().map(|w| f64::from(*w)).collect()
    }

    pub fn weeks_mean(&self) -> f64 {
        mean(&self.weeks_f64())
    }

    pub fn weeks_pstdev(&self) -> f64 {
        pstdev(&self.weeks_f64())
    }

    pub fn weeks_max(&self) -> usize {
        self.weeks.iter().copied().max().unwrap_or(0)
    }

    pub fn weeks_over(&self, threshold: usize) -> usize {
        self.weeks.iter().filter(|w| **w > threshold).count()
    }

    pub fn wasted_mean(&self) -> f64 {
        mean(&self.wasted_f64())
    }

    pub fn wasted_pstdev(&self) -> f64 {
        pstdev(&self.wasted_f64())
    }

    pub fn party_bis_rate(&self) -> f64 {
        if self.weeks.is_empty() {
            return 0.0;
        }
        self.party_bis as f64 / self.weeks.len() as f64
    }

    /// Mean party completion fraction for each tracked week.
    ///
    /// Trials that ended before a week count at their final fraction for it
    /// (see [`PolicyStats::add`]), not at 0. Curves from early-finishing
    /// policies therefore read higher than a zero-padded mean would.
    pub fn mean_bis_by_week(&self) -> Vec<f64> {
        let trials = self.trials();
        if trials == 0 {
            return vec![0.0; self.tracked_weeks];
        }
        self.bis_sums.iter().map(|sum| sum / trials as f64).collect()
    }

    pub fn report(&self, slow_threshold: usize) -> StatsReport {
        StatsReport {
            policy: self.policy.clone(),
            trials: self.trials(),
            weeks_mean: self.weeks_mean(),
            weeks_pstdev: self.weeks_pstdev(),
            weeks_max: self.weeks_max(),
            weeks_over_threshold: self.weeks_over(slow_threshold),
            slow_threshold,
            wasted_mean: self.wasted_mean(),
            wasted_pstdev: self.wasted_pstdev(),
            party_bis_rate: self.party_bis_rate(),
            mean_bis_by_week: self.mean_bis_by_week(),
            wasted_by_item: self.wasted_by_item.clone(),
        }
    }
}

/// Run `batch.trials` independent trials of one policy.
///
/// Each trial starts from a fresh clone of `party` and a fresh policy.
pub fn run_policy(
    party: &Party,
    drop_table: &DropTable,
    policy: &PolicyConfig,
    batch: &BatchConfig,
) -> Result<PolicyStats, SimulationError> {
    let mut stats = PolicyStats::new(policy.name());
    for trial in 0..batch.trials {
        let seed = derive_seed(batch.seed, trial as u64);
        let summary = sample_weeks_to_bis(party.clone(), policy, drop_table, &batch.trial, seed)?;
        stats.add(&summary);
    }
    Ok(stats)
}

/// Run every policy in `policies` over the same seeds.
pub fn run_all(
    party: &Party,
    drop_table: &DropTable,
    policies: &[PolicyConfig],
    batch: &BatchConfig,
) -> Result<Vec<PolicyStats>, SimulationError> {
    policies
        .iter()
        .map(|policy| run_policy(party, drop_table, policy, batch))
        .collect()
}
