//! Orchestrator Engine
//!
//! Main trial loop integrating all components:
//! - Drop generation (per tier, seeded)
//! - Policy evaluation (who receives each drop)
//! - Participation currency (and optional auto-purchase)
//! - Progress recording (per character and party-wide)
//!
//! # Architecture
//!
//! ```text
//! While week < week_limit and the party is not BIS:
//!   For each tier 1 → 4:
//!     1. Roll drops for the tier
//!     2. Distribute each drop (record waste when nobody needs it)
//!     3. Grant one unit of the tier's currency to every character
//!   Advance the week counter
//!   Record completion fractions
//! ```
//!
//! A trial ends either party-BIS or at the week limit; both are normal
//! endings, told apart by `TrialSummary::party_bis`. A policy granting to a
//! character who did not need the item is a contract violation: the error
//! propagates out of [`Trial::run_week`] and the trial stops.
//!
//! # Example
//!
//! ```rust
//! use loot_simulator_core_rs::orchestrator::{sample_weeks_to_bis, TrialConfig};
//! use loot_simulator_core_rs::policy::PolicyConfig;
//! use loot_simulator_core_rs::{Catalog, Character, DropTable, Item, Needs, Party};
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::standard());
//! let needs = Needs { raid: [Item::Weapon, Item::Ring].into_iter().collect(), glaze: 1, twine: 1 };
//! let party = Party::new(vec![Character::new("Alys", needs, catalog).unwrap()]);
//!
//! let summary = sample_weeks_to_bis(
//!     party,
//!     &PolicyConfig::NeedPriority,
//!     &DropTable::standard(),
//!     &TrialConfig::default(),
//!     12345,
//! )
//! .unwrap();
//!
//! assert!(summary.party_bis);
//! assert_eq!(summary.bis_by_week.len(), summary.weeks);
//! ```

use crate::drops::DropTable;
use crate::models::{CharacterError, Party, Tier, TrialEvent};
use crate::orchestrator::summary::TrialSummary;
use crate::policy::{LootPolicy, PolicyConfig};
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// Default cap on simulated weeks per trial
pub const DEFAULT_WEEK_LIMIT: usize = 100;

// ============================================================================
// Configuration Types
// ============================================================================

/// Per-trial settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialConfig {
    /// Stop after this many weeks even if the party is not BIS
    pub week_limit: usize,

    /// Characters spend banked currency as soon as it buys something they need
    pub auto_purchase: bool,

    /// Keep an `EventLog` of every allocation
    pub record_events: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            week_limit: DEFAULT_WEEK_LIMIT,
            auto_purchase: false,
            record_events: false,
        }
    }
}

/// Outcome of one simulated week
#[derive(Debug, Clone, PartialEq)]
pub struct WeekResult {
    /// Week number just completed (1-based)
    pub week: usize,

    /// Drops handed to a character
    pub num_granted: usize,

    /// Drops nobody needed
    pub num_wasted: usize,

    /// Auto-purchases made from banked currency
    pub num_purchases: usize,

    /// Characters BIS at the end of the week
    pub characters_bis: usize,

    /// Mean completion fraction at the end of the week
    pub party_fraction: f64,
}

/// Simulation error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// A policy granted an item to a character who did not need it
    #[error("contract violation: {0}")]
    ContractViolation(#[from] CharacterError),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("unknown policy: {0}")]
    UnknownPolicy(String),
}

// ============================================================================
// Trial
// ============================================================================

/// One independent trial: a party, a policy, and a private RNG
///
/// # Determinism
///
/// All randomness comes from the trial's own `RngManager`. Same seed, party
/// and policy give an identical summary regardless of other trials.
pub struct Trial {
    party: Party,
    policy: Box<dyn LootPolicy>,
    drop_table: DropTable,
    rng: RngManager,
    config: TrialConfig,
    week: usize,
    summary: TrialSummary,
}

impl Trial {
    /// # Errors
    ///
    /// `InvalidConfig` if two characters share a name (round-robin
    /// bookkeeping is keyed by name).
    pub fn new(
        party: Party,
        policy_config: &PolicyConfig,
        drop_table: DropTable,
        config: TrialConfig,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        Self::validate_party(&party)?;

        let party = party.with_auto_purchase(config.auto_purchase);
        let summary = TrialSummary::new(policy_config.name(), seed, &party, config.record_events);
        Ok(Self {
            party,
            policy: policy_config.build(),
            drop_table,
            rng: RngManager::new(seed),
            config,
            week: 0,
            summary,
        })
    }

    fn validate_party(party: &Party) -> Result<(), SimulationError> {
        let mut names = BTreeSet::new();
        for character in party.characters() {
            if !names.insert(character.name()) {
                return Err(SimulationError::InvalidConfig(format!(
                    "duplicate character name '{}'",
                    character.name()
                )));
            }
        }
        Ok(())
    }

    pub fn party(&self) -> &Party {
        &self.party
    }

    /// Weeks completed so far
    pub fn week(&self) -> usize {
        self.week
    }

    pub fn summary(&self) -> &TrialSummary {
        &self.summary
    }

    pub fn is_finished(&self) -> bool {
        self.week >= self.config.week_limit || self.party.is_party_bis()
    }

    /// Simulate one full week across all tiers.
    ///
    /// # Errors
    /// `ContractViolation` if the policy breaks its eligibility contract.
    pub fn run_week(&mut self) -> Result<WeekResult, SimulationError> {
        let week = self.week + 1;
        let mut num_granted = 0;
        let mut num_wasted = 0;
        let mut num_purchases = 0;

        for tier in Tier::ALL {
            for item in self.drop_table.roll(tier, &mut self.rng) {
                match self.policy.distribute(&mut self.party, item, &mut self.rng)? {
                    Some(index) => {
                        num_granted += 1;
                        let character = self.party.characters()[index].name().to_string();
                        self.log(TrialEvent::ItemGranted {
                            week,
                            tier,
                            item,
                            character,
                        });
                    }
                    None => {
                        num_wasted += 1;
                        self.summary.record_waste(item);
                        self.log(TrialEvent::ItemWasted { week, tier, item });
                    }
                }
            }

            for purchase in self.party.grant_currency(tier, &mut self.rng)? {
                num_purchases += 1;
                let character = &self.party.characters()[purchase.character];
                let event = character.catalog().price(purchase.item).map(|price| TrialEvent::CurrencyPurchase {
                    week,
                    character: character.name().to_string(),
                    item: purchase.item,
                    tier: price.tier,
                    spent: price.cost,
                });
                if let Some(event) = event {
                    self.log(event);
                }
            }
        }

        self.week = week;
        self.summary.weeks = week;
        self.summary.record_week(&self.party);

        let characters_bis = self.party.how_many_bis();
        let party_fraction = self.party.pct_bis();
        self.log(TrialEvent::WeekCompleted {
            week,
            characters_bis,
            party_fraction,
        });

        Ok(WeekResult {
            week,
            num_granted,
            num_wasted,
            num_purchases,
            characters_bis,
            party_fraction,
        })
    }

    /// Run until party-BIS or the week limit, then hand back the summary.
    pub fn run(mut self) -> Result<TrialSummary, SimulationError> {
        while !self.is_finished() {
            self.run_week()?;
        }
        Ok(self.summary)
    }

    fn log(&mut self, event: TrialEvent) {
        if let Some(events) = self.summary.events.as_mut() {
            events.log(event);
        }
    }
}

/// Run one complete trial with a fresh policy and return its summary.
pub fn sample_weeks_to_bis(
    party: Party,
    policy: &PolicyConfig,
    drop_table: &DropTable,
    config: &TrialConfig,
    seed: u64,
) -> Result<TrialSummary, SimulationError> {
    Trial::new(party, policy, drop_table.clone(), config.clone(), seed)?.run()
}
