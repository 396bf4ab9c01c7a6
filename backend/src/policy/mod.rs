//! Loot Distribution Policy Module
//!
//! Decides, for every dropped item, which party member receives it.
//!
//! # Policy Interface
//!
//! All policies implement the `LootPolicy` trait:
//! ```rust
//! use loot_simulator_core_rs::policy::LootPolicy;
//! use loot_simulator_core_rs::{CharacterError, Item, Party, RngManager};
//!
//! struct FirstInLine;
//!
//! impl LootPolicy for FirstInLine {
//!     fn distribute(
//!         &mut self,
//!         party: &mut Party,
//!         item: Item,
//!         _rng: &mut RngManager,
//!     ) -> Result<Option<usize>, CharacterError> {
//!         match party.needing(item).first() {
//!             Some(&index) => party.give(index, item).map(|_| Some(index)),
//!             None => Ok(None),
//!         }
//!     }
//!
//!     fn reset(&mut self) {}
//! }
//! ```
//!
//! # Available policies
//!
//! The closed set is described by [`PolicyConfig`]:
//! 1. **NeedPriority**: uniform among characters who need the item
//! 2. **RoundRobin**: least-served within the item's category group
//! 3. **EarlyPriority**: round robin, but heavy material needs go first
//!
//! Policy state lives for one trial. Build a fresh policy per trial with
//! [`PolicyConfig::build`] (or call [`LootPolicy::reset`]).

use crate::models::{CharacterError, Item, Party};
use crate::orchestrator::SimulationError;
use crate::rng::RngManager;
use serde::{Deserialize, Serialize};

pub mod early_priority;
pub mod groups;
pub mod need_priority;
pub mod round_robin;

pub use early_priority::{EarlyPriorityPolicy, EARLY_PRIORITY_THRESHOLD};
pub use groups::{CategoryGroups, GroupId, Grouping, UNGROUPED};
pub use need_priority::NeedPriorityPolicy;
pub use round_robin::RoundRobinPolicy;

/// Loot distribution policy trait
pub trait LootPolicy {
    /// Hand `item` to at most one character.
    ///
    /// Returns the recipient's party index, or `None` when nobody needs the
    /// item (a wasted drop, not an error).
    ///
    /// # Errors
    /// A `CharacterError` means the policy granted to a character who did
    /// not need the item. The trial must stop.
    fn distribute(&mut self, party: &mut Party, item: Item, rng: &mut RngManager) -> Result<Option<usize>, CharacterError>;

    /// Forget all per-trial state.
    fn reset(&mut self);
}

/// Policy selection
///
/// Serialized with a `type` tag:
/// `{"type": "early_priority", "grouping": "granular", "glaze": true, "twine": false}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PolicyConfig {
    NeedPriority,

    RoundRobin { grouping: Grouping },

    EarlyPriority {
        grouping: Grouping,
        /// Serve heavy glaze needs first
        glaze: bool,
        /// Serve heavy twine needs first
        twine: bool,
    },
}

impl PolicyConfig {
    /// The seven policies compared by the batch harness, in report order.
    pub fn presets() -> Vec<PolicyConfig> {
        vec![
            PolicyConfig::NeedPriority,
            PolicyConfig::RoundRobin {
                grouping: Grouping::Flat,
            },
            PolicyConfig::RoundRobin {
                grouping: Grouping::Granular,
            },
            PolicyConfig::RoundRobin {
                grouping: Grouping::LessGranular,
            },
            PolicyConfig::EarlyPriority {
                grouping: Grouping::Granular,
                glaze: true,
                twine: false,
            },
            PolicyConfig::EarlyPriority {
                grouping: Grouping::Granular,
                glaze: true,
                twine: true,
            },
            PolicyConfig::EarlyPriority {
                grouping: Grouping::LessGranular,
                glaze: true,
                twine: true,
            },
        ]
    }

    /// Display name, e.g. `GranularEarlyGlazeTwine`.
    pub fn name(&self) -> String {
        match *self {
            PolicyConfig::NeedPriority => "NeedPriority".to_string(),
            PolicyConfig::RoundRobin { grouping } => format!("{}RoundRobin", grouping.prefix()),
            PolicyConfig::EarlyPriority { grouping, glaze, twine } => {
                let mut name = format!("{}Early", grouping.prefix());
                if glaze {
                    name.push_str("Glaze");
                }
                if twine {
                    name.push_str("Twine");
                }
                name
            }
        }
    }

    /// Look up a policy by its display name.
    pub fn from_name(name: &str) -> Option<PolicyConfig> {
        Self::all().into_iter().find(|config| config.name() == name)
    }

    /// Every expressible configuration (presets plus the other overlay mixes).
    pub fn all() -> Vec<PolicyConfig> {
        let groupings = [Grouping::Flat, Grouping::Granular, Grouping::LessGranular];
        let mut all = vec![PolicyConfig::NeedPriority];
        all.extend(groupings.iter().map(|&grouping| PolicyConfig::RoundRobin { grouping }));
        for &grouping in &groupings {
            for (glaze, twine) in [(true, false), (false, true), (true, true)] {
                all.push(PolicyConfig::EarlyPriority { grouping, glaze, twine });
            }
        }
        all
    }

    /// Build a fresh policy with empty per-trial state.
    pub fn build(&self) -> Box<dyn LootPolicy> {
        match *self {
            PolicyConfig::NeedPriority => Box::new(NeedPriorityPolicy::new()),
            PolicyConfig::RoundRobin { grouping } => Box::new(RoundRobinPolicy::new(grouping.groups())),
            PolicyConfig::EarlyPriority { grouping, glaze, twine } => Box::new(EarlyPriorityPolicy::new(
                RoundRobinPolicy::new(grouping.groups()),
                glaze,
                twine,
            )),
        }
    }
}

impl std::str::FromStr for PolicyConfig {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_name(name).ok_or_else(|| SimulationError::UnknownPolicy(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_names() {
        let names: Vec<String> = PolicyConfig::presets().iter().map(PolicyConfig::name).collect();
        assert_eq!(
            names,
            vec![
                "NeedPriority",
                "RoundRobin",
                "GranularRoundRobin",
                "LessGranularRoundRobin",
                "GranularEarlyGlaze",
                "GranularEarlyGlazeTwine",
                "LessGranularEarlyGlazeTwine",
            ]
        );
    }

    #[test]
    fn test_from_name_round_trips_every_config() {
        for config in PolicyConfig::all() {
            assert_eq!(PolicyConfig::from_name(&config.name()), Some(config));
        }
        assert_eq!(PolicyConfig::from_name("Bogus"), None);
        assert_eq!(
            "Bogus".parse::<PolicyConfig>(),
            Err(SimulationError::UnknownPolicy("Bogus".to_string()))
        );
    }

    #[test]
    fn test_serde_tagged() {
        let config: PolicyConfig =
            serde_json::from_str(r#"{"type": "round_robin", "grouping": "less_granular"}"#).unwrap();
        assert_eq!(
            config,
            PolicyConfig::RoundRobin {
                grouping: Grouping::LessGranular
            }
        );
    }
}
