//! Loot Simulator Core - Rust Engine
//!
//! Monte-carlo simulator for raid loot distribution with deterministic
//! execution.
//!
//! # Architecture
//!
//! - **models**: Domain types (Item, Tier, Catalog, Character, Party, events)
//! - **drops**: Per-tier drop table
//! - **policy**: Loot distribution policies (who gets each drop)
//! - **orchestrator**: Week-by-week trial loop
//! - **stats**: Batch aggregation and head-to-head comparison
//! - **config**: JSON rosters and the fingerprinted roster cache
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Outstanding needs only shrink; a grant always removes exactly one need
//! 2. All randomness is deterministic (seeded RNG, one per trial)
//! 3. FFI boundary is minimal and safe

// Module declarations
pub mod config;
pub mod drops;
pub mod models;
pub mod orchestrator;
pub mod policy;
pub mod rng;
pub mod stats;

// Re-exports for convenience
pub use config::{ConfigError, Roster, RosterCache};
pub use drops::DropTable;
pub use models::{
    catalog::{Catalog, Price},
    character::{Character, CharacterError, Needs},
    event::{EventLog, TrialEvent},
    item::{Item, Tier, TierAmounts},
    party::{Party, Purchase},
};
pub use orchestrator::{sample_weeks_to_bis, SimulationError, Trial, TrialConfig, TrialSummary, WeekResult};
pub use policy::{LootPolicy, PolicyConfig};
pub use rng::RngManager;
pub use stats::{compare, run_all, run_policy, BatchConfig, HeadToHeadReport, PolicyStats, StatsReport};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn loot_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::simulator::PySimulator>()?;
    m.add_function(wrap_pyfunction!(ffi::simulator::policy_names, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::simulator::simulate_policy, m)?)?;
    Ok(())
}
