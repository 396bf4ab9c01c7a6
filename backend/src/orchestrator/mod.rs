//! Orchestrator - trial loop
//!
//! Runs one trial week by week. See `engine.rs` for the loop itself and
//! `summary.rs` for what a finished trial reports.

pub mod engine;
pub mod summary;

// Re-export main types for convenience
pub use engine::{sample_weeks_to_bis, SimulationError, Trial, TrialConfig, WeekResult, DEFAULT_WEEK_LIMIT};
pub use summary::{CharacterProgress, TrialSummary};
