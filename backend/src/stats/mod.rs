//! Cross-trial statistics
//!
//! - **aggregate**: per-policy distributions (weeks to BIS, wasted drops,
//!   mean completion curve)
//! - **head_to_head**: matched-seed comparison of two policies
//!
//! Trial `i` of a batch is seeded with `derive_seed(batch.seed, i)` for every
//! policy, so policies are compared on identical random streams.

pub mod aggregate;
pub mod head_to_head;

pub use aggregate::{run_all, run_policy, BatchConfig, PolicyStats, StatsReport};
pub use head_to_head::{compare, CharacterDelta, HeadToHead, HeadToHeadReport};

/// Arithmetic mean (0.0 for an empty sample)
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (0.0 for an empty sample)
pub fn pstdev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
