//! xorshift64* random number generator
//!
//! Fast, deterministic PRNG. One instance is owned by each trial, so a
//! trial's outcome depends only on its seed and never on which trials ran
//! before it.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws → same trial summary.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use loot_simulator_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let slot = rng.index(3).unwrap(); // [0, 3)
/// let pick = rng.choose(&["head", "hands", "feet"]);
/// assert!(slot < 3);
/// assert!(pick.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed. A zero seed is mapped to 1.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create the RNG for trial `trial_index` of a batch seeded with `base_seed`.
    ///
    /// Trials seeded this way are independent of execution order, so a batch
    /// can be split across workers and reduced afterwards.
    pub fn for_trial(base_seed: u64, trial_index: u64) -> Self {
        Self::new(derive_seed(base_seed, trial_index))
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Uniform index in `[0, len)`, or `None` when `len == 0`.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some((self.next() % len as u64) as usize)
    }

    /// Pick one element uniformly at random.
    ///
    /// Returns `None` for an empty slice; no draw is consumed in that case.
    pub fn choose<'a, T>(&mut self, options: &'a [T]) -> Option<&'a T> {
        self.index(options.len()).map(|i| &options[i])
    }

    /// Get current RNG state (for replay)
    pub fn get_state(&self) -> u64 {
        self.state
    }
}

/// Mix a base seed and a trial index into a trial seed (one splitmix64 step).
pub fn derive_seed(base_seed: u64, trial_index: u64) -> u64 {
    let mut z = base_seed.wrapping_add(trial_index.wrapping_add(1).wrapping_mul(0x9E3779B97F4A7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
