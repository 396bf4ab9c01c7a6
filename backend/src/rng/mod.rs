//! Deterministic random number generation
//!
//! Uses xorshift64* for every random draw in a trial: drop rolls,
//! tie-breaks between equally eligible characters, and auto-purchase picks.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod xorshift;

pub use xorshift::{derive_seed, RngManager};
