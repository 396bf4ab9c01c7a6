//! Party roster configuration
//!
//! - **roster**: parse and validate a party file into a ready-to-clone `Party`
//! - **cache**: explicit cache of parsed rosters keyed by path and content hash

pub mod cache;
pub mod roster;

pub use cache::{fingerprint, RosterCache};
pub use roster::{CharacterTargets, ConfigError, Roster, TargetSource};
