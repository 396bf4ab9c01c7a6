//! Domain models for the loot simulator

pub mod catalog;
pub mod character;
pub mod event;
pub mod item;
pub mod party;

// Re-exports
pub use catalog::{Catalog, Price};
pub use character::{Character, CharacterError, Needs, MAX_NEED_COUNT};
pub use event::{EventLog, TrialEvent};
pub use item::{Item, Tier, TierAmounts};
pub use party::{Party, Purchase};
