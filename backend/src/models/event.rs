//! Event logging for trial replay and auditing.
//!
//! Captures every allocation decision made during a trial:
//! - **Grant**: a drop went to a character
//! - **Waste**: a drop nobody needed
//! - **Purchase**: auto-purchase converted banked currency into gear
//! - **Week**: end-of-week progress snapshot
//!
//! Recording is opt-in (`TrialConfig::record_events`).

use crate::models::item::{Item, Tier};
use serde::{Deserialize, Serialize};

/// Trial event capturing a state change.
///
/// Every event carries the 1-based number of the week being simulated.
/// Events are logged in the order they occur.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrialEvent {
    ItemGranted {
        week: usize,
        tier: Tier,
        item: Item,
        character: String,
    },

    ItemWasted {
        week: usize,
        tier: Tier,
        item: Item,
    },

    /// Auto-purchase spent `spent` units of `tier` currency on `item`
    CurrencyPurchase {
        week: usize,
        character: String,
        item: Item,
        tier: Tier,
        spent: u32,
    },

    WeekCompleted {
        week: usize,
        characters_bis: usize,
        party_fraction: f64,
    },
}

impl TrialEvent {
    pub fn week(&self) -> usize {
        match self {
            TrialEvent::ItemGranted { week, .. }
            | TrialEvent::ItemWasted { week, .. }
            | TrialEvent::CurrencyPurchase { week, .. }
            | TrialEvent::WeekCompleted { week, .. } => *week,
        }
    }

    /// Character this event concerns, if any.
    pub fn character(&self) -> Option<&str> {
        match self {
            TrialEvent::ItemGranted { character, .. } | TrialEvent::CurrencyPurchase { character, .. } => {
                Some(character)
            }
            TrialEvent::ItemWasted { .. } | TrialEvent::WeekCompleted { .. } => None,
        }
    }
}

/// Append-only event log
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<TrialEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn log(&mut self, event: TrialEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[TrialEvent] {
        &self.events
    }

    pub fn events_for_character<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a TrialEvent> + 'a {
        self.events.iter().filter(move |e| e.character() == Some(name))
    }

    pub fn events_in_week(&self, week: usize) -> impl Iterator<Item = &TrialEvent> + '_ {
        self.events.iter().filter(move |e| e.week() == week)
    }

    pub fn wasted_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TrialEvent::ItemWasted { .. }))
            .count()
    }
}
