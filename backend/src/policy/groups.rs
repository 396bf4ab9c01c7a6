//! Round-robin category groups
//!
//! A category group is a fairness bucket: round-robin counts grants per
//! (group, character), so items in the same group take turns across the
//! party. Items missing from a table share the fallback group
//! [`UNGROUPED`].

use crate::models::item::Item;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type GroupId = i32;

/// Group for any item a table does not classify
pub const UNGROUPED: GroupId = -1;

/// Named group tables shipped with the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grouping {
    /// Every item in one bucket
    Flat,
    /// head/hands/feet, chest/legs, weapon, accessories, glaze, twine
    Granular,
    /// armor + twine, weapon, accessories + glaze
    LessGranular,
}

impl Grouping {
    pub fn groups(self) -> CategoryGroups {
        match self {
            Grouping::Flat => CategoryGroups::default(),
            Grouping::Granular => CategoryGroups::new([
                (Item::Head, 0),
                (Item::Hands, 0),
                (Item::Feet, 0),
                (Item::Chest, 1),
                (Item::Legs, 1),
                (Item::Weapon, 2),
                (Item::Earring, 3),
                (Item::Neck, 3),
                (Item::Wrist, 3),
                (Item::Ring, 3),
                (Item::Glaze, 4),
                (Item::Twine, 5),
            ]),
            Grouping::LessGranular => CategoryGroups::new([
                (Item::Head, 0),
                (Item::Hands, 0),
                (Item::Feet, 0),
                (Item::Chest, 0),
                (Item::Legs, 0),
                (Item::Twine, 0),
                (Item::Weapon, 1),
                (Item::Earring, 2),
                (Item::Neck, 2),
                (Item::Wrist, 2),
                (Item::Ring, 2),
                (Item::Glaze, 2),
            ]),
        }
    }

    /// Name prefix used by preset policy names
    pub(crate) fn prefix(self) -> &'static str {
        match self {
            Grouping::Flat => "",
            Grouping::Granular => "Granular",
            Grouping::LessGranular => "LessGranular",
        }
    }
}

/// Item → group table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroups {
    table: BTreeMap<Item, GroupId>,
}

impl CategoryGroups {
    pub fn new(entries: impl IntoIterator<Item = (Item, GroupId)>) -> Self {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    pub fn group_of(&self, item: Item) -> GroupId {
        self.table.get(&item).copied().unwrap_or(UNGROUPED)
    }
}
