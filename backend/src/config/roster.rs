//! Roster file parsing
//!
//! A roster maps each character to the source of every targeted slot:
//!
//! ```json
//! {
//!   "Alys": { "weapon": "raid", "head": "tome", "ring_l": "raid", "ring_r": "tome" },
//!   "Brom": { "weapon": "tome", "chest": "raid" }
//! }
//! ```
//!
//! - `"raid"` slots become raid needs (a set: two raid rings are one need)
//! - `"tome"` armor slots add one twine need each, accessory slots one glaze
//! - a `"tome"` weapon adds nothing
//! - `ring` may not be combined with `ring_l`/`ring_r`
//!
//! Characters keep their file order. Unknown slots or tags and repeated
//! character or slot keys are rejected; nothing is silently defaulted.

use crate::models::{Catalog, Character, CharacterError, Item, Needs, Party};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse roster: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{character}: unknown slot '{slot}'")]
    UnknownSlot { character: String, slot: String },

    #[error("invalid character: {0}")]
    Character(#[from] CharacterError),

    #[error("character '{0}' is listed more than once")]
    DuplicateCharacter(String),

    #[error("{character}: slot '{slot}' is listed more than once")]
    DuplicateSlot { character: String, slot: String },

    #[error("{character}: 'ring' cannot be combined with 'ring_l'/'ring_r'")]
    ConflictingRingSlots { character: String },

    #[error("roster has no characters")]
    Empty,
}

/// A JSON object read as key/value pairs in file order, repeats included.
struct Entries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

/// Where a targeted slot comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSource {
    Raid,
    #[serde(alias = "currency")]
    Tome,
}

/// One character's slot → source map, as written in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTargets {
    pub name: String,
    pub slots: BTreeMap<String, TargetSource>,
}

impl CharacterTargets {
    /// Translate targets into outstanding needs.
    pub fn needs(&self, catalog: &Catalog) -> Result<Needs, ConfigError> {
        if self.slots.contains_key("ring") && (self.slots.contains_key("ring_l") || self.slots.contains_key("ring_r")) {
            return Err(ConfigError::ConflictingRingSlots {
                character: self.name.clone(),
            });
        }
        let mut needs = Needs::default();
        for (slot, source) in &self.slots {
            let item = Item::from_slot_name(slot).ok_or_else(|| ConfigError::UnknownSlot {
                character: self.name.clone(),
                slot: slot.clone(),
            })?;
            match (source, catalog.upgrade_material(item)) {
                (TargetSource::Raid, _) => {
                    needs.raid.insert(item);
                }
                (TargetSource::Tome, Some(Item::Glaze)) => needs.glaze += 1,
                (TargetSource::Tome, Some(Item::Twine)) => needs.twine += 1,
                (TargetSource::Tome, _) => {}
            }
        }
        Ok(needs)
    }
}

/// A validated party roster
///
/// Holds a pristine `Party`; every trial starts from a clone of it.
#[derive(Debug, Clone)]
pub struct Roster {
    targets: Vec<CharacterTargets>,
    party: Party,
}

impl Roster {
    pub fn from_slice(bytes: &[u8], catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        let Entries(raw): Entries<Entries<TargetSource>> = serde_json::from_slice(bytes)?;
        let mut targets = Vec::with_capacity(raw.len());
        for (name, Entries(entries)) in raw {
            let mut slots = BTreeMap::new();
            for (slot, source) in entries {
                if slots.insert(slot.clone(), source).is_some() {
                    return Err(ConfigError::DuplicateSlot { character: name, slot });
                }
            }
            targets.push(CharacterTargets { name, slots });
        }
        Self::from_targets(targets, catalog)
    }

    pub fn from_json(json: &str, catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        Self::from_slice(json.as_bytes(), catalog)
    }

    pub fn from_path(path: impl AsRef<Path>, catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_slice(&bytes, catalog)
    }

    pub fn from_targets(targets: Vec<CharacterTargets>, catalog: Arc<Catalog>) -> Result<Self, ConfigError> {
        if targets.is_empty() {
            return Err(ConfigError::Empty);
        }
        let mut seen = HashSet::new();
        if let Some(repeated) = targets.iter().find(|t| !seen.insert(t.name.as_str())) {
            return Err(ConfigError::DuplicateCharacter(repeated.name.clone()));
        }
        let characters = targets
            .iter()
            .map(|t| Ok(Character::new(t.name.clone(), t.needs(&catalog)?, catalog.clone())?))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        Ok(Self {
            targets,
            party: Party::new(characters),
        })
    }

    /// A fresh party for one trial
    pub fn party(&self) -> Party {
        self.party.clone()
    }

    pub fn targets(&self) -> &[CharacterTargets] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Arc<Catalog> {
        Arc::new(Catalog::standard())
    }

    #[test]
    fn test_needs_translation() {
        let json = r#"{
            "Alys": {
                "weapon": "tome", "head": "tome", "chest": "raid", "legs": "tome",
                "earring": "tome", "ring_l": "raid", "ring_r": "raid", "neck": "currency"
            }
        }"#;
        let roster = Roster::from_json(json, catalog()).unwrap();
        let party = roster.party();
        let alys = &party.characters()[0];

        assert_eq!(
            alys.needed_raid().iter().copied().collect::<Vec<_>>(),
            vec![Item::Chest, Item::Ring]
        );
        assert_eq!(alys.needed_twine(), 2);
        assert_eq!(alys.needed_glaze(), 2);
        assert!(!alys.needs(Item::Weapon));
    }

    #[test]
    fn test_tome_rings_count_twice() {
        let json = r#"{"Brom": {"ring_l": "tome", "ring_r": "tome"}}"#;
        let roster = Roster::from_json(json, catalog()).unwrap();
        assert_eq!(roster.party().characters()[0].needed_glaze(), 2);
    }

    #[test]
    fn test_unknown_slot_rejected() {
        let json = r#"{"Brom": {"belt": "raid"}}"#;
        let err = Roster::from_json(json, catalog()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSlot { ref slot, .. } if slot == "belt"));
    }

    #[test]
    fn test_unknown_source_rejected() {
        let json = r#"{"Brom": {"head": "crafted"}}"#;
        assert!(matches!(Roster::from_json(json, catalog()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_repeated_character_rejected() {
        let json = r#"{"Alys": {"weapon": "raid"}, "Alys": {"head": "raid"}}"#;
        let err = Roster::from_json(json, catalog()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateCharacter(ref name) if name == "Alys"));
    }

    #[test]
    fn test_repeated_slot_rejected() {
        let json = r#"{"Alys": {"head": "raid", "head": "tome"}}"#;
        let err = Roster::from_json(json, catalog()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateSlot { ref character, ref slot } if character == "Alys" && slot == "head"
        ));
    }

    #[test]
    fn test_ring_with_split_rings_rejected() {
        let json = r#"{"Alys": {"ring": "tome", "ring_l": "tome", "ring_r": "tome"}}"#;
        let err = Roster::from_json(json, catalog()).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingRingSlots { ref character } if character == "Alys"));

        let single = Roster::from_json(r#"{"Alys": {"ring": "tome"}}"#, catalog()).unwrap();
        assert_eq!(single.party().characters()[0].needed_glaze(), 1);
    }

    #[test]
    fn test_file_order_kept() {
        let json = r#"{"Zed": {"head": "raid"}, "Amy": {"hands": "raid"}, "Kit": {"feet": "raid"}}"#;
        let roster = Roster::from_json(json, catalog()).unwrap();
        let names: Vec<&str> = roster.targets().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Zed", "Amy", "Kit"]);
        let party = roster.party();
        let party_names: Vec<&str> = party.characters().iter().map(|c| c.name()).collect();
        assert_eq!(party_names, names);
    }

    #[test]
    fn test_empty_roster_rejected() {
        assert!(matches!(Roster::from_json("{}", catalog()), Err(ConfigError::Empty)));
    }
}
