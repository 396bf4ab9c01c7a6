//! Need-priority policy
//!
//! Simplest baseline: any character who needs the item may receive it,
//! chosen uniformly at random. No memory between drops.

use super::LootPolicy;
use crate::models::{CharacterError, Item, Party};
use crate::rng::RngManager;

#[derive(Debug, Clone, Default)]
pub struct NeedPriorityPolicy;

impl NeedPriorityPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl LootPolicy for NeedPriorityPolicy {
    fn distribute(&mut self, party: &mut Party, item: Item, rng: &mut RngManager) -> Result<Option<usize>, CharacterError> {
        let options = party.needing(item);
        let Some(&winner) = rng.choose(&options) else {
            return Ok(None);
        };
        party.give(winner, item)?;
        Ok(Some(winner))
    }

    fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Catalog, Character, Needs};
    use std::sync::Arc;

    #[test]
    fn test_only_needing_characters_receive() {
        let catalog = Arc::new(Catalog::standard());
        let mut party = Party::new(vec![
            Character::new("A", Needs::default(), catalog.clone()).unwrap(),
            Character::new(
                "B",
                Needs {
                    raid: [Item::Weapon].into_iter().collect(),
                    ..Needs::default()
                },
                catalog,
            )
            .unwrap(),
        ]);
        let mut policy = NeedPriorityPolicy::new();
        let mut rng = RngManager::new(4);

        assert_eq!(policy.distribute(&mut party, Item::Weapon, &mut rng).unwrap(), Some(1));
        assert_eq!(policy.distribute(&mut party, Item::Weapon, &mut rng).unwrap(), None);
    }
}
