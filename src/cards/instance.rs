//! Card instances - one physical copy of a card in a match.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::EntityId;

/// A specific copy of a card.
///
/// `uid` distinguishes copies; `card` looks the definition up in the
/// [`CardDataProvider`](super::CardDataProvider).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    pub uid: EntityId,
    pub card: CardId,
}

impl CardInstance {
    #[must_use]
    pub fn new(uid: EntityId, card: CardId) -> Self {
        Self { uid, card }
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.card, self.uid.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let card = CardInstance::new(EntityId(1003), CardId::new("OGN_005"));
        assert_eq!(format!("{}", card), "OGN_005#1003");
    }
}
