//! Board state: everything commands resolve against.
//!
//! ## Board
//!
//! - Both `Player` records
//! - The unit arena (every unit on the board, single owner)
//! - The entity ID allocator
//!
//! The turn machinery (stack, priority, phase) lives beside the board in
//! [`Match`](crate::game::Match), not inside it, so commands can never
//! reach back into the stack that is resolving them.

use serde::{Deserialize, Serialize};

use super::entity::{EntityAllocator, EntityId};
use super::player::{Player, PlayerId, PlayerMap};
use crate::cards::{CardId, CardInstance};
use crate::units::UnitArena;

/// Mutable game state shared by phases and commands.
///
/// Uses `im` vectors inside each `Player` so cloning for a snapshot is cheap.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    pub players: PlayerMap<Player>,
    pub units: UnitArena,
    entities: EntityAllocator,
}

impl Board {
    /// Create a board with two empty players.
    #[must_use]
    pub fn new(names: [&str; 2], local_seat: Option<usize>) -> Self {
        Self {
            players: PlayerMap::new(|p| {
                Player::new(p, names[p.index()], local_seat == Some(p.index()))
            }),
            units: UnitArena::new(),
            entities: EntityAllocator::new(),
        }
    }

    /// Get a player.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// Get a mutable player.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        self.entities.alloc()
    }

    /// Create a fresh card instance for a definition.
    pub fn instantiate(&mut self, card: CardId) -> CardInstance {
        CardInstance::new(self.alloc_entity(), card)
    }

    /// End-of-turn cleanup of "this turn" modifiers on players and units.
    pub fn clear_temporary_modifiers(&mut self) {
        for (_, player) in self.players.iter_mut() {
            player.clear_temporary_modifiers();
        }
        self.units.clear_temporary_modifiers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{ModifierDuration, UnitStat};
    use crate::core::PlayerModifier;

    #[test]
    fn test_board_new() {
        let board = Board::new(["Ahri", "Garen"], Some(1));

        assert_eq!(board.player(PlayerId::FIRST).name, "Ahri");
        assert!(!board.player(PlayerId::FIRST).is_local);
        assert!(board.player(PlayerId::SECOND).is_local);
        assert!(board.units.is_empty());
    }

    #[test]
    fn test_instantiate_allocates_unique_ids() {
        let mut board = Board::new(["A", "B"], None);
        let a = board.instantiate(CardId::new("OGN_001"));
        let b = board.instantiate(CardId::new("OGN_001"));

        assert_ne!(a.uid, b.uid);
        assert_eq!(a.card, b.card);
    }

    #[test]
    fn test_clear_temporary_modifiers() {
        let mut board = Board::new(["A", "B"], None);
        let card = board.instantiate(CardId::new("U"));
        let unit = board.units.summon(card, PlayerId::FIRST, 2, 2, false);
        board
            .units
            .get_mut(unit)
            .unwrap()
            .add_modifier(UnitStat::Power, 3, ModifierDuration::ThisTurn);
        board.player_mut(PlayerId::SECOND).modifiers.push(PlayerModifier {
            buff: "x".into(),
            amount: 1,
            duration: ModifierDuration::ThisTurn,
        });

        board.clear_temporary_modifiers();

        assert_eq!(board.units.get(unit).unwrap().power(), 2);
        assert!(board.player(PlayerId::SECOND).modifiers.is_empty());
    }
}
