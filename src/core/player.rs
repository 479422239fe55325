//! Player identification and the per-player match record.
//!
//! ## PlayerId
//!
//! A match always has exactly two players: `PlayerId(0)` and `PlayerId(1)`.
//! `opponent()` is therefore total.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `PlayerId`.
//!
//! ## Player
//!
//! Turn-scoped identity plus the resources and card collections the phase
//! logic touches. Created once at match setup and mutated for the lifetime
//! of the match.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use tracing::{debug, warn};

use crate::cards::CardInstance;
use crate::effects::ModifierDuration;

/// Player identifier: 0 or 1.
///
/// The seat index is private so every value in circulation is valid;
/// decoding rejects anything other than 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// The player who takes the first turn.
    pub const FIRST: PlayerId = PlayerId(0);

    /// The player who takes the second turn.
    pub const SECOND: PlayerId = PlayerId(1);

    /// Create a new player ID.
    ///
    /// Panics if `id` is not 0 or 1.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        assert!(id < 2, "Only two players are supported");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in seat order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [Self::FIRST, Self::SECOND].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if id < 2 {
            Ok(Self(id))
        } else {
            Err(format!("invalid player seat {id}, expected 0 or 1"))
        }
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use riftbound_engine::core::{PlayerId, PlayerMap};
///
/// let mut score: PlayerMap<i64> = PlayerMap::with_value(0);
/// score[PlayerId::SECOND] += 3;
/// assert_eq!(score[PlayerId::FIRST], 0);
/// assert_eq!(score[PlayerId::SECOND], 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(mut factory: impl FnMut(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::FIRST), factory(PlayerId::SECOND)],
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// A player-level modifier such as "next spell costs 1 less".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerModifier {
    /// Game-defined modifier key.
    pub buff: String,
    pub amount: i64,
    pub duration: ModifierDuration,
}

/// One of the two players in a match.
///
/// Priority is deliberately absent: it is derived from the
/// [`PriorityArbiter`](crate::stack::PriorityArbiter), never stored here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Is this the player sitting at this client?
    pub is_local: bool,

    // === Turn resources ===
    pub mana: i64,
    pub runes: i64,
    pub score: i64,

    // === Cards ===
    /// Hand, in draw order.
    pub hand: Vector<CardInstance>,
    /// Main deck; the front is the top.
    pub main_deck: Vector<CardInstance>,
    /// Rune deck; the front is the top.
    pub rune_deck: Vector<CardInstance>,
    /// Runes summoned so far.
    pub rune_field: Vector<CardInstance>,
    pub legend: Option<CardInstance>,
    pub champion: Option<CardInstance>,
    pub battlefield: Option<CardInstance>,

    pub modifiers: Vec<PlayerModifier>,
}

impl Player {
    /// Create a player with empty collections and zeroed resources.
    pub fn new(id: PlayerId, name: impl Into<String>, is_local: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_local,
            mana: 0,
            runes: 0,
            score: 0,
            hand: Vector::new(),
            main_deck: Vector::new(),
            rune_deck: Vector::new(),
            rune_field: Vector::new(),
            legend: None,
            champion: None,
            battlefield: None,
            modifiers: Vec::new(),
        }
    }

    /// Move up to `count` runes from the top of the rune deck to the rune field.
    ///
    /// The rune pool grows by the number actually moved, which is returned.
    pub fn summon_runes(&mut self, count: usize) -> usize {
        let mut moved = 0;
        for _ in 0..count {
            let Some(rune) = self.rune_deck.pop_front() else {
                break;
            };
            self.rune_field.push_back(rune);
            moved += 1;
        }
        self.runes = self.runes.saturating_add(moved as i64);
        debug!(player = %self.name, requested = count, moved, "Summoned runes");
        moved
    }

    /// Draw up to `count` cards from the top of the main deck into hand.
    ///
    /// Drawing from an empty deck draws nothing and logs a burn-out warning.
    pub fn draw_cards(&mut self, count: usize) -> Vec<CardInstance> {
        let mut drawn = Vec::with_capacity(count.min(self.main_deck.len()));
        for _ in 0..count {
            match self.main_deck.pop_front() {
                Some(card) => {
                    self.hand.push_back(card.clone());
                    drawn.push(card);
                }
                None => {
                    warn!(player = %self.name, "Main deck is empty, nothing to draw");
                    break;
                }
            }
        }
        debug!(player = %self.name, drawn = drawn.len(), "Drew cards");
        drawn
    }

    /// Expire the per-turn resource pools.
    ///
    /// This is an absolute set, not a decrement, so repeating it is harmless.
    pub fn reset_turn_resources(&mut self) {
        self.mana = 0;
        self.runes = 0;
    }

    /// Remove a card from hand by entity ID.
    pub fn take_from_hand(&mut self, uid: crate::core::EntityId) -> Option<CardInstance> {
        let pos = self.hand.iter().position(|c| c.uid == uid)?;
        Some(self.hand.remove(pos))
    }

    /// Drop all `ThisTurn` player modifiers.
    pub fn clear_temporary_modifiers(&mut self) {
        self.modifiers
            .retain(|m| m.duration != ModifierDuration::ThisTurn);
    }

    /// Sum of all modifiers with the given key.
    #[must_use]
    pub fn modifier_total(&self, buff: &str) -> i64 {
        self.modifiers
            .iter()
            .filter(|m| m.buff == buff)
            .fold(0_i64, |total, m| total.saturating_add(m.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::core::EntityId;

    fn card(uid: u32, id: &str) -> CardInstance {
        CardInstance::new(EntityId(uid), CardId::new(id))
    }

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::FIRST.index(), 0);
        assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
        assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
        assert_eq!(format!("{}", PlayerId::SECOND), "Player 1");
        assert_eq!(PlayerId::both().count(), 2);
    }

    #[test]
    #[should_panic(expected = "Only two players are supported")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_id_decode_rejects_third_seat() {
        let second: PlayerId = serde_json::from_str("1").unwrap();
        assert_eq!(second, PlayerId::SECOND);
        assert_eq!(serde_json::to_string(&PlayerId::SECOND).unwrap(), "1");

        assert!(serde_json::from_str::<PlayerId>("2").is_err());
        assert!(PlayerId::try_from(7).is_err());
    }

    #[test]
    fn test_player_map_iter() {
        let map: PlayerMap<usize> = PlayerMap::new(|p| p.index() * 10);
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::FIRST, &0), (PlayerId::SECOND, &10)]);
    }

    #[test]
    fn test_summon_runes_moves_from_deck() {
        let mut player = Player::new(PlayerId::FIRST, "P1", true);
        player.rune_deck = (0..3).map(|i| card(i, "RUNE")).collect();

        assert_eq!(player.summon_runes(2), 2);
        assert_eq!(player.runes, 2);
        assert_eq!(player.rune_deck.len(), 1);
        assert_eq!(player.rune_field.len(), 2);

        // Only one left
        assert_eq!(player.summon_runes(2), 1);
        assert_eq!(player.runes, 3);
    }

    #[test]
    fn test_draw_from_top() {
        let mut player = Player::new(PlayerId::FIRST, "P1", true);
        player.main_deck = vec![card(1, "A"), card(2, "B")].into_iter().collect();

        let drawn = player.draw_cards(1);
        assert_eq!(drawn[0].uid, EntityId(1));
        assert_eq!(player.hand.len(), 1);

        // Asking for more than remains draws what is there
        let drawn = player.draw_cards(5);
        assert_eq!(drawn.len(), 1);
        assert!(player.main_deck.is_empty());
        assert_eq!(player.hand.len(), 2);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut player = Player::new(PlayerId::FIRST, "P1", true);
        player.mana = 4;
        player.runes = 2;

        player.reset_turn_resources();
        assert_eq!((player.mana, player.runes), (0, 0));
        player.reset_turn_resources();
        assert_eq!((player.mana, player.runes), (0, 0));
    }

    #[test]
    fn test_take_from_hand() {
        let mut player = Player::new(PlayerId::FIRST, "P1", true);
        player.hand = vec![card(1, "A"), card(2, "B")].into_iter().collect();

        assert_eq!(player.take_from_hand(EntityId(2)).map(|c| c.uid), Some(EntityId(2)));
        assert!(player.take_from_hand(EntityId(2)).is_none());
        assert_eq!(player.hand.len(), 1);
    }

    #[test]
    fn test_temporary_modifiers_cleared() {
        let mut player = Player::new(PlayerId::FIRST, "P1", true);
        player.modifiers.push(PlayerModifier {
            buff: "NextSpellCostReduction".into(),
            amount: 1,
            duration: ModifierDuration::ThisTurn,
        });
        player.modifiers.push(PlayerModifier {
            buff: "NextSpellCostReduction".into(),
            amount: 2,
            duration: ModifierDuration::Permanent,
        });
        assert_eq!(player.modifier_total("NextSpellCostReduction"), 3);

        player.clear_temporary_modifiers();
        assert_eq!(player.modifier_total("NextSpellCostReduction"), 2);
    }
}
