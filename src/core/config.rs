//! Match configuration.
//!
//! The engine never hardcodes the per-turn rule numbers or presentation
//! pacing; hosts provide them through `MatchConfig` at setup.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Complete match configuration.
///
/// ```
/// use std::time::Duration;
/// use riftbound_engine::core::MatchConfig;
///
/// let config = MatchConfig::new()
///     .with_names("Ahri", "Garen")
///     .with_phase_delay(Duration::ZERO)
///     .with_seed(7);
///
/// assert_eq!(config.player_names[0], "Ahri");
/// assert_eq!(config.runes_per_turn, 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Display names in seat order.
    pub player_names: [String; 2],

    /// Seat index of the local player, if any.
    pub local_seat: Option<usize>,

    /// Runes summoned by the active player in the Summon phase.
    pub runes_per_turn: usize,

    /// Cards drawn by the active player in the Draw phase.
    pub cards_per_draw: usize,

    /// Cards drawn into each opening hand before the first turn.
    pub opening_hand_size: usize,

    /// Number of deck-list entries after the legend that form the rune deck.
    pub rune_deck_size: usize,

    /// Shortest deck list accepted at setup.
    pub min_deck_size: usize,

    /// Pause after every phase (presentation pacing only).
    pub phase_delay: Duration,

    /// Pause after every stack resolution (presentation pacing only).
    pub resolution_delay: Duration,

    /// Seed for deck shuffles and the battlefield pick.
    pub seed: u64,
}

impl MatchConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            player_names: ["Player 1".to_string(), "Player 2".to_string()],
            local_seat: Some(0),
            runes_per_turn: 2,
            cards_per_draw: 1,
            opening_hand_size: 4,
            rune_deck_size: 12,
            min_deck_size: 56,
            phase_delay: Duration::from_millis(500),
            resolution_delay: Duration::from_millis(1000),
            seed: 0,
        }
    }

    /// Defaults with all pacing removed.
    #[must_use]
    pub fn instant() -> Self {
        Self::new()
            .with_phase_delay(Duration::ZERO)
            .with_resolution_delay(Duration::ZERO)
    }

    /// Set both display names.
    #[must_use]
    pub fn with_names(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.player_names = [first.into(), second.into()];
        self
    }

    /// Set the local seat (`None` for spectators or headless simulation).
    #[must_use]
    pub fn with_local_seat(mut self, seat: Option<usize>) -> Self {
        if let Some(seat) = seat {
            assert!(seat < 2, "Local seat must be 0 or 1");
        }
        self.local_seat = seat;
        self
    }

    /// Set runes summoned per turn.
    #[must_use]
    pub fn with_runes_per_turn(mut self, count: usize) -> Self {
        self.runes_per_turn = count;
        self
    }

    /// Set cards drawn per turn.
    #[must_use]
    pub fn with_cards_per_draw(mut self, count: usize) -> Self {
        self.cards_per_draw = count;
        self
    }

    /// Set opening hand size.
    #[must_use]
    pub fn with_opening_hand_size(mut self, size: usize) -> Self {
        self.opening_hand_size = size;
        self
    }

    /// Set the rune deck size and minimum deck-list length together.
    #[must_use]
    pub fn with_deck_shape(mut self, rune_deck_size: usize, min_deck_size: usize) -> Self {
        assert!(
            min_deck_size > rune_deck_size,
            "Deck list must be longer than the rune deck"
        );
        self.rune_deck_size = rune_deck_size;
        self.min_deck_size = min_deck_size;
        self
    }

    /// Set the pause after each phase.
    #[must_use]
    pub fn with_phase_delay(mut self, delay: Duration) -> Self {
        self.phase_delay = delay;
        self
    }

    /// Set the pause after each resolution.
    #[must_use]
    pub fn with_resolution_delay(mut self, delay: Duration) -> Self {
        self.resolution_delay = delay;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Is the given seat the local player?
    #[must_use]
    pub fn is_local(&self, seat: usize) -> bool {
        self.local_seat == Some(seat)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::new()
    }
}
