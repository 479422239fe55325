//! Match setup from deck lists.

use std::sync::Arc;

use tracing::info;

use super::engine::{Match, SharedCards};
use crate::cards::{CardId, DeckLayout};
use crate::core::{MatchConfig, PlayerId, PlayerMap};
use crate::error::Result;
use crate::rules::{NoScoring, ScoreKeeper};
use crate::triggers::{TriggerBroker, TriggerRegistry};
use crate::turn::{Notifier, NullNotifier};

/// Builder for a [`Match`].
///
/// Decks are optional; a seat without one starts with empty zones.
///
/// ```
/// use std::sync::Arc;
/// use riftbound_engine::cards::CardRegistry;
/// use riftbound_engine::core::MatchConfig;
/// use riftbound_engine::game::MatchBuilder;
/// use riftbound_engine::turn::EventLog;
///
/// let log = EventLog::new();
/// let game = MatchBuilder::new(MatchConfig::instant(), Arc::new(CardRegistry::new()))
///     .with_notifier(log.clone())
///     .build()
///     .unwrap();
///
/// assert_eq!(game.round(), 0);
/// assert!(log.is_empty());
/// ```
pub struct MatchBuilder<B: TriggerBroker = TriggerRegistry> {
    config: MatchConfig,
    cards: SharedCards,
    broker: B,
    scorer: Box<dyn ScoreKeeper>,
    notifier: Box<dyn Notifier>,
    decks: PlayerMap<Option<Vec<CardId>>>,
}

impl MatchBuilder<TriggerRegistry> {
    #[must_use]
    pub fn new(config: MatchConfig, cards: SharedCards) -> Self {
        Self {
            config,
            cards,
            broker: TriggerRegistry::new(),
            scorer: Box::new(NoScoring),
            notifier: Box::new(NullNotifier),
            decks: PlayerMap::with_value(None),
        }
    }
}

impl<B: TriggerBroker> MatchBuilder<B> {
    /// Swap in a different trigger broker.
    #[must_use]
    pub fn with_broker<T: TriggerBroker>(self, broker: T) -> MatchBuilder<T> {
        MatchBuilder {
            config: self.config,
            cards: self.cards,
            broker,
            scorer: self.scorer,
            notifier: self.notifier,
            decks: self.decks,
        }
    }

    #[must_use]
    pub fn with_scorer(mut self, scorer: impl ScoreKeeper + 'static) -> Self {
        self.scorer = Box::new(scorer);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Deck list for one seat, legend first.
    #[must_use]
    pub fn with_deck(mut self, player: PlayerId, deck: Vec<CardId>) -> Self {
        *self.decks.get_mut(player) = Some(deck);
        self
    }

    /// Lay out the decks, register triggers for the set-aside cards and
    /// draw opening hands.
    pub fn build(self) -> Result<Match<B>> {
        let Self {
            config,
            cards,
            broker,
            scorer,
            notifier,
            decks,
        } = self;

        let provider = Arc::clone(&cards);
        let mut game = Match::from_parts(config, cards, broker, scorer, notifier);

        for (player, deck) in decks.iter() {
            let Some(ids) = deck else { continue };
            let config = game.config().clone();
            let layout = DeckLayout::from_ids(
                player,
                ids,
                &*provider,
                game.rng_mut(),
                &config,
            )?;
            let permanents = game.place_layout(player, layout);
            for card in &permanents {
                game.broker_mut()
                    .register_card(card, player, &*provider);
            }

            let hand_size = config.opening_hand_size;
            let drawn = game.board_mut().player_mut(player).draw_cards(hand_size);
            info!(player = %player, drawn = drawn.len(), "Opening hand drawn");
        }

        Ok(game)
    }
}

impl<B: TriggerBroker> std::fmt::Debug for MatchBuilder<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchBuilder")
            .field("config", &self.config)
            .field("decks", &self.decks)
            .finish_non_exhaustive()
    }
}
