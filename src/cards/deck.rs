//! Splitting a saved deck list into its starting zones.
//!
//! ## Deck list layout
//!
//! - index 0: the legend
//! - the next `rune_deck_size` entries: the rune deck
//! - the remainder: battlefields, the champion, and the main deck
//!
//! One battlefield is picked at random; the others leave the game. The
//! champion is the first hero unit whose display name is one of the
//! legend's tags. One copy is set aside and any further copies stay in the
//! main deck.

use tracing::debug;

use super::definition::{CardId, CardType};
use super::registry::CardDataProvider;
use crate::core::{GameRng, MatchConfig, PlayerId};
use crate::error::{EngineError, Result};

/// A deck list split into starting zones, as card IDs.
///
/// Instances are created when the layout is placed on a board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeckLayout {
    pub legend: CardId,
    /// Top first, already shuffled.
    pub runes: Vec<CardId>,
    pub battlefield: CardId,
    pub champion: Option<CardId>,
    /// Top first, already shuffled.
    pub main_deck: Vec<CardId>,
}

impl DeckLayout {
    /// Split and shuffle a deck list.
    pub fn from_ids(
        player: PlayerId,
        ids: &[CardId],
        cards: &dyn CardDataProvider,
        rng: &mut GameRng,
        config: &MatchConfig,
    ) -> Result<Self> {
        if ids.len() < config.min_deck_size {
            return Err(EngineError::invalid_deck(
                player,
                format!(
                    "deck list has {} cards, at least {} required",
                    ids.len(),
                    config.min_deck_size
                ),
            ));
        }
        if let Some(unknown) = ids.iter().find(|id| cards.card_data(id).is_none()) {
            return Err(EngineError::UnknownCard(unknown.clone()));
        }

        let legend = ids[0].clone();
        let mut runes: Vec<CardId> = ids[1..=config.rune_deck_size].to_vec();
        let remaining = &ids[config.rune_deck_size + 1..];

        let card_type = |id: &CardId| cards.card_data(id).map(|c| c.card_type);

        let battlefields: Vec<&CardId> = remaining
            .iter()
            .filter(|id| card_type(*id) == Some(CardType::Battlefield))
            .collect();
        let battlefield = rng
            .pick_index(battlefields.len())
            .map(|i| battlefields[i].clone())
            .ok_or_else(|| EngineError::invalid_deck(player, "deck list has no battlefield"))?;

        let legend_tags = cards
            .card_data(&legend)
            .map(|c| c.tags.clone())
            .unwrap_or_default();
        let champion = remaining
            .iter()
            .find(|id| {
                cards.card_data(id).is_some_and(|c| {
                    c.card_type == CardType::HeroUnit && legend_tags.contains(&c.display_name)
                })
            })
            .cloned();

        let mut champion_set_aside = false;
        let mut main_deck = Vec::with_capacity(remaining.len());
        for id in remaining {
            if card_type(id) == Some(CardType::Battlefield) {
                continue;
            }
            if !champion_set_aside && champion.as_ref() == Some(id) {
                champion_set_aside = true;
                continue;
            }
            main_deck.push(id.clone());
        }

        rng.shuffle(&mut main_deck);
        rng.shuffle(&mut runes);

        debug!(
            player = %player,
            legend = %legend,
            battlefield = %battlefield,
            champion = ?champion,
            main = main_deck.len(),
            runes = runes.len(),
            "Deck layout built"
        );

        Ok(Self {
            legend,
            runes,
            battlefield,
            champion,
            main_deck,
        })
    }
}
