//! Card and effect definition lookup.
//!
//! The engine only ever reads definitions through [`CardDataProvider`].
//! [`CardRegistry`] is the in-memory implementation, loaded from JSON.
//!
//! Loading is best-effort: duplicate or id-less definitions are skipped
//! with a warning and counted in the returned [`LoadReport`]. Only
//! malformed JSON is an error.

use rustc_hash::FxHashMap;
use tracing::{info, warn};

use super::definition::{CardData, CardId};
use crate::effects::CardEffectDefinition;
use crate::error::DataError;

/// Read-only definition lookup.
pub trait CardDataProvider {
    fn card_data(&self, id: &CardId) -> Option<&CardData>;

    fn effect_definition(&self, id: &CardId) -> Option<&CardEffectDefinition>;
}

/// Result of a bulk load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// IDs that were already registered; the first definition wins.
    pub duplicates: Vec<CardId>,
    /// Entries skipped because their ID was empty.
    pub missing_ids: usize,
}

impl LoadReport {
    /// Were any entries skipped?
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.missing_ids == 0
    }
}

/// In-memory card and effect database.
///
/// ```
/// use riftbound_engine::cards::{CardData, CardDataProvider, CardId, CardRegistry, CardType};
///
/// let mut registry = CardRegistry::new();
/// registry.register_card(CardData::new("OGN_001", "Recruit", CardType::Unit));
///
/// let found = registry.card_data(&CardId::new("OGN_001")).unwrap();
/// assert_eq!(found.display_name, "Recruit");
/// assert!(registry.card_data(&CardId::new("OGN_999")).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardData>,
    effects: FxHashMap<CardId, CardEffectDefinition>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Returns `false` (and keeps the existing entry) for a duplicate ID.
    pub fn register_card(&mut self, card: CardData) -> bool {
        if self.cards.contains_key(&card.card_id) {
            warn!(card = %card.card_id, "Duplicate card definition skipped");
            return false;
        }
        self.cards.insert(card.card_id.clone(), card);
        true
    }

    /// Register an effect definition.
    ///
    /// Returns `false` (and keeps the existing entry) for a duplicate ID.
    pub fn register_effects(&mut self, definition: CardEffectDefinition) -> bool {
        if self.effects.contains_key(&definition.card_id) {
            warn!(card = %definition.card_id, "Duplicate effect definition skipped");
            return false;
        }
        self.effects.insert(definition.card_id.clone(), definition);
        true
    }

    /// Load a JSON array of card definitions.
    pub fn load_cards_json(&mut self, json: &str) -> Result<LoadReport, DataError> {
        let cards: Vec<CardData> = serde_json::from_str(json)?;
        let report = Self::load_all(cards, |c| c.card_id.clone(), |c| self.register_card(c));
        info!(loaded = report.loaded, skipped = report.duplicates.len() + report.missing_ids, "Card definitions loaded");
        Ok(report)
    }

    /// Load a JSON array of effect definitions.
    pub fn load_effects_json(&mut self, json: &str) -> Result<LoadReport, DataError> {
        let definitions: Vec<CardEffectDefinition> = serde_json::from_str(json)?;
        let report = Self::load_all(
            definitions,
            |d| d.card_id.clone(),
            |d| self.register_effects(d),
        );
        info!(loaded = report.loaded, skipped = report.duplicates.len() + report.missing_ids, "Effect definitions loaded");
        Ok(report)
    }

    fn load_all<T>(
        items: Vec<T>,
        id_of: impl Fn(&T) -> CardId,
        mut register: impl FnMut(T) -> bool,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for item in items {
            let id = id_of(&item);
            if id.is_empty() {
                warn!("Definition without an ID skipped");
                report.missing_ids += 1;
            } else if register(item) {
                report.loaded += 1;
            } else {
                report.duplicates.push(id);
            }
        }
        report
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.cards.contains_key(id)
    }

    /// Number of card definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all card definitions.
    pub fn iter(&self) -> impl Iterator<Item = &CardData> {
        self.cards.values()
    }

    /// Iterate over all effect definitions.
    pub fn effect_definitions(&self) -> impl Iterator<Item = &CardEffectDefinition> {
        self.effects.values()
    }
}

impl CardDataProvider for CardRegistry {
    fn card_data(&self, id: &CardId) -> Option<&CardData> {
        self.cards.get(id)
    }

    fn effect_definition(&self, id: &CardId) -> Option<&CardEffectDefinition> {
        self.effects.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;
    use crate::effects::EffectTrigger;

    #[test]
    fn test_duplicate_card_skipped() {
        let mut registry = CardRegistry::new();

        assert!(registry.register_card(CardData::new("OGN_001", "First", CardType::Unit)));
        assert!(!registry.register_card(CardData::new("OGN_001", "Second", CardType::Spell)));

        assert_eq!(registry.len(), 1);
        let card = registry.card_data(&CardId::new("OGN_001")).unwrap();
        assert_eq!(card.display_name, "First");
    }

    #[test]
    fn test_load_cards_report() {
        let mut registry = CardRegistry::new();
        let json = r#"[
            { "cardID": "OGN_001", "displayName": "A", "type": "Unit" },
            { "cardID": "OGN_002", "displayName": "B", "type": "Spell" },
            { "cardID": "OGN_001", "displayName": "A again", "type": "Unit" },
            { "cardID": "", "displayName": "Nameless" }
        ]"#;

        let report = registry.load_cards_json(json).unwrap();

        assert_eq!(report.loaded, 2);
        assert_eq!(report.duplicates, vec![CardId::new("OGN_001")]);
        assert_eq!(report.missing_ids, 1);
        assert!(!report.is_clean());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_effects() {
        let mut registry = CardRegistry::new();
        let json = r#"[
            {
                "cardID": "OGN_010",
                "trigger": "OnTurnStart",
                "effectsChain": [ { "type": "GainRuneEffect", "count": 1 } ]
            }
        ]"#;

        let report = registry.load_effects_json(json).unwrap();
        assert!(report.is_clean());

        let def = registry.effect_definition(&CardId::new("OGN_010")).unwrap();
        assert_eq!(def.trigger, EffectTrigger::OnTurnStart);
        assert_eq!(def.effects_chain.len(), 1);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let mut registry = CardRegistry::new();
        assert!(registry.load_cards_json("{ not json").is_err());
        assert!(registry
            .load_effects_json(r#"[{ "cardID": "X", "trigger": "OnPlay", "effectsChain": [{ "type": "Nope" }] }]"#)
            .is_err());
        assert!(registry.is_empty());
    }
}
