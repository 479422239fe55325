//! Card definitions - static card data.
//!
//! `CardData` holds the immutable properties of a printed card: name, type,
//! costs, base stats, keywords. Runtime state (damage, readiness, owner) is
//! stored separately on [`CardInstance`](super::CardInstance) and
//! [`Unit`](crate::units::Unit).

use serde::{Deserialize, Serialize};

/// Printed card identifier, e.g. `"OGN_005"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Is this the empty ID?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    #[default]
    Unit,
    HeroUnit,
    Spell,
    Equipment,
    Rune,
    Battlefield,
    Legend,
}

/// The six rune domains, plus `None` for colourless costs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuneType {
    #[default]
    None,
    Fervor,
    Verdant,
    Brilliant,
    Shatter,
    Chaos,
    Order,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Quick,
    Reactive,
    Aggressive,
    Defensive,
    SpellShield,
    Mobile,
    Momentary,
    Foresight,
    Afterthought,
    Other,
}

/// Static card definition.
///
/// ```
/// use riftbound_engine::cards::{CardData, CardType};
///
/// let jinx = CardData::new("OGN_030", "Jinx", CardType::HeroUnit).with_stats(4, 3);
/// assert_eq!(jinx.base_power, 4);
/// assert!(jinx.is_unit());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardData {
    #[serde(rename = "cardID")]
    pub card_id: CardId,

    #[serde(default)]
    pub display_name: String,

    #[serde(rename = "type", default)]
    pub card_type: CardType,

    #[serde(default)]
    pub art_name: String,

    #[serde(default)]
    pub mana_cost: i64,

    #[serde(default)]
    pub rune_cost: Vec<RuneType>,

    #[serde(default)]
    pub base_power: i64,

    #[serde(default)]
    pub base_health: i64,

    /// Domains the card belongs to (deck-building identity).
    #[serde(default)]
    pub runes: Vec<RuneType>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<Keyword>,

    #[serde(default)]
    pub rule_text: String,

    #[serde(default)]
    pub flavor_text: String,
}

impl CardData {
    /// Create a definition with empty text and zero stats.
    pub fn new(id: impl Into<String>, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            card_id: CardId::new(id),
            display_name: name.into(),
            card_type,
            art_name: String::new(),
            mana_cost: 0,
            rune_cost: Vec::new(),
            base_power: 0,
            base_health: 0,
            runes: Vec::new(),
            tags: Vec::new(),
            keywords: Vec::new(),
            rule_text: String::new(),
            flavor_text: String::new(),
        }
    }

    /// Set base power and health (builder pattern).
    #[must_use]
    pub fn with_stats(mut self, power: i64, health: i64) -> Self {
        self.base_power = power;
        self.base_health = health;
        self
    }

    /// Add a tag (builder pattern).
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a keyword (builder pattern).
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    /// Does this card become a unit when it enters the board?
    #[must_use]
    pub fn is_unit(&self) -> bool {
        matches!(self.card_type, CardType::Unit | CardType::HeroUnit)
    }

    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
