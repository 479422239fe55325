//! Effect definitions as authored in card data.
//!
//! A card's effect definition names a trigger and a chain of `EffectSpec`s.
//! Each spec's concrete behaviour is an `EffectAction`, decoded from the
//! `"type"` tag of the JSON object:
//!
//! ```
//! use riftbound_engine::effects::{EffectAction, EffectSpec};
//!
//! let spec: EffectSpec = serde_json::from_str(
//!     r#"{ "type": "DamageEffect", "id": "e1", "damageValue": 3 }"#,
//! ).unwrap();
//! assert_eq!(spec.action, EffectAction::Damage { damage_value: 3 });
//! ```

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, RuneType};

/// When an effect definition fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectTrigger {
    OnPlay,
    OnAttack,
    OnDefend,
    /// The controller's turn starts.
    OnTurnStart,
    /// The controller's turn ends.
    OnTurnEnd,
    OnDeath,
    OnDraw,
    Passive,
}

/// How long a modifier lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierDuration {
    /// Removed in the End phase.
    #[serde(rename = "CurrentTurn", alias = "ThisTurn")]
    ThisTurn,
    #[default]
    Permanent,
}

/// Unit stat touched by a buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStat {
    Power,
    #[serde(rename = "Defense", alias = "Health")]
    Health,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Unit,
    #[serde(alias = "Hero")]
    HeroUnit,
    Spell,
    Player,
    /// The card that owns the effect (or its controller, off-board).
    #[serde(rename = "Self")]
    SelfCard,
    /// Reuse the targets of an earlier effect in the same chain.
    Targeted,
    AllEnemies,
    AllAllies,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetLocation {
    Battlefield,
    Base,
    Hand,
    Deck,
    #[serde(alias = "Graveyard")]
    DiscardPile,
}

fn default_count() -> i32 {
    1
}

fn default_friendly() -> bool {
    true
}

/// Who an effect applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDefinition {
    #[serde(rename = "type")]
    pub target_type: TargetType,

    #[serde(default)]
    pub location: Option<TargetLocation>,

    /// Number of targets; `-1` means all.
    #[serde(default = "default_count")]
    pub count: i32,

    #[serde(default = "default_friendly")]
    pub is_friendly: bool,

    #[serde(rename = "refEffectID", default)]
    pub ref_effect_id: Option<String>,

    #[serde(default)]
    pub allow_any_location: bool,
}

impl TargetDefinition {
    /// A friendly single-target definition.
    pub fn new(target_type: TargetType) -> Self {
        Self {
            target_type,
            location: None,
            count: 1,
            is_friendly: true,
            ref_effect_id: None,
            allow_any_location: false,
        }
    }

    /// Target the opponent's side (builder pattern).
    #[must_use]
    pub fn enemy(mut self) -> Self {
        self.is_friendly = false;
        self
    }

    /// Target every match (builder pattern).
    #[must_use]
    pub fn all(mut self) -> Self {
        self.count = -1;
        self
    }

    /// Reuse targets of an earlier effect (builder pattern).
    #[must_use]
    pub fn referencing(mut self, effect_id: impl Into<String>) -> Self {
        self.target_type = TargetType::Targeted;
        self.ref_effect_id = Some(effect_id.into());
        self
    }
}

/// A precondition on an effect, evaluated by the game's rules layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(rename = "refEffectID", default)]
    pub ref_effect_id: Option<String>,

    #[serde(default)]
    pub value: i64,
}

/// The concrete behaviour of one effect, tagged by `"type"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectAction {
    #[serde(rename = "DamageEffect", rename_all = "camelCase")]
    Damage { damage_value: i64 },

    #[serde(rename = "DrawCardEffect", rename_all = "camelCase")]
    DrawCard { card_count: usize },

    #[serde(rename = "BuffUnitEffect", rename_all = "camelCase")]
    BuffUnit {
        buff_type: UnitStat,
        value: i64,
        #[serde(default)]
        duration: ModifierDuration,
    },

    #[serde(rename = "BuffPlayerEffect", rename_all = "camelCase")]
    BuffPlayer {
        buff_type: String,
        value: i64,
        #[serde(default)]
        duration: ModifierDuration,
    },

    #[serde(rename = "GainRuneEffect", rename_all = "camelCase")]
    GainRune {
        #[serde(default)]
        rune_type: RuneType,
        count: i64,
        #[serde(default)]
        restriction: Option<String>,
    },

    #[serde(rename = "SummonEffect", rename_all = "camelCase")]
    Summon {
        #[serde(rename = "unitCardID")]
        unit_card_id: CardId,
        #[serde(default)]
        is_dormant: bool,
    },
}

/// One link of an effect chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectSpec {
    /// Referenced by later links (`Targeted`) and by conditions.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub condition: Option<Condition>,

    #[serde(default)]
    pub target: Option<TargetDefinition>,

    #[serde(flatten)]
    pub action: EffectAction,
}

impl EffectSpec {
    /// Create an untargeted, unconditional spec.
    pub fn new(action: EffectAction) -> Self {
        Self {
            id: None,
            condition: None,
            target: None,
            action,
        }
    }

    /// Set the chain-local ID (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the target definition (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetDefinition) -> Self {
        self.target = Some(target);
        self
    }

    /// Set the condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// All effects a card carries, with the trigger that starts them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEffectDefinition {
    #[serde(rename = "cardID")]
    pub card_id: CardId,

    pub trigger: EffectTrigger,

    #[serde(rename = "effectsChain", default)]
    pub effects_chain: Vec<EffectSpec>,
}

impl CardEffectDefinition {
    pub fn new(card_id: impl Into<String>, trigger: EffectTrigger) -> Self {
        Self {
            card_id: CardId::new(card_id),
            trigger,
            effects_chain: Vec::new(),
        }
    }

    /// Append an effect to the chain (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, spec: EffectSpec) -> Self {
        self.effects_chain.push(spec);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_definition() {
        let json = r#"{
            "cardID": "OGN_016",
            "trigger": "OnPlay",
            "effectsChain": [
                {
                    "type": "BuffUnitEffect",
                    "id": "buff",
                    "target": { "type": "Unit", "count": 1, "isFriendly": true },
                    "buffType": "Power",
                    "value": 2,
                    "duration": "CurrentTurn"
                },
                {
                    "type": "DrawCardEffect",
                    "cardCount": 1,
                    "target": { "type": "Player" }
                }
            ]
        }"#;
        let def: CardEffectDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(def.card_id, CardId::new("OGN_016"));
        assert_eq!(def.trigger, EffectTrigger::OnPlay);
        assert_eq!(def.effects_chain.len(), 2);
        assert_eq!(
            def.effects_chain[0].action,
            EffectAction::BuffUnit {
                buff_type: UnitStat::Power,
                value: 2,
                duration: ModifierDuration::ThisTurn,
            }
        );
        assert_eq!(def.effects_chain[0].id.as_deref(), Some("buff"));

        let target = def.effects_chain[1].target.as_ref().unwrap();
        assert_eq!(target.target_type, TargetType::Player);
        assert_eq!(target.count, 1);
        assert!(target.is_friendly);
    }

    #[test]
    fn test_decode_summon_and_rune() {
        let summon: EffectSpec = serde_json::from_str(
            r#"{ "type": "SummonEffect", "unitCardID": "OGN_099", "isDormant": true }"#,
        )
        .unwrap();
        assert_eq!(
            summon.action,
            EffectAction::Summon {
                unit_card_id: CardId::new("OGN_099"),
                is_dormant: true,
            }
        );

        let rune: EffectSpec = serde_json::from_str(
            r#"{ "type": "GainRuneEffect", "runeType": "Fervor", "count": 1, "restriction": "ForRuneCostOnly" }"#,
        )
        .unwrap();
        assert!(matches!(
            rune.action,
            EffectAction::GainRune { rune_type: RuneType::Fervor, count: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<EffectSpec, _> =
            serde_json::from_str(r#"{ "type": "TeleportEffect", "distance": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_tag_rejected() {
        let result: Result<EffectSpec, _> = serde_json::from_str(r#"{ "damageValue": 3 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_keeps_tag() {
        let spec = EffectSpec::new(EffectAction::Damage { damage_value: 2 })
            .with_id("hit")
            .with_target(TargetDefinition::new(TargetType::Unit).enemy());
        let json = serde_json::to_value(&spec).unwrap();

        assert_eq!(json["type"], "DamageEffect");
        assert_eq!(json["damageValue"], 2);
        assert_eq!(json["target"]["isFriendly"], false);

        let back: EffectSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn test_target_builders() {
        let t = TargetDefinition::new(TargetType::Unit).enemy().all();
        assert!(!t.is_friendly);
        assert_eq!(t.count, -1);

        let r = TargetDefinition::new(TargetType::Unit).referencing("e1");
        assert_eq!(r.target_type, TargetType::Targeted);
        assert_eq!(r.ref_effect_id.as_deref(), Some("e1"));
    }
}
