//! Commands: the pending game effects held by the resolution stack.
//!
//! `Command` is a closed set of variants matched exhaustively in
//! [`Command::resolve`]. Commands resolve against the [`Board`] only; they
//! have no access to the stack, priority, or phase state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cards::{CardDataProvider, CardId};
use crate::core::{Board, EntityId, PlayerId, PlayerModifier};
use crate::effects::{ModifierDuration, Target, UnitStat};
use crate::units::UnitState;

/// A pending game effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Write a message to the log and do nothing else.
    Log(String),

    DealDamage { target: Target, amount: i64 },

    Heal { target: Target, amount: i64 },

    DrawCards { player: PlayerId, count: usize },

    BuffUnit {
        unit: EntityId,
        stat: UnitStat,
        amount: i64,
        duration: ModifierDuration,
    },

    BuffPlayer {
        player: PlayerId,
        buff: String,
        amount: i64,
        duration: ModifierDuration,
    },

    GainRunes { player: PlayerId, count: i64 },

    GainMana { player: PlayerId, amount: i64 },

    /// Create a unit from a card definition.
    SummonUnit {
        player: PlayerId,
        card: CardId,
        dormant: bool,
    },

    Stun { unit: EntityId },
}

/// What happened when a command resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveOutcome {
    Applied,
    /// The command had no legal effect (e.g., its target is gone).
    Fizzled(String),
}

impl ResolveOutcome {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl Command {
    /// Shorthand for a log command.
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log(message.into())
    }

    /// Short label for logs and notifications.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Log(_) => "Log",
            Self::DealDamage { .. } => "DealDamage",
            Self::Heal { .. } => "Heal",
            Self::DrawCards { .. } => "DrawCards",
            Self::BuffUnit { .. } => "BuffUnit",
            Self::BuffPlayer { .. } => "BuffPlayer",
            Self::GainRunes { .. } => "GainRunes",
            Self::GainMana { .. } => "GainMana",
            Self::SummonUnit { .. } => "SummonUnit",
            Self::Stun { .. } => "Stun",
        }
    }

    /// Apply the command to the board.
    pub fn resolve(&self, board: &mut Board, cards: &dyn CardDataProvider) -> ResolveOutcome {
        match self {
            Self::Log(message) => {
                info!(message = %message, "Log command resolved");
                ResolveOutcome::Applied
            }

            Self::DealDamage { target, amount } => match target {
                Target::Unit(id) => match board.units.get_mut(*id) {
                    Some(unit) => {
                        unit.take_damage(*amount);
                        debug!(unit = %id, amount, remaining = unit.remaining_health(), "Damage dealt");
                        ResolveOutcome::Applied
                    }
                    None => missing_unit(*id),
                },
                Target::Player(_) => {
                    ResolveOutcome::Fizzled("Players cannot be damaged".to_string())
                }
            },

            Self::Heal { target, amount } => match target {
                Target::Unit(id) => match board.units.get_mut(*id) {
                    Some(unit) => {
                        unit.heal(*amount);
                        ResolveOutcome::Applied
                    }
                    None => missing_unit(*id),
                },
                Target::Player(_) => ResolveOutcome::Fizzled("Players cannot be healed".to_string()),
            },

            Self::DrawCards { player, count } => {
                let drawn = board.player_mut(*player).draw_cards(*count);
                if drawn.is_empty() && *count > 0 {
                    ResolveOutcome::Fizzled("Deck was empty".to_string())
                } else {
                    ResolveOutcome::Applied
                }
            }

            Self::BuffUnit {
                unit,
                stat,
                amount,
                duration,
            } => match board.units.get_mut(*unit) {
                Some(u) => {
                    u.add_modifier(*stat, *amount, *duration);
                    ResolveOutcome::Applied
                }
                None => missing_unit(*unit),
            },

            Self::BuffPlayer {
                player,
                buff,
                amount,
                duration,
            } => {
                board.player_mut(*player).modifiers.push(PlayerModifier {
                    buff: buff.clone(),
                    amount: *amount,
                    duration: *duration,
                });
                ResolveOutcome::Applied
            }

            Self::GainRunes { player, count } => {
                let p = board.player_mut(*player);
                p.runes = p.runes.saturating_add(*count);
                ResolveOutcome::Applied
            }

            Self::GainMana { player, amount } => {
                let p = board.player_mut(*player);
                p.mana = p.mana.saturating_add(*amount);
                ResolveOutcome::Applied
            }

            Self::SummonUnit {
                player,
                card,
                dormant,
            } => {
                let Some(data) = cards.card_data(card) else {
                    return ResolveOutcome::Fizzled(format!("Unknown card {}", card));
                };
                let (power, health) = (data.base_power, data.base_health);
                let instance = board.instantiate(card.clone());
                board.units.summon(instance, *player, power, health, *dormant);
                ResolveOutcome::Applied
            }

            Self::Stun { unit } => match board.units.get_mut(*unit) {
                Some(u) => {
                    u.set_state(UnitState::Stunned);
                    ResolveOutcome::Applied
                }
                None => missing_unit(*unit),
            },
        }
    }
}

fn missing_unit(id: EntityId) -> ResolveOutcome {
    ResolveOutcome::Fizzled(format!("{} is no longer on the board", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, CardRegistry, CardType};

    fn setup() -> (Board, CardRegistry, EntityId) {
        let mut board = Board::new(["A", "B"], None);
        let card = board.instantiate(CardId::new("OGN_001"));
        let unit = board.units.summon(card, PlayerId::FIRST, 2, 3, false);
        (board, CardRegistry::new(), unit)
    }

    #[test]
    fn test_damage_and_heal_unit() {
        let (mut board, cards, unit) = setup();

        let outcome = Command::DealDamage { target: Target::Unit(unit), amount: 2 }
            .resolve(&mut board, &cards);
        assert!(outcome.is_applied());
        assert_eq!(board.units.get(unit).unwrap().damage, 2);

        Command::Heal { target: Target::Unit(unit), amount: 1 }.resolve(&mut board, &cards);
        assert_eq!(board.units.get(unit).unwrap().damage, 1);
    }

    #[test]
    fn test_missing_target_fizzles() {
        let (mut board, cards, unit) = setup();
        board.units.remove(unit);

        let outcome = Command::Stun { unit }.resolve(&mut board, &cards);
        assert!(matches!(outcome, ResolveOutcome::Fizzled(_)));

        let outcome = Command::DealDamage {
            target: Target::Player(PlayerId::FIRST),
            amount: 1,
        }
        .resolve(&mut board, &cards);
        assert!(!outcome.is_applied());
    }

    #[test]
    fn test_resources_and_modifiers() {
        let (mut board, cards, unit) = setup();

        Command::GainRunes { player: PlayerId::SECOND, count: 2 }.resolve(&mut board, &cards);
        Command::GainMana { player: PlayerId::SECOND, amount: 3 }.resolve(&mut board, &cards);
        Command::BuffPlayer {
            player: PlayerId::SECOND,
            buff: "NextSpellCostReduction".into(),
            amount: 1,
            duration: ModifierDuration::ThisTurn,
        }
        .resolve(&mut board, &cards);
        Command::BuffUnit {
            unit,
            stat: UnitStat::Power,
            amount: 2,
            duration: ModifierDuration::Permanent,
        }
        .resolve(&mut board, &cards);

        let p = board.player(PlayerId::SECOND);
        assert_eq!((p.runes, p.mana), (2, 3));
        assert_eq!(p.modifier_total("NextSpellCostReduction"), 1);
        assert_eq!(board.units.get(unit).unwrap().power(), 4);
    }

    #[test]
    fn test_summon_uses_card_data() {
        let (mut board, mut cards, _) = setup();
        cards.register_card(CardData::new("OGN_099", "Poro", CardType::Unit).with_stats(1, 2));

        let outcome = Command::SummonUnit {
            player: PlayerId::SECOND,
            card: CardId::new("OGN_099"),
            dormant: true,
        }
        .resolve(&mut board, &cards);
        assert!(outcome.is_applied());

        let ids = board.units.units_of(PlayerId::SECOND);
        assert_eq!(ids.len(), 1);
        let unit = board.units.get(ids[0]).unwrap();
        assert_eq!((unit.power(), unit.health()), (1, 2));
        assert_eq!(unit.state, UnitState::Resting);

        let outcome = Command::SummonUnit {
            player: PlayerId::SECOND,
            card: CardId::new("NOPE"),
            dormant: false,
        }
        .resolve(&mut board, &cards);
        assert!(matches!(outcome, ResolveOutcome::Fizzled(_)));
    }

    #[test]
    fn test_draw_from_empty_deck_fizzles() {
        let (mut board, cards, _) = setup();
        let outcome = Command::DrawCards { player: PlayerId::FIRST, count: 1 }
            .resolve(&mut board, &cards);
        assert_eq!(outcome, ResolveOutcome::Fizzled("Deck was empty".to_string()));
    }

    #[test]
    fn test_json_shape() {
        let cmd = Command::log("hello");
        let json = serde_json::to_string(&cmd).unwrap();
        assert_eq!(json, r#"{"Log":"hello"}"#);
    }
}
