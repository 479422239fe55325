//! Target resolution and command building.
//!
//! Turns an effect chain into concrete [`Command`]s for the resolution stack.
//! Targets are resolved against the current board:
//!
//! - `Player`: the controller, or the opponent when `isFriendly` is false
//! - `Unit` / `HeroUnit`: caller-chosen units on the right side, up to `count`;
//!   `count = -1` takes every unit on that side
//! - `AllAllies` / `AllEnemies`: every unit on that side
//! - `Self`: the source unit if it is on the board, else its controller
//! - `Targeted`: whatever an earlier link with the referenced `id` hit
//!
//! Conditions are evaluated by a caller-supplied closure. Without one, every
//! conditional link is skipped.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::effect::{Condition, EffectAction, EffectSpec, TargetDefinition, TargetType};
use crate::core::{Board, EntityId, PlayerId};
use crate::stack::Command;

/// A concrete effect target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    Player(PlayerId),
    Unit(EntityId),
}

impl Target {
    #[must_use]
    pub fn as_player(self) -> Option<PlayerId> {
        match self {
            Self::Player(p) => Some(p),
            Self::Unit(_) => None,
        }
    }

    #[must_use]
    pub fn as_unit(self) -> Option<EntityId> {
        match self {
            Self::Unit(u) => Some(u),
            Self::Player(_) => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player(p) => write!(f, "{}", p),
            Self::Unit(u) => write!(f, "{}", u),
        }
    }
}

/// Everything needed to turn an effect chain into commands.
pub struct EffectContext<'a> {
    pub controller: PlayerId,
    /// The unit whose effect this is, if it is a unit.
    pub source: Option<EntityId>,
    pub board: &'a Board,
    /// Targets picked by the player, for single-target definitions.
    pub chosen: &'a [Target],
    eval_condition: Box<dyn Fn(&Condition, &Board) -> bool + 'a>,
}

impl<'a> EffectContext<'a> {
    pub fn new(controller: PlayerId, board: &'a Board) -> Self {
        Self {
            controller,
            source: None,
            board,
            chosen: &[],
            eval_condition: Box::new(|_, _| false),
        }
    }

    /// Set the source unit (builder pattern).
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the chosen targets (builder pattern).
    #[must_use]
    pub fn with_chosen(mut self, chosen: &'a [Target]) -> Self {
        self.chosen = chosen;
        self
    }

    /// Add a condition evaluator (builder pattern).
    #[must_use]
    pub fn with_condition_eval(mut self, eval: impl Fn(&Condition, &Board) -> bool + 'a) -> Self {
        self.eval_condition = Box::new(eval);
        self
    }

    fn side(&self, def: &TargetDefinition) -> PlayerId {
        if def.is_friendly {
            self.controller
        } else {
            self.controller.opponent()
        }
    }

    fn units_of(&self, player: PlayerId) -> Vec<Target> {
        self.board
            .units
            .units_of(player)
            .into_iter()
            .map(Target::Unit)
            .collect()
    }

    /// Resolve one target definition.
    ///
    /// `earlier` maps chain-local effect IDs to the targets they hit.
    pub fn resolve_targets(
        &self,
        def: Option<&TargetDefinition>,
        earlier: &FxHashMap<String, Vec<Target>>,
    ) -> Vec<Target> {
        let Some(def) = def else {
            if self.chosen.is_empty() {
                return vec![Target::Player(self.controller)];
            }
            return self.chosen.to_vec();
        };

        match def.target_type {
            TargetType::Player => vec![Target::Player(self.side(def))],
            TargetType::SelfCard => match self.source {
                Some(id) if self.board.units.contains(id) => vec![Target::Unit(id)],
                _ => vec![Target::Player(self.controller)],
            },
            TargetType::AllAllies => self.units_of(self.controller),
            TargetType::AllEnemies => self.units_of(self.controller.opponent()),
            TargetType::Unit | TargetType::HeroUnit => {
                let side = self.side(def);
                if def.count < 0 {
                    return self.units_of(side);
                }
                self.chosen
                    .iter()
                    .filter(|t| match t {
                        Target::Unit(id) => self
                            .board
                            .units
                            .get(*id)
                            .is_some_and(|u| u.controller == side),
                        Target::Player(_) => false,
                    })
                    .take(def.count as usize)
                    .copied()
                    .collect()
            }
            TargetType::Targeted => def
                .ref_effect_id
                .as_ref()
                .and_then(|id| earlier.get(id))
                .cloned()
                .unwrap_or_default(),
            // Stack entries are not targetable from effect data.
            TargetType::Spell => Vec::new(),
        }
    }

    /// Build commands for a whole chain, in chain order.
    pub fn build(&self, chain: &[EffectSpec]) -> Vec<Command> {
        let mut earlier: FxHashMap<String, Vec<Target>> = FxHashMap::default();
        let mut commands = Vec::new();

        for spec in chain {
            if let Some(condition) = &spec.condition {
                if !(self.eval_condition)(condition, self.board) {
                    debug!(condition = %condition.kind, "Condition not met, skipping effect");
                    continue;
                }
            }

            let targets = self.resolve_targets(spec.target.as_ref(), &earlier);
            commands.extend(self.commands_for(&spec.action, &targets));

            if let Some(id) = &spec.id {
                earlier.insert(id.clone(), targets);
            }
        }

        commands
    }

    fn players_or_controller(&self, targets: &[Target]) -> Vec<PlayerId> {
        let players: Vec<PlayerId> = targets.iter().filter_map(|t| t.as_player()).collect();
        if players.is_empty() {
            vec![self.controller]
        } else {
            players
        }
    }

    fn commands_for(&self, action: &EffectAction, targets: &[Target]) -> Vec<Command> {
        match action {
            EffectAction::Damage { damage_value } => targets
                .iter()
                .map(|&target| Command::DealDamage {
                    target,
                    amount: *damage_value,
                })
                .collect(),
            EffectAction::DrawCard { card_count } => self
                .players_or_controller(targets)
                .into_iter()
                .map(|player| Command::DrawCards {
                    player,
                    count: *card_count,
                })
                .collect(),
            EffectAction::BuffUnit {
                buff_type,
                value,
                duration,
            } => targets
                .iter()
                .filter_map(|t| t.as_unit())
                .map(|unit| Command::BuffUnit {
                    unit,
                    stat: *buff_type,
                    amount: *value,
                    duration: *duration,
                })
                .collect(),
            EffectAction::BuffPlayer {
                buff_type,
                value,
                duration,
            } => self
                .players_or_controller(targets)
                .into_iter()
                .map(|player| Command::BuffPlayer {
                    player,
                    buff: buff_type.clone(),
                    amount: *value,
                    duration: *duration,
                })
                .collect(),
            EffectAction::GainRune { count, .. } => self
                .players_or_controller(targets)
                .into_iter()
                .map(|player| Command::GainRunes {
                    player,
                    count: *count,
                })
                .collect(),
            EffectAction::Summon {
                unit_card_id,
                is_dormant,
            } => vec![Command::SummonUnit {
                player: self.players_or_controller(targets)[0],
                card: unit_card_id.clone(),
                dormant: *is_dormant,
            }],
        }
    }
}

/// Build commands for `chain` played by `controller` with the given chosen targets.
///
/// Conditional links are skipped; use [`EffectContext`] to evaluate them.
pub fn build_commands(
    chain: &[EffectSpec],
    controller: PlayerId,
    board: &Board,
    chosen: &[Target],
) -> Vec<Command> {
    EffectContext::new(controller, board)
        .with_chosen(chosen)
        .build(chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;
    use crate::effects::{ModifierDuration, UnitStat};

    fn board_with_units() -> (Board, EntityId, EntityId, EntityId) {
        let mut board = Board::new(["A", "B"], None);
        let c = board.instantiate(CardId::new("U1"));
        let mine = board.units.summon(c, PlayerId::FIRST, 2, 2, false);
        let c = board.instantiate(CardId::new("U2"));
        let theirs_a = board.units.summon(c, PlayerId::SECOND, 2, 2, false);
        let c = board.instantiate(CardId::new("U3"));
        let theirs_b = board.units.summon(c, PlayerId::SECOND, 2, 2, false);
        (board, mine, theirs_a, theirs_b)
    }

    fn damage(value: i64) -> EffectAction {
        EffectAction::Damage {
            damage_value: value,
        }
    }

    #[test]
    fn test_all_enemies() {
        let (board, _, a, b) = board_with_units();
        let chain = vec![EffectSpec::new(damage(1))
            .with_target(TargetDefinition::new(TargetType::AllEnemies))];

        let commands = build_commands(&chain, PlayerId::FIRST, &board, &[]);

        assert_eq!(
            commands,
            vec![
                Command::DealDamage { target: Target::Unit(a), amount: 1 },
                Command::DealDamage { target: Target::Unit(b), amount: 1 },
            ]
        );
    }

    #[test]
    fn test_chosen_targets_filtered_by_side_and_count() {
        let (board, mine, a, b) = board_with_units();
        let chain = vec![EffectSpec::new(damage(3))
            .with_target(TargetDefinition::new(TargetType::Unit).enemy())];
        let chosen = [Target::Unit(mine), Target::Unit(b), Target::Unit(a)];

        let commands = build_commands(&chain, PlayerId::FIRST, &board, &chosen);

        // Friendly unit dropped, only one enemy taken
        assert_eq!(
            commands,
            vec![Command::DealDamage { target: Target::Unit(b), amount: 3 }]
        );
    }

    #[test]
    fn test_targeted_reuses_earlier_targets() {
        let (board, mine, _, _) = board_with_units();
        let chain = vec![
            EffectSpec::new(damage(1))
                .with_id("hit")
                .with_target(TargetDefinition::new(TargetType::Unit)),
            EffectSpec::new(EffectAction::BuffUnit {
                buff_type: UnitStat::Power,
                value: 2,
                duration: ModifierDuration::ThisTurn,
            })
            .with_target(TargetDefinition::new(TargetType::Unit).referencing("hit")),
        ];
        let chosen = [Target::Unit(mine)];

        let commands = build_commands(&chain, PlayerId::FIRST, &board, &chosen);

        assert_eq!(commands.len(), 2);
        assert_eq!(
            commands[1],
            Command::BuffUnit {
                unit: mine,
                stat: UnitStat::Power,
                amount: 2,
                duration: ModifierDuration::ThisTurn,
            }
        );
    }

    #[test]
    fn test_player_target_and_default() {
        let board = Board::new(["A", "B"], None);
        let chain = vec![
            EffectSpec::new(EffectAction::DrawCard { card_count: 2 })
                .with_target(TargetDefinition::new(TargetType::Player).enemy()),
            EffectSpec::new(EffectAction::DrawCard { card_count: 1 }),
        ];

        let commands = build_commands(&chain, PlayerId::FIRST, &board, &[]);

        assert_eq!(
            commands,
            vec![
                Command::DrawCards { player: PlayerId::SECOND, count: 2 },
                Command::DrawCards { player: PlayerId::FIRST, count: 1 },
            ]
        );
    }

    #[test]
    fn test_self_target() {
        let (board, mine, _, _) = board_with_units();
        let ctx = EffectContext::new(PlayerId::FIRST, &board).with_source(mine);
        let def = TargetDefinition::new(TargetType::SelfCard);

        assert_eq!(
            ctx.resolve_targets(Some(&def), &FxHashMap::default()),
            vec![Target::Unit(mine)]
        );

        let off_board = EffectContext::new(PlayerId::FIRST, &board).with_source(EntityId(9));
        assert_eq!(
            off_board.resolve_targets(Some(&def), &FxHashMap::default()),
            vec![Target::Player(PlayerId::FIRST)]
        );
    }

    #[test]
    fn test_conditions_skipped_without_evaluator() {
        let board = Board::new(["A", "B"], None);
        let condition = Condition {
            kind: "OtherCardPlayedThisTurn".into(),
            ref_effect_id: None,
            value: 0,
        };
        let chain = vec![
            EffectSpec::new(EffectAction::GainRune {
                rune_type: Default::default(),
                count: 1,
                restriction: None,
            })
            .with_condition(condition),
        ];

        assert!(build_commands(&chain, PlayerId::FIRST, &board, &[]).is_empty());

        let ctx = EffectContext::new(PlayerId::FIRST, &board).with_condition_eval(|c, _| {
            c.kind == "OtherCardPlayedThisTurn"
        });
        assert_eq!(
            ctx.build(&chain),
            vec![Command::GainRunes { player: PlayerId::FIRST, count: 1 }]
        );
    }

    #[test]
    fn test_summon_command() {
        let board = Board::new(["A", "B"], None);
        let chain = vec![EffectSpec::new(EffectAction::Summon {
            unit_card_id: CardId::new("OGN_099"),
            is_dormant: true,
        })];

        assert_eq!(
            build_commands(&chain, PlayerId::SECOND, &board, &[]),
            vec![Command::SummonUnit {
                player: PlayerId::SECOND,
                card: CardId::new("OGN_099"),
                dormant: true,
            }]
        );
    }
}
