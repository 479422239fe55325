//! The six phases of a turn and what each one does.
//!
//! ## Phase order
//!
//! Wake → Start → Summon → Draw → Action → End
//!
//! Every phase except Action runs straight through. Action is an open loop
//! driven by player decisions; its state lives in [`ActionPhase`], created
//! fresh each turn.
//!
//! Resource resets are absolute sets (`= 0`, `= Active`), so re-running a
//! phase after a failure leaves the same state.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::notify::{MatchEvent, Notifier};
use crate::cards::CardDataProvider;
use crate::core::{Action, Board, Decision, MatchConfig, PlayerId};
use crate::effects::EffectTrigger;
use crate::error::{EngineError, Result};
use crate::rules::ScoreKeeper;
use crate::stack::{CommandSource, PassOutcome, PriorityArbiter, ResolutionStack, StackEntryId};
use crate::triggers::TriggerBroker;

/// A segment of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Wake,
    Start,
    Summon,
    Draw,
    Action,
    End,
}

impl Phase {
    /// Execution order within a turn.
    pub const ORDER: [Phase; 6] = [
        Phase::Wake,
        Phase::Start,
        Phase::Summon,
        Phase::Draw,
        Phase::Action,
        Phase::End,
    ];

    /// The phase after this one, or `None` after End.
    #[must_use]
    pub fn next(self) -> Option<Phase> {
        match self {
            Phase::Wake => Some(Phase::Start),
            Phase::Start => Some(Phase::Summon),
            Phase::Summon => Some(Phase::Draw),
            Phase::Draw => Some(Phase::Action),
            Phase::Action => Some(Phase::End),
            Phase::End => None,
        }
    }

    /// Does this phase wait for player decisions?
    #[must_use]
    pub fn is_interactive(self) -> bool {
        self == Phase::Action
    }

    /// Run a straight-through phase for the active player.
    ///
    /// The Action phase is driven by [`ActionPhase`] instead; executing it
    /// here does nothing.
    pub fn execute(self, ctx: &mut TurnContext<'_>) -> Result<()> {
        let active = ctx.arbiter.active();

        match self {
            Phase::Wake => {
                let woken = ctx.board.units.wake(active);
                debug!(player = %active, woken, "Units woken");
            }

            Phase::Start => {
                ctx.fire(EffectTrigger::OnTurnStart, self)?;
                let delta = ctx
                    .scorer
                    .hold_score(active, ctx.board)
                    .map_err(|e| as_collaborator(self, e))?;
                if delta != 0 {
                    let player = ctx.board.player_mut(active);
                    player.score = player.score.saturating_add(delta);
                    info!(player = %active, delta, score = player.score, "Hold score added");
                }
            }

            Phase::Summon => {
                ctx.board
                    .player_mut(active)
                    .summon_runes(ctx.config.runes_per_turn);
            }

            Phase::Draw => {
                let player = ctx.board.player_mut(active);
                player.draw_cards(ctx.config.cards_per_draw);
                // Unspent mana and runes expire here, after the draw
                player.reset_turn_resources();
            }

            Phase::Action => {}

            Phase::End => {
                ctx.board.clear_temporary_modifiers();
                ctx.board.units.clear_damage();
                ctx.fire(EffectTrigger::OnTurnEnd, self)?;
            }
        }

        Ok(())
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn as_collaborator(phase: Phase, err: EngineError) -> EngineError {
    match err {
        EngineError::Collaborator { .. } => err,
        other => EngineError::collaborator(phase, other.to_string()),
    }
}

/// Everything a phase may touch, borrowed from the match for one step.
pub struct TurnContext<'a> {
    pub board: &'a mut Board,
    pub stack: &'a mut ResolutionStack,
    pub arbiter: &'a mut PriorityArbiter,
    pub broker: &'a mut dyn TriggerBroker,
    pub scorer: &'a mut dyn ScoreKeeper,
    pub cards: &'a dyn CardDataProvider,
    pub notifier: &'a mut dyn Notifier,
    pub config: &'a MatchConfig,
}

impl TurnContext<'_> {
    /// Fire a trigger kind for the active player and announce what it pushed.
    fn fire(&mut self, trigger: EffectTrigger, phase: Phase) -> Result<()> {
        let active = self.arbiter.active();
        let before = self.stack.len();

        let pushed = self
            .broker
            .fire(trigger, active, self.board, self.stack)
            .map_err(|e| as_collaborator(phase, e))?;

        debug!(trigger = ?trigger, player = %active, pushed, "Trigger broker notified");
        self.announce_pushed(before);
        Ok(())
    }

    /// Notify every entry above `from`.
    fn announce_pushed(&mut self, from: usize) {
        for (depth, entry) in self.stack.entries().iter().enumerate().skip(from) {
            self.notifier.notify(&MatchEvent::CommandPushed {
                entry: entry.id,
                command: entry.command.name().to_string(),
                depth: depth + 1,
            });
        }
    }
}

/// Result of one Action-phase iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionStep {
    /// Wait for this player's next decision.
    AwaitDecision(PlayerId),
    /// The top entry resolved; the same priority holder decides next.
    Resolved { entry: StackEntryId, next: PlayerId },
    /// Both players passed on an empty stack.
    Finished,
}

/// Action-phase state, fresh each turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPhase {
    /// Set once the phase is over; any action clears it.
    pub consecutive_passes: bool,
    /// Decisions consumed so far.
    pub iterations: u32,
    /// Stack entries resolved so far.
    pub resolutions: u32,
}

impl ActionPhase {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.consecutive_passes
    }

    /// Consume one decision from the current priority holder.
    pub fn on_decision(&mut self, decision: Decision, ctx: &mut TurnContext<'_>) -> Result<ActionStep> {
        self.iterations += 1;
        let player = ctx.arbiter.priority();

        match decision {
            Decision::Act(Action { label, commands }) => {
                self.consecutive_passes = false;
                info!(player = %player, action = %label, commands = commands.len(), "Player acted");

                let before = ctx.stack.len();
                for command in commands {
                    ctx.stack
                        .push(command, player, CommandSource::Action(label.clone()));
                }
                ctx.announce_pushed(before);

                let responder = player.opponent();
                ctx.arbiter.set_priority(responder, ctx.notifier);
                Ok(ActionStep::AwaitDecision(responder))
            }

            Decision::Pass => {
                let outcome = ctx.arbiter.classify_pass(ctx.stack.is_empty());
                info!(player = %player, outcome = ?outcome, depth = ctx.stack.len(), "Player passed");

                match outcome {
                    PassOutcome::ResolveTop => {
                        let (entry, outcome) = ctx.stack.resolve_top(ctx.board, ctx.cards)?;
                        self.resolutions += 1;
                        ctx.notifier.notify(&MatchEvent::CommandResolved {
                            entry: entry.id,
                            outcome,
                        });
                        Ok(ActionStep::Resolved {
                            entry: entry.id,
                            next: ctx.arbiter.priority(),
                        })
                    }
                    PassOutcome::ReturnToActive => {
                        let active = ctx.arbiter.active();
                        ctx.arbiter.set_priority(active, ctx.notifier);
                        Ok(ActionStep::AwaitDecision(active))
                    }
                    PassOutcome::EndPhase => {
                        self.consecutive_passes = true;
                        Ok(ActionStep::Finished)
                    }
                }
            }
        }
    }
}
