//! The phase sequencer: runs one turn's phases in order, suspending
//! whenever the engine has to wait.
//!
//! Waiting is an explicit [`TurnState`] value rather than a blocked call.
//! The match advances the sequencer until it returns a [`Suspension`], and
//! the host later feeds it a decision (`submit`) or ends a pause (`resume`).

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::info;

use super::notify::MatchEvent;
use super::phase::{ActionPhase, ActionStep, Phase, TurnContext};
use crate::core::{Decision, PlayerId};
use crate::error::{EngineError, Result};
use crate::stack::StackEntryId;

/// Why the engine is pausing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PacingReason {
    PhaseEnded(Phase),
    CommandResolved(StackEntryId),
}

/// Where the engine stopped and what it needs to continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suspension {
    /// Call `submit` with this player's decision.
    AwaitingDecision { player: PlayerId },
    /// Presentation pause. Call `resume` once `delay` has elapsed.
    Pacing { delay: Duration, reason: PacingReason },
}

impl Suspension {
    /// The player whose decision is awaited, if any.
    #[must_use]
    pub fn awaiting(&self) -> Option<PlayerId> {
        match self {
            Self::AwaitingDecision { player } => Some(*player),
            Self::Pacing { .. } => None,
        }
    }
}

/// Sequencer position within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// No turn has begun.
    Idle,
    /// About to enter this phase.
    Entering(Phase),
    /// Action phase, waiting for this player.
    AwaitingDecision(PlayerId),
    /// Paused after this phase finished.
    PacingAfterPhase(Phase),
    /// Paused after a resolution; then this player decides.
    PacingAfterResolution(PlayerId),
    /// End phase finished; the next turn has not begun.
    TurnOver,
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Entering(phase) => write!(f, "entering {}", phase),
            Self::AwaitingDecision(player) => write!(f, "awaiting a decision from {}", player),
            Self::PacingAfterPhase(phase) => write!(f, "pacing after {}", phase),
            Self::PacingAfterResolution(_) => write!(f, "pacing after a resolution"),
            Self::TurnOver => write!(f, "between turns"),
        }
    }
}

/// Output of one sequencer step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerStep {
    Suspend(Suspension),
    /// All six phases ran; the caller starts the next turn.
    TurnComplete,
}

/// Runs Wake → Start → Summon → Draw → Action → End for one turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseSequencer {
    state: TurnState,
    current: Option<Phase>,
    action: ActionPhase,
    /// Phases finished this turn, in order.
    completed: SmallVec<[Phase; 6]>,
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: TurnState::Idle,
            current: None,
            action: ActionPhase::new(),
            completed: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// The phase most recently entered this turn.
    #[must_use]
    pub fn current_phase(&self) -> Option<Phase> {
        self.current
    }

    /// Phases finished this turn, in order.
    #[must_use]
    pub fn completed_phases(&self) -> &[Phase] {
        &self.completed
    }

    /// This turn's Action-phase state.
    #[must_use]
    pub fn action_phase(&self) -> &ActionPhase {
        &self.action
    }

    /// Reset for a new (or restarted) turn, positioned before Wake.
    pub fn begin_turn(&mut self) {
        self.state = TurnState::Entering(Phase::Wake);
        self.current = None;
        self.action = ActionPhase::new();
        self.completed.clear();
    }

    /// Run forward until the next suspension or the end of the turn.
    pub fn advance(&mut self, round: u32, ctx: &mut TurnContext<'_>) -> Result<SequencerStep> {
        loop {
            match self.state {
                TurnState::Entering(phase) => {
                    self.current = Some(phase);
                    info!(round, phase = %phase, player = %ctx.arbiter.active(), "Phase entered");
                    ctx.notifier.notify(&MatchEvent::PhaseChanged { round, phase });

                    if phase.is_interactive() {
                        self.action = ActionPhase::new();
                        let player = ctx.arbiter.priority();
                        self.state = TurnState::AwaitingDecision(player);
                        return Ok(SequencerStep::Suspend(Suspension::AwaitingDecision {
                            player,
                        }));
                    }

                    phase.execute(ctx)?;
                    if let Some(pause) = self.complete(phase, ctx.config.phase_delay) {
                        return Ok(SequencerStep::Suspend(pause));
                    }
                }
                TurnState::AwaitingDecision(player) => {
                    return Ok(SequencerStep::Suspend(Suspension::AwaitingDecision {
                        player,
                    }));
                }
                TurnState::TurnOver => return Ok(SequencerStep::TurnComplete),
                TurnState::Idle => return Err(EngineError::NotStarted),
                TurnState::PacingAfterPhase(_) | TurnState::PacingAfterResolution(_) => {
                    return Err(EngineError::UnexpectedDecision {
                        state: self.state.to_string(),
                    });
                }
            }
        }
    }

    /// Feed the awaited decision to the Action phase, then run forward.
    ///
    /// Fails if no decision was requested.
    pub fn submit(
        &mut self,
        decision: Decision,
        round: u32,
        ctx: &mut TurnContext<'_>,
    ) -> Result<SequencerStep> {
        if !matches!(self.state, TurnState::AwaitingDecision(_)) {
            return Err(EngineError::UnexpectedDecision {
                state: self.state.to_string(),
            });
        }

        match self.action.on_decision(decision, ctx)? {
            ActionStep::AwaitDecision(player) => {
                self.state = TurnState::AwaitingDecision(player);
                Ok(SequencerStep::Suspend(Suspension::AwaitingDecision {
                    player,
                }))
            }
            ActionStep::Resolved { entry, next } => {
                let delay = ctx.config.resolution_delay;
                if delay.is_zero() {
                    self.state = TurnState::AwaitingDecision(next);
                    Ok(SequencerStep::Suspend(Suspension::AwaitingDecision {
                        player: next,
                    }))
                } else {
                    self.state = TurnState::PacingAfterResolution(next);
                    Ok(SequencerStep::Suspend(Suspension::Pacing {
                        delay,
                        reason: PacingReason::CommandResolved(entry),
                    }))
                }
            }
            ActionStep::Finished => {
                if let Some(pause) = self.complete(Phase::Action, ctx.config.phase_delay) {
                    return Ok(SequencerStep::Suspend(pause));
                }
                self.advance(round, ctx)
            }
        }
    }

    /// End a pacing pause. Fails if the engine is not pausing.
    pub fn resume(&mut self) -> Result<()> {
        self.state = match self.state {
            TurnState::PacingAfterPhase(phase) => Self::after(phase),
            TurnState::PacingAfterResolution(player) => TurnState::AwaitingDecision(player),
            other => {
                return Err(EngineError::NothingToResume {
                    state: other.to_string(),
                })
            }
        };
        Ok(())
    }

    fn after(phase: Phase) -> TurnState {
        phase.next().map_or(TurnState::TurnOver, TurnState::Entering)
    }

    /// Record a finished phase and either pause or move on.
    fn complete(&mut self, phase: Phase, delay: Duration) -> Option<Suspension> {
        self.completed.push(phase);
        if delay.is_zero() {
            self.state = Self::after(phase);
            None
        } else {
            self.state = TurnState::PacingAfterPhase(phase);
            Some(Suspension::Pacing {
                delay,
                reason: PacingReason::PhaseEnded(phase),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sequencer_is_idle() {
        let seq = PhaseSequencer::new();
        assert_eq!(seq.state(), TurnState::Idle);
        assert!(seq.current_phase().is_none());
        assert!(seq.completed_phases().is_empty());
    }

    #[test]
    fn test_resume_without_pause_fails() {
        let mut seq = PhaseSequencer::new();
        seq.begin_turn();

        let err = seq.resume().unwrap_err();
        assert!(matches!(err, EngineError::NothingToResume { .. }));
        assert_eq!(seq.state(), TurnState::Entering(Phase::Wake));
    }

    #[test]
    fn test_complete_with_and_without_delay() {
        let mut seq = PhaseSequencer::new();
        seq.begin_turn();

        assert!(seq.complete(Phase::Wake, Duration::ZERO).is_none());
        assert_eq!(seq.state(), TurnState::Entering(Phase::Start));

        let pause = seq.complete(Phase::End, Duration::from_millis(500)).unwrap();
        assert_eq!(
            pause,
            Suspension::Pacing {
                delay: Duration::from_millis(500),
                reason: PacingReason::PhaseEnded(Phase::End),
            }
        );
        seq.resume().unwrap();
        assert_eq!(seq.state(), TurnState::TurnOver);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(TurnState::Entering(Phase::Draw).to_string(), "entering Draw");
        assert_eq!(
            TurnState::AwaitingDecision(PlayerId::SECOND).to_string(),
            "awaiting a decision from Player 1"
        );
    }
}
