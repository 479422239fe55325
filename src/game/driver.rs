//! Running a match to completion without a UI.
//!
//! [`drive`] plays a match by asking a [`DecisionSource`] for every awaited
//! decision and ending every pacing pause immediately. It stops when the
//! [`VictoryCheck`] reports an outcome or the round limit is passed.

use std::collections::VecDeque;

use tracing::{debug, info};

use super::engine::Match;
use crate::core::{Board, Decision, PlayerId};
use crate::error::Result;
use crate::rules::{MatchOutcome, VictoryCheck};
use crate::stack::ResolutionStack;
use crate::triggers::TriggerBroker;
use crate::turn::Suspension;

/// Supplies decisions for the players.
pub trait DecisionSource {
    fn decide(&mut self, player: PlayerId, board: &Board, stack: &ResolutionStack) -> Decision;
}

/// Plays a fixed list of decisions in order, then passes forever.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDecisions {
    script: VecDeque<Decision>,
}

impl ScriptedDecisions {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Always pass.
    #[must_use]
    pub fn passing() -> Self {
        Self::default()
    }

    /// Decisions not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, _player: PlayerId, _board: &Board, _stack: &ResolutionStack) -> Decision {
        self.script.pop_front().unwrap_or(Decision::Pass)
    }
}

impl<F> DecisionSource for F
where
    F: FnMut(PlayerId, &Board, &ResolutionStack) -> Decision,
{
    fn decide(&mut self, player: PlayerId, board: &Board, stack: &ResolutionStack) -> Decision {
        self(player, board, stack)
    }
}

/// How a driven match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DriveReport {
    /// `None` if the round limit was reached first.
    pub outcome: Option<MatchOutcome>,
    /// Round in progress when driving stopped.
    pub rounds: u32,
    /// Decisions submitted.
    pub decisions: usize,
    /// Pacing pauses skipped.
    pub pauses: usize,
}

/// Play until `victory` reports an outcome or turn `max_turns` is over.
///
/// Starts the match if needed. Errors are returned as-is; the match is
/// halted and may be restarted with [`Match::restart_turn`].
pub fn drive<B: TriggerBroker>(
    game: &mut Match<B>,
    source: &mut dyn DecisionSource,
    victory: &dyn VictoryCheck,
    max_turns: u32,
) -> Result<DriveReport> {
    let mut next = match game.pending() {
        Some(suspension) => suspension,
        None => game.start()?,
    };

    let mut report = DriveReport {
        outcome: None,
        rounds: game.round(),
        decisions: 0,
        pauses: 0,
    };

    loop {
        report.rounds = game.round();

        if let Some(outcome) = victory.outcome(game.board()) {
            info!(outcome = ?outcome, round = report.rounds, "Match decided");
            report.outcome = Some(outcome);
            return Ok(report);
        }
        if report.rounds > max_turns {
            info!(max_turns, "Round limit reached");
            return Ok(report);
        }

        next = match next {
            Suspension::AwaitingDecision { player } => {
                let decision = source.decide(player, game.board(), game.stack());
                debug!(player = %player, decision = ?decision.kind(), "Decision supplied");
                report.decisions += 1;
                game.submit(decision)?
            }
            Suspension::Pacing { .. } => {
                report.pauses += 1;
                game.resume()?
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::stack::Command;

    #[test]
    fn test_script_then_pass() {
        let board = Board::new(["A", "B"], None);
        let stack = ResolutionStack::new();
        let mut source =
            ScriptedDecisions::new([Decision::Act(Action::new("Bolt").with_command(Command::log("x")))]);

        assert_eq!(source.remaining(), 1);
        assert!(!source.decide(PlayerId::FIRST, &board, &stack).is_pass());
        assert!(source.decide(PlayerId::SECOND, &board, &stack).is_pass());
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_closure_source() {
        let board = Board::new(["A", "B"], None);
        let stack = ResolutionStack::new();
        let mut calls = 0;
        let mut source = |_: PlayerId, _: &Board, _: &ResolutionStack| {
            calls += 1;
            Decision::Pass
        };

        assert!(source.decide(PlayerId::FIRST, &board, &stack).is_pass());
        drop(source);
        assert_eq!(calls, 1);
    }
}
