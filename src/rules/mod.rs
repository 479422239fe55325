//! Rules collaborators: scoring and match end.
//!
//! The turn engine only sequences turns. How many points a player holds
//! and when the match is over are decided here, behind small traits the
//! host can replace.

use serde::{Deserialize, Serialize};

use crate::core::{Board, PlayerId};
use crate::error::Result;

/// Computes the score a player gains in their Start phase.
pub trait ScoreKeeper: Send {
    /// Points to add to `player`'s score. An error aborts the turn.
    fn hold_score(&mut self, player: PlayerId, board: &Board) -> Result<i64>;
}

/// Never awards points.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScoring;

impl ScoreKeeper for NoScoring {
    fn hold_score(&mut self, _player: PlayerId, _board: &Board) -> Result<i64> {
        Ok(0)
    }
}

impl<F> ScoreKeeper for F
where
    F: FnMut(PlayerId, &Board) -> i64 + Send,
{
    fn hold_score(&mut self, player: PlayerId, board: &Board) -> Result<i64> {
        Ok(self(player, board))
    }
}

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(PlayerId),
    Draw,
}

impl MatchOutcome {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, Self::Winner(p) if *p == player)
    }
}

/// Decides whether the match is over.
pub trait VictoryCheck {
    /// `None` while the match continues.
    fn outcome(&self, board: &Board) -> Option<MatchOutcome>;
}

/// First player to reach `target` points wins.
///
/// ```
/// use riftbound_engine::core::{Board, PlayerId};
/// use riftbound_engine::rules::{MatchOutcome, ScoreVictory, VictoryCheck};
///
/// let mut board = Board::new(["A", "B"], None);
/// let check = ScoreVictory::new(8);
/// assert_eq!(check.outcome(&board), None);
///
/// board.player_mut(PlayerId::SECOND).score = 8;
/// assert_eq!(check.outcome(&board), Some(MatchOutcome::Winner(PlayerId::SECOND)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreVictory {
    pub target: i64,
}

impl ScoreVictory {
    #[must_use]
    pub fn new(target: i64) -> Self {
        Self { target }
    }
}

impl VictoryCheck for ScoreVictory {
    fn outcome(&self, board: &Board) -> Option<MatchOutcome> {
        let reached: Vec<PlayerId> = board
            .players
            .iter()
            .filter(|(_, p)| p.score >= self.target)
            .map(|(id, _)| id)
            .collect();

        match reached.as_slice() {
            [] => None,
            [winner] => Some(MatchOutcome::Winner(*winner)),
            _ => Some(MatchOutcome::Draw),
        }
    }
}

/// Never ends the match.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoVictory;

impl VictoryCheck for NoVictory {
    fn outcome(&self, _board: &Board) -> Option<MatchOutcome> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_score_keeper() {
        let board = Board::new(["A", "B"], None);
        let mut keeper = |player: PlayerId, _: &Board| if player == PlayerId::FIRST { 2 } else { 0 };

        assert_eq!(keeper.hold_score(PlayerId::FIRST, &board).unwrap(), 2);
        assert_eq!(keeper.hold_score(PlayerId::SECOND, &board).unwrap(), 0);
        assert_eq!(NoScoring.hold_score(PlayerId::FIRST, &board).unwrap(), 0);
    }

    #[test]
    fn test_score_victory_draw() {
        let mut board = Board::new(["A", "B"], None);
        board.player_mut(PlayerId::FIRST).score = 9;
        board.player_mut(PlayerId::SECOND).score = 8;

        assert_eq!(ScoreVictory::new(8).outcome(&board), Some(MatchOutcome::Draw));
        assert!(!MatchOutcome::Draw.is_winner(PlayerId::FIRST));
        assert!(MatchOutcome::Winner(PlayerId::FIRST).is_winner(PlayerId::FIRST));
        assert_eq!(NoVictory.outcome(&board), None);
    }
}
