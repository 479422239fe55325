//! Binary match snapshots.
//!
//! A snapshot records where the turn stands (round, priority, phase,
//! sequencer state) together with the board and the pending stack. It is a
//! read-only record for logging and replays; collaborators are not
//! captured.

use serde::{Deserialize, Serialize};

use crate::core::{Board, GameRngState, PlayerId};
use crate::error::Result;
use crate::stack::ResolutionStack;
use crate::turn::{Phase, TurnState};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub round: u32,
    pub active: Option<PlayerId>,
    pub priority: Option<PlayerId>,
    pub phase: Option<Phase>,
    pub state: TurnState,
    pub board: Board,
    pub stack: ResolutionStack,
    pub rng: GameRngState,
    pub halted: Option<String>,
}

impl MatchSnapshot {
    /// Encode with bincode.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by [`Match::snapshot`](super::Match::snapshot).
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_decode_garbage_fails() {
        let err = MatchSnapshot::decode(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err, EngineError::Snapshot(_)));
    }
}
