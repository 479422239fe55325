//! Error types.
//!
//! `EngineError` covers everything that can stop the turn engine: protocol
//! violations by the driver, collaborator failures, and match-setup problems.
//! `DataError` covers card/effect definition loading, which is best-effort
//! and never fatal to a running match.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::{EntityId, PlayerId};
use crate::turn::Phase;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("No decision was requested (turn is {state})")]
    UnexpectedDecision { state: String },

    #[error("Nothing to resume (turn is {state})")]
    NothingToResume { state: String },

    #[error("Resolution stack is empty")]
    EmptyStack,

    #[error("Match has not started")]
    NotStarted,

    #[error("Match already started")]
    AlreadyStarted,

    #[error("Match halted: {0}")]
    Halted(String),

    #[error("Collaborator failed during {phase:?} phase: {reason}")]
    Collaborator { phase: Phase, reason: String },

    #[error("Invalid deck for {player}: {reason}")]
    InvalidDeck { player: PlayerId, reason: String },

    #[error("Unknown card: {0}")]
    UnknownCard(CardId),

    #[error("Unknown unit: {0}")]
    UnknownUnit(EntityId),

    #[error("{card} is not in {player}'s hand")]
    NotInHand { player: PlayerId, card: EntityId },

    #[error("Mulligan is only allowed before the first turn")]
    MulliganClosed,

    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),
}

impl EngineError {
    /// Create a collaborator failure for the given phase.
    pub fn collaborator(phase: Phase, reason: impl Into<String>) -> Self {
        Self::Collaborator {
            phase,
            reason: reason.into(),
        }
    }

    /// Create an invalid deck error.
    pub fn invalid_deck(player: PlayerId, reason: impl Into<String>) -> Self {
        Self::InvalidDeck {
            player,
            reason: reason.into(),
        }
    }

    /// Is this a driver protocol violation (as opposed to a collaborator or setup failure)?
    #[must_use]
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedDecision { .. }
                | Self::NothingToResume { .. }
                | Self::EmptyStack
                | Self::NotStarted
                | Self::AlreadyStarted
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised while loading card or effect definitions.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Definition JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
