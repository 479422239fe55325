//! # riftbound-engine
//!
//! Turn structure, priority, and resolution stack for a two-player
//! stack-based trading card game.
//!
//! ## Design Principles
//!
//! 1. **One owner**: A [`Match`] owns the board, the stack, the priority
//!    arbiter and the turn machinery. There is no global state; several
//!    matches can run side by side.
//!
//! 2. **Explicit suspension**: The engine never blocks. Each call runs to
//!    the next [`Suspension`] (a decision to wait for, or a pacing pause)
//!    and the host calls back in with `submit` or `resume`.
//!
//! 3. **Everything through the stack**: Player actions and triggered
//!    effects become [`Command`]s. Only the resolution stack applies them
//!    to the board, one at a time, top first.
//!
//! ## Architecture
//!
//! - **Collaborators behind traits**: card data ([`CardDataProvider`]),
//!   triggered effects ([`TriggerBroker`]), hold scoring ([`ScoreKeeper`])
//!   and notifications ([`Notifier`]) are injected at setup.
//!
//! - **Persistent Data Structures**: zones use `im` vectors so boards clone
//!   cheaply for snapshots.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, board state, decisions, RNG, configuration
//! - `cards`: Card definitions, instances, the registry, deck lists
//! - `units`: Units on the board and the arena that owns them
//! - `effects`: Effect definitions and command building
//! - `stack`: Commands, the resolution stack and the priority arbiter
//! - `triggers`: The trigger broker interface and the standard registry
//! - `turn`: Phases, the phase sequencer, turn rotation, notifications
//! - `rules`: Hold scoring and victory checks
//! - `game`: The match aggregate, its builder, snapshots and a driver

pub mod core;
pub mod cards;
pub mod units;
pub mod effects;
pub mod stack;
pub mod triggers;
pub mod turn;
pub mod rules;
pub mod game;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Action, Board, Decision, DecisionKind, DecisionRecord, EntityId, GameRng, GameRngState,
    MatchConfig, Player, PlayerId, PlayerMap,
};

pub use crate::cards::{CardData, CardDataProvider, CardId, CardInstance, CardRegistry, CardType, DeckLayout};

pub use crate::units::{Unit, UnitArena, UnitState};

pub use crate::effects::{CardEffectDefinition, EffectContext, EffectSpec, EffectTrigger, Target};

pub use crate::stack::{
    Command, CommandSource, PassOutcome, PriorityArbiter, ResolutionStack, ResolveOutcome,
    StackEntry, StackEntryId,
};

pub use crate::triggers::{Trigger, TriggerBroker, TriggerId, TriggerRegistry};

pub use crate::turn::{
    EventLog, MatchEvent, Notifier, NullNotifier, PacingReason, Phase, Suspension, TurnCycle,
    TurnState,
};

pub use crate::rules::{MatchOutcome, NoScoring, ScoreKeeper, ScoreVictory, VictoryCheck};

pub use crate::game::{drive, DecisionSource, Match, MatchBuilder, MatchSnapshot, ScriptedDecisions};

pub use crate::error::{EngineError, Result};
