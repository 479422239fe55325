//! Core match types: entities, players, board state, decisions, RNG, configuration.
//!
//! This module holds the building blocks every other module refers to.
//! The turn machinery itself lives in [`crate::turn`] and [`crate::stack`].

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{EntityAllocator, EntityId};
pub use player::{Player, PlayerId, PlayerMap, PlayerModifier};
pub use rng::{GameRng, GameRngState};
pub use config::MatchConfig;
pub use action::{Action, Decision, DecisionKind, DecisionRecord};
pub use state::Board;
