//! The resolution stack and the priority protocol.
//!
//! - [`ResolutionStack`]: LIFO queue of pending [`Command`]s
//! - [`PriorityArbiter`]: who owns the turn, who may act now, and what a
//!   pass means ([`PassOutcome`])
//!
//! ## Example
//!
//! ```
//! use riftbound_engine::cards::CardRegistry;
//! use riftbound_engine::core::{Board, PlayerId};
//! use riftbound_engine::stack::{
//!     Command, CommandSource, PassOutcome, PriorityArbiter, ResolutionStack,
//! };
//! use riftbound_engine::turn::NullNotifier;
//!
//! let mut board = Board::new(["A", "B"], None);
//! let cards = CardRegistry::new();
//! let mut stack = ResolutionStack::new();
//! let mut arbiter = PriorityArbiter::new(PlayerId::FIRST);
//!
//! // Player 1 acts: command goes on the stack, priority flips
//! stack.push(Command::log("bolt"), PlayerId::FIRST, CommandSource::Action("Bolt".into()));
//! arbiter.pass_priority(&mut NullNotifier);
//!
//! // Player 2 passes with the stack non-empty: resolve the top
//! assert_eq!(arbiter.classify_pass(stack.is_empty()), PassOutcome::ResolveTop);
//! stack.resolve_top(&mut board, &cards).unwrap();
//! assert!(stack.is_empty());
//! ```

mod command;
mod priority;
mod resolution;

pub use command::{Command, ResolveOutcome};
pub use priority::{PassOutcome, PriorityArbiter};
pub use resolution::{CommandSource, ResolutionStack, StackEntry, StackEntryId};
