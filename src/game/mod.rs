//! The match aggregate and its setup.

mod builder;
mod driver;
mod engine;
mod snapshot;

pub use builder::MatchBuilder;
pub use driver::{drive, DecisionSource, DriveReport, ScriptedDecisions};
pub use engine::{Match, SharedCards};
pub use snapshot::MatchSnapshot;
