//! Turn structure: phases, the sequencer, turn rotation, and notifications.
//!
//! ## Flow
//!
//! [`TurnCycle`] starts a turn and hands priority to the new active player.
//! [`PhaseSequencer`] then runs the six [`Phase`]s in order. The Action
//! phase loops on player decisions until both players pass in succession
//! with an empty stack. Each wait surfaces as a [`Suspension`].

mod cycle;
mod notify;
mod phase;
mod sequencer;

pub use cycle::TurnCycle;
pub use notify::{EventLog, MatchEvent, Notifier, NullNotifier};
pub use phase::{ActionPhase, ActionStep, Phase, TurnContext};
pub use sequencer::{PacingReason, PhaseSequencer, SequencerStep, Suspension, TurnState};
