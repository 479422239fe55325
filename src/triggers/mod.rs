//! Triggered effects.
//!
//! Phases announce trigger kinds ("turn started", "turn ended") through the
//! [`TriggerBroker`] interface. A broker may push commands onto the
//! resolution stack; it never resolves them. [`TriggerRegistry`] is the
//! standard broker, driven by card effect definitions.

mod registry;

pub use registry::{Trigger, TriggerId, TriggerRegistry};

use crate::cards::{CardDataProvider, CardInstance};
use crate::core::{Board, PlayerId};
use crate::effects::EffectTrigger;
use crate::error::Result;
use crate::stack::ResolutionStack;

/// Collaborator notified at phase boundaries.
///
/// Returns the number of commands pushed. An error aborts the current turn.
pub trait TriggerBroker: Send {
    fn fire(
        &mut self,
        trigger: EffectTrigger,
        player: PlayerId,
        board: &Board,
        stack: &mut ResolutionStack,
    ) -> Result<usize>;

    /// Subscribe a card that just entered play.
    ///
    /// Brokers that do not keep per-card subscriptions ignore this.
    fn register_card(
        &mut self,
        _card: &CardInstance,
        _controller: PlayerId,
        _cards: &dyn CardDataProvider,
    ) -> Option<TriggerId> {
        None
    }
}
