//! Priority tracking for the two players.
//!
//! The arbiter holds two pointers: the active player (who owns the turn)
//! and the priority player (who may act or pass right now). It does not
//! check who is asking; the input layer must only forward decisions from
//! the current priority holder.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::PlayerId;
use crate::turn::{MatchEvent, Notifier};

/// What a pass means in the current situation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassOutcome {
    /// Stack is non-empty: decline to respond, resolve the top entry.
    ResolveTop,
    /// Non-active player passed on an empty stack: hand priority back.
    ReturnToActive,
    /// Active player passed on an empty stack: both have now passed.
    EndPhase,
}

/// Active and priority player pointers.
///
/// ```
/// use riftbound_engine::core::PlayerId;
/// use riftbound_engine::stack::{PassOutcome, PriorityArbiter};
/// use riftbound_engine::turn::NullNotifier;
///
/// let mut arbiter = PriorityArbiter::new(PlayerId::FIRST);
/// assert_eq!(arbiter.classify_pass(true), PassOutcome::EndPhase);
///
/// arbiter.pass_priority(&mut NullNotifier);
/// assert_eq!(arbiter.priority(), PlayerId::SECOND);
/// assert_eq!(arbiter.classify_pass(true), PassOutcome::ReturnToActive);
/// assert_eq!(arbiter.classify_pass(false), PassOutcome::ResolveTop);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityArbiter {
    active: PlayerId,
    priority: PlayerId,
}

impl PriorityArbiter {
    /// Both pointers start at `active`.
    #[must_use]
    pub fn new(active: PlayerId) -> Self {
        Self {
            active,
            priority: active,
        }
    }

    #[must_use]
    pub fn active(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn priority(&self) -> PlayerId {
        self.priority
    }

    /// Does the active player hold priority?
    #[must_use]
    pub fn active_has_priority(&self) -> bool {
        self.priority == self.active
    }

    /// Change turn ownership. Only called at turn boundaries.
    pub fn set_active(&mut self, player: PlayerId) {
        self.active = player;
    }

    /// Give priority to `player`. Always accepted.
    pub fn set_priority(&mut self, player: PlayerId, notifier: &mut dyn Notifier) {
        self.priority = player;
        debug!(player = %player, "Priority set");
        notifier.notify(&MatchEvent::PriorityChanged { player });
    }

    /// Give priority to the opponent of the current holder.
    pub fn pass_priority(&mut self, notifier: &mut dyn Notifier) {
        self.set_priority(self.priority.opponent(), notifier);
    }

    /// Decide what a pass by the current holder does.
    ///
    /// Only an active-player pass on an empty stack ends the phase; the
    /// asymmetry gives the turn player the final say.
    #[must_use]
    pub fn classify_pass(&self, stack_is_empty: bool) -> PassOutcome {
        if !stack_is_empty {
            PassOutcome::ResolveTop
        } else if self.priority != self.active {
            PassOutcome::ReturnToActive
        } else {
            PassOutcome::EndPhase
        }
    }
}
