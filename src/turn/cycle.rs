//! Turn rotation.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::notify::{MatchEvent, Notifier};
use crate::core::PlayerId;
use crate::stack::PriorityArbiter;

/// Round counter and turn ownership.
///
/// ```
/// use riftbound_engine::core::PlayerId;
/// use riftbound_engine::stack::PriorityArbiter;
/// use riftbound_engine::turn::{NullNotifier, TurnCycle};
///
/// let mut cycle = TurnCycle::new();
/// let mut arbiter = PriorityArbiter::new(PlayerId::FIRST);
///
/// assert_eq!(cycle.start_new_turn(&mut arbiter, &mut NullNotifier), PlayerId::FIRST);
/// assert_eq!(cycle.start_new_turn(&mut arbiter, &mut NullNotifier), PlayerId::SECOND);
/// assert_eq!(cycle.round(), 2);
/// assert_eq!(arbiter.priority(), PlayerId::SECOND);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCycle {
    round: u32,
    active: Option<PlayerId>,
}

impl TurnCycle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns started so far (1 during the first turn).
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The player whose turn it is, once the first turn has started.
    #[must_use]
    pub fn active(&self) -> Option<PlayerId> {
        self.active
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.active.is_some()
    }

    /// Advance the round, rotate the active player and hand them priority.
    ///
    /// The first turn belongs to `PlayerId::FIRST`.
    pub fn start_new_turn(
        &mut self,
        arbiter: &mut PriorityArbiter,
        notifier: &mut dyn Notifier,
    ) -> PlayerId {
        self.round += 1;
        let active = self.active.map_or(PlayerId::FIRST, PlayerId::opponent);
        self.active = Some(active);
        self.announce(active, arbiter, notifier);
        active
    }

    /// Begin the current turn again: same round, same active player.
    ///
    /// Returns `None` if no turn has started.
    pub fn restart_turn(
        &self,
        arbiter: &mut PriorityArbiter,
        notifier: &mut dyn Notifier,
    ) -> Option<PlayerId> {
        let active = self.active?;
        self.announce(active, arbiter, notifier);
        Some(active)
    }

    fn announce(&self, active: PlayerId, arbiter: &mut PriorityArbiter, notifier: &mut dyn Notifier) {
        info!(round = self.round, player = %active, "Turn started");
        notifier.notify(&MatchEvent::TurnStarted {
            round: self.round,
            active,
        });
        arbiter.set_active(active);
        arbiter.set_priority(active, notifier);
    }
}
