//! Presentation notifications.
//!
//! The engine reports turn, phase, priority and stack transitions as
//! [`MatchEvent`]s. Delivery is fire-and-forget: the engine never waits on
//! a notifier and never reads anything back from it.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::core::PlayerId;
use crate::stack::{ResolveOutcome, StackEntryId};

/// Something observable happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    TurnStarted { round: u32, active: PlayerId },
    /// Emitted when a phase is entered.
    PhaseChanged { round: u32, phase: Phase },
    PriorityChanged { player: PlayerId },
    CommandPushed {
        entry: StackEntryId,
        command: String,
        depth: usize,
    },
    CommandResolved {
        entry: StackEntryId,
        outcome: ResolveOutcome,
    },
    /// The turn cycle stopped on an error. No further phase events follow
    /// until the turn is restarted.
    Halted { reason: String },
}

/// Receiver of match events.
pub trait Notifier: Send {
    fn notify(&mut self, event: &MatchEvent);
}

/// Drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&mut self, _event: &MatchEvent) {}
}

/// Records every event. Clones share one record, so a host can keep a
/// handle while the match owns the notifier.
///
/// ```
/// use riftbound_engine::core::PlayerId;
/// use riftbound_engine::turn::{EventLog, MatchEvent, Notifier};
///
/// let log = EventLog::new();
/// let mut handle = log.clone();
/// handle.notify(&MatchEvent::PriorityChanged { player: PlayerId::SECOND });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<MatchEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_events<R>(&self, f: impl FnOnce(&mut Vec<MatchEvent>) -> R) -> R {
        let mut guard = self.events.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut guard)
    }

    /// Copy of every event so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<MatchEvent> {
        self.with_events(|events| events.clone())
    }

    /// Phases entered so far, in order.
    #[must_use]
    pub fn phases(&self) -> Vec<Phase> {
        self.with_events(|events| {
            events
                .iter()
                .filter_map(|e| match e {
                    MatchEvent::PhaseChanged { phase, .. } => Some(*phase),
                    _ => None,
                })
                .collect()
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.with_events(|events| events.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.with_events(|events| events.clear());
    }
}

impl Notifier for EventLog {
    fn notify(&mut self, event: &MatchEvent) {
        let event = event.clone();
        self.with_events(|events| events.push(event));
    }
}
