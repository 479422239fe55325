//! The resolution stack: pending commands, resolved last-in-first-out.
//!
//! Pushing is always allowed. Resolution only happens when the Action phase
//! asks for it, one entry at a time. A command resolves against the
//! [`Board`] alone, so it cannot push to or pop from the stack that is
//! resolving it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::command::{Command, ResolveOutcome};
use crate::cards::CardDataProvider;
use crate::core::{Board, EntityId, PlayerId};
use crate::effects::EffectTrigger;
use crate::error::{EngineError, Result};

/// Unique identifier for a stack entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackEntryId(pub u32);

impl StackEntryId {
    /// Create a new stack entry ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StackEntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StackEntry({})", self.0)
    }
}

/// What put a command on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandSource {
    /// A player action, by label.
    Action(String),

    /// A triggered effect.
    Trigger {
        trigger: EffectTrigger,
        source: EntityId,
    },
}

/// An entry on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    pub id: StackEntryId,
    pub command: Command,
    /// Who put it there.
    pub controller: PlayerId,
    pub source: CommandSource,
}

/// LIFO stack of pending commands.
///
/// ```
/// use riftbound_engine::cards::CardRegistry;
/// use riftbound_engine::core::{Board, PlayerId};
/// use riftbound_engine::stack::{Command, CommandSource, ResolutionStack};
///
/// let mut board = Board::new(["A", "B"], None);
/// let cards = CardRegistry::new();
/// let mut stack = ResolutionStack::new();
///
/// let source = CommandSource::Action("test".into());
/// stack.push(Command::log("first"), PlayerId::FIRST, source.clone());
/// stack.push(Command::log("second"), PlayerId::SECOND, source);
///
/// let (entry, _) = stack.resolve_top(&mut board, &cards).unwrap();
/// assert_eq!(entry.command, Command::log("second"));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ResolutionStack {
    /// Index 0 = bottom, last = top.
    entries: Vec<StackEntry>,
    next_id: u32,
}

impl ResolutionStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a command on top of the stack.
    pub fn push(
        &mut self,
        command: Command,
        controller: PlayerId,
        source: CommandSource,
    ) -> StackEntryId {
        let id = StackEntryId::new(self.next_id);
        self.next_id += 1;

        debug!(
            entry = %id,
            command = command.name(),
            player = %controller,
            depth = self.entries.len() + 1,
            "Command pushed"
        );

        self.entries.push(StackEntry {
            id,
            command,
            controller,
            source,
        });
        id
    }

    /// Pop the top entry and resolve it.
    ///
    /// Fails without touching anything if the stack is empty.
    pub fn resolve_top(
        &mut self,
        board: &mut Board,
        cards: &dyn CardDataProvider,
    ) -> Result<(StackEntry, ResolveOutcome)> {
        let entry = self.entries.pop().ok_or(EngineError::EmptyStack)?;
        let outcome = entry.command.resolve(board, cards);

        debug!(
            entry = %entry.id,
            command = entry.command.name(),
            outcome = ?outcome,
            remaining = self.entries.len(),
            "Command resolved"
        );

        Ok((entry, outcome))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Peek at the top of the stack without removing it.
    #[must_use]
    pub fn peek_top(&self) -> Option<&StackEntry> {
        self.entries.last()
    }

    /// All entries, bottom to top.
    #[must_use]
    pub fn entries(&self) -> &[StackEntry] {
        &self.entries
    }

    /// Drop every pending entry. Entry IDs keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRegistry;

    fn action() -> CommandSource {
        CommandSource::Action("test".into())
    }

    #[test]
    fn test_lifo_order() {
        let mut board = Board::new(["A", "B"], None);
        let cards = CardRegistry::new();
        let mut stack = ResolutionStack::new();

        for name in ["C1", "C2", "C3"] {
            stack.push(Command::log(name), PlayerId::FIRST, action());
        }

        let mut order = Vec::new();
        while !stack.is_empty() {
            let (entry, outcome) = stack.resolve_top(&mut board, &cards).unwrap();
            assert!(outcome.is_applied());
            order.push(entry.command);
        }

        assert_eq!(
            order,
            vec![Command::log("C3"), Command::log("C2"), Command::log("C1")]
        );
    }

    #[test]
    fn test_resolve_empty_fails_without_mutation() {
        let mut board = Board::new(["A", "B"], None);
        let cards = CardRegistry::new();
        let mut stack = ResolutionStack::new();

        let err = stack.resolve_top(&mut board, &cards).unwrap_err();
        assert!(matches!(err, EngineError::EmptyStack));
        assert!(stack.is_empty());

        // IDs were not consumed
        let id = stack.push(Command::log("x"), PlayerId::FIRST, action());
        assert_eq!(id, StackEntryId::new(0));
    }

    #[test]
    fn test_peek_and_entries() {
        let mut stack = ResolutionStack::new();
        assert!(stack.peek_top().is_none());

        let a = stack.push(Command::log("a"), PlayerId::FIRST, action());
        let b = stack.push(
            Command::log("b"),
            PlayerId::SECOND,
            CommandSource::Trigger {
                trigger: EffectTrigger::OnTurnStart,
                source: EntityId(1000),
            },
        );

        assert_eq!(stack.peek_top().map(|e| e.id), Some(b));
        let ids: Vec<_> = stack.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(stack.len(), 2);

        stack.clear();
        assert!(stack.is_empty());
        let c = stack.push(Command::log("c"), PlayerId::FIRST, action());
        assert_eq!(c.raw(), 2);
    }
}
