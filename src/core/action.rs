//! Player decisions during the Action phase.
//!
//! Each Action-phase iteration consumes exactly one `Decision` from the
//! priority holder: either an `Action` (which may carry commands to push
//! onto the resolution stack) or a pass.
//!
//! ```
//! use riftbound_engine::core::{Action, Decision};
//! use riftbound_engine::stack::Command;
//!
//! let bolt = Action::new("Cast Bolt").with_command(Command::log("bolt"));
//! let decision = Decision::Act(bolt);
//! assert!(!decision.is_pass());
//! assert!(Decision::Pass.is_pass());
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::stack::Command;

/// Something a player did while holding priority.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Human-readable description ("Play Jinx", "Move unit").
    pub label: String,

    /// Commands the action puts on the stack, bottom first.
    /// Most actions push zero or one command.
    pub commands: SmallVec<[Command; 2]>,
}

impl Action {
    /// Create an action with no commands.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            commands: SmallVec::new(),
        }
    }

    /// Add a command (builder pattern).
    #[must_use]
    pub fn with_command(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    /// Add several commands (builder pattern).
    #[must_use]
    pub fn with_commands(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.commands.extend(commands);
        self
    }
}

/// The priority holder's answer to "what now?".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    Act(Action),
    Pass,
}

impl Decision {
    /// Shorthand for an effect-free action.
    pub fn act(label: impl Into<String>) -> Self {
        Self::Act(Action::new(label))
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The kind of decision without its payload.
    #[must_use]
    pub fn kind(&self) -> DecisionKind {
        match self {
            Self::Act(_) => DecisionKind::Acted,
            Self::Pass => DecisionKind::Passed,
        }
    }
}

/// Payload-free decision kind, as recorded in history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    Acted,
    Passed,
}

/// A decision as it was processed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// Round the decision was made in.
    pub round: u32,

    /// Who held priority.
    pub player: PlayerId,

    pub kind: DecisionKind,

    /// Stack depth after the decision's consequences completed.
    pub stack_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_builder() {
        let action = Action::new("Play")
            .with_command(Command::log("a"))
            .with_commands([Command::log("b"), Command::log("c")]);

        assert_eq!(action.label, "Play");
        assert_eq!(action.commands.len(), 3);
        assert_eq!(action.commands[0], Command::log("a"));
    }

    #[test]
    fn test_decision_kind() {
        assert_eq!(Decision::act("x").kind(), DecisionKind::Acted);
        assert_eq!(Decision::Pass.kind(), DecisionKind::Passed);
    }

    #[test]
    fn test_decision_serialization() {
        let decision = Decision::Act(Action::new("Play").with_command(Command::log("hi")));
        let json = serde_json::to_string(&decision).unwrap();
        let back: Decision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, back);
    }
}
