//! Units on the board.
//!
//! The [`UnitArena`] is the only owner of `Unit` values. Phases and commands
//! request changes through its methods and address units by `EntityId`.

mod arena;
mod unit;

pub use arena::UnitArena;
pub use unit::{StatModifier, Unit, UnitState};
