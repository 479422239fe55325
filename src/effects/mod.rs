//! Card effects: data definitions and command building.
//!
//! - `CardEffectDefinition`: a trigger plus an effect chain, as authored in JSON
//! - `EffectSpec` / `EffectAction`: one link of the chain, tagged by `"type"`
//! - `EffectContext`: resolves targets and turns a chain into stack commands
//!
//! Effects never touch the board directly. They become
//! [`Command`](crate::stack::Command)s, which only the resolution stack resolves.

mod effect;
mod targeting;

pub use effect::{
    CardEffectDefinition, Condition, EffectAction, EffectSpec, EffectTrigger, ModifierDuration,
    TargetDefinition, TargetLocation, TargetType, UnitStat,
};
pub use targeting::{build_commands, EffectContext, Target};
