//! Trigger registry.
//!
//! Stores triggered effects per source and, when a phase fires a trigger
//! kind, builds their commands and pushes them onto the resolution stack.
//! Only triggers whose controller is the firing player respond, so
//! "turn started" means "your turn started".

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::TriggerBroker;
use crate::cards::{CardDataProvider, CardInstance};
use crate::core::{Board, EntityId, PlayerId};
use crate::effects::{EffectContext, EffectSpec, EffectTrigger};
use crate::error::Result;
use crate::stack::{CommandSource, ResolutionStack};

/// Unique identifier for a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerId(pub u32);

impl TriggerId {
    /// Create a new trigger ID.
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

impl std::fmt::Display for TriggerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Trigger({})", self.0)
    }
}

/// A triggered effect owned by a card or unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Assigned by the registry.
    pub id: TriggerId,

    /// Human-readable name (for debugging).
    pub name: String,

    /// The trigger kind this listens for.
    pub on: EffectTrigger,

    /// The entity that owns this trigger.
    pub source: EntityId,

    /// Who controls the resulting commands.
    pub controller: PlayerId,

    /// Effect chain to build when fired.
    pub effects: Vec<EffectSpec>,

    /// Is this trigger currently active?
    pub enabled: bool,

    /// How many times can this trigger fire? `None` = unlimited.
    pub uses_remaining: Option<u32>,
}

impl Trigger {
    /// Create an enabled, unlimited trigger with no effects.
    pub fn new(
        name: impl Into<String>,
        on: EffectTrigger,
        source: EntityId,
        controller: PlayerId,
    ) -> Self {
        Self {
            id: TriggerId::new(0),
            name: name.into(),
            on,
            source,
            controller,
            effects: Vec::new(),
            enabled: true,
            uses_remaining: None,
        }
    }

    /// Add an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: EffectSpec) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set a use limit (builder pattern).
    #[must_use]
    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses_remaining = Some(uses);
        self
    }

    /// Can this trigger fire for `player`?
    #[must_use]
    pub fn responds_to(&self, player: PlayerId) -> bool {
        self.enabled && self.controller == player && self.uses_remaining != Some(0)
    }
}

/// Storage and lookup for triggers, indexed by trigger kind.
///
/// ```
/// use riftbound_engine::core::{Board, EntityId, PlayerId};
/// use riftbound_engine::effects::{EffectAction, EffectSpec, EffectTrigger};
/// use riftbound_engine::stack::ResolutionStack;
/// use riftbound_engine::triggers::{Trigger, TriggerBroker, TriggerRegistry};
///
/// let mut registry = TriggerRegistry::new();
/// registry.register(
///     Trigger::new("Rune Sprout", EffectTrigger::OnTurnStart, EntityId(1000), PlayerId::FIRST)
///         .with_effect(EffectSpec::new(EffectAction::GainRune {
///             rune_type: Default::default(),
///             count: 1,
///             restriction: None,
///         })),
/// );
///
/// let board = Board::new(["A", "B"], None);
/// let mut stack = ResolutionStack::new();
///
/// // Only the controller's own turn start fires it
/// assert_eq!(registry.fire(EffectTrigger::OnTurnStart, PlayerId::SECOND, &board, &mut stack).unwrap(), 0);
/// assert_eq!(registry.fire(EffectTrigger::OnTurnStart, PlayerId::FIRST, &board, &mut stack).unwrap(), 1);
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TriggerRegistry {
    triggers: FxHashMap<TriggerId, Trigger>,
    /// Registration order per trigger kind.
    by_kind: FxHashMap<EffectTrigger, Vec<TriggerId>>,
    next_id: u32,
}

impl TriggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger, assigning it a fresh ID.
    pub fn register(&mut self, mut trigger: Trigger) -> TriggerId {
        let id = TriggerId::new(self.next_id);
        self.next_id += 1;
        trigger.id = id;

        debug!(trigger = %id, name = %trigger.name, on = ?trigger.on, source = %trigger.source, "Trigger registered");

        self.by_kind.entry(trigger.on).or_default().push(id);
        self.triggers.insert(id, trigger);
        id
    }

    /// Register the effect definition of a card that just entered play.
    ///
    /// Returns `None` if the card has no effect definition.
    pub fn register_card(
        &mut self,
        card: &CardInstance,
        controller: PlayerId,
        cards: &dyn CardDataProvider,
    ) -> Option<TriggerId> {
        let definition = cards.effect_definition(&card.card)?;
        let name = cards
            .card_data(&card.card)
            .map(|c| c.display_name.clone())
            .unwrap_or_else(|| card.card.to_string());

        let mut trigger = Trigger::new(name, definition.trigger, card.uid, controller);
        trigger.effects = definition.effects_chain.clone();
        Some(self.register(trigger))
    }

    /// Remove every trigger owned by `source`. Returns how many were removed.
    pub fn unregister_source(&mut self, source: EntityId) -> usize {
        let removed: Vec<TriggerId> = self
            .triggers
            .values()
            .filter(|t| t.source == source)
            .map(|t| t.id)
            .collect();

        for id in &removed {
            if let Some(trigger) = self.triggers.remove(id) {
                if let Some(ids) = self.by_kind.get_mut(&trigger.on) {
                    ids.retain(|t| t != id);
                }
            }
        }
        removed.len()
    }

    #[must_use]
    pub fn get(&self, id: TriggerId) -> Option<&Trigger> {
        self.triggers.get(&id)
    }

    pub fn get_mut(&mut self, id: TriggerId) -> Option<&mut Trigger> {
        self.triggers.get_mut(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Triggers listening for `on`, in registration order.
    pub fn triggers_for(&self, on: EffectTrigger) -> impl Iterator<Item = &Trigger> {
        self.by_kind
            .get(&on)
            .into_iter()
            .flatten()
            .filter_map(|id| self.triggers.get(id))
    }
}

impl TriggerBroker for TriggerRegistry {
    fn fire(
        &mut self,
        trigger: EffectTrigger,
        player: PlayerId,
        board: &Board,
        stack: &mut ResolutionStack,
    ) -> Result<usize> {
        let Some(ids) = self.by_kind.get(&trigger) else {
            return Ok(0);
        };

        let mut pushed = 0;
        for id in ids {
            let Some(t) = self.triggers.get_mut(id) else {
                continue;
            };
            if !t.responds_to(player) {
                continue;
            }

            let commands = EffectContext::new(t.controller, board)
                .with_source(t.source)
                .build(&t.effects);
            for command in commands {
                stack.push(
                    command,
                    t.controller,
                    CommandSource::Trigger {
                        trigger,
                        source: t.source,
                    },
                );
                pushed += 1;
            }

            if let Some(uses) = t.uses_remaining.as_mut() {
                *uses -= 1;
            }
        }

        debug!(trigger = ?trigger, player = %player, pushed, "Trigger fired");
        Ok(pushed)
    }

    fn register_card(
        &mut self,
        card: &CardInstance,
        controller: PlayerId,
        cards: &dyn CardDataProvider,
    ) -> Option<TriggerId> {
        TriggerRegistry::register_card(self, card, controller, cards)
    }
}
