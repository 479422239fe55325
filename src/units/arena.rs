//! Single-owner storage for every unit on the board.
//!
//! Units are keyed by `EntityId`. Summon order is kept separately so
//! iteration (and therefore trigger and log order) is deterministic.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::unit::{Unit, UnitState};
use crate::cards::CardInstance;
use crate::core::{EntityId, PlayerId};

/// All units currently on the board.
///
/// ```
/// use riftbound_engine::cards::{CardId, CardInstance};
/// use riftbound_engine::core::{EntityId, PlayerId};
/// use riftbound_engine::units::{UnitArena, UnitState};
///
/// let mut arena = UnitArena::new();
/// let card = CardInstance::new(EntityId(1000), CardId::new("OGN_001"));
/// let id = arena.summon(card, PlayerId::FIRST, 2, 2, true);
///
/// assert_eq!(arena.get(id).unwrap().state, UnitState::Resting);
/// arena.wake(PlayerId::FIRST);
/// assert_eq!(arena.get(id).unwrap().state, UnitState::Active);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UnitArena {
    units: FxHashMap<EntityId, Unit>,
    order: Vec<EntityId>,
}

impl UnitArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Put a card onto the board as a unit.
    ///
    /// Dormant units enter Resting; others enter Active.
    pub fn summon(
        &mut self,
        card: CardInstance,
        controller: PlayerId,
        power: i64,
        health: i64,
        dormant: bool,
    ) -> EntityId {
        let mut unit = Unit::new(card, controller, power, health);
        if dormant {
            unit.state = UnitState::Resting;
        }
        let id = unit.id;
        debug!(unit = %id, card = %unit.card, player = %controller, dormant, "Unit summoned");
        if self.units.insert(id, unit).is_none() {
            self.order.push(id);
        }
        id
    }

    /// Take a unit off the board.
    pub fn remove(&mut self, id: EntityId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        self.order.retain(|u| *u != id);
        Some(unit)
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Unit> {
        self.units.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.units.contains_key(&id)
    }

    /// Iterate over all units in summon order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.order.iter().filter_map(|id| self.units.get(id))
    }

    /// IDs of a player's units in summon order.
    #[must_use]
    pub fn units_of(&self, player: PlayerId) -> Vec<EntityId> {
        self.iter()
            .filter(|u| u.controller == player)
            .map(|u| u.id)
            .collect()
    }

    /// Set every unit `player` controls to Active.
    ///
    /// Absolute set: repeating it changes nothing.
    pub fn wake(&mut self, player: PlayerId) -> usize {
        let mut woken = 0;
        for unit in self.units.values_mut() {
            if unit.controller == player {
                unit.state = UnitState::Active;
                woken += 1;
            }
        }
        woken
    }

    /// Remove marked damage from every unit.
    pub fn clear_damage(&mut self) {
        for unit in self.units.values_mut() {
            unit.clear_damage();
        }
    }

    pub fn clear_temporary_modifiers(&mut self) {
        for unit in self.units.values_mut() {
            unit.clear_temporary_modifiers();
        }
    }
}
