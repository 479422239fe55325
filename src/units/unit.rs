//! A unit on the board.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::CardInstance;
use crate::core::{EntityId, PlayerId};
use crate::effects::{ModifierDuration, UnitStat};

/// Readiness of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitState {
    /// Ready to act.
    #[default]
    Active,
    /// Exhausted: already acted, or summoned dormant.
    Resting,
    /// Cannot act until woken.
    Stunned,
}

/// A temporary or permanent stat change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    pub stat: UnitStat,
    pub amount: i64,
    pub duration: ModifierDuration,
}

/// One unit, owned by the [`UnitArena`](super::UnitArena).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Same as the card instance's uid.
    pub id: EntityId,
    pub card: CardInstance,
    pub controller: PlayerId,
    pub state: UnitState,

    // === Stats ===
    pub base_power: i64,
    pub base_health: i64,
    /// Damage marked this turn; cleared in the End phase.
    pub damage: i64,
    pub modifiers: SmallVec<[StatModifier; 2]>,
}

impl Unit {
    /// Create a unit from a card instance.
    pub fn new(card: CardInstance, controller: PlayerId, power: i64, health: i64) -> Self {
        Self {
            id: card.uid,
            card,
            controller,
            state: UnitState::Active,
            base_power: power,
            base_health: health,
            damage: 0,
            modifiers: SmallVec::new(),
        }
    }

    fn modifier_sum(&self, stat: UnitStat) -> i64 {
        self.modifiers
            .iter()
            .filter(|m| m.stat == stat)
            .fold(0_i64, |total, m| total.saturating_add(m.amount))
    }

    /// Current power including modifiers.
    #[must_use]
    pub fn power(&self) -> i64 {
        self.base_power.saturating_add(self.modifier_sum(UnitStat::Power))
    }

    /// Current maximum health including modifiers.
    #[must_use]
    pub fn health(&self) -> i64 {
        self.base_health.saturating_add(self.modifier_sum(UnitStat::Health))
    }

    /// Health left after marked damage.
    #[must_use]
    pub fn remaining_health(&self) -> i64 {
        self.health().saturating_sub(self.damage)
    }

    /// Has marked damage reached current health?
    #[must_use]
    pub fn is_lethally_damaged(&self) -> bool {
        self.remaining_health() <= 0
    }

    pub fn add_modifier(&mut self, stat: UnitStat, amount: i64, duration: ModifierDuration) {
        self.modifiers.push(StatModifier {
            stat,
            amount,
            duration,
        });
    }

    pub fn take_damage(&mut self, amount: i64) {
        self.damage = self.damage.saturating_add(amount.max(0));
    }

    /// Remove up to `amount` marked damage.
    pub fn heal(&mut self, amount: i64) {
        self.damage = self.damage.saturating_sub(amount.max(0)).max(0);
    }

    pub fn clear_damage(&mut self) {
        self.damage = 0;
    }

    pub fn set_state(&mut self, state: UnitState) {
        self.state = state;
    }

    /// Drop all `ThisTurn` modifiers.
    pub fn clear_temporary_modifiers(&mut self) {
        self.modifiers
            .retain(|m| m.duration != ModifierDuration::ThisTurn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardId;

    fn unit(power: i64, health: i64) -> Unit {
        let card = CardInstance::new(EntityId(1000), CardId::new("OGN_001"));
        Unit::new(card, PlayerId::FIRST, power, health)
    }

    #[test]
    fn test_stats_with_modifiers() {
        let mut u = unit(2, 3);
        u.add_modifier(UnitStat::Power, 2, ModifierDuration::ThisTurn);
        u.add_modifier(UnitStat::Health, 1, ModifierDuration::Permanent);

        assert_eq!(u.power(), 4);
        assert_eq!(u.health(), 4);

        u.clear_temporary_modifiers();
        assert_eq!(u.power(), 2);
        assert_eq!(u.health(), 4);
    }

    #[test]
    fn test_damage_and_heal() {
        let mut u = unit(1, 3);
        u.take_damage(2);
        assert_eq!(u.remaining_health(), 1);
        assert!(!u.is_lethally_damaged());

        u.heal(5);
        assert_eq!(u.damage, 0);

        u.take_damage(3);
        assert!(u.is_lethally_damaged());
        u.clear_damage();
        assert_eq!(u.remaining_health(), 3);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut u = unit(1, 3);
        u.take_damage(-4);
        assert_eq!(u.damage, 0);
    }
}
