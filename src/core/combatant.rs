//! Combatant health and hand.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::{seed_deck, CardEffect, CardType};

/// Cards not yet played, in play-eligibility order.
///
/// Never longer than the seed deck, so it stays inline.
pub type Hand = SmallVec<[CardType; 3]>;

/// One side of the duel.
///
/// Health has a floor of 0 and no ceiling: healing past the starting
/// value is allowed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    /// Current health.
    pub health: u32,
    /// Remaining cards.
    pub hand: Hand,
}

impl Combatant {
    /// A combatant holding the seed deck.
    #[must_use]
    pub fn new(starting_health: u32) -> Self {
        Self {
            health: starting_health,
            hand: seed_deck().into_iter().collect(),
        }
    }

    /// A combatant with an explicit hand.
    #[must_use]
    pub fn with_hand(health: u32, hand: impl IntoIterator<Item = CardType>) -> Self {
        Self {
            health,
            hand: hand.into_iter().collect(),
        }
    }

    /// Look at the card at `index` without removing it.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<CardType> {
        self.hand.get(index).copied()
    }

    /// Remove and return the card at `index`, or `None` if out of range.
    pub fn take_card(&mut self, index: usize) -> Option<CardType> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Is the hand exhausted?
    #[must_use]
    pub fn is_out_of_cards(&self) -> bool {
        self.hand.is_empty()
    }

    /// Is this combatant knocked out?
    #[must_use]
    pub fn is_down(&self) -> bool {
        self.health == 0
    }

    /// Lose health, never below zero.
    pub fn damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Gain health.
    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount);
    }
}

/// Apply `effect` cast by `caster` against `target`.
///
/// Heals always land on the caster, damage always on the target.
pub fn apply_effect(effect: CardEffect, caster: &mut Combatant, target: &mut Combatant) {
    match effect {
        CardEffect::Damage(amount) => target.damage(amount),
        CardEffect::Heal(amount) => caster.heal(amount),
    }
}
