//! Card types and their fixed effects.
//!
//! The duel knows exactly three cards. Each has a fixed numeric effect:
//! damage cards hit the opponent, the heal card always targets the caster.

use serde::{Deserialize, Serialize};

/// A card in a combatant's hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    /// Deals 1 damage to the opponent.
    Damage1,
    /// Deals 2 damage to the opponent.
    Damage2,
    /// Restores 2 health to the caster.
    Heal2,
}

/// Resolved effect of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardEffect {
    /// Subtract from the opponent's health (clamped at 0).
    Damage(u32),
    /// Add to the caster's own health.
    Heal(u32),
}

impl CardType {
    /// Every card type, in seed-deck order.
    pub const ALL: [CardType; 3] = [CardType::Damage1, CardType::Damage2, CardType::Heal2];

    /// The fixed effect of this card.
    #[must_use]
    pub const fn effect(self) -> CardEffect {
        match self {
            CardType::Damage1 => CardEffect::Damage(1),
            CardType::Damage2 => CardEffect::Damage(2),
            CardType::Heal2 => CardEffect::Heal(2),
        }
    }

    /// Does playing this card require the player to confirm a target?
    #[must_use]
    pub const fn needs_target(self) -> bool {
        matches!(self.effect(), CardEffect::Damage(_))
    }

    /// Short button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            CardType::Damage1 => "1 damage",
            CardType::Damage2 => "2 damage",
            CardType::Heal2 => "+2 health",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The deck both combatants start every match with: one of each card.
#[must_use]
pub fn seed_deck() -> [CardType; 3] {
    CardType::ALL
}
