//! Human-readable status line.
//!
//! Each transition sets a `Status`; its `Display` form is the text a
//! presentation layer shows.

use serde::{Deserialize, Serialize};

use super::state::{EndCause, MatchEnd};
use crate::core::{CardEffect, CardType, Side};

/// The most recent transition, as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Match start, restart, cancel, or handoff back to the player.
    PlayerTurn,
    /// A damage card is waiting for the player to confirm the enemy.
    ConfirmTarget,
    /// A card just resolved.
    CardUsed { side: Side, card: CardType },
    /// Handoff to the enemy.
    EnemyTurn,
    /// The match ended.
    MatchOver(MatchEnd),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::PlayerTurn => f.write_str("Player turn — choose a card"),
            Status::ConfirmTarget => f.write_str("Tap the enemy to confirm the attack"),
            Status::CardUsed { side, card } => match card.effect() {
                CardEffect::Damage(amount) => {
                    let target = side.opponent().to_string().to_lowercase();
                    write!(f, "{side} used: {amount} damage to {target}")
                }
                CardEffect::Heal(amount) => write!(f, "{side} used: +{amount} health to self"),
            },
            Status::EnemyTurn => f.write_str("Enemy turn"),
            Status::MatchOver(end) => match (end.outcome.winner(), end.cause) {
                (Some(winner), EndCause::Knockout) => write!(f, "Match over — {winner} wins"),
                (None, EndCause::Knockout) => f.write_str("Draw — both at 0"),
                (
                    Some(winner),
                    EndCause::DecksExhausted {
                        player_health,
                        enemy_health,
                    },
                ) => write!(f, "Match over — {winner} wins ({player_health} vs {enemy_health})"),
                (
                    None,
                    EndCause::DecksExhausted {
                        player_health,
                        enemy_health,
                    },
                ) => write!(f, "Draw — equal health ({player_health} vs {enemy_health})"),
            },
        }
    }
}
