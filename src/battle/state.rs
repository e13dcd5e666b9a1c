//! Battle phases and match results.
//!
//! `BattlePhase` carries the data that only exists inside a phase, so a
//! pending selection cannot outlive target confirmation and an outcome
//! cannot exist before the match is over.

use serde::{Deserialize, Serialize};

use crate::core::{CardType, Side};

/// A damage card selected by the player and waiting for target confirmation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Index of the card in the player's hand.
    pub card_index: usize,
    /// The selected card.
    pub card_type: CardType,
}

/// Identifies one scheduled enemy turn.
///
/// A fresh ticket is minted every time the engine enters
/// `EnemyTurnPending`; resolutions presenting an older ticket are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnTicket(pub u64);

impl std::fmt::Display for TurnTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ticket({})", self.0)
    }
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    PlayerWins,
    EnemyWins,
    Draw,
}

impl MatchOutcome {
    /// The winning side, or `None` for a draw.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::PlayerWins => Some(Side::Player),
            MatchOutcome::EnemyWins => Some(Side::Enemy),
            MatchOutcome::Draw => None,
        }
    }
}

/// What ended the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// At least one combatant reached 0 health.
    Knockout,
    /// Both hands ran out; final health values decided it.
    DecksExhausted { player_health: u32, enemy_health: u32 },
}

/// A finished match: outcome plus how it came about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEnd {
    pub outcome: MatchOutcome,
    pub cause: EndCause,
}

/// Battle state machine phase.
///
/// Exactly one phase holds at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattlePhase {
    /// The player may play a card.
    AwaitingPlayerCard,
    /// A damage card is selected; confirm or cancel.
    AwaitingTargetConfirmation(PendingAction),
    /// The enemy will act once the ticket fires.
    EnemyTurnPending(TurnTicket),
    /// A card from this side is resolving. Only observed in the view that
    /// reports the card; the engine leaves it before the command returns.
    Resolving(Side),
    /// Terminal.
    MatchOver(MatchEnd),
}

impl BattlePhase {
    /// The combatant allowed to act in this phase, if any.
    #[must_use]
    pub const fn turn_owner(&self) -> Option<Side> {
        match self {
            BattlePhase::AwaitingPlayerCard | BattlePhase::AwaitingTargetConfirmation(_) => {
                Some(Side::Player)
            }
            BattlePhase::EnemyTurnPending(_) => Some(Side::Enemy),
            BattlePhase::Resolving(side) => Some(*side),
            BattlePhase::MatchOver(_) => None,
        }
    }

    /// The pending selection, if target confirmation is in progress.
    #[must_use]
    pub const fn pending_action(&self) -> Option<PendingAction> {
        match self {
            BattlePhase::AwaitingTargetConfirmation(pending) => Some(*pending),
            _ => None,
        }
    }

    /// The final result, if the match is over.
    #[must_use]
    pub const fn match_end(&self) -> Option<MatchEnd> {
        match self {
            BattlePhase::MatchOver(end) => Some(*end),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self, BattlePhase::MatchOver(_))
    }
}
