//! End-of-match evaluation.
//!
//! Run after every card resolution, whichever side played it:
//! 1. Any combatant at 0 health ends the match (both at 0 is a draw).
//! 2. Otherwise, both hands empty ends the match on a health comparison.
//! 3. Otherwise the match continues.
//!
//! Health is checked first, so a last card that knocks someone out is a
//! knockout even though both hands are also empty.

use std::cmp::Ordering;

use super::state::{EndCause, MatchEnd, MatchOutcome};
use crate::core::Combatant;

/// Check whether the match has ended.
///
/// Returns `Some(end)` if the match is over, `None` if it continues.
#[must_use]
pub fn evaluate_match(player: &Combatant, enemy: &Combatant) -> Option<MatchEnd> {
    if player.is_down() || enemy.is_down() {
        let outcome = match (player.is_down(), enemy.is_down()) {
            (true, true) => MatchOutcome::Draw,
            (true, false) => MatchOutcome::EnemyWins,
            _ => MatchOutcome::PlayerWins,
        };
        return Some(MatchEnd {
            outcome,
            cause: EndCause::Knockout,
        });
    }

    if player.is_out_of_cards() && enemy.is_out_of_cards() {
        let outcome = match player.health.cmp(&enemy.health) {
            Ordering::Greater => MatchOutcome::PlayerWins,
            Ordering::Less => MatchOutcome::EnemyWins,
            Ordering::Equal => MatchOutcome::Draw,
        };
        return Some(MatchEnd {
            outcome,
            cause: EndCause::DecksExhausted {
                player_health: player.health,
                enemy_health: enemy.health,
            },
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardType;

    fn empty(health: u32) -> Combatant {
        Combatant::with_hand(health, Vec::<CardType>::new())
    }

    #[test]
    fn test_continues_while_alive_with_cards() {
        assert_eq!(evaluate_match(&Combatant::new(3), &Combatant::new(1)), None);
        // One side out of cards is not enough.
        assert_eq!(evaluate_match(&empty(3), &Combatant::new(3)), None);
    }

    #[test]
    fn test_knockout_winner() {
        let end = evaluate_match(&Combatant::new(2), &Combatant::with_hand(0, [CardType::Heal2]));
        assert_eq!(
            end,
            Some(MatchEnd {
                outcome: MatchOutcome::PlayerWins,
                cause: EndCause::Knockout,
            })
        );

        let end = evaluate_match(&empty(0), &Combatant::new(2)).unwrap();
        assert_eq!(end.outcome, MatchOutcome::EnemyWins);
    }

    #[test]
    fn test_double_knockout_is_draw() {
        let end = evaluate_match(&empty(0), &empty(0)).unwrap();
        assert_eq!(end.outcome, MatchOutcome::Draw);
        assert_eq!(end.cause, EndCause::Knockout);
    }

    #[test]
    fn test_knockout_checked_before_exhaustion() {
        // Both hands empty and enemy at 0: a knockout, not a health comparison.
        let end = evaluate_match(&empty(1), &empty(0)).unwrap();
        assert_eq!(end.cause, EndCause::Knockout);
        assert_eq!(end.outcome, MatchOutcome::PlayerWins);
    }

    #[test]
    fn test_exhaustion_compares_health() {
        let end = evaluate_match(&empty(7), &empty(5)).unwrap();
        assert_eq!(
            end,
            MatchEnd {
                outcome: MatchOutcome::PlayerWins,
                cause: EndCause::DecksExhausted {
                    player_health: 7,
                    enemy_health: 5,
                },
            }
        );

        assert_eq!(evaluate_match(&empty(2), &empty(4)).unwrap().outcome, MatchOutcome::EnemyWins);
        assert_eq!(evaluate_match(&empty(4), &empty(4)).unwrap().outcome, MatchOutcome::Draw);
    }
}
