// Property-based tests over arbitrary command sequences and enemy choices
use duel_core::battle::{BattleEngine, BattlePhase, EndCause, MatchOutcome};
use duel_core::core::{BattleConfig, CardType, Combatant, ScriptedIndices, Side};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Input {
    Play(usize),
    Confirm,
    Cancel,
    EnemyTurn,
    Restart,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (0usize..5).prop_map(Input::Play),
        3 => Just(Input::Confirm),
        1 => Just(Input::Cancel),
        4 => Just(Input::EnemyTurn),
        1 => Just(Input::Restart),
    ]
}

fn card() -> impl Strategy<Value = CardType> {
    prop::sample::select(CardType::ALL.to_vec())
}

fn hand_sizes(engine: &BattleEngine) -> (usize, usize) {
    (engine.hand(Side::Player).len(), engine.hand(Side::Enemy).len())
}

fn apply(engine: &mut BattleEngine, input: &Input) {
    let _ = match input {
        Input::Play(index) => engine.play_card(*index),
        Input::Confirm => engine.confirm_target(),
        Input::Cancel => engine.cancel_selection(),
        Input::EnemyTurn => match engine.pending_enemy_turn() {
            Some(ticket) => engine.resolve_enemy_turn(ticket),
            None => Ok(()),
        },
        Input::Restart => {
            engine.restart_game();
            Ok(())
        }
    };
}

proptest! {
    #[test]
    fn proptest_invariants_hold_over_any_sequence(
        script in prop::collection::vec(0usize..3, 1..6),
        inputs in prop::collection::vec(input(), 0..40),
    ) {
        let mut engine = BattleEngine::with_rng(BattleConfig::default(), ScriptedIndices::new(script));

        for input in &inputs {
            let before_sizes = hand_sizes(&engine);
            let before_over = engine.is_over();
            let before_health = (engine.health(Side::Player), engine.health(Side::Enemy));

            apply(&mut engine, input);
            let after_sizes = hand_sizes(&engine);

            if matches!(input, Input::Restart) {
                prop_assert_eq!(after_sizes, (3, 3));
                prop_assert_eq!(engine.phase(), BattlePhase::AwaitingPlayerCard);
                continue;
            }

            // Frozen once over.
            if before_over {
                prop_assert_eq!(after_sizes, before_sizes);
                prop_assert_eq!(
                    (engine.health(Side::Player), engine.health(Side::Enemy)),
                    before_health
                );
                prop_assert!(engine.is_over());
            }

            // At most one card leaves at most one hand per step.
            let removed = (before_sizes.0 - after_sizes.0) + (before_sizes.1 - after_sizes.1);
            prop_assert!(removed <= 1);

            // A pending selection never consumes the card.
            if let Some(pending) = engine.pending_action() {
                prop_assert!(pending.card_index < engine.hand(Side::Player).len());
                prop_assert!(pending.card_type.needs_target());
            }

            // Cancel never changes hands or health.
            if matches!(input, Input::Cancel) {
                prop_assert_eq!(after_sizes, before_sizes);
                prop_assert_eq!(
                    (engine.health(Side::Player), engine.health(Side::Enemy)),
                    before_health
                );
            }
        }
    }

    #[test]
    fn proptest_exhaustion_outcome_matches_health(
        player_health in 1u32..10,
        enemy_health in 1u32..10,
        player_card in card(),
        enemy_card in card(),
    ) {
        let mut engine = BattleEngine::from_position(
            BattleConfig::default(),
            ScriptedIndices::new(vec![0]),
            Combatant::with_hand(player_health, [player_card]),
            Combatant::with_hand(enemy_health, [enemy_card]),
        );

        engine.play_card(0).unwrap();
        if player_card.needs_target() {
            engine.confirm_target().unwrap();
        }
        if let Some(ticket) = engine.pending_enemy_turn() {
            engine.resolve_enemy_turn(ticket).unwrap();
        }

        prop_assert!(engine.is_over());
        let end = engine.phase().match_end().unwrap();
        let (p, e) = (engine.health(Side::Player), engine.health(Side::Enemy));

        if p == 0 || e == 0 {
            prop_assert_eq!(end.cause, EndCause::Knockout);
        } else {
            let expected = match p.cmp(&e) {
                std::cmp::Ordering::Greater => MatchOutcome::PlayerWins,
                std::cmp::Ordering::Less => MatchOutcome::EnemyWins,
                std::cmp::Ordering::Equal => MatchOutcome::Draw,
            };
            prop_assert_eq!(end.outcome, expected);
            prop_assert_eq!(
                end.cause,
                EndCause::DecksExhausted { player_health: p, enemy_health: e }
            );
        }
    }
}
