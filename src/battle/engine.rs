//! The battle state machine.
//!
//! `BattleEngine` owns both combatants and drives the match:
//!
//! ```text
//! AwaitingPlayerCard --play damage--> AwaitingTargetConfirmation
//!        ^    |                          |  confirm       | cancel
//!        |    | play heal                v                v
//!        |    +----------------> EnemyTurnPending   AwaitingPlayerCard
//!        |                               | ticket fires
//!        +-------------------------------+
//!
//! a played card passes through Resolving(side) while it is reported;
//! any resolution may end in MatchOver (terminal until restart)
//! ```
//!
//! The engine is synchronous. It never sleeps: entering `EnemyTurnPending`
//! mints a `TurnTicket`, and a host (see `BattleSession`) calls
//! `resolve_enemy_turn` with that ticket once the delay has elapsed.
//!
//! Rejected commands leave state untouched, are logged at debug level, and
//! come back as `CommandError` for callers that care.

use log::{debug, info};

use super::rules::evaluate_match;
use super::state::{BattlePhase, MatchEnd, MatchOutcome, PendingAction, TurnTicket};
use super::status::Status;
use super::view::{BattleObserver, BattleView, CardSlot};
use crate::core::{
    apply_effect, seed_deck, BattleConfig, Combatant, CommandError, GameRng, Hand,
    IndexSource, Side, SideMap, TargetMode,
};

/// Two-combatant card battle.
pub struct BattleEngine {
    config: BattleConfig,
    combatants: SideMap<Combatant>,
    phase: BattlePhase,
    status: Status,
    rng: Box<dyn IndexSource>,
    tickets_issued: u64,
    observers: Vec<Box<dyn BattleObserver>>,
}

impl std::fmt::Debug for BattleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleEngine")
            .field("config", &self.config)
            .field("combatants", &self.combatants)
            .field("phase", &self.phase)
            .field("status", &self.status)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl BattleEngine {
    /// Start a match. The enemy's RNG is seeded from `config.seed`.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        let rng = GameRng::from_seed_option(config.seed);
        Self::with_rng(config, rng)
    }

    /// Start a match with a custom source for the enemy's card choice.
    #[must_use]
    pub fn with_rng(config: BattleConfig, rng: impl IndexSource + 'static) -> Self {
        let player = Combatant::new(config.starting_health.get());
        let enemy = Combatant::new(config.starting_health.get());
        Self::from_position(config, rng, player, enemy)
    }

    /// Start mid-match from explicit combatants, player to move.
    ///
    /// `restart_game` still resets to the seed deck and configured health.
    #[must_use]
    pub fn from_position(
        config: BattleConfig,
        rng: impl IndexSource + 'static,
        player: Combatant,
        enemy: Combatant,
    ) -> Self {
        info!(
            "Match start: player {} hp, enemy {} hp",
            player.health, enemy.health
        );
        Self {
            config,
            combatants: SideMap::new(|side| match side {
                Side::Player => player.clone(),
                Side::Enemy => enemy.clone(),
            }),
            phase: BattlePhase::AwaitingPlayerCard,
            status: Status::PlayerTurn,
            rng: Box::new(rng),
            tickets_issued: 0,
            observers: Vec::new(),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// The status produced by the most recent transition.
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn combatant(&self, side: Side) -> &Combatant {
        &self.combatants[side]
    }

    #[must_use]
    pub fn health(&self, side: Side) -> u32 {
        self.combatants[side].health
    }

    #[must_use]
    pub fn hand(&self, side: Side) -> &Hand {
        &self.combatants[side].hand
    }

    /// Who may act now. `None` once the match is over.
    #[must_use]
    pub fn turn_owner(&self) -> Option<Side> {
        self.phase.turn_owner()
    }

    #[must_use]
    pub fn pending_action(&self) -> Option<PendingAction> {
        self.phase.pending_action()
    }

    /// The ticket of the enemy turn waiting to fire, if any.
    #[must_use]
    pub fn pending_enemy_turn(&self) -> Option<TurnTicket> {
        match self.phase {
            BattlePhase::EnemyTurnPending(ticket) => Some(ticket),
            _ => None,
        }
    }

    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.phase.match_end().map(|end| end.outcome)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    // === Notifications ===

    /// Register an observer. It immediately receives the current view.
    pub fn subscribe(&mut self, observer: impl BattleObserver + 'static) {
        let mut observer = Box::new(observer);
        observer.on_update(&self.view());
        self.observers.push(observer);
    }

    /// Snapshot of everything a UI draws.
    #[must_use]
    pub fn view(&self) -> BattleView {
        let hand = self.hand(Side::Player);
        let can_play = self.phase == BattlePhase::AwaitingPlayerCard;
        let slots = seed_deck().len().max(hand.len());

        BattleView {
            player_health: self.health(Side::Player),
            enemy_health: self.health(Side::Enemy),
            status: self.status,
            status_text: self.status.to_string(),
            player_cards: hand
                .iter()
                .map(|&card| CardSlot {
                    card,
                    label: card.label().to_string(),
                })
                .collect(),
            card_interactable: (0..slots).map(|i| can_play && i < hand.len()).collect(),
            target_pending: self.pending_action().is_some(),
            turn_owner: self.turn_owner(),
            phase: self.phase,
            outcome: self.outcome(),
        }
    }

    fn transition(&mut self, status: Status) {
        self.status = status;
        debug!("{status}");
        let view = self.view();
        for observer in &mut self.observers {
            observer.on_update(&view);
        }
    }

    fn reject(&self, command: &str, err: CommandError) -> Result<(), CommandError> {
        debug!("Ignored {command}: {err} (phase {:?})", self.phase);
        Err(err)
    }

    // === Player commands ===

    /// Play the card at `index` in the player's hand.
    ///
    /// Damage cards wait for `confirm_target` (unless the config selects
    /// `TargetMode::Immediate`); the heal resolves at once and hands the
    /// turn to the enemy.
    pub fn play_card(&mut self, index: usize) -> Result<(), CommandError> {
        match self.phase {
            BattlePhase::AwaitingPlayerCard => {}
            BattlePhase::AwaitingTargetConfirmation(_) => {
                return self.reject("play_card", CommandError::SelectionPending)
            }
            BattlePhase::EnemyTurnPending(_) | BattlePhase::Resolving(_) => {
                return self.reject("play_card", CommandError::NotPlayerTurn)
            }
            BattlePhase::MatchOver(_) => return self.reject("play_card", CommandError::MatchOver),
        }

        let hand_len = self.hand(Side::Player).len();
        let Some(card) = self.combatants[Side::Player].card(index) else {
            return self.reject("play_card", CommandError::CardIndexOutOfRange { index, hand_len });
        };
        debug!("Player plays {card} (index {index})");

        if card.needs_target() && self.config.target_mode == TargetMode::Confirm {
            self.phase = BattlePhase::AwaitingTargetConfirmation(PendingAction {
                card_index: index,
                card_type: card,
            });
            self.transition(Status::ConfirmTarget);
            return Ok(());
        }

        self.resolve_card(Side::Player, index);
        Ok(())
    }

    /// Resolve the pending damage card against the enemy.
    pub fn confirm_target(&mut self) -> Result<(), CommandError> {
        let pending = match self.phase {
            BattlePhase::AwaitingTargetConfirmation(pending) => pending,
            BattlePhase::AwaitingPlayerCard => {
                return self.reject("confirm_target", CommandError::NoPendingSelection)
            }
            BattlePhase::EnemyTurnPending(_) | BattlePhase::Resolving(_) => {
                return self.reject("confirm_target", CommandError::NotPlayerTurn)
            }
            BattlePhase::MatchOver(_) => {
                return self.reject("confirm_target", CommandError::MatchOver)
            }
        };

        debug!("Player confirms {} on enemy", pending.card_type);
        self.resolve_card(Side::Player, pending.card_index);
        Ok(())
    }

    /// Drop the pending selection without consuming the card.
    pub fn cancel_selection(&mut self) -> Result<(), CommandError> {
        match self.phase {
            BattlePhase::AwaitingTargetConfirmation(pending) => {
                debug!("Player cancels {}", pending.card_type);
                self.phase = BattlePhase::AwaitingPlayerCard;
                self.transition(Status::PlayerTurn);
                Ok(())
            }
            BattlePhase::AwaitingPlayerCard => {
                self.reject("cancel_selection", CommandError::NoPendingSelection)
            }
            BattlePhase::EnemyTurnPending(_) | BattlePhase::Resolving(_) => {
                self.reject("cancel_selection", CommandError::NotPlayerTurn)
            }
            BattlePhase::MatchOver(_) => self.reject("cancel_selection", CommandError::MatchOver),
        }
    }

    /// Reset both combatants to the seed deck and configured health.
    ///
    /// Valid in any phase. Any outstanding `TurnTicket` becomes stale.
    pub fn restart_game(&mut self) {
        info!("Restarting match");
        let health = self.config.starting_health.get();
        self.combatants = SideMap::new(|_| Combatant::new(health));
        self.phase = BattlePhase::AwaitingPlayerCard;
        self.transition(Status::PlayerTurn);
    }

    // === Enemy turn ===

    /// Play the enemy's turn for `ticket`.
    ///
    /// The enemy picks uniformly among its remaining cards. With an empty
    /// hand it plays nothing, but the match is still evaluated.
    pub fn resolve_enemy_turn(&mut self, ticket: TurnTicket) -> Result<(), CommandError> {
        match self.phase {
            BattlePhase::EnemyTurnPending(current) if current == ticket => {}
            BattlePhase::MatchOver(_) => {
                return self.reject("resolve_enemy_turn", CommandError::MatchOver)
            }
            _ => return self.reject("resolve_enemy_turn", CommandError::StaleEnemyTurn),
        }

        let hand_len = self.hand(Side::Enemy).len();
        if hand_len == 0 {
            debug!("Enemy has no cards to play");
            self.finish_turn(Side::Enemy);
            return Ok(());
        }

        // Out-of-range picks from a misbehaving source land on the last card.
        let index = self.rng.next_index(hand_len).min(hand_len - 1);
        debug!("Enemy plays {} (index {index})", self.hand(Side::Enemy)[index]);
        self.resolve_card(Side::Enemy, index);
        Ok(())
    }

    // === Resolution ===

    fn resolve_card(&mut self, side: Side, index: usize) {
        let (caster, target) = self.combatants.split_mut(side);
        let Some(card) = caster.take_card(index) else {
            debug!("{side} has no card at index {index}");
            return;
        };
        apply_effect(card.effect(), caster, target);
        debug!(
            "After {card}: player {} hp, enemy {} hp",
            self.health(Side::Player),
            self.health(Side::Enemy)
        );

        self.phase = BattlePhase::Resolving(side);
        self.transition(Status::CardUsed { side, card });
        self.finish_turn(side);
    }

    fn finish_turn(&mut self, side: Side) {
        if let Some(end) = evaluate_match(self.combatant(Side::Player), self.combatant(Side::Enemy))
        {
            self.end_match(end);
            return;
        }

        match side.opponent() {
            Side::Enemy => {
                self.tickets_issued += 1;
                let ticket = TurnTicket(self.tickets_issued);
                self.phase = BattlePhase::EnemyTurnPending(ticket);
                self.transition(Status::EnemyTurn);
            }
            Side::Player => {
                self.phase = BattlePhase::AwaitingPlayerCard;
                self.transition(Status::PlayerTurn);
            }
        }
    }

    fn end_match(&mut self, end: MatchEnd) {
        self.phase = BattlePhase::MatchOver(end);
        info!("{}", Status::MatchOver(end));
        self.transition(Status::MatchOver(end));
    }
}

/// Play a whole match synchronously: the player always plays its first card
/// and confirms, the enemy turn fires immediately.
///
/// Returns the outcome. Used for simulations and benchmarks.
pub fn play_out(engine: &mut BattleEngine) -> Option<MatchOutcome> {
    while !engine.is_over() {
        let progressed = match engine.phase() {
            BattlePhase::AwaitingPlayerCard => engine.play_card(0).is_ok(),
            BattlePhase::AwaitingTargetConfirmation(_) => engine.confirm_target().is_ok(),
            BattlePhase::EnemyTurnPending(ticket) => engine.resolve_enemy_turn(ticket).is_ok(),
            BattlePhase::Resolving(_) | BattlePhase::MatchOver(_) => false,
        };
        if !progressed {
            break;
        }
    }
    engine.outcome()
}
