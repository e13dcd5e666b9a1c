//! Notification payload for the presentation layer.
//!
//! The engine never touches UI objects. After every transition it builds a
//! `BattleView` and hands it to each registered `BattleObserver`; a UI
//! redraws health, status text and card buttons from it.

use serde::{Deserialize, Serialize};

use super::state::{BattlePhase, MatchOutcome};
use super::status::Status;
use crate::core::{CardType, Side};

/// One card button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSlot {
    pub card: CardType,
    pub label: String,
}

/// Everything a UI needs to redraw after a transition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleView {
    pub player_health: u32,
    pub enemy_health: u32,
    /// The transition that produced this view.
    pub status: Status,
    /// `status` rendered as text.
    pub status_text: String,
    /// The player's hand, in order.
    pub player_cards: Vec<CardSlot>,
    /// One entry per card slot of the seed deck. True only while the player
    /// may play a card, and only for slots holding a card.
    pub card_interactable: Vec<bool>,
    /// A damage card waits for target confirmation (target button and
    /// cancel control active).
    pub target_pending: bool,
    /// Who may act. `None` once the match is over.
    pub turn_owner: Option<Side>,
    pub phase: BattlePhase,
    /// Set once the match is over.
    pub outcome: Option<MatchOutcome>,
}

/// Receives a view after every transition.
pub trait BattleObserver: Send {
    fn on_update(&mut self, view: &BattleView);
}

impl<F> BattleObserver for F
where
    F: FnMut(&BattleView) + Send,
{
    fn on_update(&mut self, view: &BattleView) {
        self(view);
    }
}
