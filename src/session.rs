//! A hosted match: engine plus scheduler.
//!
//! `BattleSession` is what a UI layer holds. It forwards player commands to
//! the engine and, whenever the engine hands the turn to the enemy,
//! schedules that turn's resolution after the configured delay. Restarting
//! cancels any scheduled enemy turn before the reset, so a stale move can
//! never land in the new match.
//!
//! The engine sits behind one mutex shared with the scheduled task. Every
//! command and the task itself run to completion under that lock.
//!
//! ```
//! use std::time::Duration;
//! use duel_core::core::{BattleConfig, ScriptedIndices, Side};
//! use duel_core::battle::BattleEngine;
//! use duel_core::schedule::ManualScheduler;
//! use duel_core::session::BattleSession;
//!
//! let engine = BattleEngine::with_rng(BattleConfig::default(), ScriptedIndices::new(vec![0]));
//! let clock = ManualScheduler::new();
//! let mut session = BattleSession::new(engine, clock.clone());
//!
//! session.play_card(2).unwrap(); // heal, enemy's turn is now scheduled
//! assert_eq!(session.engine().turn_owner(), Some(Side::Enemy));
//!
//! clock.advance(Duration::from_millis(1500));
//! assert_eq!(session.engine().turn_owner(), Some(Side::Player));
//! ```

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, trace};

use crate::battle::{BattleEngine, BattleObserver, BattleView, TurnTicket};
use crate::core::CommandError;
use crate::schedule::{Scheduler, TaskId};

fn lock(engine: &Mutex<BattleEngine>) -> MutexGuard<'_, BattleEngine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared access to a session's engine.
///
/// Commands go through the session so the enemy turn gets scheduled; this
/// guard only derefs to `&BattleEngine`:
///
/// ```compile_fail
/// # use duel_core::{BattleConfig, BattleEngine, BattleSession, ManualScheduler};
/// let session = BattleSession::new(BattleEngine::new(BattleConfig::default()), ManualScheduler::new());
/// session.engine().play_card(2);
/// ```
pub struct EngineRef<'a> {
    guard: MutexGuard<'a, BattleEngine>,
}

impl Deref for EngineRef<'_> {
    type Target = BattleEngine;

    fn deref(&self) -> &BattleEngine {
        &self.guard
    }
}

/// One match driven by player commands and a timed enemy.
pub struct BattleSession<S: Scheduler> {
    engine: Arc<Mutex<BattleEngine>>,
    scheduler: S,
    scheduled: Option<(TurnTicket, TaskId)>,
}

impl<S: Scheduler + std::fmt::Debug> std::fmt::Debug for BattleSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BattleSession")
            .field("engine", &*lock(&self.engine))
            .field("scheduler", &self.scheduler)
            .field("scheduled", &self.scheduled)
            .finish()
    }
}

impl<S: Scheduler> BattleSession<S> {
    /// Host `engine` on `scheduler`.
    pub fn new(engine: BattleEngine, scheduler: S) -> Self {
        let mut session = Self {
            engine: Arc::new(Mutex::new(engine)),
            scheduler,
            scheduled: None,
        };
        session.sync_schedule();
        session
    }

    /// Lock the engine for inspection.
    ///
    /// Do not hold the guard across a command on this session.
    pub fn engine(&self) -> EngineRef<'_> {
        EngineRef {
            guard: lock(&self.engine),
        }
    }

    #[must_use]
    pub fn view(&self) -> BattleView {
        self.engine().view()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Register a UI observer. See `BattleEngine::subscribe`.
    pub fn subscribe(&self, observer: impl BattleObserver + 'static) {
        lock(&self.engine).subscribe(observer);
    }

    // === Commands ===

    pub fn play_card(&mut self, index: usize) -> Result<(), CommandError> {
        let result = lock(&self.engine).play_card(index);
        self.sync_schedule();
        result
    }

    pub fn confirm_target(&mut self) -> Result<(), CommandError> {
        let result = lock(&self.engine).confirm_target();
        self.sync_schedule();
        result
    }

    pub fn cancel_selection(&mut self) -> Result<(), CommandError> {
        let result = lock(&self.engine).cancel_selection();
        self.sync_schedule();
        result
    }

    /// Cancel any scheduled enemy turn, then reset the match.
    pub fn restart_game(&mut self) {
        self.cancel_scheduled_enemy_turn();
        lock(&self.engine).restart_game();
        self.sync_schedule();
    }

    // === Enemy-turn scheduling ===

    /// Resolve the enemy turn for `ticket` once the configured delay elapses.
    ///
    /// Replaces any previously scheduled turn.
    pub fn schedule_enemy_turn(&mut self, ticket: TurnTicket) {
        self.cancel_scheduled_enemy_turn();

        let delay = self.engine().config().enemy_turn_delay();
        let engine: Weak<Mutex<BattleEngine>> = Arc::downgrade(&self.engine);
        let id = self.scheduler.schedule(
            delay,
            Box::new(move || {
                let Some(engine) = engine.upgrade() else {
                    return;
                };
                let result = lock(&engine).resolve_enemy_turn(ticket);
                if let Err(err) = result {
                    trace!("Scheduled enemy turn {ticket} dropped: {err}");
                }
            }),
        );
        debug!("Enemy turn {ticket} scheduled as {id} in {delay:?}");
        self.scheduled = Some((ticket, id));
    }

    /// Cancel the scheduled enemy turn, if any.
    pub fn cancel_scheduled_enemy_turn(&mut self) {
        if let Some((ticket, id)) = self.scheduled.take() {
            debug!("Cancelling enemy turn {ticket} ({id})");
            self.scheduler.cancel(id);
        }
    }

    /// The ticket of the enemy turn currently scheduled, if any.
    #[must_use]
    pub fn scheduled_enemy_turn(&self) -> Option<TurnTicket> {
        self.scheduled.map(|(ticket, _)| ticket)
    }

    fn sync_schedule(&mut self) {
        let pending = self.engine().pending_enemy_turn();
        match pending {
            Some(ticket) if self.scheduled_enemy_turn() != Some(ticket) => {
                self.schedule_enemy_turn(ticket);
            }
            Some(_) => {}
            None => self.scheduled = None,
        }
    }
}

impl<S: Scheduler> Drop for BattleSession<S> {
    fn drop(&mut self) {
        self.cancel_scheduled_enemy_turn();
    }
}
