//! # duel-core
//!
//! A two-combatant, turn-based card duel. Each side starts with the same
//! three cards (1 damage, 2 damage, +2 health), plays them alternately, and
//! the match ends when someone drops to 0 health or both hands run out.
//!
//! ## Design Principles
//!
//! 1. **Synchronous core**: `BattleEngine` is a plain state machine. It never
//!    sleeps and never touches presentation objects.
//!
//! 2. **Injected collaborators**: the enemy's random choice (`IndexSource`),
//!    the enemy-turn delay (`Scheduler`) and UI updates (`BattleObserver`)
//!    are all passed in, so tests drive every path deterministically.
//!
//! 3. **Ignored, not fatal**: malformed commands never panic. They leave the
//!    state untouched and come back as a `CommandError`.
//!
//! ## Modules
//!
//! - `core`: Cards, sides, combatants, RNG, configuration, errors
//! - `battle`: Phases, end-of-match rules, status lines, the engine
//! - `schedule`: One-shot delayed tasks (manual clock and tokio)
//! - `session`: Engine hosted on a scheduler, as a UI would hold it

pub mod battle;
pub mod core;
pub mod schedule;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, CardEffect, CardType, Combatant, CommandError, ConfigError, GameRng,
    IndexSource, ScheduleError, ScriptedIndices, Side, SideMap, TargetMode,
};

pub use crate::battle::{
    evaluate_match, BattleEngine, BattleObserver, BattlePhase, BattleView, CardSlot, EndCause,
    MatchEnd, MatchOutcome, PendingAction, Status, TurnTicket,
};

pub use crate::schedule::{ManualScheduler, Scheduler, Task, TaskId, TokioScheduler};

pub use crate::session::{BattleSession, EngineRef};
