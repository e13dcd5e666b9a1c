//! Timed continuations.
//!
//! The enemy acts a fixed delay after the player's turn ends. The engine
//! itself never waits; a `Scheduler` runs a one-shot task after the delay,
//! and can cancel it before it fires.
//!
//! - [`ManualScheduler`]: virtual clock advanced by the caller (tests,
//!   frame-driven hosts).
//! - [`TokioScheduler`]: spawns a sleeping task on a tokio runtime.
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use duel_core::schedule::{ManualScheduler, Scheduler};
//!
//! let mut scheduler = ManualScheduler::new();
//! let fired = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&fired);
//! scheduler.schedule(Duration::from_millis(100), Box::new(move || flag.store(true, Ordering::SeqCst)));
//!
//! scheduler.advance(Duration::from_millis(99));
//! assert!(!fired.load(Ordering::SeqCst));
//! scheduler.advance(Duration::from_millis(1));
//! assert!(fired.load(Ordering::SeqCst));
//! ```

mod manual;
mod timer;

pub use manual::ManualScheduler;
pub use timer::TokioScheduler;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A one-shot task run when its delay elapses.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Identifies a scheduled task for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// Runs tasks after a delay.
pub trait Scheduler {
    /// Run `task` once, `delay` from now.
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId;

    /// Prevent a task from running. No-op if it already ran or was cancelled.
    fn cancel(&mut self, id: TaskId);
}
