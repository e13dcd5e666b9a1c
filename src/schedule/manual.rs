//! Caller-driven scheduler with a virtual clock.
//!
//! Nothing fires until `advance` moves the clock past a task's due time.
//! Clones share the same queue, so a test can keep one handle while a
//! session owns another.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::trace;

use super::{Scheduler, Task, TaskId};

struct Entry {
    id: TaskId,
    due: Duration,
    task: Task,
}

#[derive(Default)]
struct Queue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

/// Scheduler whose clock only moves when told to.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Arc<Mutex<Queue>>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let queue = self.lock();
        f.debug_struct("ManualScheduler")
            .field("now", &queue.now)
            .field("pending", &queue.entries.len())
            .finish()
    }
}

impl ManualScheduler {
    /// Create a scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Queue> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Virtual time elapsed so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().entries.len()
    }

    /// Move the clock forward by `by`, running every task that comes due,
    /// earliest first. Returns how many tasks ran.
    ///
    /// Tasks run without the queue locked, so they may schedule more work;
    /// anything they schedule inside the window also runs.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.lock().now + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut queue = self.lock();
                let earliest = queue
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, entry)| entry.due <= target)
                    .min_by_key(|(_, entry)| (entry.due, entry.id.0))
                    .map(|(i, _)| i);
                match earliest {
                    Some(i) => {
                        let entry = queue.entries.remove(i);
                        queue.now = entry.due;
                        Some(entry)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };

            let Some(entry) = next else { break };
            trace!("Firing {} at {:?}", entry.id, entry.due);
            (entry.task)();
            fired += 1;
        }

        fired
    }

    /// Advance until no tasks remain. Returns how many tasks ran.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        loop {
            let last_due = {
                let queue = self.lock();
                queue.entries.iter().map(|entry| entry.due).max().map(|due| due - queue.now)
            };
            match last_due {
                Some(wait) => fired += self.advance(wait),
                None => return fired,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        let mut queue = self.lock();
        queue.next_id += 1;
        let id = TaskId(queue.next_id);
        let due = queue.now + delay;
        trace!("Scheduled {id} due at {due:?}");
        queue.entries.push(Entry { id, due, task });
        id
    }

    fn cancel(&mut self, id: TaskId) {
        let mut queue = self.lock();
        let before = queue.entries.len();
        queue.entries.retain(|entry| entry.id != id);
        if queue.entries.len() < before {
            trace!("Cancelled {id}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Task) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        let make = move |n: u32| -> Task {
            let sink = Arc::clone(&sink);
            Box::new(move || sink.lock().unwrap().push(n))
        };
        (log, make)
    }

    #[test]
    fn test_fires_only_when_due() {
        let (log, task) = recorder();
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(1500), task(1));

        assert_eq!(scheduler.advance(Duration::from_millis(1499)), 0);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
        assert_eq!(*log.lock().unwrap(), vec![1]);
        assert_eq!(scheduler.now(), Duration::from_millis(1500));
    }

    #[test]
    fn test_fires_in_due_order() {
        let (log, task) = recorder();
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(30), task(3));
        scheduler.schedule(Duration::from_millis(10), task(1));
        scheduler.schedule(Duration::from_millis(20), task(2));

        assert_eq!(scheduler.advance(Duration::from_millis(100)), 3);
        assert_eq!(*log.lock().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_cancel() {
        let (log, task) = recorder();
        let mut scheduler = ManualScheduler::new();
        let id = scheduler.schedule(Duration::from_millis(10), task(1));
        scheduler.cancel(id);
        scheduler.cancel(id);

        assert_eq!(scheduler.advance(Duration::from_millis(100)), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let (log, task) = recorder();
        let handle = ManualScheduler::new();
        let mut owner = handle.clone();
        owner.schedule(Duration::from_millis(5), task(9));

        assert_eq!(handle.pending(), 1);
        assert_eq!(handle.run_until_idle(), 1);
        assert_eq!(*log.lock().unwrap(), vec![9]);
    }

    #[test]
    fn test_task_may_schedule_more() {
        let fired = Arc::new(Mutex::new(0u32));
        let mut scheduler = ManualScheduler::new();
        let mut inner = scheduler.clone();
        let counter = Arc::clone(&fired);
        scheduler.schedule(
            Duration::from_millis(10),
            Box::new(move || {
                *counter.lock().unwrap() += 1;
                let counter = Arc::clone(&counter);
                inner.schedule(
                    Duration::from_millis(10),
                    Box::new(move || *counter.lock().unwrap() += 1),
                );
            }),
        );

        assert_eq!(scheduler.advance(Duration::from_millis(15)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(5)), 1);
        assert_eq!(*fired.lock().unwrap(), 2);
    }
}
