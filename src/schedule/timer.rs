//! Tokio-backed scheduler.

use std::time::Duration;

use log::trace;
use rustc_hash::FxHashMap;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::{Scheduler, Task, TaskId};
use crate::core::ScheduleError;

/// Runs each task on a tokio runtime after sleeping for its delay.
///
/// Cancelling aborts the sleeping task. Dropping the scheduler aborts
/// everything still outstanding.
#[derive(Debug)]
pub struct TokioScheduler {
    handle: Handle,
    next_id: u64,
    tasks: FxHashMap<TaskId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Schedule onto the given runtime.
    #[must_use]
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            next_id: 0,
            tasks: FxHashMap::default(),
        }
    }

    /// Schedule onto the runtime this call is made from.
    pub fn current() -> Result<Self, ScheduleError> {
        Ok(Self::new(Handle::try_current()?))
    }

    /// Number of tasks that have neither fired nor been cancelled.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.tasks.values().filter(|join| !join.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, task: Task) -> TaskId {
        self.tasks.retain(|_, join| !join.is_finished());

        self.next_id += 1;
        let id = TaskId(self.next_id);
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        trace!("Spawned {id} with delay {delay:?}");
        self.tasks.insert(id, join);
        id
    }

    fn cancel(&mut self, id: TaskId) {
        if let Some(join) = self.tasks.remove(&id) {
            trace!("Aborting {id}");
            join.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks.drain() {
            join.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting(counter: &Arc<AtomicU32>) -> Task {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_current_outside_runtime() {
        assert!(matches!(
            TokioScheduler::current(),
            Err(ScheduleError::NoRuntime(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_delay() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut scheduler = TokioScheduler::current().unwrap();
        scheduler.schedule(Duration::from_millis(1500), counting(&counter));

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.outstanding(), 1);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.outstanding(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_firing() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut scheduler = TokioScheduler::current().unwrap();
        let id = scheduler.schedule(Duration::from_millis(100), counting(&counter));
        scheduler.cancel(id);

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_outstanding() {
        let counter = Arc::new(AtomicU32::new(0));
        let mut scheduler = TokioScheduler::current().unwrap();
        scheduler.schedule(Duration::from_millis(100), counting(&counter));
        scheduler.schedule(Duration::from_millis(300), counting(&counter));

        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(scheduler);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
