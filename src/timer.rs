//! Scheduled, cancellable deferred tasks.
//!
//! The sequence matcher debounces its buffer through this module:
//! every call cancels the pending task and schedules a new one.
//!
//! - [`ThreadScheduler`] runs each task on a short-lived background thread after the delay.
//! - [`ManualScheduler`] keeps a virtual clock that only moves when [`ManualScheduler::advance`]
//!   is called. Used by tests and by hosts that drive their own event loop.
//!
//! # Example
//!
//! ```rust,ignore
//! use shortcut_engine::timer::{ManualScheduler, Scheduler};
//! use std::time::Duration;
//!
//! let scheduler = ManualScheduler::new();
//! let handle = scheduler.schedule_after(Duration::from_millis(500), Box::new(|| println!("fired")));
//! handle.cancel();
//! assert_eq!(scheduler.advance(Duration::from_secs(1)), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::warn;

/// Deferred work scheduled on a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled task. Cancelling is idempotent.
#[derive(Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

/// Something that can run a task once after a delay.
pub trait Scheduler: Send + Sync {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle;
}

/// Real-time scheduler backed by one sleeping thread per task.
///
/// A cancelled task's thread still wakes up at its deadline, then exits without
/// running the task.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let flag = handle.clone();

        let spawned = thread::Builder::new()
            .name("shortcut-debounce".to_string())
            .spawn(move || {
                thread::sleep(delay);
                if !flag.is_cancelled() {
                    task();
                }
            });

        if let Err(e) = spawned {
            // Without the thread the buffer is only cleared by the next match or reset.
            warn!(error = %e, delay_ms = delay.as_millis() as u64, "Failed to spawn debounce timer thread");
        }

        handle
    }
}

struct Scheduled {
    deadline: Duration,
    seq: u64,
    handle: TimerHandle,
    task: Task,
}

#[derive(Default)]
struct ManualQueue {
    now: Duration,
    next_seq: u64,
    entries: Vec<Scheduled>,
}

/// Virtual-clock scheduler. Time only moves on [`advance`](Self::advance).
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed virtual time since creation.
    pub fn now(&self) -> Duration {
        self.inner.lock().now
    }

    /// Number of tasks scheduled and not cancelled.
    pub fn pending(&self) -> usize {
        self.inner
            .lock()
            .entries
            .iter()
            .filter(|e| !e.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward, running every due task in deadline order.
    ///
    /// Tasks run outside the queue lock, so they may schedule more work.
    /// Returns the number of tasks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.inner.lock().now + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut queue = self.inner.lock();
                queue.entries.retain(|e| !e.handle.is_cancelled());
                let due = queue
                    .entries
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| e.deadline <= target)
                    .min_by_key(|(_, e)| (e.deadline, e.seq))
                    .map(|(index, _)| index);
                match due {
                    Some(index) => {
                        let entry = queue.entries.remove(index);
                        queue.now = entry.deadline;
                        Some(entry)
                    }
                    None => {
                        queue.now = target;
                        None
                    }
                }
            };

            match next {
                Some(entry) => {
                    (entry.task)();
                    fired += 1;
                }
                None => break,
            }
        }

        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_after(&self, delay: Duration, task: Task) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut queue = self.inner.lock();
        let seq = queue.next_seq;
        queue.next_seq += 1;
        let deadline = queue.now + delay;
        queue.entries.push(Scheduled {
            deadline,
            seq,
            handle: handle.clone(),
            task,
        });
        handle
    }
}
