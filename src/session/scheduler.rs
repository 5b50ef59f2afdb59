//! Cancellable deferred tasks.
//!
//! The engine is single-threaded and event-driven: nothing sleeps. Work that
//! must happen later (flipping a mismatched pair back) is queued here with a
//! due time and handed back by [`Scheduler::take_due`] when the host ticks
//! the clock past it.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Handle for a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(pub u64);

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

#[derive(Clone, Debug)]
struct Scheduled<T> {
    id: TaskId,
    due: Duration,
    task: T,
}

/// Queue of tasks waiting for their due time.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    pending: Vec<Scheduled<T>>,
    next_id: u64,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
        }
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `task` to run at clock time `due`.
    pub fn schedule(&mut self, due: Duration, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled { id, due, task });
        id
    }

    /// Cancel one task. Returns false if it already ran or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|scheduled| scheduled.id != id);
        let cancelled = self.pending.len() != before;
        if cancelled {
            trace!(task = %id, "task cancelled");
        }
        cancelled
    }

    /// Cancel everything. Returns how many tasks were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        if count > 0 {
            trace!(count, "pending tasks cancelled");
        }
        count
    }

    /// Remove and return every task due at or before `now`.
    ///
    /// Tasks come back in due order; equal due times keep scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<T> {
        let (mut due, waiting): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|scheduled| scheduled.due <= now);
        self.pending = waiting;

        due.sort_by_key(|scheduled| (scheduled.due, scheduled.id));
        due.into_iter().map(|scheduled| scheduled.task).collect()
    }

    /// Earliest due time among pending tasks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|scheduled| scheduled.due).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
