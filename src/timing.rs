//! Deterministic timer queue.
//!
//! The page runs on one event loop. Timers are kept here instead of being
//! handed to the host so that cancel-and-reschedule is exact and tests can
//! drive time explicitly. Time is a [`Duration`] since the page context was
//! created; the host advances it with [`TimerQueue::pop_due`].
//!
//! Timers fire in deadline order. Timers sharing a deadline fire in the
//! order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::ui::notification::{NotificationId, ToastStep};

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Work carried by a timer of the page context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerTask {
    /// Debounced pointer commit.
    CommitPointer { y: f64 },
    /// Notification lifecycle step.
    Toast {
        notification: NotificationId,
        step: ToastStep,
    },
}

/// Single-threaded timer queue.
#[derive(Debug)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    // (deadline, id) keeps same-deadline timers in scheduling order
    entries: BTreeMap<(Duration, TimerId), T>,
    deadlines: HashMap<TimerId, Duration>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            entries: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }

    /// Current time of the queue.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let deadline = self.now + delay;
        self.entries.insert((deadline, id), task);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.entries.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The queue clock moves to that timer's deadline, so work scheduled by
    /// the fired task is relative to when it fired. Once nothing is due the
    /// clock moves to `until`. The clock never goes backwards.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerId, T)> {
        let key = match self.entries.keys().next() {
            Some(&(deadline, id)) if deadline <= until => (deadline, id),
            _ => {
                self.now = self.now.max(until);
                return None;
            }
        };
        let task = self.entries.remove(&key)?;
        self.deadlines.remove(&key.1);
        self.now = self.now.max(key.0);
        Some((key.1, task))
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
