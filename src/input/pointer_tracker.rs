//! Pointer tracking with a cancel-and-reschedule debounce.
//!
//! Movement signals arrive far more often than the band needs to move.
//! Every movement cancels the pending commit and schedules a new one, so
//! at most one commit is ever pending and the one that fires always
//! carries the latest sample. Scroll and resize are rare and re-apply the
//! last committed position immediately.

use std::time::Duration;

use tracing::trace;

use crate::model::constants::DEBOUNCE_MS;
use crate::surface::{ListenerId, SignalKind, Surface};
use crate::timing::{TimerId, TimerQueue, TimerTask};

/// The three listener registrations held while tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionSet {
    pub pointer_move: ListenerId,
    pub scroll: ListenerId,
    pub resize: ListenerId,
}

impl SubscriptionSet {
    pub fn ids(&self) -> [ListenerId; 3] {
        [self.pointer_move, self.scroll, self.resize]
    }
}

/// Subscribes to page signals and coalesces movement.
#[derive(Debug)]
pub struct PointerTracker {
    debounce: Duration,
    subscriptions: Option<SubscriptionSet>,
    pending: Option<TimerId>,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_MS))
    }
}

impl PointerTracker {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            subscriptions: None,
            pending: None,
        }
    }

    /// Register move, scroll and resize listeners. No-op if attached.
    pub fn attach(&mut self, surface: &mut dyn Surface) -> bool {
        if self.subscriptions.is_some() {
            return false;
        }
        self.subscriptions = Some(SubscriptionSet {
            pointer_move: surface.subscribe(SignalKind::PointerMove),
            scroll: surface.subscribe(SignalKind::Scroll),
            resize: surface.subscribe(SignalKind::Resize),
        });
        true
    }

    /// Cancel the pending commit and drop every listener. No-op if
    /// detached.
    pub fn detach(&mut self, surface: &mut dyn Surface, timers: &mut TimerQueue<TimerTask>) -> bool {
        if let Some(timer) = self.pending.take() {
            timers.cancel(timer);
        }
        let Some(subs) = self.subscriptions.take() else {
            return false;
        };
        for id in subs.ids() {
            surface.unsubscribe(id);
        }
        true
    }

    /// Record a movement sample. Returns the scheduled commit, or `None`
    /// when detached.
    pub fn on_move(&mut self, y: f64, timers: &mut TimerQueue<TimerTask>) -> Option<TimerId> {
        if self.subscriptions.is_none() {
            return None;
        }
        if let Some(previous) = self.pending.take() {
            timers.cancel(previous);
        }
        let timer = timers.schedule(self.debounce, TimerTask::CommitPointer { y });
        trace!(y, "pointer commit rescheduled");
        self.pending = Some(timer);
        Some(timer)
    }

    /// Accept a fired commit. Returns `false` for a timer that is not the
    /// current pending one.
    pub fn take_commit(&mut self, timer: TimerId) -> bool {
        if self.pending != Some(timer) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Whether a scroll or resize should re-apply the last position.
    pub fn on_scroll_or_resize(&self) -> bool {
        self.subscriptions.is_some()
    }

    pub fn is_attached(&self) -> bool {
        self.subscriptions.is_some()
    }

    pub fn subscriptions(&self) -> Option<SubscriptionSet> {
        self.subscriptions
    }

    pub fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}
