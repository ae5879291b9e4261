//! Transient on-screen notifications.
//!
//! Each call to [`NotificationEmitter::show`] appends its own toast node and
//! schedules three steps on the page timer queue:
//!
//! ```text
//! +fade_in_delay          opacity 1, slide in
//! +display                opacity 0, slide out
//! +display + fade_out     node removed
//! ```
//!
//! Toasts never cancel or merge with each other and do not depend on the
//! overlay being enabled.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::debug;

use crate::model::constants::*;
use crate::surface::{NodeId, NodeSpec, Surface};
use crate::timing::{TimerId, TimerQueue, TimerTask};

/// Identifier of a notification within its emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// Scheduled lifecycle step of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStep {
    FadeIn,
    FadeOut,
    Remove,
}

/// Visible phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Leaving,
}

/// Fade and display windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastTiming {
    pub fade_in_delay: Duration,
    pub display: Duration,
    pub fade_out: Duration,
}

impl Default for ToastTiming {
    fn default() -> Self {
        Self {
            fade_in_delay: Duration::from_millis(NOTIFICATION_FADE_IN_DELAY_MS),
            display: Duration::from_millis(NOTIFICATION_DISPLAY_MS),
            fade_out: Duration::from_millis(NOTIFICATION_FADE_OUT_MS),
        }
    }
}

/// A live notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub created_at: Duration,
    pub node: NodeId,
    pub phase: ToastPhase,
    timers: [TimerId; 3],
}

/// Creates and retires toasts.
#[derive(Debug, Default)]
pub struct NotificationEmitter {
    timing: ToastTiming,
    next_id: u64,
    live: BTreeMap<NotificationId, Notification>,
}

impl NotificationEmitter {
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            timing,
            next_id: 0,
            live: BTreeMap::new(),
        }
    }

    /// Show a toast with `title` and `message`.
    pub fn show(
        &mut self,
        title: &str,
        message: &str,
        surface: &mut dyn Surface,
        timers: &mut TimerQueue<TimerTask>,
    ) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        let node = surface.append_node(toast_spec(title, message));

        let task = |step: ToastStep| TimerTask::Toast {
            notification: id,
            step,
        };
        let fade_in = timers.schedule(self.timing.fade_in_delay, task(ToastStep::FadeIn));
        let fade_out = timers.schedule(self.timing.display, task(ToastStep::FadeOut));
        let remove = timers.schedule(
            self.timing.display + self.timing.fade_out,
            task(ToastStep::Remove),
        );

        debug!(id = id.0, %node, title, "notification shown");
        self.live.insert(
            id,
            Notification {
                id,
                title: title.to_string(),
                message: message.to_string(),
                created_at: timers.now(),
                node,
                phase: ToastPhase::Entering,
                timers: [fade_in, fade_out, remove],
            },
        );
        id
    }

    /// Apply a lifecycle step fired by the timer queue.
    pub fn on_timer(&mut self, id: NotificationId, step: ToastStep, surface: &mut dyn Surface) {
        let Some(toast) = self.live.get_mut(&id) else {
            return;
        };
        match step {
            ToastStep::FadeIn => {
                surface.set_style(toast.node, "opacity", "1");
                surface.set_style(toast.node, "transform", "translateX(0)");
                toast.phase = ToastPhase::Visible;
            }
            ToastStep::FadeOut => {
                surface.set_style(toast.node, "opacity", "0");
                surface.set_style(toast.node, "transform", "translateX(100%)");
                toast.phase = ToastPhase::Leaving;
            }
            ToastStep::Remove => {
                surface.remove_node(toast.node);
                self.live.remove(&id);
                debug!(id = id.0, "notification removed");
            }
        }
    }

    /// Remove every live toast now and cancel their pending steps.
    pub fn dismiss_all(&mut self, surface: &mut dyn Surface, timers: &mut TimerQueue<TimerTask>) {
        for (_, toast) in std::mem::take(&mut self.live) {
            for timer in toast.timers {
                timers.cancel(timer);
            }
            surface.remove_node(toast.node);
        }
    }

    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.live.get(&id)
    }

    pub fn live(&self) -> impl Iterator<Item = &Notification> {
        self.live.values()
    }

    pub fn live_nodes(&self) -> Vec<NodeId> {
        self.live.values().map(|n| n.node).collect()
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

fn toast_spec(title: &str, message: &str) -> NodeSpec {
    NodeSpec::new("div")
        .with_style("position", "fixed")
        .with_style("top", "20px")
        .with_style("right", "20px")
        .with_style("background", "#2c3e50")
        .with_style("color", "white")
        .with_style("padding", "15px 20px")
        .with_style("border-radius", "8px")
        .with_style("font-family", "Arial, sans-serif")
        .with_style("font-size", "14px")
        .with_style("z-index", NOTIFICATION_Z_INDEX)
        .with_style("box-shadow", "0 4px 12px rgba(0,0,0,0.3)")
        .with_style("max-width", "300px")
        .with_style("opacity", "0")
        .with_style("transform", "translateX(100%)")
        .with_style("transition", "all 0.3s ease")
        .with_text(title)
        .with_text(message)
}
