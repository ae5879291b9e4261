//! Per-call page context.
//!
//! Components do not own the surface or the clock. Each operation borrows
//! them for its duration through a `PageCtx`, which keeps ownership of the
//! band node and listeners inside the component that created them.

use crate::events::StatusEvent;
use crate::surface::Surface;
use crate::timing::{TimerQueue, TimerTask};
use crate::ui::notification::NotificationEmitter;

/// Borrowed page resources handed to component operations.
pub struct PageCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub timers: &'a mut TimerQueue<TimerTask>,
    pub notifier: &'a mut NotificationEmitter,
    pub status: &'a mut Vec<StatusEvent>,
}

impl PageCtx<'_> {
    /// Show a notification on this page.
    pub fn notify(&mut self, title: &str, message: &str) {
        self.notifier
            .show(title, message, &mut *self.surface, &mut *self.timers);
    }

    /// Queue a status event for the command channel.
    pub fn emit(&mut self, event: StatusEvent) {
        self.status.push(event);
    }
}
