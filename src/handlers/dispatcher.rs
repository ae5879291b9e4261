//! Page context and command dispatcher.
//!
//! `ReadingRuler` is constructed once per page with its surface, preference
//! store and configuration. It is the only owner of the page's timers and
//! components; the host drives it from the page's event loop:
//!
//! ```text
//! CommandBus::drain() ─▶ pump()          ─▶ dispatch() ─▶ components
//! surface signals     ─▶ handle_signal() ─▶ overlay
//! host clock          ─▶ advance_to()    ─▶ due timers
//! ```
//!
//! Every call runs to completion before returning; nothing blocks.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::PageCtx;
use crate::config::RulerConfig;
use crate::events::{Ack, Command, CommandBus, StatusEvent};
use crate::model::RulerColor;
use crate::restore::{PageRestorer, RestoreOutcome};
use crate::storage::{PreferenceStore, RulerPreferences};
use crate::surface::{Signal, Surface};
use crate::timing::{TimerQueue, TimerTask};
use crate::ui::{NotificationEmitter, OverlayController};

/// The reading ruler of one page.
pub struct ReadingRuler<S: Surface, P: PreferenceStore> {
    surface: S,
    prefs: P,
    config: RulerConfig,
    timers: TimerQueue<TimerTask>,
    overlay: OverlayController,
    notifier: NotificationEmitter,
    restorer: PageRestorer,
    status: Vec<StatusEvent>,
}

impl<S: Surface, P: PreferenceStore> ReadingRuler<S, P> {
    /// Build a page context. Nothing is drawn until [`Self::init`] or a
    /// command says so.
    pub fn new(surface: S, prefs: P, config: RulerConfig) -> Self {
        Self {
            overlay: OverlayController::new(&config),
            notifier: NotificationEmitter::new(config.toast_timing()),
            restorer: PageRestorer::new(config.restore_policy),
            timers: TimerQueue::new(),
            status: Vec::new(),
            surface,
            prefs,
            config,
        }
    }

    /// Read the persisted preferences once and enable the ruler if it was
    /// left on.
    pub fn init(&mut self) {
        let prefs = RulerPreferences::load(&self.prefs, &self.config.default_color);
        debug!(enabled = prefs.enabled, color = %prefs.color, "preferences loaded");
        if prefs.enabled {
            self.enable(prefs.color);
        }
    }

    // === Commands ===

    /// Execute one command and return its acknowledgement.
    pub fn dispatch(&mut self, command: Command) -> Ack {
        debug!(command = command.description(), "dispatching");
        match command {
            Command::ToggleRuler { enabled: true, color } => {
                // an empty colour means "no colour", as an absent one does
                let color = match color.filter(|raw| !raw.trim().is_empty()) {
                    Some(raw) => match RulerColor::parse(&raw) {
                        Ok(color) => color,
                        Err(e) => return self.reject(e.to_string()),
                    },
                    None => self.config.default_color.clone(),
                };
                self.enable(color);
            }
            Command::ToggleRuler { enabled: false, .. } => {
                self.disable();
            }
            Command::UpdateRulerColor { color } => match RulerColor::parse(&color) {
                Ok(color) => {
                    self.recolor(color);
                }
                Err(e) => return self.reject(e.to_string()),
            },
            Command::RestorePage => {
                self.restore();
            }
        }
        Ack::ok()
    }

    /// Drain `bus`, answer every command and publish status events back.
    /// Returns the number of commands handled.
    pub fn pump(&mut self, bus: &CommandBus) -> usize {
        let envelopes = bus.drain();
        let handled = envelopes.len();
        for envelope in envelopes {
            let ack = self.dispatch(envelope.command.clone());
            envelope.reply(ack);
        }
        for event in self.drain_status() {
            bus.publish_status(event);
        }
        handled
    }

    fn reject(&self, error: String) -> Ack {
        warn!(%error, "command rejected");
        Ack::rejected(error)
    }

    // === Operations ===

    pub fn enable(&mut self, color: RulerColor) -> bool {
        let (overlay, mut cx) = self.split();
        overlay.enable(color, &mut cx)
    }

    pub fn disable(&mut self) -> bool {
        let (overlay, mut cx) = self.split();
        overlay.disable(&mut cx)
    }

    pub fn recolor(&mut self, color: RulerColor) -> bool {
        let (overlay, mut cx) = self.split();
        overlay.recolor(color, &mut cx)
    }

    pub fn restore(&mut self) -> RestoreOutcome {
        let restorer = self.restorer;
        let mut cx = PageCtx {
            surface: &mut self.surface,
            timers: &mut self.timers,
            notifier: &mut self.notifier,
            status: &mut self.status,
        };
        restorer.restore(&mut self.overlay, &mut self.prefs, &mut cx)
    }

    /// Show a notification independent of the ruler state.
    pub fn notify(&mut self, title: &str, message: &str) {
        let (_, mut cx) = self.split();
        cx.notify(title, message);
    }

    // === Page signals and time ===

    /// Route a signal delivered by the surface.
    pub fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::PointerMove { y } => {
                let (overlay, mut cx) = self.split();
                overlay.on_pointer_move(y, &mut cx);
            }
            Signal::Scroll | Signal::Resize => {
                self.overlay.on_scroll_or_resize(&mut self.surface);
            }
        }
    }

    /// Advance the page clock to `now`, firing every timer due by then in
    /// deadline order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((id, task)) = self.timers.pop_due(now) {
            match task {
                TimerTask::CommitPointer { y } => {
                    self.overlay.commit_pointer(id, y, &mut self.surface);
                }
                TimerTask::Toast { notification, step } => {
                    self.notifier.on_timer(notification, step, &mut self.surface);
                }
            }
        }
    }

    /// Advance the page clock by `delta`.
    pub fn advance_by(&mut self, delta: Duration) {
        let now = self.timers.now() + delta;
        self.advance_to(now);
    }

    // === Accessors ===

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Deadline of the next pending timer, for hosts that sleep between
    /// events.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }

    pub fn notifier(&self) -> &NotificationEmitter {
        &self.notifier
    }

    /// Take the status events produced since the last call.
    pub fn drain_status(&mut self) -> Vec<StatusEvent> {
        std::mem::take(&mut self.status)
    }

    /// Tear the page context down: disable the ruler, drop every toast and
    /// flush preferences.
    pub fn shutdown(mut self) -> (S, P) {
        {
            let (overlay, mut cx) = self.split();
            if let Some(node) = overlay.band() {
                debug!(%node, "shutting down with ruler active");
            }
            overlay.disable(&mut cx);
            cx.notifier.dismiss_all(&mut *cx.surface, &mut *cx.timers);
        }
        if let Err(e) = self.prefs.flush() {
            warn!(error = %e, "failed to flush preferences on shutdown");
        }
        info!("page context shut down");
        (self.surface, self.prefs)
    }

    fn split(&mut self) -> (&mut OverlayController, PageCtx<'_>) {
        (
            &mut self.overlay,
            PageCtx {
                surface: &mut self.surface,
                timers: &mut self.timers,
                notifier: &mut self.notifier,
                status: &mut self.status,
            },
        )
    }
}
