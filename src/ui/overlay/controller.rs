//! Overlay controller.
//!
//! Owns the band node, the overlay state and the pointer tracker. The
//! state machine has two states:
//!
//! ```text
//!            enable(color)
//! Disabled ───────────────▶ Enabled
//!    ▲                        │
//!    └────────── disable() ───┘
//! ```
//!
//! Both transitions are idempotent. Listeners are attached and detached
//! together with the band node, so an enabled controller always has exactly
//! one band and one subscription set, and a disabled one has neither.

use tracing::{debug, info};

use super::band::{self, BandParams};
use crate::app::PageCtx;
use crate::config::RulerConfig;
use crate::events::StatusEvent;
use crate::input::PointerTracker;
use crate::model::constants::*;
use crate::model::{OverlayState, RulerColor};
use crate::surface::{NodeId, Surface};
use crate::timing::TimerId;

/// Drives the reading band.
#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
    tracker: PointerTracker,
}

impl Default for OverlayController {
    fn default() -> Self {
        Self::new(&RulerConfig::default())
    }
}

impl OverlayController {
    /// Out-of-range geometry in `config` is clamped here.
    pub fn new(config: &RulerConfig) -> Self {
        let mut state = OverlayState {
            color: config.default_color.clone(),
            opacity: config.opacity,
            band_height_px: config.band_height_px,
            ..OverlayState::default()
        };
        state.validate();
        Self {
            state,
            tracker: PointerTracker::new(config.debounce()),
        }
    }

    // === Transitions ===

    /// Show the band in `color` and start tracking. No-op when enabled.
    pub fn enable(&mut self, color: RulerColor, cx: &mut PageCtx<'_>) -> bool {
        if self.state.is_active() {
            debug!("enable ignored: ruler already active");
            return false;
        }
        self.state.color = color;
        let node = cx.surface.append_node(band::band_spec(&BandParams {
            color: &self.state.color,
            opacity: self.state.opacity,
            height_px: self.state.band_height_px,
        }));
        self.state.band = Some(node);
        self.tracker.attach(&mut *cx.surface);

        info!(color = %self.state.color, %node, "ruler enabled");
        cx.notify(MSG_ENABLED_TITLE, MSG_ENABLED_BODY);
        cx.emit(StatusEvent::RulerEnabled {
            color: self.state.color.clone(),
        });
        true
    }

    /// Hide the band and stop tracking. No-op when disabled.
    pub fn disable(&mut self, cx: &mut PageCtx<'_>) -> bool {
        let Some(node) = self.state.band.take() else {
            debug!("disable ignored: ruler not active");
            return false;
        };
        self.tracker.detach(&mut *cx.surface, &mut *cx.timers);
        cx.surface.remove_node(node);

        info!(%node, "ruler disabled");
        cx.notify(MSG_DISABLED_TITLE, MSG_DISABLED_BODY);
        cx.emit(StatusEvent::RulerDisabled);
        true
    }

    /// Change the colour. Restyles the existing band in place when enabled;
    /// returns whether the band was restyled.
    pub fn recolor(&mut self, color: RulerColor, cx: &mut PageCtx<'_>) -> bool {
        self.state.color = color;
        cx.emit(StatusEvent::RulerRecolored {
            color: self.state.color.clone(),
        });
        let Some(node) = self.state.band else {
            debug!(color = %self.state.color, "colour stored for next enable");
            return false;
        };
        for (property, value) in band::color_styles(&self.state.color, self.state.opacity) {
            cx.surface.set_style(node, property, &value);
        }
        debug!(color = %self.state.color, %node, "band recoloured");
        true
    }

    // === Tracking ===

    /// Movement signal: reschedule the debounced commit.
    pub fn on_pointer_move(&mut self, y: f64, cx: &mut PageCtx<'_>) {
        if self.state.is_active() {
            self.tracker.on_move(y, &mut *cx.timers);
        }
    }

    /// Debounce timer fired. Stale timers are ignored.
    pub fn commit_pointer(&mut self, timer: TimerId, y: f64, surface: &mut dyn Surface) -> bool {
        if !self.tracker.take_commit(timer) {
            return false;
        }
        self.reposition(y, surface)
    }

    /// Scroll or resize signal: re-apply the last position immediately.
    pub fn on_scroll_or_resize(&mut self, surface: &mut dyn Surface) -> bool {
        if !self.tracker.on_scroll_or_resize() {
            return false;
        }
        self.reposition(self.state.last_tracked_y, surface)
    }

    /// Centre the band on `y`. No-op when disabled.
    pub fn reposition(&mut self, y: f64, surface: &mut dyn Surface) -> bool {
        let Some(node) = self.state.band else {
            return false;
        };
        self.state.last_tracked_y = y;
        surface.set_style(node, "top", &band::px(self.state.band_top_for(y)))
    }

    // === Accessors ===

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn band(&self) -> Option<NodeId> {
        self.state.band
    }
}
