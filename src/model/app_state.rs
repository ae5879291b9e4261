//! Overlay state (pure Rust, no surface access).
//!
//! One `OverlayState` exists per page context and is owned by the
//! overlay controller.

use super::color::RulerColor;
use super::constants::*;
use crate::clamp;
use crate::surface::NodeId;

/// Complete overlay state.
///
/// The ruler is active exactly when a band node exists, so `active` is
/// derived from `band` rather than stored next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    /// Band colour.
    pub color: RulerColor,
    /// Fill opacity [0.0, 1.0].
    pub opacity: f64,
    /// Band height in pixels.
    pub band_height_px: f64,
    /// Last committed pointer position (viewport y).
    pub last_tracked_y: f64,
    /// Band node while enabled.
    pub band: Option<NodeId>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            color: RulerColor::default(),
            opacity: DEFAULT_OPACITY,
            band_height_px: DEFAULT_BAND_HEIGHT_PX,
            last_tracked_y: 0.0,
            band: None,
        }
    }
}

impl OverlayState {
    /// Validates and clamps all values to valid ranges.
    pub fn validate(&mut self) {
        self.opacity = clamp(self.opacity, 0.0, 1.0);
        self.band_height_px = clamp(self.band_height_px, MIN_BAND_HEIGHT_PX, MAX_BAND_HEIGHT_PX);
    }

    /// Is the ruler currently shown?
    pub fn is_active(&self) -> bool {
        self.band.is_some()
    }

    /// Band `top` that centres it on `y`.
    pub fn band_top_for(&self, y: f64) -> f64 {
        y - self.band_height_px / 2.0
    }
}
