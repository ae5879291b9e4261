//! Ruler configuration.
//!
//! Every field has a default matching the shipped behaviour, so an empty
//! JSON object (or no config file at all) yields the standard ruler.
//! Values are clamped on load like the overlay state itself.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clamp;
use crate::error::{Result, RulerError};
use crate::model::constants::*;
use crate::model::RulerColor;
use crate::restore::RestorePolicy;
use crate::ui::notification::ToastTiming;

/// Tunables of a page context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RulerConfig {
    /// Band height in pixels.
    pub band_height_px: f64,
    /// Band fill opacity [0.0, 1.0].
    pub opacity: f64,
    /// Colour used when a command or preference does not name one.
    pub default_color: RulerColor,
    /// Movement debounce window.
    pub debounce_ms: u64,
    pub notification_fade_in_delay_ms: u64,
    pub notification_display_ms: u64,
    pub notification_fade_out_ms: u64,
    /// How `restorePage` reverts the page.
    pub restore_policy: RestorePolicy,
    /// Enable debug-level logging.
    pub debug: bool,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            band_height_px: DEFAULT_BAND_HEIGHT_PX,
            opacity: DEFAULT_OPACITY,
            default_color: RulerColor::default(),
            debounce_ms: DEBOUNCE_MS,
            notification_fade_in_delay_ms: NOTIFICATION_FADE_IN_DELAY_MS,
            notification_display_ms: NOTIFICATION_DISPLAY_MS,
            notification_fade_out_ms: NOTIFICATION_FADE_OUT_MS,
            restore_policy: RestorePolicy::default(),
            debug: false,
        }
    }
}

impl RulerConfig {
    /// Parse a JSON document and clamp its values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut config: Self = serde_json::from_str(json)?;
        config.validate();
        Ok(config)
    }

    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_json_str(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(RulerError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Clamp all values to valid ranges.
    pub fn validate(&mut self) {
        self.opacity = clamp(self.opacity, 0.0, 1.0);
        self.band_height_px = clamp(self.band_height_px, MIN_BAND_HEIGHT_PX, MAX_BAND_HEIGHT_PX);
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn toast_timing(&self) -> ToastTiming {
        ToastTiming {
            fade_in_delay: Duration::from_millis(self.notification_fade_in_delay_ms),
            display: Duration::from_millis(self.notification_display_ms),
            fade_out: Duration::from_millis(self.notification_fade_out_ms),
        }
    }
}
