//! Configuration constants and default values.
//!
//! This module contains all ruler constants including visual defaults,
//! preference keys, timing windows, notification copy and the markers
//! used to recognise reading-mode artifacts during restoration.

// === Visual Defaults ===

/// Default ruler colour (warm yellow).
pub const DEFAULT_RULER_COLOR: &str = "#ffeb3b";

/// Band height in pixels.
pub const DEFAULT_BAND_HEIGHT_PX: f64 = 25.0;

/// Band fill opacity [0.0, 1.0].
pub const DEFAULT_OPACITY: f64 = 0.3;

/// Initial `top` of the band before the first position update.
pub const OFFSCREEN_TOP_PX: f64 = -100.0;

/// CSS transition applied to band repositioning.
pub const BAND_TRANSITION: &str = "top 0.1s ease";

/// Stacking order of the band.
pub const BAND_Z_INDEX: &str = "999999";

/// Stacking order of notifications (always above the band).
pub const NOTIFICATION_Z_INDEX: &str = "1000000";

/// DOM id given to the band node.
pub const BAND_DOM_ID: &str = "neuro-focus-dyslexia-ruler";

/// Alpha suffix of the band's top/bottom border colour.
pub const BORDER_ALPHA_HEX: &str = "80";

/// Alpha suffix of the band's glow colour.
pub const GLOW_ALPHA_HEX: &str = "40";

// === Validation Limits ===

/// Minimum band height in pixels.
pub const MIN_BAND_HEIGHT_PX: f64 = 4.0;

/// Maximum band height in pixels.
pub const MAX_BAND_HEIGHT_PX: f64 = 200.0;

// === Timing (milliseconds) ===

/// Movement debounce window.
pub const DEBOUNCE_MS: u64 = 10;

/// Delay before a new notification starts fading in.
pub const NOTIFICATION_FADE_IN_DELAY_MS: u64 = 10;

/// How long a notification stays fully visible.
pub const NOTIFICATION_DISPLAY_MS: u64 = 3000;

/// Duration of the notification fade-out before removal.
pub const NOTIFICATION_FADE_OUT_MS: u64 = 300;

// === Preference Keys ===

/// Key for the persisted "ruler enabled" flag.
pub const PREF_RULER_ENABLED: &str = "dyslexiaRulerEnabled";

/// Key for the persisted ruler colour.
pub const PREF_RULER_COLOR: &str = "rulerColor";

// === Notification Copy ===

pub const MSG_ENABLED_TITLE: &str = "📏 Dyslexia Ruler Enabled";
pub const MSG_ENABLED_BODY: &str = "Move your mouse to track reading lines";
pub const MSG_DISABLED_TITLE: &str = "📏 Dyslexia Ruler Disabled";
pub const MSG_DISABLED_BODY: &str = "Ruler has been turned off";
pub const MSG_RESTORED_TITLE: &str = "🔄 Page Restored";
pub const MSG_RESTORED_BODY: &str = "All Neuro Focus modifications have been removed";
pub const MSG_RESTORE_FAILED_TITLE: &str = "❌ Restore Failed";
pub const MSG_RESTORE_FAILED_BODY: &str = "Could not fully restore page";

// === Reading-Mode Artifacts ===

/// Text markers identifying stylesheets injected by reading mode.
pub const READING_MODE_STYLE_MARKERS: &[&str] = &[
    "neuro-focus",
    "reading-mode",
    READING_MODE_INDICATOR_TEXT,
];

/// Text shown by the reading-mode indicator.
pub const READING_MODE_INDICATOR_TEXT: &str = "🧠 Neuro Focus Reading Mode Active";

/// Substring found in the inline style of indicator nodes.
pub const READING_MODE_INDICATOR_MARKER: &str = "Neuro Focus Reading Mode Active";

/// Pseudo-element selector used by stylesheet-based indicators.
pub const READING_MODE_INDICATOR_PSEUDO: &str = "body::before";

/// DOM ids of nodes injected by reading mode.
pub const READING_MODE_NODE_IDS: &[&str] = &[
    "neuro-focus-reading-style",
    "neuro-focus-font-style",
    "neuro-focus-custom-css",
];

/// Elements whose inline typography reading mode may have overridden.
pub const FONT_RESET_SELECTORS: &[&str] = &[
    "html",
    "body",
    "main",
    "article",
    ".article",
    ".post",
    ".content",
    "[role=\"main\"]",
    "p",
    "div",
    "span",
    "li",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

/// Inline style properties cleared on the reset targets.
pub const FONT_RESET_PROPERTIES: &[&str] = &[
    "font-family",
    "font-size",
    "line-height",
    "background",
    "color",
    "margin",
    "padding",
    "max-width",
    "box-shadow",
    "border-radius",
];
