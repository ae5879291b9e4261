//! Command channel messages.
//!
//! Commands arrive from the popup/controller collaborator as JSON objects
//! tagged by `action`. Each one is answered with an [`Ack`]; state changes
//! are reported back as [`StatusEvent`]s. This module is pure Rust with no
//! surface access, making it fully testable.

use serde::{Deserialize, Serialize};

use crate::model::RulerColor;

/// Commands dispatched to the page context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum Command {
    /// Enable (with an optional colour) or disable the ruler.
    #[serde(rename = "toggleDyslexiaRuler")]
    ToggleRuler {
        enabled: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },

    /// Change the ruler colour without changing its state.
    #[serde(rename = "updateRulerColor")]
    UpdateRulerColor { color: String },

    /// Revert every modification made to the page.
    #[serde(rename = "restorePage")]
    RestorePage,
}

impl Command {
    /// Returns a human-readable description of the command for logging.
    pub fn description(&self) -> &'static str {
        match self {
            Command::ToggleRuler { enabled: true, .. } => "Enable ruler",
            Command::ToggleRuler { enabled: false, .. } => "Disable ruler",
            Command::UpdateRulerColor { .. } => "Update ruler colour",
            Command::RestorePage => "Restore page",
        }
    }
}

/// Response to a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Ack {
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Status reported back through the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum StatusEvent {
    RulerEnabled { color: RulerColor },
    RulerDisabled,
    RulerRecolored { color: RulerColor },
    PageRestored,
    RestoreFailed { reason: String },
}
