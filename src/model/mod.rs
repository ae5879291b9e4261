//! Ruler domain model.
//!
//! This module contains pure state (no surface access) including the
//! overlay state, the validated colour type and configuration constants.
//!
//! Persistence is in `storage`.

pub mod app_state;
pub mod color;
pub mod constants;

pub use app_state::OverlayState;
pub use color::{alpha_hex, RulerColor};
pub use constants::*;
