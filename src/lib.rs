//! Reading ruler overlay.
//!
//! A horizontal highlight band that follows the pointer's vertical position
//! on a rendering surface, plus toast notifications and a page restorer.
//! Nothing here talks to a real display: the host implements
//! [`surface::Surface`] and drives a [`ReadingRuler`] with commands, surface
//! signals and clock ticks.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod handlers;
pub mod input;
pub mod logging;
pub mod model;
pub mod restore;
pub mod storage;
pub mod surface;
pub mod timing;
pub mod ui;

// Re-export the types a host needs to wire a page
pub use config::RulerConfig;
pub use error::{Result, RulerError, SurfaceError};
pub use events::{Ack, Command, CommandBus, CommandSender, StatusEvent};
pub use handlers::ReadingRuler;
pub use model::{OverlayState, RulerColor};
pub use restore::{PageRestorer, RestoreOutcome, RestorePolicy, RestoreReport};
pub use surface::{RecordingSurface, Signal, Surface};

/// Clamp a value to [lo, hi]
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo
    } else if v > hi {
        hi
    } else {
        v
    }
}
