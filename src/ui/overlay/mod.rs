//! Reading band overlay.
//!
//! Contains the band styling and the controller that owns the band.

pub mod band;
pub mod controller;

pub use controller::OverlayController;
