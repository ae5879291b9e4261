//! Command handling and page wiring.
//!
//! This module contains the page context that receives commands from the
//! command bus and surface signals, and routes them to the components.

pub mod dispatcher;

pub use dispatcher::ReadingRuler;
