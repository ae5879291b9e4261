//! Page-wide shared functionality.
//!
//! This module contains the borrowed context that the overlay, notification
//! and restore components operate on.

pub mod context;

pub use context::PageCtx;
