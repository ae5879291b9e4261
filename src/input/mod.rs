//! Input handling module.
//!
//! This module contains input handlers for:
//! - pointer_tracker.rs: pointer/scroll/resize subscriptions and the
//!   movement debounce

pub mod pointer_tracker;

pub use pointer_tracker::{PointerTracker, SubscriptionSet};
