//! User-visible page components.
//!
//! ## overlay/
//! - band.rs: band node description and colour-derived styles
//! - controller.rs: enable/disable/recolor state machine
//!
//! ## notification.rs
//! - transient toasts with fade in/out

pub mod notification;
pub mod overlay;

pub use notification::{NotificationEmitter, NotificationId, ToastTiming};
pub use overlay::OverlayController;
