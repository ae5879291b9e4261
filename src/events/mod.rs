//! Command channel between the page context and its controller.
//!
//! This module provides a request/response mechanism using Rust's standard
//! library `mpsc` channels. It enables:
//!
//! - **Decoupled architecture**: the popup/controller collaborator issues
//!   commands without touching page state
//! - **Thread safety**: senders can live on any thread
//! - **Testability**: commands and status events are plain serde enums
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐                      ┌─────────────┐
//! │    Popup    │                      │  Harness /  │
//! │ controller  │                      │    host     │
//! └──────┬──────┘                      └──────┬──────┘
//!        │ send() / post()                    │ send() / post()
//!        ▼                                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                     CommandBus                      │
//! │            (mpsc: commands in, status out)          │
//! └─────────────────────────┬───────────────────────────┘
//!                           │ drain()
//!                           ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    ReadingRuler                     │
//! │     (dispatch, Ack reply, publish_status back)      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Structure
//!
//! - [`types`]: `Command`, `Ack` and `StatusEvent`
//! - [`bus`]: `CommandBus` and `CommandSender`

pub mod bus;
pub mod types;

pub use bus::{CommandBus, CommandSender, Envelope};
pub use types::{Ack, Command, StatusEvent};
