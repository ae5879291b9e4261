//! Preference persistence.
//!
//! The store itself belongs to the host; this module defines the trait the
//! ruler consumes plus in-memory and JSON-file implementations.

pub mod preferences;

pub use preferences::{JsonFilePreferences, MemoryPreferences, PreferenceStore, RulerPreferences};
