//! Persisted ruler preferences.
//!
//! The host owns the preference store; the ruler reads
//! `dyslexiaRulerEnabled` and `rulerColor` once when a page context starts,
//! and clears the enabled flag when the page is restored.
//!
//! [`JsonFilePreferences`] keeps an in-memory cache and only writes to disk
//! on [`PreferenceStore::flush`], so repeated writes stay cheap.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Result, RulerError};
use crate::model::constants::*;
use crate::model::RulerColor;

/// Key/value preference store.
pub trait PreferenceStore {
    fn get_bool(&self, key: &str) -> Result<Option<bool>>;
    fn get_string(&self, key: &str) -> Result<Option<String>>;
    fn set_bool(&mut self, key: &str, value: bool) -> Result<()>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;

    /// Persist pending writes.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

fn typed_bool(values: &Map<String, Value>, key: &str) -> Result<Option<bool>> {
    match values.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(RulerError::PreferenceType {
            key: key.to_string(),
            expected: "bool",
        }),
    }
}

fn typed_string(values: &Map<String, Value>, key: &str) -> Result<Option<String>> {
    match values.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RulerError::PreferenceType {
            key: key.to_string(),
            expected: "string",
        }),
    }
}

// === In-memory store ===

/// Preference store held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryPreferences {
    values: Map<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a JSON object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let values: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self { values })
    }

    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        typed_bool(&self.values, key)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        typed_string(&self.values, key)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }
}

// === JSON file store ===

/// Preference store backed by a JSON object on disk.
#[derive(Debug)]
pub struct JsonFilePreferences {
    path: PathBuf,
    cache: Map<String, Value>,
    dirty: bool,
}

impl JsonFilePreferences {
    /// Open `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(source) => return Err(RulerError::Io { path, source }),
        };
        Ok(Self {
            path,
            cache,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn write_to_disk(&self) -> Result<()> {
        let io_err = |source: std::io::Error| RulerError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.cache)?;
        fs::write(&self.path, json).map_err(io_err)
    }
}

impl PreferenceStore for JsonFilePreferences {
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        typed_bool(&self.cache, key)
    }

    fn get_string(&self, key: &str) -> Result<Option<String>> {
        typed_string(&self.cache, key)
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.cache.insert(key.to_string(), Value::Bool(value));
        self.dirty = true;
        Ok(())
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.cache
            .insert(key.to_string(), Value::String(value.to_string()));
        self.dirty = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.write_to_disk()?;
        self.dirty = false;
        debug!(path = %self.path.display(), "preferences flushed");
        Ok(())
    }
}

// === Ruler preferences ===

/// The two preferences the ruler reads at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerPreferences {
    pub enabled: bool,
    pub color: RulerColor,
}

impl RulerPreferences {
    /// Read from `store`, falling back to defaults for missing, mistyped or
    /// invalid values.
    pub fn load<P: PreferenceStore + ?Sized>(store: &P, default_color: &RulerColor) -> Self {
        let enabled = store.get_bool(PREF_RULER_ENABLED).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring stored enabled flag");
            None
        });
        let color = match store.get_string(PREF_RULER_COLOR) {
            Ok(Some(raw)) => RulerColor::parse(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored ruler colour");
                default_color.clone()
            }),
            Ok(None) => default_color.clone(),
            Err(e) => {
                warn!(error = %e, "ignoring stored ruler colour");
                default_color.clone()
            }
        };
        Self {
            enabled: enabled.unwrap_or(false),
            color,
        }
    }
}
