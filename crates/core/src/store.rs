//! State store module - the persistence port
//!
//! The session persists through a small string key-value interface. The
//! terminal binary opens a [`JsonFileStore`]; tests and headless runs use
//! the in-memory store.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Storage keys used by the session
pub mod keys {
    /// Serialized board and progress blob
    pub const SAVE: &str = "cc_save";
    /// All-time best score
    pub const BEST: &str = "cc_best";
    /// Current daily streak length
    pub const STREAK: &str = "cc_streak";
    /// Epoch day of the last recorded play
    pub const LAST_PLAY_DAY: &str = "cc_last_play";
    /// Color-blind palette preference
    pub const COLOR_BLIND: &str = "cc_cb";
    /// Daily challenge active flag
    pub const DAILY_ON: &str = "cc_daily_on";
    /// Seed of the active daily challenge
    pub const DAILY_SEED: &str = "cc_daily_seed";
}

/// String key-value persistence used by the session
///
/// Implementations are free to degrade silently: a failed write loses the
/// value but must not disturb gameplay.
pub trait StateStore: std::fmt::Debug + Send {
    /// Read a raw value
    fn get_raw(&self, key: &str) -> Option<String>;
    /// Write a raw value
    fn set_raw(&mut self, key: &str, value: &str);
    /// Delete a value
    fn remove(&mut self, key: &str);

    fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_raw(key).and_then(|raw| raw.trim().parse().ok())
    }

    fn set_u32(&mut self, key: &str, value: u32) {
        self.set_raw(key, &value.to_string());
    }

    fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_raw(key).and_then(|raw| raw.trim().parse().ok())
    }

    fn set_i64(&mut self, key: &str, value: i64) {
        self.set_raw(key, &value.to_string());
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_raw(key).map(|raw| raw == "1")
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_raw(key, if value { "1" } else { "0" });
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// File-backed store holding every key in one JSON object
///
/// The map is read once when the store opens and rewritten on every
/// mutation, through a temp file and rename so a crash never leaves a
/// half-written file. I/O failures degrade to the in-memory map.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`, loading any existing map
    ///
    /// A missing or unreadable file starts the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str::<HashMap<String, String>>(&raw).ok())
            .unwrap_or_default();
        Self { path, values }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persist(&self) {
        let Ok(raw) = serde_json::to_string_pretty(&self.values) else {
            return;
        };
        let tmp = self.path.with_extension("tmp");
        if fs::write(&tmp, raw).is_ok() {
            let _ = fs::rename(&tmp, &self.path);
        }
    }
}

impl StateStore for JsonFileStore {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.persist();
    }
}
