//! Persisted key-value storage for console session state.
//!
//! This is the console's localStorage analog: a handful of string keys
//! (active region, token secret) read at startup and written on change.
//! Storage is an explicit, injectable dependency of the region context
//! rather than ambient environment access, so tests run against
//! [`MemoryStorage`] and the console against [`FileStorage`].
//!
//! Storage failures never surface to callers. A console that cannot write
//! its settings file keeps working with in-memory state for the session;
//! the failure is logged and navigation continues.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Storage key holding the active region identifier.
pub const ACTIVE_REGION_KEY: &str = "activeRegion";

/// Storage key holding the console token secret.
pub const TOKEN_SECRET_KEY: &str = "tokenSecret";

/// Key-value storage contract for console session state.
///
/// Reads are passive and never write. Writes are best-effort: an
/// implementation that cannot persist must keep the value in memory for
/// the rest of the session instead of failing the caller.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    /// Remove every key. The region context treats this as its implicit reset.
    fn clear(&mut self);
}

/// In-memory storage used by tests and as the degraded mode when the
/// settings file is unusable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

/// File-backed storage persisting a flat JSON object of string entries.
///
/// The file lives under the platform data directory
/// (`~/.local/share/jobdash/settings.json` on Linux) and is rewritten in
/// full on every change; the value set is a handful of short strings.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStorage {
    /// Open storage at the default platform location.
    ///
    /// Returns None only when no home directory can be determined; callers
    /// fall back to [`MemoryStorage`] in that case.
    pub fn new() -> Option<Self> {
        let proj_dirs = directories::ProjectDirs::from("com", "", "jobdash")?;
        let path = proj_dirs.data_dir().join("settings.json");
        Some(Self::with_path(path))
    }

    /// Open storage at a specific path.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = Self::load_entries(&path);
        Self { path, entries }
    }

    fn load_entries(path: &Path) -> HashMap<String, String> {
        if !path.exists() {
            debug!("No settings file at {:?}, starting empty", path);
            return HashMap::new();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Map<String, Value>>(&contents) {
                Ok(map) => map
                    .into_iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
                    .collect(),
                Err(e) => {
                    warn!("Failed to parse settings file {:?}: {}", path, e);
                    HashMap::new()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file {:?}: {}", path, e);
                HashMap::new()
            }
        }
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create settings directory {:?}: {}", parent, e);
                return;
            }
        }

        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        match serde_json::to_string_pretty(&Value::Object(map)) {
            Ok(contents) => {
                if let Err(e) = std::fs::write(&self.path, contents) {
                    warn!(
                        "Failed to write settings file {:?}: {} (continuing in-memory)",
                        self.path, e
                    );
                }
            }
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.flush();
        }
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }

    fn clear(&mut self) {
        if !self.entries.is_empty() {
            self.entries.clear();
            self.flush();
        }
    }
}
