//! Per-pack persisted option store.
//!
//! Each pack gets one JSON document under the caller's config directory,
//! named after the pack:
//!
//! ```json
//! {
//!   "version": 1,
//!   "options": {
//!     "SHADOW_QUALITY": "2",
//!     "BLOOM": "false"
//!   }
//! }
//! ```
//!
//! The store must be [`load`](ShaderPackConfig::load)ed before it can be
//! [`save`](ShaderPackConfig::save)d, so a store that never read the user's
//! choices can't overwrite them.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_VERSION: u32 = 1;

/// Where a [`ShaderPackConfig`] is in its load/save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigState {
    Unloaded,
    Loaded,
    Saved,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigDocument {
    version: u32,
    #[serde(default)]
    options: BTreeMap<String, String>,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            options: BTreeMap::new(),
        }
    }
}

/// File name of a pack's store.
///
/// ASCII letters, digits, `.` and `-` are kept; `_` and every other byte of
/// the UTF-8 name are written as `_` plus two lowercase hex digits, so
/// distinct names never share a file. An empty name becomes `_`.
pub fn config_file_name(pack_name: &str) -> String {
    if pack_name.is_empty() {
        return "_.json".to_string();
    }

    let mut stem = String::with_capacity(pack_name.len());
    for byte in pack_name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("_{:02x}", byte));
        }
    }
    format!("{}.json", stem)
}

/// User option values for one pack.
#[derive(Debug, Clone)]
pub struct ShaderPackConfig {
    pack_name: String,
    path: Utf8PathBuf,
    options: BTreeMap<String, String>,
    state: ConfigState,
}

impl ShaderPackConfig {
    pub fn new(pack_name: impl Into<String>, store_dir: &Utf8Path) -> Self {
        let pack_name = pack_name.into();
        let path = store_dir.join(config_file_name(&pack_name));
        Self {
            pack_name,
            path,
            options: BTreeMap::new(),
            state: ConfigState::Unloaded,
        }
    }

    /// Read the persisted values, replacing anything held in memory.
    ///
    /// Never fails: a missing, unreadable or corrupt store loads as empty.
    pub fn load(&mut self) {
        self.options = match std::fs::read_to_string(self.path.as_std_path()) {
            Ok(contents) => match serde_json::from_str::<ConfigDocument>(&contents) {
                Ok(doc) => {
                    if doc.version != CONFIG_VERSION {
                        tracing::warn!(
                            "Config {} has version {}, expected {}",
                            self.path,
                            doc.version,
                            CONFIG_VERSION
                        );
                    }
                    doc.options
                }
                Err(e) => {
                    tracing::warn!("Ignoring corrupt config {}: {}", self.path, e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No config stored for '{}' yet", self.pack_name);
                BTreeMap::new()
            }
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", self.path, e);
                BTreeMap::new()
            }
        };
        self.state = ConfigState::Loaded;
    }

    /// Write the store as pretty JSON, creating the directory if needed.
    pub fn save(&mut self) -> Result<()> {
        if self.state == ConfigState::Unloaded {
            return Err(Error::ConfigNotLoaded(self.pack_name.clone()));
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent.as_std_path())?;
        }

        let doc = ConfigDocument {
            version: CONFIG_VERSION,
            options: self.options.clone(),
        };
        let contents = serde_json::to_string_pretty(&doc)?;
        std::fs::write(self.path.as_std_path(), contents)?;

        tracing::debug!("Saved {} option(s) to {}", self.options.len(), self.path);
        self.state = ConfigState::Saved;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
        self.touch();
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.options.remove(key);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Store `value` only if nothing is stored under `key` yet.
    pub fn apply_default(&mut self, key: &str, value: &str) -> bool {
        if self.options.contains_key(key) {
            return false;
        }
        self.options.insert(key.to_string(), value.to_string());
        self.touch();
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn state(&self) -> ConfigState {
        self.state
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    pub fn pack_name(&self) -> &str {
        &self.pack_name
    }

    fn touch(&mut self) {
        if self.state == ConfigState::Saved {
            self.state = ConfigState::Loaded;
        }
    }
}
