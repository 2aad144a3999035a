//! Key/value properties files as found in shader packs.
//!
//! Shader packs describe most of their metadata in line-oriented `key=value`
//! text files: `shaders.properties`, the id maps (`block.properties`, ...)
//! and the per-language files under `lang/`. This crate provides:
//!
//! - [`Properties`]: the parsed, read-only table
//! - [`Encoding`]: the two text encodings packs use for these files
//! - [`load_properties`]: the "absent is fine" loader used for optional pack files
//!
//! # Example
//!
//! ```
//! use shaderpack_properties::Properties;
//!
//! let props = Properties::parse("texture.noise = textures/noise.png\n# comment\n");
//! assert_eq!(props.get("texture.noise"), Some("textures/noise.png"));
//! ```

use std::collections::BTreeMap;

use camino::Utf8Path;

mod encoding;
pub mod error;
mod parse;

pub use encoding::Encoding;
pub use error::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// A parsed properties table, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: BTreeMap<String, String>,
}

impl Properties {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse already-decoded text.
    pub fn parse(text: &str) -> Self {
        Self {
            entries: parse::parse_entries(text),
        }
    }

    /// Decode raw bytes with the given encoding and parse them.
    pub fn from_bytes(bytes: &[u8], encoding: Encoding) -> Result<Self> {
        Ok(Self::parse(&encoding.decode(bytes)?))
    }

    /// Read and parse a file.
    pub fn read_file(path: &Utf8Path, encoding: Encoding) -> Result<Self> {
        let bytes = std::fs::read(path.as_std_path())?;
        Self::from_bytes(&bytes, encoding)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Load `root/name` if it exists.
///
/// Returns `None` when there is no root, when the file is missing, or when it
/// cannot be read or decoded. A missing file is logged at debug level; any
/// other failure is logged as an error. Neither is reported to the caller.
pub fn load_properties(root: Option<&Utf8Path>, name: &str, encoding: Encoding) -> Option<Properties> {
    let root = root?;
    let path = root.join(name);

    match Properties::read_file(&path, encoding) {
        Ok(properties) => Some(properties),
        Err(e) if e.is_not_found() => {
            tracing::debug!("A {} file was not found in {}", name, root);
            None
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", path, e);
            None
        }
    }
}
