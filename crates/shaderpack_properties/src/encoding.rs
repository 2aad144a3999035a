use std::fmt;

use crate::error::Error;

const UTF8_BOM: &str = "\u{feff}";

/// Text encoding of a properties file.
///
/// Pack-level files (`shaders.properties`, the id maps) use the legacy
/// single-byte encoding. Language files are UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// ISO-8859-1. Every byte maps to the code point with the same value.
    Latin1,
    /// Strict UTF-8. Invalid sequences are rejected.
    Utf8,
}

impl Encoding {
    /// Decode raw file bytes into text.
    ///
    /// A leading byte order mark is dropped for UTF-8 input.
    pub fn decode(self, bytes: &[u8]) -> Result<String, Error> {
        match self {
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Encoding::Utf8 => {
                let text = std::str::from_utf8(bytes).map_err(|source| Error::Decode {
                    encoding: self,
                    source,
                })?;
                Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text).to_string())
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Latin1 => f.write_str("ISO-8859-1"),
            Encoding::Utf8 => f.write_str("UTF-8"),
        }
    }
}
