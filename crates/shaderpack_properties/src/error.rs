use std::io;

use thiserror::Error;

use crate::Encoding;

/// Errors that can occur while reading a properties file.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid {encoding} text: {source}")]
    Decode {
        encoding: Encoding,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl Error {
    /// Whether the error only means "the file isn't there".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }
}
