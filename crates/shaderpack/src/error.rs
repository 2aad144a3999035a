//! Error types for shader pack loading.
//!
//! Only structural and usage problems are errors. Missing optional files and
//! malformed entries inside multi-file scans are absorbed where they occur and
//! turned into absent or empty values, so they never show up here.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying a shader pack.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem I/O failed on a file the pack cannot do without.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON (pack config store).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A properties file could not be read or decoded.
    #[error("Properties error: {0}")]
    Properties(#[from] shaderpack_properties::Error),

    /// The pack was opened with an empty root path.
    #[error("A shader pack root path is required")]
    MissingRoot,

    /// The pack root does not exist or is not a directory.
    #[error("Invalid shader pack root: {0}")]
    InvalidPackRoot(Utf8PathBuf),

    /// Reading a program stage file that exists failed.
    #[error("Failed to read program source {path}: {source}")]
    ProgramRead {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An `#include` names a file that does not exist.
    #[error("Included file {path} not found (included from {from})")]
    IncludeNotFound { path: Utf8PathBuf, from: Utf8PathBuf },

    /// A pack-relative path climbs out of the pack root.
    #[error("Path '{0}' escapes the shader pack root")]
    PathEscapesRoot(String),

    /// An include chain leads back to a file that is already being expanded.
    #[error("Include cycle detected at {0}")]
    IncludeCycle(Utf8PathBuf),

    /// A program set was requested for a context name that isn't recognized.
    #[error("Unknown program context '{0}'")]
    UnknownContext(String),

    /// An identifier is not of the form `namespace:path`.
    #[error("Invalid identifier '{0}'")]
    InvalidIdentifier(String),

    /// An unknown program slot name was requested.
    #[error("Unknown program slot '{0}'")]
    UnknownSlot(String),

    /// `save()` was called on a config store that was never loaded.
    #[error("Config for shader pack '{0}' was saved before being loaded")]
    ConfigNotLoaded(String),
}
