//! Pack-relative path resolution.
//!
//! Shader packs name other files with relative paths (`texture.noise`,
//! `#include` directives). These helpers turn such a path into a location
//! under the pack root and refuse anything that would leave it.

use crate::error::{Error, Result};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Resolve a pack-relative path against `root`.
///
/// The resolution is purely lexical:
///
/// - Backslashes are treated as separators.
/// - A leading `/` means "relative to the pack root", the same as no slash.
/// - `.` components are dropped and `..` pops the previous component.
///
/// Returns [`Error::PathEscapesRoot`] when a `..` would climb above `root` or
/// the path carries a drive prefix.
pub fn resolve_in_root(root: &Utf8Path, relative: &str) -> Result<Utf8PathBuf> {
    let normalized = relative.replace('\\', "/");
    let trimmed = normalized.trim_start_matches('/');

    let mut parts: Vec<&str> = Vec::new();
    for component in Utf8Path::new(trimmed).components() {
        match component {
            Utf8Component::Normal(part) => parts.push(part),
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::PathEscapesRoot(relative.to_string()));
                }
            }
            Utf8Component::RootDir | Utf8Component::Prefix(_) => {
                return Err(Error::PathEscapesRoot(relative.to_string()));
            }
        }
    }

    Ok(parts
        .into_iter()
        .fold(root.to_path_buf(), |path, part| path.join(part)))
}

/// Resolve `relative` against `from_dir`, which must itself lie under `root`.
///
/// Containment is still checked against `root`, so `../lib/common.glsl` from
/// an override folder may reach shared files but never anything outside the pack.
pub fn resolve_from_dir(root: &Utf8Path, from_dir: &Utf8Path, relative: &str) -> Result<Utf8PathBuf> {
    let prefix = from_dir
        .strip_prefix(root)
        .map_err(|_| Error::PathEscapesRoot(from_dir.to_string()))?;

    if prefix.as_str().is_empty() {
        return resolve_in_root(root, relative);
    }

    resolve_in_root(root, &format!("{}/{}", prefix, relative))
}

/// Convert a `tempfile`/std path into a UTF-8 path for tests.
#[cfg(test)]
pub(crate) fn utf8(path: &std::path::Path) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path.to_path_buf()).unwrap()
}
