//! Pack localization tables.
//!
//! Packs ship one file per language under `lang/`. Naming is inconsistent in
//! the wild (`en_US.lang`, `en_us.json`, ...), so the language code is derived
//! by lower-casing the file name and dropping its last extension. Unlike the
//! other pack files, language files are always UTF-8.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use shaderpack_properties::{Encoding, Properties};
use walkdir::WalkDir;

/// Name of the language folder under the pack root.
pub const LANG_DIR: &str = "lang";

/// Language code → key/value table.
pub type LanguageMap = BTreeMap<String, Properties>;

/// Derive the normalized language code from a file name.
///
/// `"En_US.lang"` → `"en_us"`, `"fr_fr.json"` → `"fr_fr"`. A name without a
/// dot is its own code. Returns `None` when nothing is left (`".hidden"`).
pub fn language_code(file_name: &str) -> Option<String> {
    let lower = file_name.to_lowercase();
    let code = match lower.rfind('.') {
        Some(idx) => &lower[..idx],
        None => lower.as_str(),
    };
    (!code.is_empty()).then(|| code.to_string())
}

/// Scan `root/lang` (one level, files only) into a [`LanguageMap`].
///
/// Files are visited in lexicographic file-name order; when two files map to
/// the same code the later one wins. A file that fails to decode is logged and
/// skipped. A missing root or `lang` folder gives an empty map.
pub fn load_language_map(root: Option<&Utf8Path>) -> LanguageMap {
    let mut languages = LanguageMap::new();

    let Some(root) = root else {
        return languages;
    };

    let lang_dir = root.join(LANG_DIR);
    if !lang_dir.as_std_path().is_dir() {
        tracing::debug!("No {} folder in {}", LANG_DIR, root);
        return languages;
    }

    let walker = WalkDir::new(lang_dir.as_std_path())
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Failed to read an entry of {}: {}", lang_dir, e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }

        let path = match Utf8PathBuf::from_path_buf(entry.into_path()) {
            Ok(p) => p,
            Err(p) => {
                tracing::warn!("Skipping non-UTF-8 path: {}", p.display());
                continue;
            }
        };

        let Some(code) = path.file_name().and_then(language_code) else {
            tracing::debug!("Skipping {}: no language code in file name", path);
            continue;
        };

        let table = match Properties::read_file(&path, Encoding::Utf8) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!("Error while parsing language file {}: {}", path, e);
                continue;
            }
        };

        if languages.insert(code.clone(), table).is_some() {
            tracing::debug!("{} replaces an earlier file for language '{}'", path, code);
        }
    }

    languages
}
