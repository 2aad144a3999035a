//! The pack's custom noise texture.
//!
//! The texture is named by a pack-relative path in `shaders.properties`. Its
//! bytes are loaded as-is; decoding is up to the renderer. Sampling flags can
//! be given in a `<texture>.mcmeta` sidecar:
//!
//! ```json
//! { "texture": { "blur": true, "clamp": false } }
//! ```

use camino::Utf8Path;
use serde::Deserialize;

use crate::utils::resolve_in_root;

/// Raw texture bytes plus how they should be sampled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTexture {
    content: Vec<u8>,
    blur: bool,
    clamp: bool,
}

impl CustomTexture {
    pub fn new(content: Vec<u8>, blur: bool, clamp: bool) -> Self {
        Self {
            content,
            blur,
            clamp,
        }
    }

    /// Load `root/relative_path`.
    ///
    /// Returns `None` without any I/O when no path is given. A path that
    /// escapes the pack root, or a file that can't be read, is logged as an
    /// error and also yields `None`.
    pub fn load(
        root: Option<&Utf8Path>,
        relative_path: Option<&str>,
        blur: bool,
        clamp: bool,
    ) -> Option<Self> {
        let relative_path = relative_path?;
        let Some(root) = root else {
            tracing::debug!("No pack root to load the custom texture {} from", relative_path);
            return None;
        };

        let path = match resolve_in_root(root, relative_path) {
            Ok(path) => path,
            Err(e) => {
                tracing::error!("Unable to read the custom noise texture at {}: {}", relative_path, e);
                return None;
            }
        };

        match std::fs::read(path.as_std_path()) {
            Ok(content) => Some(Self::new(content, blur, clamp)),
            Err(e) => {
                tracing::error!("Unable to read the custom noise texture at {}: {}", path, e);
                None
            }
        }
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn into_content(self) -> Vec<u8> {
        self.content
    }

    pub fn blur(&self) -> bool {
        self.blur
    }

    pub fn clamp(&self) -> bool {
        self.clamp
    }
}

/// Sampling flags for a custom texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSampling {
    pub blur: bool,
    pub clamp: bool,
}

impl Default for TextureSampling {
    fn default() -> Self {
        Self {
            blur: true,
            clamp: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct McMeta {
    #[serde(default)]
    texture: McMetaTexture,
}

#[derive(Debug, Default, Deserialize)]
struct McMetaTexture {
    blur: Option<bool>,
    clamp: Option<bool>,
}

impl TextureSampling {
    /// Read the `.mcmeta` sidecar of `relative_path`, falling back to the
    /// defaults for anything it doesn't say.
    pub fn load(root: Option<&Utf8Path>, relative_path: Option<&str>) -> Self {
        let defaults = Self::default();
        let (Some(root), Some(relative_path)) = (root, relative_path) else {
            return defaults;
        };

        let Ok(path) = resolve_in_root(root, &format!("{}.mcmeta", relative_path)) else {
            return defaults;
        };

        let contents = match std::fs::read_to_string(path.as_std_path()) {
            Ok(contents) => contents,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", path, e);
                }
                return defaults;
            }
        };

        match serde_json::from_str::<McMeta>(contents.trim_start_matches('\u{feff}')) {
            Ok(meta) => Self {
                blur: meta.texture.blur.unwrap_or(defaults.blur),
                clamp: meta.texture.clamp.unwrap_or(defaults.clamp),
            },
            Err(e) => {
                tracing::warn!("Ignoring malformed texture metadata {}: {}", path, e);
                defaults
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::utf8;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_path_is_absent() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        assert!(CustomTexture::load(Some(&root), None, true, false).is_none());
    }

    #[test]
    fn test_load_reads_bytes_and_flags() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::create_dir_all(root.join("textures")).unwrap();
        fs::write(root.join("textures/noise.png"), [1u8, 2, 3]).unwrap();

        let texture = CustomTexture::load(Some(&root), Some("textures/noise.png"), true, false)
            .unwrap();
        assert_eq!(texture.content(), &[1, 2, 3]);
        assert!(texture.blur());
        assert!(!texture.clamp());
    }

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        assert!(CustomTexture::load(Some(&root), Some("textures/nope.png"), true, false).is_none());
    }

    #[test]
    fn test_traversal_is_rejected() {
        let dir = tempdir().unwrap();
        let outer = utf8(dir.path());
        let root = outer.join("pack");
        fs::create_dir_all(&root).unwrap();
        fs::write(outer.join("secret.bin"), b"secret").unwrap();

        assert!(CustomTexture::load(Some(&root), Some("../secret.bin"), true, false).is_none());
    }

    #[test]
    fn test_sampling_defaults_without_sidecar() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        let sampling = TextureSampling::load(Some(&root), Some("noise.png"));
        assert_eq!(sampling, TextureSampling::default());
        assert!(sampling.blur);
        assert!(!sampling.clamp);
    }

    #[test]
    fn test_sampling_from_sidecar() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(
            root.join("noise.png.mcmeta"),
            r#"{ "texture": { "blur": false, "clamp": true } }"#,
        )
        .unwrap();

        let sampling = TextureSampling::load(Some(&root), Some("noise.png"));
        assert!(!sampling.blur);
        assert!(sampling.clamp);
    }

    #[test]
    fn test_sampling_partial_sidecar_keeps_defaults() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(root.join("noise.png.mcmeta"), r#"{ "texture": { "clamp": true } }"#).unwrap();

        let sampling = TextureSampling::load(Some(&root), Some("noise.png"));
        assert!(sampling.blur);
        assert!(sampling.clamp);
    }

    #[test]
    fn test_sampling_malformed_sidecar() {
        let dir = tempdir().unwrap();
        let root = utf8(dir.path());
        fs::write(root.join("noise.png.mcmeta"), "{ not json").unwrap();

        let sampling = TextureSampling::load(Some(&root), Some("noise.png"));
        assert_eq!(sampling, TextureSampling::default());
    }
}
