//! Typed view over `shaders.properties`.

use std::collections::BTreeMap;
use std::fmt;

use camino::Utf8Path;
use shaderpack_properties::{load_properties, Encoding, Properties};

/// File name of the pack-level properties file.
pub const SHADER_PROPERTIES_FILE: &str = "shaders.properties";

const NOISE_TEXTURE_KEY: &str = "texture.noise";
const CLOUDS_KEY: &str = "clouds";

/// Boolean switches a pack can set in `shaders.properties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directive {
    OldLighting,
    UnderwaterOverlay,
    Sun,
    Moon,
    Vignette,
    SeparateAo,
    ShadowTerrain,
    ShadowTranslucent,
    ShadowEntities,
    ShadowBlockEntities,
}

impl Directive {
    pub const ALL: [Directive; 10] = [
        Directive::OldLighting,
        Directive::UnderwaterOverlay,
        Directive::Sun,
        Directive::Moon,
        Directive::Vignette,
        Directive::SeparateAo,
        Directive::ShadowTerrain,
        Directive::ShadowTranslucent,
        Directive::ShadowEntities,
        Directive::ShadowBlockEntities,
    ];

    /// The property key.
    pub fn key(self) -> &'static str {
        match self {
            Directive::OldLighting => "oldLighting",
            Directive::UnderwaterOverlay => "underwaterOverlay",
            Directive::Sun => "sun",
            Directive::Moon => "moon",
            Directive::Vignette => "vignette",
            Directive::SeparateAo => "separateAo",
            Directive::ShadowTerrain => "shadowTerrain",
            Directive::ShadowTranslucent => "shadowTranslucent",
            Directive::ShadowEntities => "shadowEntities",
            Directive::ShadowBlockEntities => "shadowBlockEntities",
        }
    }
}

/// Cloud rendering requested by the pack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CloudSetting {
    /// Follow the user's video settings.
    #[default]
    Default,
    Off,
    Fast,
    Fancy,
}

impl fmt::Display for CloudSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CloudSetting::Default => "default",
            CloudSetting::Off => "off",
            CloudSetting::Fast => "fast",
            CloudSetting::Fancy => "fancy",
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => {
            tracing::warn!("Ignoring {}={}: expected true or false", key, value);
            None
        }
    }
}

fn parse_clouds(value: &str) -> CloudSetting {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => CloudSetting::Off,
        "fast" => CloudSetting::Fast,
        "fancy" => CloudSetting::Fancy,
        _ => {
            tracing::warn!("Ignoring {}={}: expected off, fast or fancy", CLOUDS_KEY, value);
            CloudSetting::Default
        }
    }
}

/// The parts of `shaders.properties` this loader understands, plus the raw table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProperties {
    raw: Properties,
    noise_texture_path: Option<String>,
    clouds: CloudSetting,
    directives: BTreeMap<Directive, bool>,
}

impl ShaderProperties {
    pub fn new(raw: Properties) -> Self {
        let noise_texture_path = raw
            .get(NOISE_TEXTURE_KEY)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let clouds = raw.get(CLOUDS_KEY).map(parse_clouds).unwrap_or_default();

        let directives = Directive::ALL
            .into_iter()
            .filter_map(|d| {
                let value = raw.get(d.key())?;
                parse_bool(d.key(), value).map(|b| (d, b))
            })
            .collect();

        Self {
            raw,
            noise_texture_path,
            clouds,
            directives,
        }
    }

    /// The view of a pack without a `shaders.properties` file.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `root/shaders.properties` (ISO-8859-1). Missing or unreadable
    /// files give [`empty`](Self::empty).
    pub fn load(root: Option<&Utf8Path>) -> Self {
        load_properties(root, SHADER_PROPERTIES_FILE, Encoding::Latin1)
            .map(Self::new)
            .unwrap_or_else(Self::empty)
    }

    pub fn noise_texture_path(&self) -> Option<&str> {
        self.noise_texture_path.as_deref()
    }

    pub fn clouds(&self) -> CloudSetting {
        self.clouds
    }

    /// The pack's value for a directive, if it sets one.
    pub fn directive(&self, directive: Directive) -> Option<bool> {
        self.directives.get(&directive).copied()
    }

    pub fn raw(&self) -> &Properties {
        &self.raw
    }
}
