//! The loaded shader pack.
//!
//! [`ShaderPack::load`] builds every resource of a pack in one pass:
//!
//! 1. Read `shaders.properties`.
//! 2. Load the persisted [`ShaderPackConfig`].
//! 3. Load the base program layer from the pack root.
//! 4. Load the `world0`, `world-1` and `world1` override layers, if present.
//! 5. Build the [`IdMap`] and the [`LanguageMap`].
//! 6. Load the custom noise texture named by `texture.noise`.
//! 7. Discover [`ShaderOptions`] in the program sources and seed the config
//!    with their defaults.
//! 8. Save the config.
//!
//! The config is loaded before anything can contribute a default and saved
//! once after all of them are in place.

use camino::{Utf8Path, Utf8PathBuf};

use crate::compose::{discover_override, ComposedProgramSet, ProgramContext};
use crate::config::ShaderPackConfig;
use crate::error::{Error, Result};
use crate::id_map::IdMap;
use crate::lang::{load_language_map, LanguageMap};
use crate::options::ShaderOptions;
use crate::program::ProgramLayer;
use crate::properties::ShaderProperties;
use crate::texture::{CustomTexture, TextureSampling};

/// Who a pack is and where its config lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackIdentity {
    /// Name the config store is keyed by.
    pub name: String,
    /// Directory holding the per-pack config files.
    pub config_dir: Utf8PathBuf,
}

impl PackIdentity {
    pub fn new(name: impl Into<String>, config_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            name: name.into(),
            config_dir: config_dir.into(),
        }
    }
}

/// A fully loaded shader pack.
#[derive(Debug)]
pub struct ShaderPack {
    root: Utf8PathBuf,
    properties: ShaderProperties,
    config: ShaderPackConfig,
    base: ProgramLayer,
    overworld: Option<ProgramLayer>,
    nether: Option<ProgramLayer>,
    end: Option<ProgramLayer>,
    id_map: IdMap,
    languages: LanguageMap,
    custom_noise_texture: Option<CustomTexture>,
    options: ShaderOptions,
}

impl ShaderPack {
    /// Load the pack rooted at `root`.
    ///
    /// Fails with [`Error::MissingRoot`] for an empty path and
    /// [`Error::InvalidPackRoot`] when `root` is not a directory. Program
    /// loading errors (unreadable stage files, broken includes) fail the whole
    /// pack. Everything else that is missing or malformed is logged and left
    /// empty.
    pub fn load(root: &Utf8Path, identity: PackIdentity) -> Result<Self> {
        if root.as_str().is_empty() {
            return Err(Error::MissingRoot);
        }
        if !root.as_std_path().is_dir() {
            return Err(Error::InvalidPackRoot(root.to_path_buf()));
        }

        tracing::debug!("Loading shader pack '{}' from {}", identity.name, root);

        let properties = ShaderProperties::load(Some(root));

        let mut config = ShaderPackConfig::new(identity.name, &identity.config_dir);
        config.load();

        let base = ProgramLayer::load(Some(root), Some(root))?;
        let load_override = |context: ProgramContext| -> Result<Option<ProgramLayer>> {
            match context.override_folder() {
                Some(folder) => discover_override(Some(root), folder),
                None => Ok(None),
            }
        };
        let overworld = load_override(ProgramContext::Overworld)?;
        let nether = load_override(ProgramContext::Nether)?;
        let end = load_override(ProgramContext::End)?;

        let id_map = IdMap::load(Some(root));
        let languages = load_language_map(Some(root));

        let texture_path = properties.noise_texture_path();
        let sampling = TextureSampling::load(Some(root), texture_path);
        let custom_noise_texture =
            CustomTexture::load(Some(root), texture_path, sampling.blur, sampling.clamp);

        let mut pack = Self {
            root: root.to_path_buf(),
            properties,
            config,
            base,
            overworld,
            nether,
            end,
            id_map,
            languages,
            custom_noise_texture,
            options: ShaderOptions::default(),
        };

        pack.options = ShaderOptions::discover(pack.program_sources());
        let seeded = pack.options.apply_defaults(&mut pack.config);
        tracing::debug!("Seeded {} option default(s) for '{}'", seeded, pack.config.pack_name());

        if let Err(e) = pack.config.save() {
            tracing::error!("Failed to save config for '{}': {}", pack.config.pack_name(), e);
        }

        tracing::info!(
            "Loaded shader pack '{}': {} base programs, {} override layers, {} languages, {} options",
            pack.config.pack_name(),
            pack.base.len(),
            ProgramContext::DIMENSIONS
                .into_iter()
                .filter(|ctx| pack.has_override(*ctx))
                .count(),
            pack.languages.len(),
            pack.options.len(),
        );

        Ok(pack)
    }

    fn override_layer(&self, context: ProgramContext) -> Option<&ProgramLayer> {
        match context {
            ProgramContext::Base => None,
            ProgramContext::Overworld => self.overworld.as_ref(),
            ProgramContext::Nether => self.nether.as_ref(),
            ProgramContext::End => self.end.as_ref(),
        }
    }

    /// Every stage source of every layer, base first.
    fn program_sources(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.base)
            .chain(self.overworld.as_ref())
            .chain(self.nether.as_ref())
            .chain(self.end.as_ref())
            .flat_map(|layer| layer.programs())
            .flat_map(|program| program.stages())
    }

    /// The programs used in `context`: its override layer on top of the base.
    pub fn program_set(&self, context: ProgramContext) -> ComposedProgramSet<'_> {
        ComposedProgramSet::merge(&self.base, self.override_layer(context))
    }

    /// [`program_set`](Self::program_set) for a context given by name, folder
    /// or dimension id.
    pub fn program_set_for(&self, context: &str) -> Result<ComposedProgramSet<'_>> {
        Ok(self.program_set(context.parse()?))
    }

    /// Whether `context` has an override folder. An empty folder still counts.
    pub fn has_override(&self, context: ProgramContext) -> bool {
        self.override_layer(context).is_some()
    }

    pub fn base_layer(&self) -> &ProgramLayer {
        &self.base
    }

    pub fn id_map(&self) -> &IdMap {
        &self.id_map
    }

    pub fn language_map(&self) -> &LanguageMap {
        &self.languages
    }

    pub fn custom_noise_texture(&self) -> Option<&CustomTexture> {
        self.custom_noise_texture.as_ref()
    }

    pub fn properties(&self) -> &ShaderProperties {
        &self.properties
    }

    pub fn config(&self) -> &ShaderPackConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ShaderPackConfig {
        &mut self.config
    }

    pub fn options(&self) -> &ShaderOptions {
        &self.options
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }
}
