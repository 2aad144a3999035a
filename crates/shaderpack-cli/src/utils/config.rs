//! Application configuration management utilities.

use crate::errors::CliError;
use camino::Utf8PathBuf;
use directories_next::ProjectDirs;
use miette::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::Path;

/// Application-wide configuration stored in config.toml.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Where per-pack option files are kept.
    pub config_dir: Option<Utf8PathBuf>,
}

/// Returns the directory where the current executable resides.
pub fn install_dir() -> Option<Utf8PathBuf> {
    let exe = env::current_exe().ok()?;
    let parent = exe.parent()?;
    Utf8PathBuf::from_path_buf(parent.to_path_buf()).ok()
}

/// Returns the default configuration file path (config.toml next to the executable).
pub fn default_config_path() -> Option<Utf8PathBuf> {
    install_dir().map(|dir| dir.join("config.toml"))
}

/// The platform option directory, e.g. `~/.config/shaderpack/packs` on Linux.
pub fn default_pack_config_dir() -> Option<Utf8PathBuf> {
    let dirs = ProjectDirs::from("", "", "shaderpack")?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().join("packs")).ok()
}

fn parse_config(content: &str) -> AppConfig {
    match toml::from_str(content) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            AppConfig::default()
        }
    }
}

/// Loads the application configuration from config.toml.
/// Returns default configuration if file doesn't exist or cannot be parsed.
pub fn load_config() -> AppConfig {
    if let Some(path) = default_config_path() {
        if Path::new(path.as_str()).exists() {
            if let Ok(content) = fs::read_to_string(path.as_str()) {
                return parse_config(&content);
            }
        }
    }
    AppConfig::default()
}

/// Saves the application configuration to config.toml.
pub fn save_config(cfg: &AppConfig) -> io::Result<()> {
    if let Some(path) = default_config_path() {
        let content = toml::to_string_pretty(cfg).map_err(io::Error::other)?;
        fs::write(path.as_str(), content)
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config path",
        ))
    }
}

/// Pick the option directory: `--config-dir`, then config.toml, then the
/// platform default.
pub fn resolve_config_dir(flag: Option<String>) -> Result<Utf8PathBuf> {
    choose_config_dir(flag, load_config(), default_pack_config_dir())
}

fn choose_config_dir(
    flag: Option<String>,
    cfg: AppConfig,
    platform_default: Option<Utf8PathBuf>,
) -> Result<Utf8PathBuf> {
    flag.map(Utf8PathBuf::from)
        .or(cfg.config_dir)
        .or(platform_default)
        .ok_or_else(|| CliError::NoConfigDir.into())
}
