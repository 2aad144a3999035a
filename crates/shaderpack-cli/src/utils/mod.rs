use crate::errors::CliError;
use camino::{Utf8Path, Utf8PathBuf};
use miette::Result;
use shaderpack::{PackIdentity, ShaderPack};

pub mod config;

#[macro_export]
macro_rules! println_pad {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        for __line in __s.lines() {
            println!("    {}", __line);
        }
    }};
}

/// The name a pack's options are stored under: `--name` if given, else the
/// pack folder's name.
pub fn pack_name(root: &Utf8Path, name: Option<String>) -> Result<String> {
    if let Some(name) = name {
        return Ok(name);
    }

    root.file_name()
        .map(str::to_string)
        .ok_or_else(|| CliError::invalid_pack_name(root.as_std_path().to_path_buf()).into())
}

/// Load the pack at `root`, resolving its name and option directory.
pub fn load_pack(root: &str, name: Option<String>, config_dir: Option<String>) -> Result<ShaderPack> {
    let root = Utf8PathBuf::from(root);
    if !root.as_std_path().is_dir() {
        return Err(CliError::pack_not_found(root.into_std_path_buf()).into());
    }

    let identity = PackIdentity::new(pack_name(&root, name)?, config::resolve_config_dir(config_dir)?);
    ShaderPack::load(&root, identity).map_err(|e| CliError::pack_load_failed(e).into())
}
