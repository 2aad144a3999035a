use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    #[error("Shader pack folder not found: {path}")]
    #[diagnostic(
        code(pack::not_found),
        help("Pass the folder that contains shaders.properties and the program files")
    )]
    PackNotFound { path: PathBuf },

    #[error("Failed to load shader pack")]
    #[diagnostic(
        code(pack::load_failed),
        help("Run with RUST_LOG=shaderpack=debug for details on each loading step")
    )]
    PackLoadFailed {
        #[source]
        source: shaderpack::Error,
    },

    #[error("Unknown context: {name}")]
    #[diagnostic(
        code(pack::unknown_context),
        help("Use base, overworld, nether, end, a folder name (world0, world-1, world1) or a dimension id")
    )]
    UnknownContext { name: String },

    #[error("Language not found: {code}")]
    #[diagnostic(
        code(lang::not_found),
        help("Run the lang command without --code to list the available languages")
    )]
    LanguageNotFound { code: String },

    #[error("Could not determine the option directory")]
    #[diagnostic(
        code(config::no_config_dir),
        help("Pass --config-dir or set one with `config set-dir <DIR>`")
    )]
    NoConfigDir,

    #[error("Invalid pack name: {path}")]
    #[diagnostic(
        code(pack::invalid_name),
        help("Pass --name to choose the name the pack's options are stored under")
    )]
    InvalidPackName { path: PathBuf },

    #[error("Failed to save options")]
    #[diagnostic(code(config::save_failed), help("Check file permissions for the option directory"))]
    ConfigSaveFailed {
        #[source]
        source: shaderpack::Error,
    },

    #[error("IO operation failed")]
    #[diagnostic(code(io::operation_failed))]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl CliError {
    pub fn pack_not_found(path: PathBuf) -> Self {
        Self::PackNotFound { path }
    }

    pub fn pack_load_failed(source: shaderpack::Error) -> Self {
        match source {
            shaderpack::Error::UnknownContext(name) => Self::UnknownContext { name },
            shaderpack::Error::InvalidPackRoot(path) => Self::PackNotFound { path: path.into() },
            source => Self::PackLoadFailed { source },
        }
    }

    pub fn language_not_found(code: String) -> Self {
        Self::LanguageNotFound { code }
    }

    pub fn invalid_pack_name(path: PathBuf) -> Self {
        Self::InvalidPackName { path }
    }

    pub fn config_save_failed(source: shaderpack::Error) -> Self {
        Self::ConfigSaveFailed { source }
    }
}
