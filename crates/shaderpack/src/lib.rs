//! Shader pack loader.
//!
//! Opens a shader pack directory and builds everything a renderer needs from
//! it:
//!
//! - **Program sets**: base programs plus optional per-dimension override
//!   folders (`world0`, `world-1`, `world1`), composed slot by slot
//! - **Language tables**: every file under `lang/`, keyed by normalized code
//! - **Id maps**: `item.properties`, `entity.properties`, `block.properties`
//! - **Custom noise texture**: the file named by `texture.noise`
//! - **Options and config**: `#define` options discovered in the sources, with
//!   user values persisted per pack
//!
//! # Example
//!
//! ```no_run
//! use shaderpack::{PackIdentity, ProgramContext, ProgramSlot, ShaderPack};
//! use camino::Utf8Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let identity = PackIdentity::new("BSL_v8.2", "/home/me/.config/shaderpack/packs");
//! let pack = ShaderPack::load(Utf8Path::new("/home/me/shaderpacks/BSL_v8.2"), identity)?;
//!
//! let nether = pack.program_set(ProgramContext::Nether);
//! if let Some(program) = nether.get(ProgramSlot::Final) {
//!     println!("final pass: {} bytes of fragment source", program.fragment().len());
//! }
//!
//! for option in pack.options().iter() {
//!     println!("{} = {}", option.name, pack.options().effective_value(&option.name, pack.config()).unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod id_map;
pub mod include;
pub mod lang;
pub mod options;
pub mod pack;
pub mod program;
pub mod properties;
pub mod texture;
pub mod utils;

#[cfg(test)]
mod tests;

// Re-export main types
pub use compose::{ComposedProgramSet, ProgramContext, SlotOrigin};
pub use config::{ConfigState, ShaderPackConfig};
pub use error::{Error, Result};
pub use id_map::{BlockEntry, IdMap, NamespacedId};
pub use lang::LanguageMap;
pub use options::{OptionKind, ShaderOption, ShaderOptions};
pub use pack::{PackIdentity, ShaderPack};
pub use program::{ProgramLayer, ProgramSlot, ProgramSource};
pub use properties::{CloudSetting, Directive, ShaderProperties};
pub use texture::{CustomTexture, TextureSampling};

pub use shaderpack_properties::{Encoding, Properties};
