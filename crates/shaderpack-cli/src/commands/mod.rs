mod config;
mod info;
mod lang;
mod programs;

pub use config::{reset_option, set_config_dir, set_option, show_pack_config};
pub use info::{info_shader_pack, InfoShaderPackArgs};
pub use lang::{list_languages, ListLanguagesArgs};
pub use programs::{list_programs, ListProgramsArgs};
