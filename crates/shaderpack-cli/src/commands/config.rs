use crate::errors::CliError;
use crate::utils::config::{self, resolve_config_dir};
use camino::Utf8PathBuf;
use colored::Colorize;
use miette::Result;
use shaderpack::ShaderPackConfig;

fn open_pack_config(pack: &str, config_dir: Option<String>) -> Result<ShaderPackConfig> {
    let dir = resolve_config_dir(config_dir)?;
    let mut cfg = ShaderPackConfig::new(pack, &dir);
    cfg.load();
    Ok(cfg)
}

pub fn show_pack_config(pack: &str, config_dir: Option<String>) -> Result<()> {
    let cfg = open_pack_config(pack, config_dir)?;

    println!();
    println!("  {} {}", "options_file:".bright_white(), cfg.path());
    if cfg.is_empty() {
        println!("  {}", "(no stored options)".bright_yellow());
    }
    for (key, value) in cfg.iter() {
        println!("  {} {}", format!("{}:", key).bright_white(), value.bright_green());
    }
    println!();

    Ok(())
}

pub fn set_option(pack: &str, key: String, value: String, config_dir: Option<String>) -> Result<()> {
    let mut cfg = open_pack_config(pack, config_dir)?;
    let previous = cfg.get(&key).map(str::to_string);

    cfg.set(key.clone(), value.clone());
    cfg.save().map_err(CliError::config_save_failed)?;

    println!("{}", "✓ Option saved".bright_green().bold());
    println!();
    println!(
        "  {} {} → {}",
        format!("{}:", key).bright_white().bold(),
        previous.as_deref().unwrap_or("(unset)").dimmed(),
        value.bright_green()
    );

    Ok(())
}

pub fn reset_option(pack: &str, key: &str, config_dir: Option<String>) -> Result<()> {
    let mut cfg = open_pack_config(pack, config_dir)?;

    match cfg.remove(key) {
        Some(previous) => {
            cfg.save().map_err(CliError::config_save_failed)?;
            println!("{}", "✓ Option reset".bright_green().bold());
            println!();
            println!(
                "  {} {} {}",
                format!("{}:", key).bright_white().bold(),
                previous.dimmed(),
                "(the pack default applies on next load)".bright_cyan()
            );
        }
        None => {
            println!(
                "  {} {}",
                format!("{}:", key).bright_white().bold(),
                "(not set)".bright_yellow()
            );
        }
    }

    Ok(())
}

pub fn set_config_dir(dir: String) -> Result<()> {
    let mut cfg = config::load_config();
    cfg.config_dir = Some(Utf8PathBuf::from(&dir));
    config::save_config(&cfg).map_err(CliError::from)?;

    println!(
        "{}",
        "✓ Option directory set successfully!".bright_green().bold()
    );
    println!();
    println!("  {} {}", "Path:".bright_white().bold(), dir.bright_green());
    if let Some(path) = config::default_config_path() {
        println!("  {} {}", "Config file:".bright_white().bold(), path);
    }

    Ok(())
}
