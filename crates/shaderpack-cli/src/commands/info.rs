use crate::println_pad;
use crate::utils::load_pack;
use colored::Colorize;
use miette::Result;
use shaderpack::{OptionKind, ProgramContext, ShaderPack};

pub struct InfoShaderPackArgs {
    pub root: String,
    pub name: Option<String>,
    pub config_dir: Option<String>,
}

pub fn info_shader_pack(args: InfoShaderPackArgs) -> Result<()> {
    let pack = load_pack(&args.root, args.name, args.config_dir)?;

    println_pad!(
        "{} {}",
        "🎨 Shader pack:".bright_blue().bold(),
        pack.config().pack_name().bright_cyan().bold()
    );
    println_pad!("{} {}", "📁 Root:".bright_green(), pack.root().as_str().bright_white());
    println_pad!(
        "{} {}",
        "⚙️  Options file:".bright_yellow(),
        pack.config().path().as_str().bright_white()
    );

    print_contexts(&pack);
    print_resources(&pack);
    print_options(&pack);

    Ok(())
}

fn print_contexts(pack: &ShaderPack) {
    println_pad!("\n{}", "🧩 Program sets:".bright_magenta().bold());
    for context in ProgramContext::ALL {
        let set = pack.program_set(context);
        let overridden: Vec<String> = set
            .iter()
            .filter(|(slot, _)| set.is_overridden(*slot))
            .map(|(slot, _)| slot.name())
            .collect();

        let layer = match context.override_folder() {
            None => "".normal(),
            Some(folder) if pack.has_override(context) => format!("({}/)", folder).dimmed(),
            Some(folder) => format!("(no {}/)", folder).dimmed(),
        };

        println_pad!(
            "   {} {} {} programs {}",
            "•".bright_cyan(),
            format!("{:<10}", context.name()).bright_cyan().bold(),
            set.len(),
            layer
        );
        if !overridden.is_empty() {
            println_pad!("       overrides: {}", overridden.join(", ").bright_white());
        }
    }
}

fn print_resources(pack: &ShaderPack) {
    let languages: Vec<&str> = pack.language_map().keys().map(String::as_str).collect();
    let id_map = pack.id_map();

    println_pad!("\n{}", "📚 Resources:".bright_magenta().bold());
    println_pad!(
        "   {} languages: {}",
        "•".bright_cyan(),
        if languages.is_empty() {
            "none".dimmed().to_string()
        } else {
            languages.join(", ")
        }
    );
    println_pad!(
        "   {} id maps: {} items, {} entities, {} blocks",
        "•".bright_cyan(),
        id_map.item_count(),
        id_map.entity_count(),
        id_map.block_count()
    );

    let texture = match (pack.properties().noise_texture_path(), pack.custom_noise_texture()) {
        (None, _) => "none".dimmed().to_string(),
        (Some(path), Some(texture)) => format!(
            "{} ({} bytes, blur: {}, clamp: {})",
            path,
            texture.content().len(),
            texture.blur(),
            texture.clamp()
        ),
        (Some(path), None) => format!("{} {}", path, "(unreadable)".bright_red()),
    };
    println_pad!("   {} noise texture: {}", "•".bright_cyan(), texture);
    println_pad!(
        "   {} clouds: {}",
        "•".bright_cyan(),
        pack.properties().clouds()
    );
}

fn print_options(pack: &ShaderPack) {
    let options = pack.options();
    println_pad!(
        "\n{} {}",
        "🔧 Options:".bright_magenta().bold(),
        format!("({})", options.len()).dimmed()
    );

    for option in options.iter() {
        let value = options
            .effective_value(&option.name, pack.config())
            .unwrap_or(option.default.as_str());
        let choices = match &option.kind {
            OptionKind::Boolean => "[true false]".to_string(),
            OptionKind::Value { allowed } => format!("[{}]", allowed.join(" ")),
        };
        let marker = if value == option.default {
            "".normal()
        } else {
            format!("(default {})", option.default).dimmed()
        };

        println_pad!(
            "   {} {} = {} {} {}",
            "•".bright_cyan(),
            option.name.bright_cyan(),
            value.bright_white().bold(),
            choices.dimmed(),
            marker
        );
    }
}
