use crate::errors::CliError;
use crate::println_pad;
use crate::utils::load_pack;
use colored::Colorize;
use miette::Result;

pub struct ListLanguagesArgs {
    pub root: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub config_dir: Option<String>,
}

pub fn list_languages(args: ListLanguagesArgs) -> Result<()> {
    let pack = load_pack(&args.root, args.name, args.config_dir)?;
    let languages = pack.language_map();

    let Some(code) = args.code else {
        println_pad!(
            "{} {}",
            "🌐 Languages:".bright_blue().bold(),
            format!("({})", languages.len()).dimmed()
        );
        for (code, table) in languages {
            println_pad!(
                "   {} {} {}",
                "•".bright_cyan(),
                code.bright_cyan().bold(),
                format!("({} entries)", table.len()).dimmed()
            );
        }
        return Ok(());
    };

    let code = code.to_lowercase();
    let table = languages
        .get(&code)
        .ok_or_else(|| CliError::language_not_found(code.clone()))?;

    println_pad!("{} {}", "🌐 Language:".bright_blue().bold(), code.bright_cyan().bold());
    for (key, value) in table.iter() {
        println_pad!("   {} = {}", key.bright_white(), value);
    }

    Ok(())
}
