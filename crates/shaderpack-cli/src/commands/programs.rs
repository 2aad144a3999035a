use crate::errors::CliError;
use crate::println_pad;
use crate::utils::load_pack;
use colored::Colorize;
use miette::Result;
use shaderpack::SlotOrigin;

pub struct ListProgramsArgs {
    pub root: String,
    pub context: String,
    pub name: Option<String>,
    pub config_dir: Option<String>,
}

pub fn list_programs(args: ListProgramsArgs) -> Result<()> {
    let pack = load_pack(&args.root, args.name, args.config_dir)?;
    let set = pack
        .program_set_for(&args.context)
        .map_err(CliError::pack_load_failed)?;

    println_pad!(
        "{} {} {}",
        "🧩 Programs for".bright_blue().bold(),
        args.context.bright_cyan().bold(),
        format!("({} defined)", set.len()).dimmed()
    );

    for (slot, program) in set.iter() {
        let origin = match set.origin(slot) {
            Some(SlotOrigin::Override) => "override".bright_yellow(),
            _ => "base".bright_green(),
        };
        let stages = if program.geometry().is_some() {
            "vsh gsh fsh"
        } else {
            "vsh fsh"
        };

        println_pad!(
            "   {} {} {} {}",
            "•".bright_cyan(),
            format!("{:<28}", slot.name()).bright_white(),
            format!("{:<8}", origin),
            stages.dimmed()
        );
    }

    Ok(())
}
