use clap::builder::{styling::AnsiColor, Styles};
use clap::ColorChoice;
use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use commands::{
    info_shader_pack, list_languages, list_programs, reset_option, set_config_dir, set_option,
    show_pack_config, InfoShaderPackArgs, ListLanguagesArgs, ListProgramsArgs,
};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod errors;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the per-pack option files (overrides config.toml)
    #[arg(long, global = true)]
    config_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a summary of a shader pack
    Info {
        /// The shader pack directory
        root: String,

        /// The name the pack's options are stored under (defaults to the folder name)
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List the programs used in one context
    Programs {
        /// The shader pack directory
        root: String,

        /// base, overworld, nether, end, a folder name (world0) or a dimension id
        #[arg(short, long, default_value = "base")]
        context: String,

        #[arg(short, long)]
        name: Option<String>,
    },
    /// List the pack's languages, or the entries of one language
    Lang {
        /// The shader pack directory
        root: String,

        /// Language code to print, e.g. en_us
        #[arg(short, long)]
        code: Option<String>,

        #[arg(short, long)]
        name: Option<String>,
    },
    /// Inspect or edit stored pack options
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the stored options of a pack
    Show { pack: String },
    /// Store a value for an option
    Set {
        pack: String,
        key: String,
        value: String,
    },
    /// Remove a stored value so the pack default applies again
    Reset { pack: String, key: String },
    /// Remember the option directory in config.toml
    SetDir { dir: String },
}

fn parse_args() -> Args {
    // Configure colored/styled help output
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default())
        .placeholder(AnsiColor::Blue.on_default());

    let matches = Args::command()
        .styles(styles)
        .color(ColorChoice::Auto)
        .get_matches();

    match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shaderpack=info,shaderpack_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let args = parse_args();
    let config_dir = args.config_dir;

    match args.command {
        Commands::Info { root, name } => info_shader_pack(InfoShaderPackArgs {
            root,
            name,
            config_dir,
        }),
        Commands::Programs {
            root,
            context,
            name,
        } => list_programs(ListProgramsArgs {
            root,
            context,
            name,
            config_dir,
        }),
        Commands::Lang { root, code, name } => list_languages(ListLanguagesArgs {
            root,
            code,
            name,
            config_dir,
        }),
        Commands::Config { command } => match command {
            ConfigCommands::Show { pack } => show_pack_config(&pack, config_dir),
            ConfigCommands::Set { pack, key, value } => {
                set_option(&pack, key, value, config_dir)
            }
            ConfigCommands::Reset { pack, key } => reset_option(&pack, &key, config_dir),
            ConfigCommands::SetDir { dir } => set_config_dir(dir),
        },
    }
}
