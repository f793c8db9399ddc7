use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use apilint_lib::output::OutputFormat;

mod cli_utils;
mod commands;

#[derive(Parser)]
#[command(name = "apilint", author, version, about = "Run api-linter on protobuf files and report what it finds", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Flags shared by every command that needs linter settings.
///
/// Each flag overrides the matching key of the settings file.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Workspace root [default: directory of the settings file, or the nearest .git ancestor]
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Settings file to use instead of searching for .apilint.toml
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Linter command, one argument per occurrence (e.g. --command go --command run --command <pkg>)
    #[arg(long = "command", value_name = "ARG", allow_hyphen_values = true)]
    pub command: Vec<String>,

    /// Linter config file passed with --config, absolute or relative to the workspace root
    #[arg(long, value_name = "FILE")]
    pub lint_config: Option<String>,

    /// Include path passed with -I, relative to the workspace root
    #[arg(short = 'I', long = "proto-path", value_name = "DIR")]
    pub proto_paths: Vec<String>,

    /// Directory to lint from, most specific first; files outside every directory are skipped
    #[arg(long = "directory", value_name = "DIR")]
    pub directories: Vec<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Protobuf files to lint
    #[arg(required = true, value_name = "FILES")]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Output format: text (default), concise, json
    #[arg(long, short = 'o', value_name = "FORMAT", default_value = "text")]
    pub output_format: OutputFormat,

    /// Print nothing; report through the exit code only
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint protobuf files with api-linter
    Check(CheckArgs),
    /// Report whether the configured linter command is installed
    Probe {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print the effective settings as TOML
    Config {
        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Print the JSON schema of the settings file
    Schema,
    /// Start the Language Server Protocol server
    Server {
        /// TCP port to listen on (for debugging)
        #[arg(long)]
        port: Option<u16>,

        /// Use stdio for communication (default)
        #[arg(long)]
        stdio: bool,

        /// Settings file to use instead of searching the workspace
        #[arg(long, value_name = "FILE")]
        settings: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (detected from $SHELL if omitted)
        #[arg(value_enum)]
        shell: Option<Shell>,

        /// List available shells
        #[arg(long, short = 'l')]
        list: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose asks for debug output
    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match cli.command {
        Commands::Check(args) => commands::check::handle_check(args),
        Commands::Probe { settings } => commands::probe::handle_probe(&settings),
        Commands::Config { settings } => commands::config::handle_config(&settings),
        Commands::Schema => commands::schema::handle_schema(),
        Commands::Server { port, stdio, settings } => commands::server::handle_server(port, stdio, settings),
        Commands::Completions { shell, list } => commands::completions::handle_completions(shell, list),
    }
}
