use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::export::ExportTarget;
use commands::{config, export};
use media_sync_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "imdb-export")]
#[command(about = "Export IMDb watchlist, lists and ratings using browser session cookies")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr
    /// (logs/imdb-export.log under the config directory when PATH is omitted)
    #[arg(long, global = true, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the watchlist
    Watchlist,
    /// Export every custom list on the account
    Lists,
    /// Export a single list by id
    List {
        /// List id, e.g. ls012345678
        id: String,
    },
    /// Export title ratings
    Ratings,
    /// Export everything enabled in the [export] config section
    All,
    /// Manage configuration and session cookies
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current configuration (masks cookies)
    Show {
        /// Show cookie values unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Store the IMDb session cookies
    #[command(long_about = "Store the at-main and ubid-main cookies copied from a browser logged in to IMDb. Values not given as flags are prompted for without echo.")]
    SetCookies {
        /// Value of the at-main cookie
        #[arg(long)]
        at_main: Option<String>,

        /// Value of the ubid-main cookie
        #[arg(long)]
        ubid_main: Option<String>,
    },
    /// Write a default config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = logging::resolve_log_file(cli.log_file, &PathManager::default());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Watchlist => export::run_export(ExportTarget::Watchlist, &output).await,
        Commands::Lists => export::run_export(ExportTarget::Lists, &output).await,
        Commands::List { id } => export::run_export(ExportTarget::List(id), &output).await,
        Commands::Ratings => export::run_export(ExportTarget::Ratings, &output).await,
        Commands::All => export::run_export(ExportTarget::All, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
