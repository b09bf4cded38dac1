mod cmd;
mod output;
mod prompt;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cmd::{instance::DirsSubcommand, project::ProjSubcommand, run::RunArgs, Opts};
use lc_core::{error::LcError, paths, store::JsonStore};
use output::Output;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "lc",
    about = "Run shell commands recursively throughout the predefined directories",
    version,
    propagate_version = true
)]
struct Cli {
    /// Where the registry and config live (default: platform data dir)
    #[arg(long, global = true, env = paths::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true, short = 'y')]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage projects
    Proj {
        #[command(subcommand)]
        subcommand: ProjSubcommand,
    },

    /// Manage the active project's instance directories
    Dirs {
        #[command(subcommand)]
        subcommand: DirsSubcommand,
    },

    /// Run a shell command in each instance of the active project
    Run(RunArgs),

    /// Find an instance of the active project and show its index
    Search { name: String },

    /// Count the active project's instances
    Total,

    /// Dump all data to <dir>/lcdb_dump.json
    Dump { dir: PathBuf },

    /// Replace all data with the contents of a dump file
    Restore { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = paths::resolve_data_dir(cli.data_dir.as_deref());
    let opts = Opts {
        json: cli.json,
        yes: cli.yes,
    };

    if let Err(e) = dispatch(cli.command, &data_dir, opts) {
        match e.downcast_ref::<LcError>() {
            Some(err) if err.is_declined() => {
                if opts.json {
                    let declined = serde_json::json!({ "declined": true });
                    if let Err(e) = output::print_json(&declined) {
                        Output::stderr().danger(format!("{e:#}"));
                        std::process::exit(1);
                    }
                } else {
                    Output::stdout().warning(err);
                }
            }
            _ => {
                // Print the full error chain (anyhow's alternate Display)
                Output::stderr().danger(format!("{e:#}"));
                std::process::exit(1);
            }
        }
    }
}

fn dispatch(command: Commands, data_dir: &Path, opts: Opts) -> anyhow::Result<()> {
    let mut store = JsonStore::open(data_dir)
        .with_context(|| format!("failed to open registry in '{}'", data_dir.display()))?;

    match command {
        Commands::Proj { subcommand } => cmd::project::run(&mut store, subcommand, opts),
        Commands::Dirs { subcommand } => cmd::instance::run(&mut store, subcommand, opts),
        Commands::Run(args) => cmd::run::run(&store, data_dir, args, opts),
        Commands::Search { name } => cmd::utility::search(&mut store, &name, opts),
        Commands::Total => cmd::utility::total(&mut store, opts),
        Commands::Dump { dir } => cmd::utility::dump(&store, &dir, opts),
        Commands::Restore { file } => cmd::utility::restore(&mut store, &file, opts),
    }
}
