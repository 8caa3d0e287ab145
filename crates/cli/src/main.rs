use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::*;
use mend_core::execution::ExecutorOptions;
use mend_core::manager::{BuildManager, BuildManagerConfig};
use mend_core::MendError;
use tracing_subscriber::EnvFilter;

mod commands;

/// Mend - run out-of-date targets in dependency order
#[derive(Parser)]
#[command(name = "mend")]
#[command(about = "Run only the targets that are out of date, in dependency order")]
#[command(version)]
struct Cli {
    /// Target to run (defaults to the declaration file's default target)
    target: Option<String>,

    /// Declaration file, relative to the directory (defaults to mend.yml)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Directory targets and file paths are resolved against
    #[arg(short = 'C', long, default_value = ".")]
    directory: PathBuf,

    /// Show the execution plan without running anything
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Treat every target as out of date
    #[arg(short = 'B', long)]
    always_run: bool,

    /// Do not print a header before each action
    #[arg(short, long)]
    quiet: bool,

    /// List declared targets
    #[arg(short, long, conflicts_with_all = ["dry_run", "graph", "schema"])]
    list: bool,

    /// Show the dependency graph of all targets
    #[arg(long, conflicts_with_all = ["dry_run", "schema"])]
    graph: bool,

    /// Print the JSON schema of the declaration file
    #[arg(long, conflicts_with = "dry_run")]
    schema: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    if cli.schema {
        return commands::schema::execute();
    }

    let manager = BuildManager::new(BuildManagerConfig {
        root: cli.directory,
        file: cli.file,
    })?;
    let options = ExecutorOptions {
        dry_run: cli.dry_run,
        always_run: cli.always_run,
        quiet: cli.quiet,
    };

    // Dispatch (CLI layer only handles presentation)
    if cli.list {
        commands::list::execute(&manager)
    } else if cli.graph {
        commands::graph::execute(&manager)
    } else if cli.dry_run {
        commands::plan::execute(&manager, cli.target.as_deref(), options)
    } else {
        commands::run::execute(manager, cli.target, options).await
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

/// Distinct exit codes per failure kind; anything outside the engine is 1
fn exit_code(error: &anyhow::Error) -> u8 {
    error
        .downcast_ref::<MendError>()
        .map(MendError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}
