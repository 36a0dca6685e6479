//! DevBuddy CLI - notes, tasks and bookmarks from the terminal
//!
//! Everything is stored as YAML under `~/.devbuddy/`.

mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::bookmark::run_bookmark;
use crate::commands::category::run_category;
use crate::commands::common::{open_services, resolve_storage_config};
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::export::run_export;
use crate::commands::note::run_note;
use crate::commands::notebook::run_notebook;
use crate::commands::search::run_search;
use crate::commands::stats::run_stats;
use crate::commands::task::run_task;
use crate::error::CliError;

const DEFAULT_LOG_FILTER: &str = "devbuddy=warn,devbuddy_core=warn";

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell, output } = &cli.command {
        return run_completions(*shell, output.as_deref());
    }

    let config = resolve_storage_config(cli.home.as_deref())?;
    if let Commands::Config { json } = cli.command {
        return run_config(&config, json);
    }

    let services = open_services(&config)?;
    tracing::debug!(notes = %config.notes_dir.display(), "storage opened");

    match cli.command {
        Commands::Notebook { command } => run_notebook(command, &services.notes)?,
        Commands::Note { command } => run_note(command, &services.notes)?,
        Commands::Search { query, json } => run_search(&query, json, &services.notes)?,
        Commands::Task { command } => run_task(command, &services.tasks)?,
        Commands::Category { command } => run_category(command, &services.tasks)?,
        Commands::Stats { json } => run_stats(json, &services.tasks)?,
        Commands::Bookmark { command } => run_bookmark(command, &services.bookmarks)?,
        Commands::Export {
            format,
            notebook,
            output,
        } => run_export(format, notebook.as_deref(), output.as_deref(), &services.notes)?,
        Commands::Completions { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}
