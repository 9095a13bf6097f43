//! `mb` binary entry point.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mission_board::cli::Cli;
use mission_board::cmd::*;
use mission_board::config::{resolve_data_dir, Config};
use mission_board::db::TaskStore;
use mission_board::error::{exit_codes, Error};
use mission_board::storage::FileStore;

/// Log file written inside the data directory.
const LOG_FILE: &str = "mission-board.log";

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        let code = err
            .downcast_ref::<Error>()
            .map_or(exit_codes::OPERATION_FAILED, Error::exit_code);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Ui);
    if let Commands::Completions { shell } = command {
        cmd_completions(shell);
        return Ok(());
    }

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;
    init_tracing(&data_dir);

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_from_dir(&data_dir),
    };

    let backend = FileStore::open(&data_dir)?;
    let mut store = TaskStore::open(Box::new(backend));

    match command {
        Commands::Ui => cmd_ui(store, &config),
        Commands::Add { text } => cmd_add(&mut store, text),
        Commands::List { status, json } => cmd_list(&store, status, json),
        Commands::Toggle { id } => cmd_toggle(&mut store, id),
        Commands::Edit { id, text } => cmd_edit(&mut store, id, text),
        Commands::Delete { id } => cmd_delete(&mut store, id),
        Commands::Stats => cmd_stats(&store),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Send logs to a file in the data directory so they never draw over the board.
///
/// Filter comes from `MISSION_BOARD_LOG`. Logging is skipped if the file
/// cannot be opened.
fn init_tracing(data_dir: &Path) {
    let filter = EnvFilter::try_from_env("MISSION_BOARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new("mission_board=info"));

    let file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            return;
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .init();
}
