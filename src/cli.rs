use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Retro mission board for the terminal.
/// Missions are stored as JSON in the data directory (see --data-dir).
#[derive(Parser)]
#[command(name = "mb", version, about = "Vice City mission board: a retro task list for the terminal")]
pub struct Cli {
    /// Directory holding missions, config and logs.
    #[arg(long, global = true, env = "MISSION_BOARD_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to config.toml in the data directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
