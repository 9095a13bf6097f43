//! # Mission Board
//!
//! A Vice City themed task list for the terminal. Missions can be created,
//! completed, edited in place and deleted, either from the interactive board
//! (`mb` or `mb ui`) or from one-shot CLI commands.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board
//! mb
//!
//! # Accept a mission from the shell
//! mb add Steal the car
//!
//! # See what is left
//! mb list --status pending
//! ```
//!
//! Missions live in `viceCityTodos.json` inside the data directory, next to
//! an optional `config.toml` and the `mission-board.log` file.

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod effects;
pub mod error;
pub mod fields;
pub mod storage;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod particles;
    pub mod run;
    pub mod utils;
}
