//! Command implementations for the CLI interface.
//!
//! Each subcommand maps onto one task store operation, plus read-only views
//! (list, stats) and the TUI launcher.

use anyhow::Context;
use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::config::Config;
use crate::db::{EditOutcome, TaskStore};
use crate::error::Error;
use crate::fields::StatusFilter;
use crate::task::{Task, MAX_EDIT_TEXT_CHARS, MAX_NEW_TEXT_CHARS};
use crate::tui::run::run_tui;

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive mission board (default).
    Ui,

    /// Accept a new mission.
    Add {
        /// Mission text. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List missions, newest first.
    List {
        /// Which missions to show.
        #[arg(long, value_enum, default_value_t = StatusFilter::All)]
        status: StatusFilter,
        /// Print the stored JSON snapshot instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Flip a mission between pending and completed.
    Toggle {
        /// Mission ID.
        id: u64,
    },

    /// Replace a mission's text.
    Edit {
        /// Mission ID.
        id: u64,
        /// New text. Multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Delete a mission.
    Delete {
        /// Mission ID.
        id: u64,
    },

    /// Show mission counts.
    Stats,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Launch the terminal user interface.
pub fn cmd_ui(store: TaskStore, config: &Config) -> anyhow::Result<()> {
    run_tui(store, config).context("mission board UI failed")
}

/// Add a new mission to the front of the board.
pub fn cmd_add(store: &mut TaskStore, words: Vec<String>) -> anyhow::Result<()> {
    let text = checked_text(&words, MAX_NEW_TEXT_CHARS)?;
    let task = store.create(&text)?.clone();
    ensure_saved(store)?;
    println!("Mission accepted: #{} {}", task.id, task.text);
    Ok(())
}

/// Print missions as a table or as JSON.
pub fn cmd_list(store: &TaskStore, status: StatusFilter, json: bool) -> anyhow::Result<()> {
    let tasks: Vec<&Task> = store.tasks().iter().filter(|t| status.matches(t)).collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }
    if tasks.is_empty() {
        println!("No missions in progress. Miami is waiting...");
        return Ok(());
    }
    print_table(&tasks);
    Ok(())
}

/// Toggle a mission's completed flag.
pub fn cmd_toggle(store: &mut TaskStore, id: u64) -> anyhow::Result<()> {
    if !store.toggle_complete(id) {
        return Err(Error::NotFound(id).into());
    }
    ensure_saved(store)?;
    let completed = store.get(id).is_some_and(|t| t.completed);
    println!(
        "Mission #{id} marked {}",
        if completed { "completed" } else { "pending" }
    );
    Ok(())
}

/// Replace a mission's text.
pub fn cmd_edit(store: &mut TaskStore, id: u64, words: Vec<String>) -> anyhow::Result<()> {
    let text = checked_text(&words, MAX_EDIT_TEXT_CHARS)?;
    match store.edit_text(id, &text) {
        EditOutcome::Applied => {}
        EditOutcome::Blank => return Err(Error::BlankText.into()),
        EditOutcome::NotFound => return Err(Error::NotFound(id).into()),
    }
    ensure_saved(store)?;
    println!("Updated mission #{id}");
    Ok(())
}

/// Delete a mission.
pub fn cmd_delete(store: &mut TaskStore, id: u64) -> anyhow::Result<()> {
    if !store.delete(id) {
        return Err(Error::NotFound(id).into());
    }
    ensure_saved(store)?;
    println!("Deleted mission #{id}");
    Ok(())
}

/// Print total, completed and pending counts.
pub fn cmd_stats(store: &TaskStore) -> anyhow::Result<()> {
    let stats = store.stats();
    println!("{:<12} {}", "Missions", stats.total);
    println!("{:<12} {}", "Completed", stats.completed);
    println!("{:<12} {}", "Pending", stats.pending);
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// Join CLI words and apply the same rules as the TUI input boxes.
fn checked_text(words: &[String], limit: usize) -> Result<String, Error> {
    let text = words.join(" ").trim().to_string();
    if text.is_empty() {
        return Err(Error::BlankText);
    }
    let len = text.chars().count();
    if len > limit {
        return Err(Error::TooLong { len, limit });
    }
    Ok(text)
}

/// The process exits right after a CLI command, so a failed write is fatal here.
fn ensure_saved(store: &mut TaskStore) -> Result<(), Error> {
    match store.take_save_error() {
        Some(e) => Err(Error::SaveFailed(e)),
        None => Ok(()),
    }
}

/// Print missions in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!("{:<15} {:<6} {}", "ID", "Done", "Mission");
    for t in tasks {
        println!(
            "{:<15} {:<6} {}",
            t.id,
            if t.completed { "[x]" } else { "[ ]" },
            truncate(&t.text, 80)
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split(' ').map(str::to_string).collect()
    }

    #[test]
    fn checked_text_joins_and_trims() {
        assert_eq!(
            checked_text(&words("Meet  Ken Rosenberg "), 150).unwrap(),
            "Meet  Ken Rosenberg"
        );
    }

    #[test]
    fn checked_text_rejects_blank_and_long() {
        assert!(matches!(checked_text(&words("   "), 150), Err(Error::BlankText)));
        let long = vec!["x".repeat(81)];
        assert!(matches!(
            checked_text(&long, 80),
            Err(Error::TooLong { len: 81, limit: 80 })
        ));
        assert!(checked_text(&["é".repeat(80)], 80).is_ok());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
