//! Mission data structure and derived counts.
//!
//! This module defines the `Task` record persisted for every mission on the
//! board, the character caps enforced at the input boundaries, and the
//! `Stats` view derived from a task list.

use serde::{Deserialize, Serialize};

/// Maximum length, in characters, of the text typed for a new mission.
pub const MAX_NEW_TEXT_CHARS: usize = 150;

/// Maximum length, in characters, of the text typed while editing a mission.
pub const MAX_EDIT_TEXT_CHARS: usize = 80;

/// A single mission on the board.
///
/// Field order in the persisted JSON is irrelevant; unknown fields are ignored
/// so snapshots written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

impl Task {
    /// Build a fresh, not yet completed mission.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        Task {
            id,
            text: text.into(),
            completed: false,
        }
    }
}

/// Counts shown under the mission list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Stats {
    /// Recompute the counts from a task list.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        Stats {
            total,
            completed,
            pending: total - completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_on_empty_list_are_zero() {
        assert_eq!(Stats::from_tasks(&[]), Stats::default());
    }

    #[test]
    fn stats_split_completed_and_pending() {
        let mut done = Task::new(1, "Steal the car");
        done.completed = true;
        let tasks = vec![done, Task::new(2, "Deliver package"), Task::new(3, "Lose the cops")];

        let stats = Stats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
    }

    #[test]
    fn task_deserializes_regardless_of_field_order() {
        let t: Task =
            serde_json::from_str(r#"{"completed":true,"text":"Meet Lance","id":1700000000000}"#)
                .unwrap();
        assert_eq!(t.id, 1_700_000_000_000);
        assert!(t.completed);
    }
}
