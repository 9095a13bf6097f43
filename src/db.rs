//! The task store: sole owner and mutator of the mission list.
//!
//! `TaskStore` hydrates from a `KeyValueStore` when opened and writes the full
//! snapshot back after every mutation. The in-memory list is authoritative: a
//! failed write is logged and kept for the caller to report, but never undoes
//! the change or aborts the operation.

use crate::error::{Error, Result};
use crate::storage::{load_snapshot, save_snapshot, KeyValueStore, STORAGE_KEY};
use crate::task::{Stats, Task};

/// Result of committing an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text was replaced and persisted.
    Applied,
    /// The new text was blank after trimming; nothing changed.
    Blank,
    /// No mission has that id; nothing changed.
    NotFound,
}

/// In-memory mission list synchronised to a key/value slot.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    backend: Box<dyn KeyValueStore>,
    key: String,
    save_error: Option<String>,
}

impl TaskStore {
    /// Open the store under the well-known key, hydrating from `backend`.
    pub fn open(backend: Box<dyn KeyValueStore>) -> Self {
        Self::open_with_key(backend, STORAGE_KEY)
    }

    /// Open the store under a custom key.
    pub fn open_with_key(backend: Box<dyn KeyValueStore>, key: &str) -> Self {
        let tasks = load_snapshot(backend.as_ref(), key);
        let next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        tracing::debug!(count = tasks.len(), next_id, "hydrated missions");
        TaskStore {
            tasks,
            next_id,
            backend,
            key: key.to_string(),
            save_error: None,
        }
    }

    /// Current missions, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a mission by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn stats(&self) -> Stats {
        Stats::from_tasks(&self.tasks)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Add a mission at the front of the list.
    ///
    /// Fails with `Error::BlankText` when `raw_text` is empty after trimming.
    pub fn create(&mut self, raw_text: &str) -> Result<&Task> {
        let text = raw_text.trim();
        if text.is_empty() {
            return Err(Error::BlankText);
        }
        let id = self.allocate_id();
        self.tasks.insert(0, Task::new(id, text));
        tracing::info!(id, "mission created");
        self.persist();
        Ok(&self.tasks[0])
    }

    /// Flip the completed flag. Returns `false` when no mission has `id`.
    pub fn toggle_complete(&mut self, id: u64) -> bool {
        let found = match self.get_mut(id) {
            Some(task) => {
                task.completed = !task.completed;
                tracing::info!(id, completed = task.completed, "mission toggled");
                true
            }
            None => {
                tracing::debug!(id, "toggle ignored, no such mission");
                false
            }
        };
        self.persist();
        found
    }

    /// Replace a mission's text with the trimmed `new_text`.
    pub fn edit_text(&mut self, id: u64, new_text: &str) -> EditOutcome {
        let text = new_text.trim();
        if text.is_empty() {
            return EditOutcome::Blank;
        }
        let Some(task) = self.get_mut(id) else {
            return EditOutcome::NotFound;
        };
        task.text = text.to_string();
        tracing::info!(id, "mission edited");
        self.persist();
        EditOutcome::Applied
    }

    /// Remove a mission. Returns `false` when no mission has `id`.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            tracing::info!(id, "mission deleted");
        }
        self.persist();
        removed
    }

    /// Hand over the last write failure, if any, clearing it.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    fn allocate_id(&mut self) -> u64 {
        let mut id = self.next_id;
        while self.get(id).is_some() {
            id = id.wrapping_add(1);
        }
        self.next_id = id.wrapping_add(1);
        id
    }

    fn persist(&mut self) {
        match save_snapshot(self.backend.as_mut(), &self.key, &self.tasks) {
            Ok(()) => self.save_error = None,
            Err(e) => {
                tracing::warn!("Failed to save missions: {e}");
                self.save_error = Some(e.to_string());
            }
        }
    }
}
