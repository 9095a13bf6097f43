//! Persistence boundary: key/value slots and snapshot encoding.
//!
//! The mission list lives under one well-known key. Every save overwrites the
//! whole value; there is no append log and no versioning. Loading never fails:
//! a missing value is an empty list, and an unreadable one is logged and
//! treated as empty. Entries are validated one at a time, so a single bad
//! record does not throw away the rest of the board.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::task::Task;

/// Key the mission list is stored under.
pub const STORAGE_KEY: &str = "viceCityTodos";

/// A durable string slot addressed by key.
pub trait KeyValueStore {
    /// Read the value stored at `key`, or `None` when nothing was ever written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored at `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Directory-backed store: each key is one `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(FileStore {
            dir: dir.to_path_buf(),
        })
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Atomic-ish write via temp + rename.
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let written = File::create(&tmp)
            .and_then(|mut f| {
                f.write_all(value.as_bytes())?;
                f.flush()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and inspect what a `TaskStore` wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a slot with a raw value.
    pub fn with_value(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.slots.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    /// Raw value currently held at `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<()> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(Error::InvalidKey(key.to_string()))
    }
}

/// Serialize the full list and overwrite the slot at `key`.
pub fn save_snapshot(store: &mut dyn KeyValueStore, key: &str, tasks: &[Task]) -> Result<()> {
    let data = serde_json::to_string(tasks)?;
    store.set(key, &data)
}

/// Read the list stored at `key`. Never fails: problems are logged and the
/// affected data is dropped.
pub fn load_snapshot(store: &dyn KeyValueStore, key: &str) -> Vec<Task> {
    match store.get(key) {
        Ok(Some(raw)) => decode_snapshot(&raw),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!("Error reading missions, starting fresh: {e}");
            Vec::new()
        }
    }
}

/// Decode a stored value, keeping every well-formed record in order.
///
/// Records that do not match the schema, carry blank text, or repeat an
/// earlier id are skipped.
pub fn decode_snapshot(raw: &str) -> Vec<Task> {
    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(other) => {
            tracing::warn!(
                "Stored missions are not a list (found {}), starting fresh",
                json_kind(&other)
            );
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!("Error parsing missions, starting fresh: {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let mut tasks = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let task: Task = match serde_json::from_value(entry) {
            Ok(task) => task,
            Err(e) => {
                tracing::warn!(index, "Skipping malformed mission: {e}");
                continue;
            }
        };
        if task.text.trim().is_empty() {
            tracing::warn!(index, id = task.id, "Skipping mission with blank text");
            continue;
        }
        if !seen.insert(task.id) {
            tracing::warn!(index, id = task.id, "Skipping mission with duplicate id");
            continue;
        }
        tasks.push(task);
    }
    tasks
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
