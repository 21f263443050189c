//! JSON record source.
//!
//! Reads a history file in one of two layouts. A JSON array:
//! ```json
//! [{"name": "Budget Report", "location": "file:///home/u/budget.pdf"}]
//! ```
//! or JSON Lines, one record per line:
//! ```jsonl
//! {"name": "Budget Report", "location": "file:///home/u/budget.pdf", "last_visited": "2024-05-01T10:00:00Z"}
//! {"name": "notes.md", "uri": "file:///home/u/notes.md"}
//! ```
//! Rows that are not JSON objects are skipped with a warning.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LatelyError, Result};
use crate::record::Record;
use crate::source::{ChangeListener, Listeners, RecordSource, SubscriptionId};

/// A record source loaded from a JSON or JSON Lines file.
#[derive(Debug)]
pub struct JsonSource {
    path: PathBuf,
    records: RwLock<Vec<Record>>,
    listeners: Listeners,
}

impl JsonSource {
    /// Open a history file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let records = load_records(&path)?;
        Ok(JsonSource {
            path,
            records: RwLock::new(records),
            listeners: Listeners::new(),
        })
    }

    /// Path of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the history file and notify subscribers.
    ///
    /// On error the previously loaded records are kept.
    pub fn reload(&self) -> Result<usize> {
        let records = load_records(&self.path)?;
        let count = records.len();
        *self.records.write() = records;
        self.listeners.notify();
        Ok(count)
    }
}

impl RecordSource for JsonSource {
    fn list_current_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.read().clone())
    }

    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId {
        self.listeners.add(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.remove(id)
    }
}

/// Parse history file content, detecting the layout from the first character.
pub fn parse_records(content: &str) -> Result<Vec<Record>> {
    let trimmed = content.trim_start();

    let rows: Vec<(usize, Value)> = if trimmed.starts_with('[') {
        let values: Vec<Value> = serde_json::from_str(trimmed)?;
        values.into_iter().enumerate().map(|(i, v)| (i + 1, v)).collect()
    } else {
        let mut rows = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(value) => rows.push((line_num + 1, value)),
                Err(e) => warn!(line = line_num + 1, error = %e, "skipping unparseable record"),
            }
        }
        rows
    };

    let mut records = Vec::with_capacity(rows.len());
    for (row, value) in rows {
        if !value.is_object() {
            warn!(row, "skipping record that is not a JSON object");
            continue;
        }
        match serde_json::from_value::<Record>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!(row, error = %e, "skipping malformed record"),
        }
    }

    Ok(records)
}

fn load_records(path: &Path) -> Result<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| {
        LatelyError::history(format!("failed to read {}: {e}", path.display()))
    })?;
    let records = parse_records(&content)?;
    debug!(path = %path.display(), records = records.len(), "loaded history");
    Ok(records)
}
