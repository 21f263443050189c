//! In-memory record source.

use parking_lot::RwLock;

use crate::error::Result;
use crate::record::Record;
use crate::source::{ChangeListener, Listeners, RecordSource, SubscriptionId};

/// A record source backed by a vector in memory.
///
/// Every mutation notifies subscribers after the record lock is released.
#[derive(Debug, Default)]
pub struct MemorySource {
    records: RwLock<Vec<Record>>,
    listeners: Listeners,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source holding the given records.
    pub fn with_records(records: Vec<Record>) -> Self {
        MemorySource {
            records: RwLock::new(records),
            listeners: Listeners::new(),
        }
    }

    /// Replace all records.
    pub fn replace(&self, records: Vec<Record>) {
        *self.records.write() = records;
        self.listeners.notify();
    }

    /// Add a record. An existing record with the same location is replaced.
    pub fn push(&self, record: Record) {
        {
            let mut records = self.records.write();
            records.retain(|r| r.location != record.location);
            records.push(record);
        }
        self.listeners.notify();
    }

    /// Remove the record at a location. Returns false if there was none.
    pub fn remove(&self, location: &str) -> bool {
        let removed = {
            let mut records = self.records.write();
            let before = records.len();
            records.retain(|r| r.location != location);
            records.len() != before
        };
        if removed {
            self.listeners.notify();
        }
        removed
    }

    /// Remove every record.
    pub fn clear(&self) {
        self.records.write().clear();
        self.listeners.notify();
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check whether the source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Number of subscribed listeners.
    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl RecordSource for MemorySource {
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
