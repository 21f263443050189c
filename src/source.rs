//! Record sources.
//!
//! A record source owns the user's file history and hands out a snapshot of
//! it on request. Sources also tell interested parties when the history
//! changed so that cached snapshots can be rebuilt before the next search.
//!
//! # Source Types
//!
//! - [`memory::MemorySource`]: records kept in memory, mutated through its API
//! - [`json::JsonSource`]: records read from a JSON or JSON Lines file
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use lately::record::Record;
//! use lately::source::RecordSource;
//! use lately::source::memory::MemorySource;
//!
//! # fn main() -> lately::error::Result<()> {
//! let source = MemorySource::new();
//! let changes = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&changes);
//! let id = source.subscribe(Arc::new(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! }));
//!
//! source.push(Record::new("notes.md", "file:///home/u/notes.md"));
//! assert_eq!(source.list_current_records()?.len(), 1);
//! assert_eq!(changes.load(Ordering::SeqCst), 1);
//!
//! assert!(source.unsubscribe(id));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::error::Result;
use crate::record::Record;

pub mod json;
pub mod memory;

/// Callback invoked when a source changed.
pub type ChangeListener = Arc<dyn Fn() + Send + Sync>;

/// Handle returned by [`RecordSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random subscription id.
    pub fn new() -> Self {
        SubscriptionId(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A provider of recently used file records.
pub trait RecordSource: Send + Sync + fmt::Debug {
    /// Get a snapshot of the current records.
    fn list_current_records(&self) -> Result<Vec<Record>>;

    /// Register a callback fired after the records changed.
    fn subscribe(&self, listener: ChangeListener) -> SubscriptionId;

    /// Remove a callback. Returns false if the id was unknown.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Registered change listeners of a source.
#[derive(Default)]
pub struct Listeners {
    listeners: Mutex<AHashMap<SubscriptionId, ChangeListener>>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

impl Listeners {
    /// Create an empty listener set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener.
    pub fn add(&self, listener: ChangeListener) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.listeners.lock().insert(id, listener);
        id
    }

    /// Remove a listener.
    pub fn remove(&self, id: SubscriptionId) -> bool {
        self.listeners.lock().remove(&id).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Check whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invoke every listener.
    ///
    /// The listener map is not locked while callbacks run, so a callback may
    /// subscribe or unsubscribe.
    pub fn notify(&self) {
        let listeners: Vec<ChangeListener> = self.listeners.lock().values().cloned().collect();
        for listener in listeners {
            listener();
        }
    }
}
