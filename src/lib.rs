//! # Lately
//!
//! An in-memory search provider over a user's recently used files.
//!
//! ## Features
//!
//! - Prefix and substring matching over file names and locations
//! - AND-combined multi-term scoring with early elimination
//! - Deterministic ranking by score, recency and name
//! - Cheap narrowing of an earlier result set while the user keeps typing
//! - Pluggable record sources with change notification
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lately::prelude::*;
//!
//! let history = vec![
//!     Arc::new(Record::builder().name("Budget Report").location("/home/u/docs/budget.pdf").last_visited_secs(100).build()),
//!     Arc::new(Record::builder().name("report_final").location("/home/u/report.txt").last_visited_secs(200).build()),
//! ];
//!
//! let session = SearchSession::new();
//! let results = session.initial(&history, &Terms::parse("report"));
//! assert_eq!(results.hits[0].record.name, "report_final");
//!
//! let narrowed = session.refine(&results, &Terms::parse("report budget"));
//! assert_eq!(narrowed.hits.len(), 1);
//! assert_eq!(narrowed.hits[0].record.name, "Budget Report");
//! ```

pub mod cli;
pub mod error;
pub mod provider;
pub mod query;
pub mod record;
pub mod search;
pub mod source;

pub mod prelude {
    pub use crate::error::{LatelyError, Result};
    pub use crate::query::{MatchScorer, RecordHit, RecordRater, ResultRanker, Scorer, Terms};
    pub use crate::record::{LaunchTarget, Record};
    pub use crate::search::{SearchConfig, SearchResults, SearchSession};
    pub use crate::source::RecordSource;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
