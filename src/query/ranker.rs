//! Ordering of scored records.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// A record together with its score for the current terms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHit {
    /// The matched record, shared with the candidate pool it came from.
    pub record: Arc<Record>,
    /// The relevance score. Always positive for emitted hits.
    pub score: u32,
}

impl RecordHit {
    /// Create a new hit.
    pub fn new(record: Arc<Record>, score: u32) -> Self {
        RecordHit { record, score }
    }
}

/// Total order over hits: score descending, then last visit descending, then
/// name ascending.
///
/// Records without a visit time sort below any visited record. Names compare
/// case-sensitively by code point.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRanker;

impl ResultRanker {
    /// Create a new ranker.
    pub fn new() -> Self {
        ResultRanker
    }

    /// Compare two hits. `Less` means `a` is shown before `b`.
    pub fn compare(&self, a: &RecordHit, b: &RecordHit) -> Ordering {
        b.score
            .cmp(&a.score)
            .then_with(|| b.record.last_visited.cmp(&a.record.last_visited))
            .then_with(|| a.record.name.cmp(&b.record.name))
    }

    /// Sort hits in place. Hits that compare equal keep their relative order.
    pub fn sort(&self, hits: &mut [RecordHit]) {
        hits.sort_by(|a, b| self.compare(a, b));
    }
}
