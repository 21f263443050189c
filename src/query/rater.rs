//! AND-combined rating of a record against a term sequence.

use std::sync::Arc;

use tracing::trace;

use crate::query::scorer::{MatchScorer, Scorer};
use crate::query::terms::Terms;
use crate::record::Record;

/// Rates records against every term of a query.
///
/// A record has to match every term to qualify. The returned score is the sum
/// of the per-term scores, or zero as soon as one term does not match. Rating
/// stops at the first term that disqualifies the record.
#[derive(Debug, Clone)]
pub struct RecordRater {
    scorer: Arc<dyn Scorer>,
}

impl Default for RecordRater {
    fn default() -> Self {
        Self::new(Arc::new(MatchScorer::new()))
    }
}

impl RecordRater {
    /// Create a new rater around a per-term scorer.
    pub fn new(scorer: Arc<dyn Scorer>) -> Self {
        RecordRater { scorer }
    }

    /// Get the per-term scorer.
    pub fn scorer(&self) -> &Arc<dyn Scorer> {
        &self.scorer
    }

    /// Rate a record against all terms.
    ///
    /// An empty term sequence never matches and yields zero.
    pub fn rate(&self, record: &Record, terms: &Terms) -> u32 {
        let mut total: u32 = 0;

        for term in terms.iter() {
            let score = self.scorer.score(record, term);
            if score == 0 {
                total = 0;
                break;
            }
            total = total.saturating_add(score);
        }

        trace!(
            scorer = self.scorer.name(),
            name = %record.name,
            score = total,
            "rated record"
        );
        total
    }

    /// Check whether a record matches every term.
    pub fn matches(&self, record: &Record, terms: &Terms) -> bool {
        self.rate(record, terms) > 0
    }
}
