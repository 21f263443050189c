//! Initial searches and narrowing refinements.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::query::rater::RecordRater;
use crate::query::ranker::{RecordHit, ResultRanker};
use crate::query::scorer::MatchScorer;
use crate::query::terms::Terms;
use crate::record::Record;
use crate::search::config::SearchConfig;

/// Ranked hits for one term sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The terms the hits were rated against.
    pub terms: Terms,
    /// Matching records in ranked order.
    pub hits: Vec<RecordHit>,
}

impl SearchResults {
    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Check whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Iterate over the matched records.
    pub fn records(&self) -> impl Iterator<Item = &Arc<Record>> {
        self.hits.iter().map(|hit| &hit.record)
    }
}

/// Runs searches over a candidate pool.
///
/// `initial` rates every record of a source collection. `refine` only rates
/// the hits of an earlier search, which is enough as long as the new terms
/// narrow the old ones. Both calls rate from scratch with the full term
/// sequence; no score is carried over between calls.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    rater: RecordRater,
    ranker: ResultRanker,
}

impl SearchSession {
    /// Create a session with default scoring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session from a configuration.
    pub fn with_config(config: &SearchConfig) -> Self {
        SearchSession {
            rater: RecordRater::new(Arc::new(MatchScorer::with_weights(config.weights))),
            ranker: ResultRanker::new(),
        }
    }

    /// Create a session around a custom rater.
    pub fn with_rater(rater: RecordRater) -> Self {
        SearchSession {
            rater,
            ranker: ResultRanker::new(),
        }
    }

    /// Get the rater.
    pub fn rater(&self) -> &RecordRater {
        &self.rater
    }

    /// Search the whole source collection.
    pub fn initial(&self, source: &[Arc<Record>], terms: &Terms) -> SearchResults {
        let hits = self.collect(source.iter(), terms);
        debug!(
            terms = %terms,
            candidates = source.len(),
            hits = hits.len(),
            "initial search"
        );

        SearchResults {
            terms: terms.clone(),
            hits,
        }
    }

    /// Search again among the hits of a previous search.
    ///
    /// `terms` must be the complete current term sequence, not only the
    /// newly typed tokens.
    pub fn refine(&self, previous: &SearchResults, terms: &Terms) -> SearchResults {
        if !terms.extends(&previous.terms) {
            debug!(
                previous = %previous.terms,
                terms = %terms,
                "refining with terms that do not narrow the previous search"
            );
        }
        self.refine_hits(&previous.hits, terms)
    }

    /// Search again among previously returned hits.
    pub fn refine_hits(&self, previous: &[RecordHit], terms: &Terms) -> SearchResults {
        let hits = self.collect(previous.iter().map(|hit| &hit.record), terms);
        debug!(
            terms = %terms,
            candidates = previous.len(),
            hits = hits.len(),
            "refined search"
        );

        SearchResults {
            terms: terms.clone(),
            hits,
        }
    }

    fn collect<'a, I>(&self, candidates: I, terms: &Terms) -> Vec<RecordHit>
    where
        I: Iterator<Item = &'a Arc<Record>>,
    {
        let mut hits: Vec<RecordHit> = candidates
            .filter_map(|record| {
                let score = self.rater.rate(record, terms);
                (score > 0).then(|| RecordHit::new(Arc::clone(record), score))
            })
            .collect();

        self.ranker.sort(&mut hits);
        hits
    }
}
