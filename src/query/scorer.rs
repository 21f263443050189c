//! Per-term match scoring.
//!
//! A scorer looks at one record and one case-folded term and tells how well
//! the term matches. Prefix matches outrank substring matches, and matches in
//! the display name outrank matches in the location.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{LatelyError, Result};
use crate::record::Record;

/// Trait for per-term record scorers.
pub trait Scorer: Send + Sync + Debug {
    /// Score a single term against a record. Zero means no match.
    fn score(&self, record: &Record, term: &str) -> u32;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// Points awarded per kind of match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// The name starts with the term.
    pub name_prefix: u32,
    /// The name contains the term further in.
    pub name_substring: u32,
    /// The location starts with the term.
    pub location_prefix: u32,
    /// The location contains the term further in.
    pub location_substring: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            name_prefix: 3,
            name_substring: 2,
            location_prefix: 2,
            location_substring: 1,
        }
    }
}

impl ScoreWeights {
    /// Highest score a single term can earn, or `None` if it does not fit
    /// in a `u32`.
    pub fn max_term_score(&self) -> Option<u32> {
        self.name_prefix.checked_add(self.location_prefix)
    }

    /// Check that a prefix match never scores below a substring match and
    /// that a single term score cannot overflow.
    pub fn validate(&self) -> Result<()> {
        if self.name_prefix < self.name_substring {
            return Err(LatelyError::invalid_config(format!(
                "name_prefix ({}) must not be lower than name_substring ({})",
                self.name_prefix, self.name_substring
            )));
        }
        if self.location_prefix < self.location_substring {
            return Err(LatelyError::invalid_config(format!(
                "location_prefix ({}) must not be lower than location_substring ({})",
                self.location_prefix, self.location_substring
            )));
        }
        if self.max_term_score().is_none() {
            return Err(LatelyError::invalid_config(format!(
                "name_prefix ({}) plus location_prefix ({}) overflows a term score",
                self.name_prefix, self.location_prefix
            )));
        }
        Ok(())
    }
}

/// Where a term was found inside a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// The field starts with the term.
    Prefix,
    /// The field contains the term, but not at the start.
    Substring,
    /// The field does not contain the term.
    None,
}

impl MatchKind {
    /// Classify the first occurrence of `term` in an already case-folded field.
    pub fn locate(field: &str, term: &str) -> Self {
        match field.find(term) {
            Some(0) => MatchKind::Prefix,
            Some(_) => MatchKind::Substring,
            None => MatchKind::None,
        }
    }

    fn points(self, prefix: u32, substring: u32) -> u32 {
        match self {
            MatchKind::Prefix => prefix,
            MatchKind::Substring => substring,
            MatchKind::None => 0,
        }
    }
}

/// Prefix/substring scorer over the record name and location.
///
/// With the default weights a term scores between 0 and 5:
///
/// ```
/// use lately::query::scorer::{MatchScorer, Scorer};
/// use lately::record::Record;
///
/// let record = Record::new("report_final", "/home/u/report.txt");
/// // name prefix (3) + location substring (1)
/// assert_eq!(MatchScorer::new().score(&record, "report"), 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    weights: ScoreWeights,
}

impl MatchScorer {
    /// Create a new scorer with the default weights.
    pub fn new() -> Self {
        MatchScorer::default()
    }

    /// Create a new scorer with custom weights.
    pub fn with_weights(weights: ScoreWeights) -> Self {
        MatchScorer { weights }
    }

    /// Get the weights.
    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score a term against pre-folded name and location strings.
    pub fn score_folded(&self, name: &str, location: &str, term: &str) -> u32 {
        let w = &self.weights;
        MatchKind::locate(name, term)
            .points(w.name_prefix, w.name_substring)
            .saturating_add(
                MatchKind::locate(location, term).points(w.location_prefix, w.location_substring),
            )
    }
}

impl Scorer for MatchScorer {
    fn score(&self, record: &Record, term: &str) -> u32 {
        self.score_folded(&record.folded_name(), &record.folded_location(), term)
    }

    fn name(&self) -> &'static str {
        "Match"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> Record {
        Record::new("Budget Report", "/home/u/docs/budget.pdf")
    }

    #[test]
    fn test_match_kind_locate() {
        assert_eq!(MatchKind::locate("report_final", "report"), MatchKind::Prefix);
        assert_eq!(MatchKind::locate("budget report", "report"), MatchKind::Substring);
        assert_eq!(MatchKind::locate("budget report", "memo"), MatchKind::None);
    }

    #[test]
    fn test_name_and_location_contributions() {
        let scorer = MatchScorer::new();

        // name substring (2) + location substring (1)
        assert_eq!(scorer.score(&budget(), "report"), 2);
        assert_eq!(scorer.score(&Record::new("Budget Report", "/home/u/report.pdf"), "report"), 3);

        // name prefix (3) + location substring (1)
        assert_eq!(scorer.score(&budget(), "budget"), 4);

        // location prefix only
        assert_eq!(scorer.score(&budget(), "/home"), 2);

        // no match anywhere
        assert_eq!(scorer.score(&budget(), "invoice"), 0);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let scorer = MatchScorer::new();
        let record = Record::new("REPORT", "FILE:///REPORT");
        assert_eq!(scorer.score(&record, "report"), 4);
        assert_eq!(scorer.score(&record, "file"), 2);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let scorer = MatchScorer::new();
        assert_eq!(scorer.score(&budget(), ""), 5);
        assert_eq!(scorer.score(&Record::default(), ""), 5);
    }

    #[test]
    fn test_score_range() {
        let scorer = MatchScorer::new();
        let max = scorer.weights().max_term_score().unwrap();
        assert_eq!(max, 5);
        assert_eq!(scorer.name(), "Match");

        let records = [
            budget(),
            Record::new("report", "report"),
            Record::new("", ""),
            Record::new("x", "y"),
        ];
        for record in &records {
            for term in ["", "report", "r", "zzz", "budget"] {
                assert!(scorer.score(record, term) <= max);
            }
        }
        assert_eq!(scorer.score(&Record::new("report", "report"), "report"), 5);
    }

    #[test]
    fn test_prefix_not_below_substring() {
        let scorer = MatchScorer::new();
        let prefix = Record::new("plan", "x");
        let substring = Record::new("a plan", "x");
        let none = Record::new("memo", "x");

        assert!(scorer.score(&prefix, "plan") >= scorer.score(&substring, "plan"));
        assert!(scorer.score(&substring, "plan") >= scorer.score(&none, "plan"));
    }

    #[test]
    fn test_custom_weights() {
        let weights = ScoreWeights {
            name_prefix: 10,
            name_substring: 5,
            location_prefix: 0,
            location_substring: 0,
        };
        let scorer = MatchScorer::with_weights(weights);
        assert_eq!(scorer.score(&budget(), "budget"), 10);
        assert_eq!(scorer.score(&budget(), "report"), 5);
        assert_eq!(scorer.weights().max_term_score(), Some(10));
    }

    #[test]
    fn test_weights_validation() {
        assert!(ScoreWeights::default().validate().is_ok());

        let bad = ScoreWeights {
            name_prefix: 1,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = ScoreWeights {
            location_prefix: 0,
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_huge_weights() {
        let weights = ScoreWeights {
            name_prefix: u32::MAX,
            name_substring: 1,
            location_prefix: u32::MAX,
            location_substring: 1,
        };
        assert_eq!(weights.max_term_score(), None);
        assert!(weights.validate().is_err());

        // Scoring itself saturates instead of overflowing.
        let scorer = MatchScorer::with_weights(weights);
        let record = Record::new("report", "report");
        assert_eq!(scorer.score(&record, "report"), u32::MAX);
        assert_eq!(scorer.score(&Record::new("a report", "x"), "report"), 1);

        let fits = ScoreWeights {
            name_prefix: u32::MAX - 2,
            location_prefix: 2,
            ..Default::default()
        };
        assert_eq!(fits.max_term_score(), Some(u32::MAX));
        assert!(fits.validate().is_ok());
    }

    #[test]
    fn test_weights_partial_deserialize() {
        let weights: ScoreWeights = serde_json::from_str(r#"{"name_prefix": 7}"#).unwrap();
        assert_eq!(weights.name_prefix, 7);
        assert_eq!(weights.name_substring, 2);
        assert_eq!(weights.location_prefix, 2);
        assert_eq!(weights.location_substring, 1);
    }
}
