//! Relevance scoring and ranking of records against search terms.

pub mod rater;
pub mod ranker;
pub mod scorer;
pub mod terms;

pub use self::rater::RecordRater;
pub use self::ranker::{RecordHit, ResultRanker};
pub use self::scorer::{MatchKind, MatchScorer, ScoreWeights, Scorer};
pub use self::terms::Terms;
