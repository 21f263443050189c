//! Integration tests for scoring, ranking and refining searches

use std::cmp::Ordering;
use std::sync::Arc;

use lately::prelude::*;
use lately::query::{MatchKind, ScoreWeights};

fn history() -> Vec<Arc<Record>> {
    vec![
        Record::builder()
            .name("Budget Report")
            .location("/home/u/docs/budget.pdf")
            .last_visited_secs(100)
            .build(),
        Record::builder()
            .name("report_final")
            .location("/home/u/report.txt")
            .last_visited_secs(200)
            .build(),
        Record::builder()
            .name("Quarterly budget")
            .location("file:///home/u/finance/q3.ods")
            .last_visited_secs(300)
            .build(),
        Record::builder()
            .name("holiday.jpg")
            .location("file:///home/u/pictures/holiday.jpg")
            .build(),
        Record::builder()
            .name("report_draft")
            .location("/home/u/report.txt.bak")
            .last_visited_secs(200)
            .build(),
    ]
    .into_iter()
    .map(Arc::new)
    .collect()
}

fn names(results: &SearchResults) -> Vec<&str> {
    results.records().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_single_term_ranking() -> Result<()> {
    let session = SearchSession::new();
    let results = session.initial(&history(), &Terms::new(["report"]));

    // report_draft and report_final tie on score and visit time; name decides.
    assert_eq!(
        names(&results),
        vec!["report_draft", "report_final", "Budget Report"]
    );
    let scores: Vec<u32> = results.hits.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![4, 4, 2]);

    Ok(())
}

#[test]
fn test_two_terms_keep_only_full_matches() {
    let session = SearchSession::new();
    let results = session.initial(&history(), &Terms::new(["report", "budget"]));

    assert_eq!(names(&results), vec!["Budget Report"]);
    assert_eq!(results.hits[0].score, 2 + 4);
}

#[test]
fn test_recency_breaks_score_ties() {
    let session = SearchSession::new();
    let results = session.initial(&history(), &Terms::new(["budget"]));

    // Budget Report: name prefix + location substring = 4
    // Quarterly budget: name substring = 2
    assert_eq!(names(&results), vec!["Budget Report", "Quarterly budget"]);

    let results = session.initial(&history(), &Terms::new(["home"]));
    // Every location contains "home" past the start; newest first, unvisited last.
    assert_eq!(results.len(), 5);
    assert_eq!(results.hits[0].record.name, "Quarterly budget");
    assert_eq!(results.hits[4].record.name, "holiday.jpg");
}

#[test]
fn test_terms_are_case_insensitive() {
    let session = SearchSession::new();
    let lower = session.initial(&history(), &Terms::new(["budget"]));
    let upper = session.initial(&history(), &Terms::new(["BUDGET"]));
    assert_eq!(lower, upper);
}

#[test]
fn test_empty_term_sequence_matches_nothing() {
    let session = SearchSession::new();
    assert!(session.initial(&history(), &Terms::default()).is_empty());
    assert!(session.initial(&history(), &Terms::parse("   ")).is_empty());
}

#[test]
fn test_empty_term_matches_everything() {
    let session = SearchSession::new();
    let results = session.initial(&history(), &Terms::new([""]));
    assert_eq!(results.len(), 5);
    assert!(results.hits.iter().all(|h| h.score == 5));
}

#[test]
fn test_missing_term_disqualifies_regardless_of_other_scores() {
    let rater = RecordRater::default();
    let records = history();

    for record in &records {
        for terms in [
            Terms::parse("zzz report"),
            Terms::parse("report zzz"),
            Terms::parse("budget report zzz"),
        ] {
            assert_eq!(rater.rate(record, &terms), 0);
        }
    }
}

#[test]
fn test_single_term_score_bounds() {
    let scorer = MatchScorer::new();
    for record in history() {
        for term in ["", "r", "report", "home", "/home", "file", "jpg", "x"] {
            let score = scorer.score(&record, term);
            assert!(score <= 5, "{term} scored {score} on {}", record.name);

            let name = MatchKind::locate(&record.folded_name(), term);
            let location = MatchKind::locate(&record.folded_location(), term);
            assert_eq!(
                score == 0,
                name == MatchKind::None && location == MatchKind::None
            );
        }
    }
}

#[test]
fn test_initial_is_idempotent() {
    let session = SearchSession::new();
    let source = history();
    let terms = Terms::parse("u");

    let first = session.initial(&source, &terms);
    let second = session.initial(&source, &terms);
    assert_eq!(first, second);
}

#[test]
fn test_refine_chain() {
    let session = SearchSession::new();
    let source = history();

    let r = session.initial(&source, &Terms::parse("r"));
    let rep = session.refine(&r, &Terms::parse("rep"));
    let report = session.refine(&rep, &Terms::parse("report"));
    let report_b = session.refine(&report, &Terms::parse("report b"));

    for (pool, narrowed) in [(&r, &rep), (&rep, &report), (&report, &report_b)] {
        assert!(narrowed.len() <= pool.len());
        for record in narrowed.records() {
            assert!(pool.records().any(|r| Arc::ptr_eq(r, record)));
        }
    }

    // Refining ends up where a fresh search over the whole source does.
    let fresh = session.initial(&source, &Terms::parse("report b"));
    assert_eq!(report_b, fresh);
    // "b" also hits the ".bak" location of the draft.
    assert_eq!(names(&report_b), vec!["Budget Report", "report_draft"]);
}

#[test]
fn test_refine_subset_even_for_unrelated_terms() {
    let session = SearchSession::new();
    let source = history();

    let report = session.initial(&source, &Terms::parse("report"));
    let holiday = session.refine(&report, &Terms::parse("holiday"));
    assert!(holiday.is_empty());
}

#[test]
fn test_ranked_output_is_ordered() {
    let session = SearchSession::new();
    let ranker = ResultRanker::new();

    for query in ["u", "report", "home", "budget", "o", ""] {
        let results = session.initial(&history(), &Terms::parse(query));
        for pair in results.hits.windows(2) {
            assert_ne!(
                ranker.compare(&pair[0], &pair[1]),
                Ordering::Greater,
                "unsorted for {query:?}"
            );
        }
        assert!(results.hits.iter().all(|h| h.score > 0));
    }
}

#[test]
fn test_session_with_weights() {
    let config = SearchConfig::default().with_weights(ScoreWeights {
        name_prefix: 10,
        name_substring: 1,
        location_prefix: 1,
        location_substring: 1,
    });
    config.validate().unwrap();

    let session = SearchSession::with_config(&config);
    let results = session.initial(&history(), &Terms::parse("budget"));
    assert_eq!(results.hits[0].score, 11);
    assert_eq!(results.hits[1].score, 1);
}
