//! Review scorer: picks the note most in need of a quiz.
//!
//! Reviewed notes score `days_since_review * 10 + (1 - confidence) * 50`.
//! Notes with no ledger entry score a flat 1000 so untouched material comes
//! first; a reviewed note left for 100+ days can still overtake it.

use super::ledger::TrackingLedger;
use crate::pages;
use crate::store::Note;
use chrono::NaiveDate;

pub const NEVER_REVIEWED_SCORE: f64 = 1000.0;
pub const DAY_WEIGHT: f64 = 10.0;
pub const CONFIDENCE_WEIGHT: f64 = 50.0;

/// Priority of `note` for the next quiz. Higher is more urgent.
pub fn score(note: &Note, ledger: &TrackingLedger, today: NaiveDate) -> f64 {
    match ledger.get(&note.id) {
        None => NEVER_REVIEWED_SCORE,
        Some(record) => {
            record.days_since(today) as f64 * DAY_WEIGHT
                + (1.0 - record.confidence) * CONFIDENCE_WEIGHT
        }
    }
}

/// Select the highest-scoring non-structural note.
///
/// Ties keep the earliest note in `notes`. Returns `None` when every note is
/// a structural page (or there are none).
pub fn select<'a>(notes: &'a [Note], ledger: &TrackingLedger, today: NaiveDate) -> Option<&'a Note> {
    let mut best: Option<(&Note, f64)> = None;

    for note in notes.iter().filter(|n| !pages::is_reserved(&n.title)) {
        let s = score(note, ledger, today);
        log::debug!("[SCORER] {} ({}) scored {:.1}", note.title, note.id, s);
        match best {
            Some((_, best_score)) if s <= best_score => {}
            _ => best = Some((note, s)),
        }
    }

    if let Some((note, s)) = best {
        log::info!("[SCORER] Selected '{}' with score {:.1}", note.title, s);
    }
    best.map(|(note, _)| note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::ledger::TrackingRecord;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn record(note_id: &str, days_ago: i64, confidence: f64) -> TrackingRecord {
        TrackingRecord {
            note_id: note_id.to_string(),
            last_reviewed: today() - chrono::Duration::days(days_ago),
            confidence,
            review_count: 1,
            item_count: None,
        }
    }

    #[test]
    fn test_score_formula() {
        let ledger: TrackingLedger = vec![record("a", 3, 0.4)].into_iter().collect();
        let note = Note::new("a", "Alpha");
        assert!((score(&note, &ledger, today()) - 60.0).abs() < 1e-9);
        assert_eq!(score(&Note::new("b", "Beta"), &ledger, today()), NEVER_REVIEWED_SCORE);
    }

    #[test]
    fn test_never_reviewed_beats_mastered() {
        let notes = vec![Note::new("b", "Beta"), Note::new("a", "Alpha")];
        let ledger: TrackingLedger = vec![record("b", 0, 1.0)].into_iter().collect();
        assert_eq!(select(&notes, &ledger, today()).unwrap().id, "a");
    }

    #[test]
    fn test_very_stale_note_overtakes_never_reviewed() {
        let notes = vec![Note::new("new", "Fresh"), Note::new("old", "Stale")];
        let ledger: TrackingLedger = vec![record("old", 101, 1.0)].into_iter().collect();
        assert_eq!(select(&notes, &ledger, today()).unwrap().id, "old");
    }

    #[test]
    fn test_ties_keep_first() {
        let notes = vec![Note::new("x", "X"), Note::new("y", "Y"), Note::new("z", "Z")];
        let ledger = TrackingLedger::new();
        assert_eq!(select(&notes, &ledger, today()).unwrap().id, "x");
    }

    #[test]
    fn test_never_selects_reserved() {
        let notes = vec![
            Note::new("r1", "Rewise"),
            Note::new("r2", "review tracker"),
            Note::new("r3", "Rewise Dashboard"),
            Note::new("n1", "Closures"),
        ];
        let ledger: TrackingLedger = vec![record("n1", 0, 1.0)].into_iter().collect();
        assert_eq!(select(&notes, &ledger, today()).unwrap().id, "n1");
    }

    #[test]
    fn test_none_when_only_reserved() {
        let notes = vec![Note::new("r1", "Rewise"), Note::new("r2", "Review Tracker")];
        assert!(select(&notes, &TrackingLedger::new(), today()).is_none());
        assert!(select(&[], &TrackingLedger::new(), today()).is_none());
    }

    #[test]
    fn test_staleness_and_confidence_both_count() {
        let notes = vec![Note::new("a", "A"), Note::new("b", "B"), Note::new("c", "C")];
        let ledger: TrackingLedger = vec![
            record("a", 5, 0.9),  // 55
            record("b", 5, 0.2),  // 90
            record("c", 8, 0.9),  // 85
        ]
        .into_iter()
        .collect();
        assert_eq!(select(&notes, &ledger, today()).unwrap().id, "b");
    }
}
