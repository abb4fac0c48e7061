//! Dashboard statistics derived from the notes list and the tracking ledger.

use crate::pages;
use crate::store::Note;
use crate::tracking::TrackingLedger;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Length cap for every itemized list on the dashboard.
pub const LIST_LIMIT: usize = 10;
/// Reviews dated fewer than this many days ago count as "this week".
pub const WEEK_DAYS: i64 = 7;

pub const UNKNOWN_TITLE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewedItem {
    pub title: String,
    pub date: NaiveDate,
    pub confidence: f64,
    pub review_count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverdueItem {
    pub title: String,
    pub days_overdue: i64,
    pub confidence: f64,
}

/// Snapshot of review progress. Recomputed on every refresh, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// Notes eligible for review (structural pages excluded).
    pub total_pages: usize,
    pub pages_reviewed_this_week: usize,
    /// Ledger records, including notes that have since been deleted.
    pub total_reviewed: usize,
    pub never_reviewed_count: usize,
    /// First [`LIST_LIMIT`] never-reviewed titles, in database order.
    pub never_reviewed: Vec<String>,
    /// Longest-unreviewed first, capped at [`LIST_LIMIT`].
    pub overdue_pages: Vec<OverdueItem>,
    /// Newest review first, capped at [`LIST_LIMIT`].
    pub recently_reviewed: Vec<ReviewedItem>,
    pub total_mcqs: u64,
    pub avg_confidence: f64,
}

impl DashboardMetrics {
    pub fn compute(notes: &[Note], ledger: &TrackingLedger, today: NaiveDate) -> Self {
        let eligible: Vec<&Note> = notes
            .iter()
            .filter(|note| !pages::resembles_reserved(&note.title))
            .collect();
        let titles: HashMap<&str, &str> = eligible
            .iter()
            .map(|note| (note.id.as_str(), note.title.as_str()))
            .collect();

        let pages_reviewed_this_week = ledger
            .iter()
            .filter(|record| record.days_since(today) < WEEK_DAYS)
            .count();

        let mut recently_reviewed: Vec<ReviewedItem> = ledger
            .iter()
            .map(|record| ReviewedItem {
                title: titles
                    .get(record.note_id.as_str())
                    .copied()
                    .unwrap_or(UNKNOWN_TITLE)
                    .to_string(),
                date: record.last_reviewed,
                confidence: record.confidence,
                review_count: record.review_count,
            })
            .collect();
        recently_reviewed.sort_by(|a, b| b.date.cmp(&a.date));
        recently_reviewed.truncate(LIST_LIMIT);

        let never_reviewed_all: Vec<&Note> = eligible
            .iter()
            .copied()
            .filter(|note| !ledger.contains(&note.id))
            .collect();
        let never_reviewed = never_reviewed_all
            .iter()
            .take(LIST_LIMIT)
            .map(|note| note.title.clone())
            .collect();

        let mut overdue_pages: Vec<OverdueItem> = eligible
            .iter()
            .filter_map(|note| {
                ledger.get(&note.id).map(|record| OverdueItem {
                    title: note.title.clone(),
                    days_overdue: record.days_since(today),
                    confidence: record.confidence,
                })
            })
            .collect();
        overdue_pages.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
        overdue_pages.truncate(LIST_LIMIT);

        let total_mcqs = ledger
            .iter()
            .map(|record| u64::from(record.item_count.unwrap_or(0)))
            .sum();

        let avg_confidence = if ledger.is_empty() {
            0.0
        } else {
            ledger.iter().map(|record| record.confidence).sum::<f64>() / ledger.len() as f64
        };

        Self {
            total_pages: eligible.len(),
            pages_reviewed_this_week,
            total_reviewed: ledger.len(),
            never_reviewed_count: never_reviewed_all.len(),
            never_reviewed,
            overdue_pages,
            recently_reviewed,
            total_mcqs,
            avg_confidence,
        }
    }

    /// Share of eligible notes with a review on record, in `[0, 1]`.
    ///
    /// Records for deleted notes still count as reviewed, so the raw ratio
    /// can exceed one; it is capped.
    pub fn review_completion(&self) -> f64 {
        if self.total_pages == 0 {
            0.0
        } else {
            (self.total_reviewed as f64 / self.total_pages as f64).min(1.0)
        }
    }
}
