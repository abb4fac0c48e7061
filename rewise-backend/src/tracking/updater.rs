//! Tracking updater: appends the post-review record for a note.

use super::ledger::{TrackingLedger, TrackingRecord};
use crate::store::DocumentStore;
use chrono::NaiveDate;

pub const INITIAL_CONFIDENCE: f64 = 0.1;
pub const CONFIDENCE_STEP: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Record that follows `prior` after one more review today.
///
/// Confidence is kept at ledger precision (two decimals) so the in-memory
/// value matches what a later decode reads back.
pub fn next_record(
    prior: Option<&TrackingRecord>,
    note_id: &str,
    item_count: u32,
    today: NaiveDate,
) -> TrackingRecord {
    let (confidence, review_count) = match prior {
        Some(prev) => (
            (prev.confidence + CONFIDENCE_STEP).min(MAX_CONFIDENCE),
            prev.review_count.saturating_add(1),
        ),
        None => (INITIAL_CONFIDENCE, 1),
    };

    TrackingRecord {
        note_id: note_id.to_string(),
        last_reviewed: today,
        confidence: (confidence * 100.0).round() / 100.0,
        review_count,
        item_count: Some(item_count),
    }
}

/// Append the next ledger record for a reviewed note.
///
/// Re-reads the ledger page first so the increment builds on the latest
/// stored record. Returns whether the append succeeded; failures are logged
/// and never abort the caller.
pub async fn record_review(
    store: &dyn DocumentStore,
    ledger_page_id: &str,
    note_id: &str,
    title: &str,
    item_count: u32,
    today: NaiveDate,
) -> bool {
    let blocks = match store.get_blocks(ledger_page_id).await {
        Ok(blocks) => blocks,
        Err(e) => {
            log::error!("[LEDGER] Failed to read ledger before update: {}", e);
            return false;
        }
    };
    let ledger = TrackingLedger::decode(&blocks);

    let record = next_record(ledger.get(note_id), note_id, item_count, today);
    let block = record.to_block(title);

    match store.append_blocks(ledger_page_id, &[block]).await {
        Ok(()) => {
            log::info!(
                "[LEDGER] Recorded review #{} of '{}' (confidence {:.2})",
                record.review_count,
                title,
                record.confidence
            );
            true
        }
        Err(e) => {
            log::error!("[LEDGER] Failed to append record for '{}': {}", title, e);
            false
        }
    }
}
