//! Tracking ledger codec.
//!
//! The ledger lives on its own page as an append-only run of paragraph
//! blocks, one record per line:
//!
//! ```text
//! note_id|YYYY-MM-DD|confidence|review_count|title|N items
//! ```
//!
//! Only the first four fields are read back for scoring. The title is a
//! snapshot for humans; the item count feeds the dashboard total. Reading
//! replays every line in page order and the last line per note wins.

use crate::store::Block;
use crate::store::blocks::{self, TextStyle};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

pub const FIELD_SEPARATOR: char = '|';
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Positional fields that must be present for a line to count as a record.
const REQUIRED_FIELDS: usize = 4;

/// Review history of a single note.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingRecord {
    pub note_id: String,
    pub last_reviewed: NaiveDate,
    /// Mastery proxy in `[0.0, 1.0]`.
    pub confidence: f64,
    pub review_count: u32,
    /// Quiz items generated on the latest review, when the line records it.
    pub item_count: Option<u32>,
}

impl TrackingRecord {
    /// Parse one ledger line. Returns `None` for anything that is not a record.
    ///
    /// Empty or unreadable confidence/count fields fall back to `0.0`/`0`.
    /// A line whose date cannot be read is skipped: there is nothing to
    /// schedule from.
    pub fn parse_line(line: &str) -> Option<Self> {
        if !line.contains(FIELD_SEPARATOR) {
            return None;
        }

        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() < REQUIRED_FIELDS {
            return None;
        }

        let note_id = fields[0];
        if note_id.is_empty() {
            return None;
        }

        let last_reviewed = match NaiveDate::parse_from_str(fields[1], DATE_FORMAT) {
            Ok(date) => date,
            Err(_) => {
                log::warn!(
                    "[LEDGER] Skipping record for {} with unreadable date '{}'",
                    note_id,
                    fields[1]
                );
                return None;
            }
        };

        let confidence = fields[2]
            .parse::<f64>()
            .ok()
            .filter(|c| c.is_finite())
            .map(|c| c.clamp(0.0, 1.0))
            .unwrap_or(0.0);

        let review_count = fields[3].parse::<u32>().unwrap_or(0);

        let item_count = fields
            .get(5)
            .and_then(|info| info.split_whitespace().next())
            .and_then(|n| n.parse::<u32>().ok());

        Some(Self {
            note_id: note_id.to_string(),
            last_reviewed,
            confidence,
            review_count,
            item_count,
        })
    }

    /// Serialize as a ledger line, with `title` as the informational snapshot.
    pub fn to_line(&self, title: &str) -> String {
        format!(
            "{}|{}|{:.2}|{}|{}|{} items",
            self.note_id,
            self.last_reviewed.format(DATE_FORMAT),
            self.confidence,
            self.review_count,
            sanitize_title(title),
            self.item_count.unwrap_or(0),
        )
    }

    /// Whole days since the last review (negative for a future date).
    pub fn days_since(&self, today: NaiveDate) -> i64 {
        (today - self.last_reviewed).num_days()
    }

    /// The ledger block that appends this record.
    pub fn to_block(&self, title: &str) -> Value {
        blocks::paragraph(&self.to_line(title), TextStyle::default())
    }
}

/// Keep positional fields intact whatever the page title contains.
fn sanitize_title(title: &str) -> String {
    title
        .replace(FIELD_SEPARATOR, "/")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}

/// Latest record per note, rebuilt from the ledger page on every run.
///
/// Iteration follows the order in which each note first appeared.
#[derive(Debug, Clone, Default)]
pub struct TrackingLedger {
    records: Vec<TrackingRecord>,
    index: HashMap<String, usize>,
}

impl TrackingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the ledger from its page blocks.
    pub fn decode(blocks: &[Block]) -> Self {
        let ledger: Self = blocks
            .iter()
            .filter_map(|block| TrackingRecord::parse_line(&block.plain_text()))
            .collect();
        log::debug!(
            "[LEDGER] Decoded {} records from {} blocks",
            ledger.len(),
            blocks.len()
        );
        ledger
    }

    /// Insert a record, replacing any earlier one for the same note.
    pub fn insert(&mut self, record: TrackingRecord) {
        match self.index.get(&record.note_id) {
            Some(&pos) => self.records[pos] = record,
            None => {
                self.index.insert(record.note_id.clone(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, note_id: &str) -> Option<&TrackingRecord> {
        self.index.get(note_id).map(|&pos| &self.records[pos])
    }

    pub fn contains(&self, note_id: &str) -> bool {
        self.index.contains_key(note_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackingRecord> {
        self.records.iter()
    }
}

impl FromIterator<TrackingRecord> for TrackingLedger {
    fn from_iter<I: IntoIterator<Item = TrackingRecord>>(iter: I) -> Self {
        let mut ledger = Self::new();
        for record in iter {
            ledger.insert(record);
        }
        ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn block(text: &str) -> Block {
        Block::from_api(&blocks::paragraph(text, TextStyle::default()))
    }

    #[test]
    fn test_parse_full_line() {
        let record = TrackingRecord::parse_line("abc-123|2026-10-01|0.30|3|Ownership|7 items").unwrap();
        assert_eq!(record.note_id, "abc-123");
        assert_eq!(record.last_reviewed, date("2026-10-01"));
        assert_eq!(record.confidence, 0.3);
        assert_eq!(record.review_count, 3);
        assert_eq!(record.item_count, Some(7));
    }

    #[test]
    fn test_parse_minimal_line_has_no_item_count() {
        let record = TrackingRecord::parse_line("abc|2026-10-01|0.5|2").unwrap();
        assert_eq!(record.item_count, None);
    }

    #[test]
    fn test_parse_empty_numeric_fields_default_to_zero() {
        let record = TrackingRecord::parse_line("abc|2026-10-01||").unwrap();
        assert_eq!(record.confidence, 0.0);
        assert_eq!(record.review_count, 0);
    }

    #[test]
    fn test_parse_rejects_non_records() {
        assert!(TrackingRecord::parse_line("Review Tracker").is_none());
        assert!(TrackingRecord::parse_line("abc|2026-10-01|0.5").is_none());
        assert!(TrackingRecord::parse_line("|2026-10-01|0.5|1").is_none());
        assert!(TrackingRecord::parse_line("abc|yesterday|0.5|1").is_none());
    }

    #[test]
    fn test_parse_clamps_confidence() {
        let record = TrackingRecord::parse_line("abc|2026-10-01|1.70|1").unwrap();
        assert_eq!(record.confidence, 1.0);
    }

    #[test]
    fn test_to_line_format() {
        let record = TrackingRecord {
            note_id: "abc".to_string(),
            last_reviewed: date("2026-10-16"),
            confidence: 0.1,
            review_count: 1,
            item_count: Some(8),
        };
        assert_eq!(record.to_line("Pattern | Matching"), "abc|2026-10-16|0.10|1|Pattern / Matching|8 items");

        let reparsed = TrackingRecord::parse_line(&record.to_line("Pattern | Matching")).unwrap();
        assert_eq!(reparsed, record);
    }

    #[test]
    fn test_decode_last_write_wins() {
        let ledger = TrackingLedger::decode(&[
            block("Review Tracker"),
            block("a|2026-09-01|0.10|1|Alpha|5 items"),
            block("b|2026-09-10|0.50|4|Beta|6 items"),
            block("a|2026-10-05|0.20|2|Alpha|9 items"),
        ]);

        assert_eq!(ledger.len(), 2);
        let a = ledger.get("a").unwrap();
        assert_eq!(a.last_reviewed, date("2026-10-05"));
        assert_eq!(a.confidence, 0.2);
        assert_eq!(a.review_count, 2);
        assert_eq!(a.item_count, Some(9));

        let order: Vec<&str> = ledger.iter().map(|r| r.note_id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_ignores_blocks_without_pipes() {
        let divider = Block::from_api(&blocks::divider());
        let ledger = TrackingLedger::decode(&[divider, block("just some text"), block("x|y")]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_days_since() {
        let record = TrackingRecord::parse_line("a|2026-10-06|0.5|1").unwrap();
        assert_eq!(record.days_since(date("2026-10-16")), 10);
        assert_eq!(record.days_since(date("2026-10-06")), 0);
    }
}
