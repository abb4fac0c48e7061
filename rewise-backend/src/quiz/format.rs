//! Post-processing of model output into the public and archived quiz views.

use regex::Regex;
use std::sync::LazyLock;

// A question marker at the start of a line: "Q1:", "**Q2.**", "### Q3)".
static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t>#*_]*Q(\d+)\s*[:.)]").unwrap());
// Lines that start giving the answer away: "Answer: B", "**Correct answer:** C",
// "✅ Ans: B", "1. Correct option - B", "Explanation: ...".
static REVEAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[^\p{L}\p{N}]*(?:\d+\s*[.)][^\p{L}\p{N}]*)?(?:correct\s+(?:answer|option|choice)|answer|ans|explanation|solution)\b[^\p{L}\p{N}]*?[:\-]",
    )
    .unwrap()
});

/// A generated quiz in its two published forms.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizText {
    /// Questions, options, answers and explanations. Archived privately.
    pub full: String,
    /// Questions and options only. Posted to chat.
    pub questions_only: String,
    /// Number of questions found.
    pub item_count: u32,
}

impl QuizText {
    /// Split raw model output.
    ///
    /// Anything before the first question marker (greetings, "Here are your
    /// MCQs:") is dropped. Output with no marker is kept whole and counts as
    /// zero items. The questions-only view drops each answer line and every
    /// line after it until the next question.
    pub fn parse(raw: &str) -> Self {
        let body = match QUESTION_RE.find(raw) {
            Some(m) => &raw[m.start()..],
            None => raw,
        };
        let full = body.trim().to_string();
        let item_count = QUESTION_RE.find_iter(&full).count() as u32;

        // Everything from a reveal line up to the next question stays private.
        let mut revealing = false;
        let mut kept: Vec<&str> = Vec::new();
        for line in full.lines() {
            if QUESTION_RE.is_match(line) {
                revealing = false;
            } else if REVEAL_RE.is_match(line) {
                revealing = true;
            }
            let blank = line.trim().is_empty();
            if revealing && !blank {
                continue;
            }
            if blank && kept.last().is_none_or(|prev| prev.trim().is_empty()) {
                continue;
            }
            kept.push(line.trim_end());
        }
        let questions_only = kept.join("\n").trim_end().to_string();

        Self {
            full,
            questions_only,
            item_count,
        }
    }
}
