//! Dashboard layout: metrics to an ordered list of display sections.

use super::metrics::DashboardMetrics;
use crate::config::pages;
use crate::store::blocks::{self, TextStyle};
use chrono::NaiveDateTime;
use serde_json::Value;

pub const PROGRESS_BAR_WIDTH: usize = 20;
pub const BAR_CHART_WIDTH: usize = 30;
/// Overdue entries older than this are highlighted.
pub const HIGHLIGHT_AFTER_DAYS: i64 = 7;

const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// One displayable element of the dashboard page.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Title(String),
    Heading {
        text: String,
        color: Option<&'static str>,
    },
    Paragraph {
        text: String,
        style: TextStyle,
    },
    Metric {
        icon: &'static str,
        background: &'static str,
        text: String,
    },
    Item {
        text: String,
        color: Option<&'static str>,
    },
    Divider,
}

impl Section {
    fn heading(text: &str) -> Self {
        Section::Heading {
            text: text.to_string(),
            color: None,
        }
    }

    fn paragraph(text: impl Into<String>, style: TextStyle) -> Self {
        Section::Paragraph {
            text: text.into(),
            style,
        }
    }

    fn metric(icon: &'static str, background: &'static str, text: String) -> Self {
        Section::Metric {
            icon,
            background,
            text,
        }
    }

    fn item(text: String) -> Self {
        Section::Item { text, color: None }
    }

    /// Visible text, if the section carries any.
    #[cfg(test)]
    fn text(&self) -> Option<&str> {
        match self {
            Section::Title(text)
            | Section::Heading { text, .. }
            | Section::Paragraph { text, .. }
            | Section::Metric { text, .. }
            | Section::Item { text, .. } => Some(text.as_str()),
            Section::Divider => None,
        }
    }

    pub fn to_block(&self) -> Value {
        match self {
            Section::Title(text) => blocks::heading_1(text, TextStyle::bold()),
            Section::Heading { text, color } => {
                let style = match *color {
                    Some(c) => TextStyle::bold().with_color(c),
                    None => TextStyle::bold(),
                };
                blocks::heading_2(text, style)
            }
            Section::Paragraph { text, style } => blocks::paragraph(text, *style),
            Section::Metric {
                icon,
                background,
                text,
            } => blocks::callout(icon, background, text, TextStyle::bold()),
            Section::Item { text, color } => {
                let style = match *color {
                    Some(c) => TextStyle::default().with_color(c),
                    None => TextStyle::default(),
                };
                blocks::bulleted_list_item(text, style)
            }
            Section::Divider => blocks::divider(),
        }
    }
}

fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Fixed-width fill bar followed by the percentage, e.g. `████░░░░ 50.0%`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let clamped = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let filled = (clamped * width as f64) as usize;
    format!(
        "{}{} {}",
        "█".repeat(filled),
        "░".repeat(width - filled),
        percent(fraction, 1)
    )
}

/// One line per entry, each bar scaled against the largest value.
pub fn bar_chart(data: &[(&str, usize)], width: usize) -> Vec<String> {
    let max = data.iter().map(|(_, v)| *v).max().unwrap_or(0);
    data.iter()
        .map(|(label, value)| {
            let len = if max > 0 { value * width / max } else { 0 };
            format!("{}: {} {}", label, "█".repeat(len), value)
        })
        .collect()
}

/// Lay out the dashboard.
pub fn render(metrics: &DashboardMetrics, generated_at: NaiveDateTime) -> Vec<Section> {
    let mut sections = vec![
        Section::Title(pages::DASHBOARD.to_string()),
        Section::paragraph(
            format!("Last Updated: {}", generated_at.format(TIMESTAMP_FORMAT)),
            TextStyle::italic().with_color("gray"),
        ),
        Section::Divider,
    ];

    // Key metrics
    sections.push(Section::heading("📈 Key Metrics"));
    sections.push(Section::metric(
        "📄",
        "blue_background",
        format!("Total Pages: {}", metrics.total_pages),
    ));
    sections.push(Section::metric(
        "🔁",
        "purple_background",
        format!("Pages Reviewed (This Week): {}", metrics.pages_reviewed_this_week),
    ));
    let reviewed_share = if metrics.total_pages > 0 {
        metrics.total_reviewed as f64 / metrics.total_pages as f64
    } else {
        0.0
    };
    sections.push(Section::metric(
        "✅",
        "green_background",
        format!(
            "Total Reviewed: {} ({})",
            metrics.total_reviewed,
            percent(reviewed_share, 1)
        ),
    ));
    sections.push(Section::metric(
        "🕒",
        "orange_background",
        format!("Never Reviewed: {}", metrics.never_reviewed_count),
    ));
    sections.push(Section::metric(
        "🧠",
        "pink_background",
        format!("Total MCQs Generated: {}", metrics.total_mcqs),
    ));
    sections.push(Section::metric(
        "📊",
        "yellow_background",
        format!("Average Confidence: {}", percent(metrics.avg_confidence, 1)),
    ));
    sections.push(Section::Divider);

    // Gauges and charts
    sections.push(Section::heading("📊 Visual Analytics"));
    let gauge_style = TextStyle {
        bold: true,
        code: true,
        ..Default::default()
    };
    sections.push(Section::paragraph(
        format!(
            "📈 Review Progress\n{}",
            progress_bar(metrics.review_completion(), PROGRESS_BAR_WIDTH)
        ),
        gauge_style,
    ));
    sections.push(Section::paragraph(
        format!(
            "🎯 Average Confidence\n{}",
            progress_bar(metrics.avg_confidence, PROGRESS_BAR_WIDTH)
        ),
        gauge_style,
    ));

    sections.push(Section::paragraph("📅 Weekly Activity", TextStyle::bold()));
    let weekly = [
        ("This Week", metrics.pages_reviewed_this_week),
        ("Total Reviewed", metrics.total_reviewed),
        ("Never Reviewed", metrics.never_reviewed_count),
    ];
    for line in bar_chart(&weekly, BAR_CHART_WIDTH) {
        sections.push(Section::paragraph(line, TextStyle::code()));
    }

    sections.push(Section::paragraph("🧭 Review Status Distribution", TextStyle::bold()));
    let status = [
        ("✅ Reviewed", metrics.total_reviewed),
        ("🕒 Never Reviewed", metrics.never_reviewed_count),
        ("📉 Needs Review", metrics.overdue_pages.len()),
    ];
    for line in bar_chart(&status, BAR_CHART_WIDTH) {
        sections.push(Section::paragraph(line, TextStyle::code()));
    }
    sections.push(Section::Divider);

    // Recently reviewed
    sections.push(Section::heading("🧠 Recently Reviewed"));
    if metrics.recently_reviewed.is_empty() {
        sections.push(Section::paragraph(
            "No reviews yet. Start reviewing!",
            TextStyle::italic(),
        ));
    } else {
        for item in &metrics.recently_reviewed {
            sections.push(Section::item(format!(
                "{} - {} (Confidence: {}, Reviews: {})",
                item.title,
                item.date,
                percent(item.confidence, 0),
                item.review_count
            )));
        }
    }
    sections.push(Section::Divider);

    // Most overdue
    sections.push(Section::Heading {
        text: "📉 Most Overdue Pages".to_string(),
        color: Some("red"),
    });
    if metrics.overdue_pages.is_empty() {
        sections.push(Section::paragraph(
            "All reviews are up to date!",
            TextStyle::italic().with_color("green"),
        ));
    } else {
        for item in &metrics.overdue_pages {
            sections.push(Section::Item {
                text: format!(
                    "{} - {} days ago (Confidence: {})",
                    item.title,
                    item.days_overdue,
                    percent(item.confidence, 0)
                ),
                color: (item.days_overdue > HIGHLIGHT_AFTER_DAYS).then_some("orange"),
            });
        }
    }
    sections.push(Section::Divider);

    // Never reviewed
    sections.push(Section::heading("🕒 Never Reviewed Pages"));
    if metrics.never_reviewed.is_empty() {
        sections.push(Section::paragraph(
            "🎉 All pages have been reviewed!",
            TextStyle::italic().with_color("green"),
        ));
    } else {
        for title in &metrics.never_reviewed {
            sections.push(Section::item(title.clone()));
        }
    }
    sections.push(Section::Divider);

    sections.push(Section::paragraph(
        "💡 Tip: This dashboard updates automatically each time Rewise runs.",
        TextStyle::italic().with_color("gray"),
    ));

    sections
}

pub fn to_blocks(sections: &[Section]) -> Vec<Value> {
    sections.iter().map(Section::to_block).collect()
}
