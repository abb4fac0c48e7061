//! Builders for the block JSON the document API accepts on append.

use serde_json::{Value, json};

/// Maximum characters in a single rich-text run.
pub const MAX_RICH_TEXT_CHARS: usize = 2000;

/// Inline annotations applied to every run of a block.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub color: Option<&'static str>,
}

impl TextStyle {
    pub fn bold() -> Self {
        Self {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        Self {
            italic: true,
            ..Default::default()
        }
    }

    pub fn code() -> Self {
        Self {
            code: true,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = Some(color);
        self
    }

    fn annotations(&self) -> Value {
        json!({
            "bold": self.bold,
            "italic": self.italic,
            "code": self.code,
            "color": self.color.unwrap_or("default"),
        })
    }
}

/// Split text into runs no longer than [`MAX_RICH_TEXT_CHARS`] characters.
pub fn split_runs(content: &str) -> Vec<String> {
    if content.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = content.chars().collect();
    chars
        .chunks(MAX_RICH_TEXT_CHARS)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn rich_text(content: &str, style: TextStyle) -> Vec<Value> {
    split_runs(content)
        .into_iter()
        .map(|run| {
            json!({
                "type": "text",
                "text": { "content": run },
                "annotations": style.annotations(),
            })
        })
        .collect()
}

fn text_block(block_type: &str, content: &str, style: TextStyle) -> Value {
    let mut block = json!({ "object": "block", "type": block_type });
    block[block_type] = json!({ "rich_text": rich_text(content, style) });
    block
}

pub fn paragraph(content: &str, style: TextStyle) -> Value {
    text_block("paragraph", content, style)
}

pub fn heading_1(content: &str, style: TextStyle) -> Value {
    text_block("heading_1", content, style)
}

pub fn heading_2(content: &str, style: TextStyle) -> Value {
    text_block("heading_2", content, style)
}

pub fn bulleted_list_item(content: &str, style: TextStyle) -> Value {
    text_block("bulleted_list_item", content, style)
}

pub fn callout(emoji: &str, background: &str, content: &str, style: TextStyle) -> Value {
    json!({
        "object": "block",
        "type": "callout",
        "callout": {
            "icon": { "type": "emoji", "emoji": emoji },
            "color": background,
            "rich_text": rich_text(content, style),
        },
    })
}

pub fn divider() -> Value {
    json!({ "object": "block", "type": "divider", "divider": {} })
}

/// One paragraph per non-empty line of `content`.
pub fn paragraphs_from_lines(content: &str) -> Vec<Value> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| paragraph(line, TextStyle::default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_shape() {
        let block = paragraph("hello", TextStyle::bold().with_color("gray"));
        assert_eq!(block["type"], "paragraph");
        let run = &block["paragraph"]["rich_text"][0];
        assert_eq!(run["text"]["content"], "hello");
        assert_eq!(run["annotations"]["bold"], true);
        assert_eq!(run["annotations"]["color"], "gray");
    }

    #[test]
    fn test_callout_shape() {
        let block = callout("📄", "blue_background", "Total Pages: 4", TextStyle::bold());
        assert_eq!(block["callout"]["icon"]["emoji"], "📄");
        assert_eq!(block["callout"]["color"], "blue_background");
        assert_eq!(block["callout"]["rich_text"][0]["text"]["content"], "Total Pages: 4");
    }

    #[test]
    fn test_long_text_splits_into_runs() {
        let long = "é".repeat(MAX_RICH_TEXT_CHARS + 5);
        let block = paragraph(&long, TextStyle::default());
        let runs = block["paragraph"]["rich_text"].as_array().unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1]["text"]["content"].as_str().unwrap().chars().count(), 5);
    }

    #[test]
    fn test_paragraphs_skip_blank_lines() {
        let blocks = paragraphs_from_lines("Q1: What?\n\n  \nA) This");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1]["paragraph"]["rich_text"][0]["text"]["content"], "A) This");
    }
}
