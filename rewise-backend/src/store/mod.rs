//! Document store abstraction: notes database pages and their content blocks.
//!
//! The hosted document database holds the notes being quizzed as well as the
//! automation's own structural pages (archive, ledger, dashboard). Everything
//! the core reads or writes goes through [`DocumentStore`].

pub mod blocks;
pub mod notion;

use async_trait::async_trait;
use serde_json::Value;

pub use notion::NotionClient;

/// Maximum number of blocks the document API accepts in one append call.
pub const MAX_BLOCKS_PER_APPEND: usize = 100;

/// Title used when a page has none.
pub const UNTITLED: &str = "Untitled";

/// A page in the notes database.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub id: String,
    pub title: String,
}

impl Note {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        Self {
            id: id.into(),
            title,
        }
    }
}

/// A content block read back from a page.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub block_type: String,
    /// Plain-text content of each rich-text run, in order. Empty for
    /// block types that carry no text (dividers, images, ...).
    pub rich_text: Vec<String>,
}

impl Block {
    /// Build a block from its API representation.
    ///
    /// Reads `plain_text` from each rich-text run, falling back to
    /// `text.content` (the shape used when writing blocks).
    pub fn from_api(value: &Value) -> Self {
        let block_type = value
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let rich_text = value
            .get(&block_type)
            .and_then(|body| body.get("rich_text"))
            .and_then(Value::as_array)
            .map(|runs| {
                runs.iter()
                    .map(|run| {
                        run.get("plain_text")
                            .and_then(Value::as_str)
                            .or_else(|| {
                                run.get("text")
                                    .and_then(|t| t.get("content"))
                                    .and_then(Value::as_str)
                            })
                            .unwrap_or_default()
                            .to_string()
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            id: value
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            block_type,
            rich_text,
        }
    }

    /// Concatenated plain text of the block.
    pub fn plain_text(&self) -> String {
        self.rich_text.concat()
    }
}

/// Join the text of every block on a page, space separated.
pub fn page_text(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Hosted document database operations used by the automation.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Every page in the notes database, in database order.
    async fn list_notes(&self) -> Result<Vec<Note>, String>;

    /// Every content block of a page, in page order.
    async fn get_blocks(&self, page_id: &str) -> Result<Vec<Block>, String>;

    /// Append blocks to the end of a page. At most [`MAX_BLOCKS_PER_APPEND`] per call.
    async fn append_blocks(&self, page_id: &str, blocks: &[Value]) -> Result<(), String>;

    async fn delete_block(&self, block_id: &str) -> Result<(), String>;

    /// Create a page in the notes database and return its id.
    async fn create_page(&self, title: &str) -> Result<String, String>;
}

/// Append any number of blocks, split into API-sized batches applied in order.
///
/// Stops at the first failed batch; earlier batches stay written.
pub async fn append_in_chunks(
    store: &dyn DocumentStore,
    page_id: &str,
    blocks: &[Value],
) -> Result<(), String> {
    let total = blocks.chunks(MAX_BLOCKS_PER_APPEND).len();
    for (i, chunk) in blocks.chunks(MAX_BLOCKS_PER_APPEND).enumerate() {
        store
            .append_blocks(page_id, chunk)
            .await
            .map_err(|e| format!("chunk {} of {}: {}", i + 1, total, e))?;
    }
    Ok(())
}
