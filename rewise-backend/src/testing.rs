//! In-memory collaborators for tests.

use crate::quiz::{ChatMessage, ChatNotifier, QuizGenerator};
use crate::store::blocks::{self, TextStyle};
use crate::store::{Block, DocumentStore, Note};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Default)]
struct Inner {
    notes: Vec<Note>,
    pages: HashMap<String, Vec<Block>>,
    append_calls: HashMap<String, Vec<usize>>,
    append_budget: HashMap<String, usize>,
    failing_deletes: HashSet<String>,
    failing_listings: HashSet<String>,
    next_id: usize,
}

impl Inner {
    fn next_block_id(&mut self, page_id: &str) -> String {
        self.next_id += 1;
        format!("{}-b{}", page_id, self.next_id)
    }
}

/// Document store backed by a map of page id to blocks.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a database page whose content is one paragraph per line.
    pub fn add_note(&self, id: &str, title: &str, lines: &[&str]) {
        let mut inner = self.inner.lock().unwrap();
        inner.notes.push(Note::new(id, title));
        let mut page = Vec::new();
        for line in lines {
            let mut block = Block::from_api(&blocks::paragraph(line, TextStyle::default()));
            block.id = inner.next_block_id(id);
            page.push(block);
        }
        inner.pages.insert(id.to_string(), page);
    }

    /// Plain text of every block on a page, in order.
    pub fn page_lines(&self, page_id: &str) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner
            .pages
            .get(page_id)
            .map(|blocks| blocks.iter().map(Block::plain_text).collect())
            .unwrap_or_default()
    }

    /// Batch sizes of the successful append calls made to a page.
    pub fn append_calls(&self, page_id: &str) -> Vec<usize> {
        let inner = self.inner.lock().unwrap();
        inner.append_calls.get(page_id).cloned().unwrap_or_default()
    }

    /// Let `successes` more appends to the page succeed, then fail every one after.
    pub fn fail_appends_after(&self, page_id: &str, successes: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.append_budget.insert(page_id.to_string(), successes);
    }

    pub fn fail_listing(&self, page_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing_listings.insert(page_id.to_string());
    }

    pub fn fail_delete(&self, block_id: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.failing_deletes.insert(block_id.to_string());
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_notes(&self) -> Result<Vec<Note>, String> {
        Ok(self.inner.lock().unwrap().notes.clone())
    }

    async fn get_blocks(&self, page_id: &str) -> Result<Vec<Block>, String> {
        let inner = self.inner.lock().unwrap();
        if inner.failing_listings.contains(page_id) {
            return Err("List blocks HTTP 503 Service Unavailable".to_string());
        }
        inner
            .pages
            .get(page_id)
            .cloned()
            .ok_or_else(|| format!("Page not found: {}", page_id))
    }

    async fn append_blocks(&self, page_id: &str, blocks: &[Value]) -> Result<(), String> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.pages.contains_key(page_id) {
            return Err(format!("Page not found: {}", page_id));
        }
        if let Some(budget) = inner.append_budget.get_mut(page_id) {
            if *budget == 0 {
                return Err("Append blocks HTTP 502 Bad Gateway".to_string());
            }
            *budget -= 1;
        }

        let mut written = Vec::with_capacity(blocks.len());
        for value in blocks {
            let mut block = Block::from_api(value);
            block.id = inner.next_block_id(page_id);
            written.push(block);
        }
        inner
            .append_calls
            .entry(page_id.to_string())
            .or_default()
            .push(blocks.len());
        inner
            .pages
            .entry(page_id.to_string())
            .or_default()
            .extend(written);
        Ok(())
    }

    async fn delete_block(&self, block_id: &str) -> Result<(), String> {
        let mut inner = self.inner.lock().unwrap();
        if inner.failing_deletes.contains(block_id) {
            return Err("Delete block HTTP 409 Conflict".to_string());
        }
        for page in inner.pages.values_mut() {
            if let Some(pos) = page.iter().position(|b| b.id == block_id) {
                page.remove(pos);
                return Ok(());
            }
        }
        Err(format!("Block not found: {}", block_id))
    }

    async fn create_page(&self, title: &str) -> Result<String, String> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = format!("page-{}", inner.next_id);
        inner.notes.push(Note::new(id.clone(), title));
        inner.pages.insert(id.clone(), Vec::new());
        Ok(id)
    }
}

/// Completion service returning a canned reply and remembering prompts.
pub struct FakeGenerator {
    reply: Result<String, String>,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            reply: Err(error.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl QuizGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone()
    }
}

/// Chat channel that records posts, or rejects them.
#[derive(Default)]
pub struct FakeNotifier {
    fail: bool,
    pub posts: Mutex<Vec<ChatMessage>>,
}

impl FakeNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            posts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChatNotifier for FakeNotifier {
    async fn post(&self, message: &ChatMessage) -> Result<(), String> {
        if self.fail {
            return Err("Discord webhook HTTP 404 Not Found".to_string());
        }
        self.posts.lock().unwrap().push(message.clone());
        Ok(())
    }
}
