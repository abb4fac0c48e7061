//! Typed HTTP client for the hosted notes database API.

use super::{Block, DocumentStore, Note};
use crate::config::{Config, defaults};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Value, json};

/// Page size requested on every listing call (the API maximum).
const PAGE_SIZE: u32 = 100;

pub struct NotionClient {
    base_url: String,
    token: String,
    database_id: String,
    client: Client,
}

/// One page of a cursor-paginated listing.
#[derive(Debug, Deserialize)]
struct Paginated {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

impl Paginated {
    /// Cursor for the next request, if the listing continues.
    fn continuation(&self) -> Option<String> {
        if self.has_more {
            self.next_cursor.clone()
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreatedPage {
    id: String,
}

impl NotionClient {
    pub fn new(config: &Config) -> Result<Self, String> {
        Ok(Self {
            base_url: config.notion_api_url.clone(),
            token: config.notion_token.clone(),
            database_id: config.notion_database_id.clone(),
            client: crate::http::build_client(config.http_timeout_secs)?,
        })
    }

    fn authed(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.token)
            .header("Notion-Version", defaults::NOTION_VERSION)
    }

    async fn query_database(&self, cursor: Option<&str>) -> Result<Paginated, String> {
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }

        let resp = self
            .authed(
                self.client
                    .post(format!("{}/databases/{}/query", self.base_url, self.database_id)),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Query database failed: {}", e))?;

        parse_json(resp, "Query database").await
    }

    async fn list_children(&self, page_id: &str, cursor: Option<&str>) -> Result<Paginated, String> {
        let mut req = self
            .authed(
                self.client
                    .get(format!("{}/blocks/{}/children", self.base_url, page_id)),
            )
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            req = req.query(&[("start_cursor", cursor)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| format!("List blocks failed: {}", e))?;

        parse_json(resp, "List blocks").await
    }
}

/// Read a JSON body, turning a non-success status into an error carrying the response text.
async fn parse_json<T: serde::de::DeserializeOwned>(resp: Response, what: &str) -> Result<T, String> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(format!("{} HTTP {}: {}", what, status, body));
    }
    resp.json::<T>()
        .await
        .map_err(|e| format!("Parse {} response: {}", what.to_lowercase(), e))
}

async fn expect_success(resp: Response, what: &str) -> Result<(), String> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(format!("{} HTTP {}: {}", what, status, body))
    }
}

/// Extract the title of a database page.
///
/// Prefers the conventional `Name`/`Title` properties, then any property of
/// type `title`. Missing or empty titles become "Untitled" via [`Note::new`].
fn page_title(page: &Value) -> String {
    let properties = match page.get("properties").and_then(Value::as_object) {
        Some(p) => p,
        None => return String::new(),
    };

    let prop = properties
        .get("Name")
        .or_else(|| properties.get("Title"))
        .or_else(|| {
            properties
                .values()
                .find(|p| p.get("type").and_then(Value::as_str) == Some("title"))
        });

    prop.and_then(|p| p.get("title"))
        .and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|r| r.get("plain_text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn note_from_page(page: &Value) -> Option<Note> {
    let id = page.get("id").and_then(Value::as_str)?;
    Some(Note::new(id, page_title(page)))
}

#[async_trait]
impl DocumentStore for NotionClient {
    async fn list_notes(&self) -> Result<Vec<Note>, String> {
        let mut notes = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self.query_database(cursor.as_deref()).await.map_err(|e| {
                log::error!("[NOTION] {}", e);
                e
            })?;
            notes.extend(page.results.iter().filter_map(note_from_page));
            cursor = page.continuation();
            if cursor.is_none() {
                break;
            }
        }

        log::debug!("[NOTION] Listed {} pages", notes.len());
        Ok(notes)
    }

    async fn get_blocks(&self, page_id: &str) -> Result<Vec<Block>, String> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let page = self
                .list_children(page_id, cursor.as_deref())
                .await
                .map_err(|e| {
                    log::error!("[NOTION] {} (page {})", e, page_id);
                    e
                })?;
            blocks.extend(page.results.iter().map(Block::from_api));
            cursor = page.continuation();
            if cursor.is_none() {
                break;
            }
        }

        Ok(blocks)
    }

    async fn append_blocks(&self, page_id: &str, blocks: &[Value]) -> Result<(), String> {
        let resp = self
            .authed(
                self.client
                    .patch(format!("{}/blocks/{}/children", self.base_url, page_id)),
            )
            .json(&json!({ "children": blocks }))
            .send()
            .await
            .map_err(|e| format!("Append blocks failed: {}", e))?;

        expect_success(resp, "Append blocks").await.map_err(|e| {
            log::error!("[NOTION] {} (page {})", e, page_id);
            e
        })
    }

    async fn delete_block(&self, block_id: &str) -> Result<(), String> {
        let resp = self
            .authed(
                self.client
                    .delete(format!("{}/blocks/{}", self.base_url, block_id)),
            )
            .send()
            .await
            .map_err(|e| format!("Delete block failed: {}", e))?;

        expect_success(resp, "Delete block").await
    }

    async fn create_page(&self, title: &str) -> Result<String, String> {
        let body = json!({
            "parent": { "database_id": self.database_id },
            "properties": {
                "Name": { "title": [ { "text": { "content": title } } ] }
            }
        });

        let resp = self
            .authed(self.client.post(format!("{}/pages", self.base_url)))
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Create page failed: {}", e))?;

        let created: CreatedPage = parse_json(resp, "Create page").await.map_err(|e| {
            log::error!("[NOTION] {}", e);
            e
        })?;
        log::info!("[NOTION] Created page '{}' ({})", title, created.id);
        Ok(created.id)
    }
}
