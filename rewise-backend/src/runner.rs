//! One quiz cycle and one dashboard refresh, end to end.

use crate::config::{self, Config};
use crate::dashboard::{DashboardMetrics, publish, render};
use crate::pages;
use crate::quiz::discord::QUIZ_COLOR;
use crate::quiz::prompt::build_quiz_prompt;
use crate::quiz::{
    ChatMessage, ChatNotifier, DiscordWebhook, GeminiClient, QuizGenerator, QuizText,
};
use crate::store::{self, DocumentStore, NotionClient, blocks};
use crate::tracking::{TrackingLedger, scorer, updater};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::sync::Arc;

/// What a quiz cycle did.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizOutcome {
    pub note_id: String,
    pub title: String,
    pub item_count: u32,
    pub posted: bool,
    pub archived: bool,
    pub tracked: bool,
}

pub struct Runner {
    store: Arc<dyn DocumentStore>,
    generator: Arc<dyn QuizGenerator>,
    notifier: Arc<dyn ChatNotifier>,
}

impl Runner {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        generator: Arc<dyn QuizGenerator>,
        notifier: Arc<dyn ChatNotifier>,
    ) -> Self {
        Self {
            store,
            generator,
            notifier,
        }
    }

    /// Wire up the Notion, Gemini and Discord clients.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self::new(
            Arc::new(NotionClient::new(config)?),
            Arc::new(GeminiClient::new(config)?),
            Arc::new(DiscordWebhook::new(config)?),
        ))
    }

    /// Pick the most-due note, quiz it, post, archive, and record the review.
    ///
    /// Anything that happens before the quiz text exists is a precondition:
    /// it fails the cycle before any write. After that, a failed chat post is
    /// tolerated and archive/ledger outcomes are reported in the result.
    pub async fn run_quiz_cycle(&self, now: NaiveDateTime) -> Result<QuizOutcome, String> {
        let today = now.date();
        let store = self.store.as_ref();

        let notes = store.list_notes().await?;
        if notes.is_empty() {
            return Err("No pages found in database".to_string());
        }
        log::info!("[QUIZ] Found {} pages in database", notes.len());

        let archive_id = pages::get_or_create_page(store, &notes, config::pages::ARCHIVE).await?;
        let ledger_id = pages::get_or_create_page(store, &notes, config::pages::LEDGER).await?;

        let ledger_blocks = store
            .get_blocks(&ledger_id)
            .await
            .map_err(|e| format!("Failed to read tracking ledger: {}", e))?;
        let ledger = TrackingLedger::decode(&ledger_blocks);
        log::debug!("[QUIZ] Ledger holds {} records", ledger.len());

        let note = scorer::select(&notes, &ledger, today)
            .ok_or_else(|| "No eligible pages to quiz".to_string())?;

        let content = store
            .get_blocks(&note.id)
            .await
            .map_err(|e| format!("Failed to read '{}': {}", note.title, e))?;
        let text = store::page_text(&content);
        if text.trim().is_empty() {
            return Err(format!("Selected page '{}' has no content", note.title));
        }

        let raw = self
            .generator
            .generate(&build_quiz_prompt(&text))
            .await
            .map_err(|e| format!("Quiz generation failed: {}", e))?;
        if raw.trim().is_empty() {
            return Err("Quiz generation returned no text".to_string());
        }
        let quiz = QuizText::parse(&raw);
        log::info!("[QUIZ] Generated {} questions", quiz.item_count);

        let heading = quiz_heading(today, &note.title);

        let message = ChatMessage {
            title: heading.clone(),
            body: quiz.questions_only.clone(),
            color: QUIZ_COLOR,
            footer: format!(
                "{} questions · answers saved to {}",
                quiz.item_count,
                config::pages::ARCHIVE
            ),
        };
        let posted = match self.notifier.post(&message).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("[QUIZ] Failed to post quiz: {}", e);
                false
            }
        };

        let archive = archive_blocks(&heading, &quiz.full);
        let archived = match store::append_in_chunks(store, &archive_id, &archive).await {
            Ok(()) => true,
            Err(e) => {
                log::error!("[QUIZ] Failed to archive quiz: {}", e);
                false
            }
        };

        let tracked = updater::record_review(
            store,
            &ledger_id,
            &note.id,
            &note.title,
            quiz.item_count,
            today,
        )
        .await;

        Ok(QuizOutcome {
            note_id: note.id.clone(),
            title: note.title.clone(),
            item_count: quiz.item_count,
            posted,
            archived,
            tracked,
        })
    }

    /// Recompute the metrics and replace the dashboard page.
    pub async fn refresh_dashboard(&self, now: NaiveDateTime) -> Result<bool, String> {
        refresh_dashboard(self.store.as_ref(), now).await
    }
}

/// Dashboard refresh against any store. Returns whether publishing succeeded.
pub async fn refresh_dashboard(
    store: &dyn DocumentStore,
    now: NaiveDateTime,
) -> Result<bool, String> {
    let notes = store.list_notes().await?;
    let ledger_id = pages::get_or_create_page(store, &notes, config::pages::LEDGER).await?;
    let dashboard_id = pages::get_or_create_page(store, &notes, config::pages::DASHBOARD).await?;

    let ledger_blocks = store
        .get_blocks(&ledger_id)
        .await
        .map_err(|e| format!("Failed to read tracking ledger: {}", e))?;
    let ledger = TrackingLedger::decode(&ledger_blocks);

    let metrics = DashboardMetrics::compute(&notes, &ledger, now.date());
    log::info!(
        "[DASHBOARD] {} pages, {} reviewed, {} never reviewed",
        metrics.total_pages,
        metrics.total_reviewed,
        metrics.never_reviewed_count
    );

    let sections = render::render(&metrics, now);
    Ok(publish::publish_dashboard(store, &dashboard_id, &sections).await)
}

fn quiz_heading(today: NaiveDate, title: &str) -> String {
    format!("📚 Rewise MCQs ({}) - {}", today.format("%Y-%m-%d"), title)
}

fn archive_blocks(heading: &str, full: &str) -> Vec<Value> {
    let mut out = Vec::new();
    out.push(blocks::heading_2(heading, blocks::TextStyle::default()));
    out.extend(blocks::paragraphs_from_lines(full));
    out.push(blocks::divider());
    out
}
