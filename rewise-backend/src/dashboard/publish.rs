//! Full-replace publishing of the dashboard page.

use super::render::{self, Section};
use crate::store::{self, DocumentStore};

/// Outcome of clearing a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Delete every block on a page, continuing past individual failures.
///
/// Each failed delete is logged and counted, and the rest still go. Failing
/// to list the page at all is an error: nothing could be cleared.
pub async fn clear_page_best_effort(
    store: &dyn DocumentStore,
    page_id: &str,
) -> Result<ClearReport, String> {
    let mut report = ClearReport::default();

    let blocks = store
        .get_blocks(page_id)
        .await
        .map_err(|e| format!("Could not list old blocks: {}", e))?;

    for block in &blocks {
        match store.delete_block(&block.id).await {
            Ok(()) => report.deleted += 1,
            Err(e) => {
                log::warn!("[DASHBOARD] Failed to delete block {}: {}", block.id, e);
                report.failed += 1;
            }
        }
    }

    log::debug!(
        "[DASHBOARD] Cleared {} blocks ({} failed)",
        report.deleted,
        report.failed
    );
    Ok(report)
}

/// Replace the dashboard page content with `sections`.
///
/// Writes in API-sized batches, in order, and stops at the first failed
/// batch. Returns whether every batch was written. Nothing is written when
/// the old content could not be listed.
pub async fn publish_dashboard(
    store: &dyn DocumentStore,
    page_id: &str,
    sections: &[Section],
) -> bool {
    if let Err(e) = clear_page_best_effort(store, page_id).await {
        log::error!("[DASHBOARD] Error clearing dashboard {}", e);
        return false;
    }

    let blocks = render::to_blocks(sections);
    match store::append_in_chunks(store, page_id, &blocks).await {
        Ok(()) => {
            log::info!("[DASHBOARD] Published {} blocks", blocks.len());
            true
        }
        Err(e) => {
            log::error!("[DASHBOARD] Error updating dashboard {}", e);
            false
        }
    }
}
