//! Structural pages: lookup by title and the get-or-create pattern.

use crate::config::pages::RESERVED;
use crate::store::{DocumentStore, Note};

fn normalize(title: &str) -> String {
    title.trim().to_lowercase()
}

/// True when `title` is exactly one of the structural page titles (case-insensitive).
///
/// Used by quiz selection.
pub fn is_reserved(title: &str) -> bool {
    let title = normalize(title);
    RESERVED.iter().any(|reserved| normalize(reserved) == title)
}

/// True when `title` contains, or is contained in, a structural page title
/// (case-insensitive).
///
/// Used by the dashboard, which also drops near-duplicates such as
/// "Rewise Dashboard (old)".
pub fn resembles_reserved(title: &str) -> bool {
    let title = normalize(title);
    RESERVED.iter().any(|reserved| {
        let reserved = normalize(reserved);
        title.contains(&reserved) || reserved.contains(&title)
    })
}

/// Find a page whose title matches `title`, ignoring case and surrounding whitespace.
pub fn find_page_by_title<'a>(notes: &'a [Note], title: &str) -> Option<&'a Note> {
    let wanted = normalize(title);
    notes.iter().find(|note| normalize(&note.title) == wanted)
}

/// Return the id of the page titled `title`, creating it when `notes` has none.
pub async fn get_or_create_page(
    store: &dyn DocumentStore,
    notes: &[Note],
    title: &str,
) -> Result<String, String> {
    if let Some(page) = find_page_by_title(notes, title) {
        return Ok(page.id.clone());
    }

    log::info!("Page '{}' not found, creating it", title);
    store
        .create_page(title)
        .await
        .map_err(|e| format!("Failed to create '{}' page: {}", title, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;

    #[test]
    fn test_is_reserved_exact_only() {
        assert!(is_reserved("Rewise"));
        assert!(is_reserved("  review TRACKER "));
        assert!(is_reserved("rewise dashboard"));
        assert!(!is_reserved("Rewise notes"));
        assert!(!is_reserved("Ownership"));
    }

    #[test]
    fn test_resembles_reserved_matches_substrings() {
        assert!(resembles_reserved("Rewise Dashboard (old)"));
        assert!(resembles_reserved("Review"));
        assert!(resembles_reserved("REWISE"));
        assert!(!resembles_reserved("Ownership"));
    }

    #[test]
    fn test_find_page_by_title() {
        let notes = vec![Note::new("1", "Ownership"), Note::new("2", " Rewise Dashboard")];
        assert_eq!(find_page_by_title(&notes, "rewise dashboard").unwrap().id, "2");
        assert!(find_page_by_title(&notes, "Review Tracker").is_none());
    }

    #[tokio::test]
    async fn test_get_or_create_reuses_existing() {
        let store = MemoryStore::new();
        store.add_note("ledger-1", "Review Tracker", &[]);
        let notes = store.list_notes().await.unwrap();

        let id = get_or_create_page(&store, &notes, "Review Tracker").await.unwrap();
        assert_eq!(id, "ledger-1");
        assert_eq!(store.list_notes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_creates_missing() {
        let store = MemoryStore::new();
        store.add_note("n1", "Ownership", &["Each value has one owner."]);
        let notes = store.list_notes().await.unwrap();

        let id = get_or_create_page(&store, &notes, "Rewise").await.unwrap();
        let notes = store.list_notes().await.unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(find_page_by_title(&notes, "Rewise").unwrap().id, id);
    }
}
