//! Journal Commands

use serde::Serialize;

use daily_up_core::JournalEntry;

use crate::state::AppState;
use crate::utils::error::AppResult;

/// Journal listing, oldest first.
#[derive(Debug, Clone, Serialize)]
pub struct JournalView {
    pub backend: &'static str,
    pub total: usize,
    pub entries: Vec<JournalEntry>,
}

/// List the journal, keeping only the last `limit` entries when given.
pub fn list_journal(state: &AppState, limit: Option<usize>) -> AppResult<JournalView> {
    let journal = state.journal();
    let mut entries = journal.read_all()?;
    let total = entries.len();
    if let Some(limit) = limit {
        entries.drain(..total.saturating_sub(limit));
    }
    Ok(JournalView {
        backend: journal.name(),
        total,
        entries,
    })
}
