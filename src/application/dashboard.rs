//! Dashboard summary use case

use crate::application::EntryStore;
use crate::domain::{stats, Category, Entry};
use crate::infrastructure::KeyValueStore;
use chrono::{DateTime, Utc};

/// Figures shown on the archive overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub entry_count: usize,
    pub word_count: usize,
    /// `updated_at` of the first entry in collection order
    pub last_revision: Option<DateTime<Utc>>,
    pub recent: Vec<Entry>,
    pub category_counts: Vec<(Category, usize)>,
}

/// Summarize the store, listing up to `recent_limit` recently updated entries
pub fn summarize<S: KeyValueStore>(store: &EntryStore<S>, recent_limit: usize) -> DashboardSummary {
    let entries = store.list();

    DashboardSummary {
        entry_count: entries.len(),
        word_count: stats::total_words(entries),
        last_revision: entries.first().map(|e| e.updated_at),
        recent: stats::recent_entries(entries, recent_limit)
            .into_iter()
            .cloned()
            .collect(),
        category_counts: Category::ALL
            .into_iter()
            .map(|c| (c, store.list_by_category(c).len()))
            .collect(),
    }
}
