//! Substring search over entries

use crate::domain::Entry;

/// True if the query has nothing to search for. Blank queries match no entries.
pub fn is_blank_query(query: &str) -> bool {
    query.trim().is_empty()
}

/// Case-insensitive substring match against title, content and every tag.
///
/// The query is not trimmed; `"spire "` does not match `"The Iron Spire"`
/// at the end of a title.
pub fn matches(entry: &Entry, query: &str) -> bool {
    if is_blank_query(query) {
        return false;
    }
    let needle = query.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.content.to_lowercase().contains(&needle)
        || entry
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}
