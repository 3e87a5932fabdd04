//! Domain layer - Entry model and pure collection logic

pub mod category;
pub mod entry;
pub mod search;
pub mod seed;
pub mod stats;

pub use category::Category;
pub use entry::{dedupe_tags, Entry, EntryDraft, EntryPatch, Relation, DEFAULT_RELATION_LABEL};
pub use seed::seed_entries;
