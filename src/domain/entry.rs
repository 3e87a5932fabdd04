//! Entry records, drafts and patches
//!
//! `Entry` is the only persisted record. Its serialized field names
//! (`imageUrl`, `createdAt`, `targetId`, ...) are the storage format, so
//! renaming a field here is a format change.

use crate::domain::Category;
use crate::error::{CodexError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label given to relations added without an explicit one
pub const DEFAULT_RELATION_LABEL: &str = "Related to";

/// Directed, unenforced link from one entry to another.
///
/// `target_id` may name an entry that no longer exists; readers skip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub target_id: String,
    #[serde(rename = "type")]
    pub label: String,
}

impl Relation {
    pub fn new(target_id: impl Into<String>, label: impl Into<String>) -> Self {
        Relation {
            target_id: target_id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub category: Category,
    #[serde(default)]
    pub tags: Vec<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Build a stored entry from a draft. Both timestamps are set to `now`.
    pub fn from_draft(id: String, draft: EntryDraft, now: DateTime<Utc>) -> Self {
        Entry {
            id,
            title: draft.title,
            category: draft.category,
            tags: dedupe_tags(draft.tags),
            content: draft.content,
            image_url: draft.image_url,
            relations: draft.relations,
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow merge: every field present in `patch` overwrites, absent fields stay.
    /// `id` and `created_at` are not patchable. Does not touch `updated_at`.
    pub fn apply(&mut self, patch: EntryPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tags) = patch.tags {
            self.tags = dedupe_tags(tags);
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(relations) = patch.relations {
            self.relations = relations;
        }
    }

    /// Number of whitespace-separated words in the body
    pub fn word_count(&self) -> usize {
        crate::domain::stats::count_words(&self.content)
    }
}

/// A candidate entry lacking id and timestamps.
///
/// Mirrors the editor form: tags and relations are edited in place with the
/// helper methods, then the whole draft is handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub relations: Vec<Relation>,
}

impl EntryDraft {
    pub fn new(title: impl Into<String>, category: Category, content: impl Into<String>) -> Self {
        EntryDraft {
            title: title.into(),
            category,
            content: content.into(),
            ..Default::default()
        }
    }

    /// Add a tag. Input is trimmed; blank and already-present tags are ignored.
    /// Returns true if the tag was added.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    /// Relate this draft to `target_id`. A target may appear only once.
    /// Returns true if the relation was added.
    pub fn add_relation(&mut self, target_id: &str, label: Option<&str>) -> bool {
        let target_id = target_id.trim();
        if target_id.is_empty() || self.relations.iter().any(|r| r.target_id == target_id) {
            return false;
        }
        let label = label
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_RELATION_LABEL);
        self.relations.push(Relation::new(target_id, label));
        true
    }

    pub fn remove_relation(&mut self, target_id: &str) {
        self.relations.retain(|r| r.target_id != target_id);
    }

    /// Front-end validation: a savable entry needs a title and content.
    ///
    /// The store accepts any draft; callers run this before `create`.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(CodexError::Validation(
                "Missing information: please provide at least a title and content".to_string(),
            ));
        }
        Ok(())
    }
}

impl From<&Entry> for EntryDraft {
    fn from(entry: &Entry) -> Self {
        EntryDraft {
            title: entry.title.clone(),
            category: entry.category,
            tags: entry.tags.clone(),
            content: entry.content.clone(),
            image_url: entry.image_url.clone(),
            relations: entry.relations.clone(),
        }
    }
}

/// Partial set of fields for `EntryStore::update`.
///
/// `None` means "keep the current value". `image_url` is doubly optional so a
/// patch can clear the image (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub category: Option<Category>,
    pub tags: Option<Vec<String>>,
    pub content: Option<String>,
    pub image_url: Option<Option<String>>,
    pub relations: Option<Vec<Relation>>,
}

impl EntryPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    pub fn relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = Some(relations);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == EntryPatch::default()
    }

    /// A patch that overwrites every editable field with the draft's values,
    /// which is how the editor form saves an existing entry.
    pub fn from_draft(draft: EntryDraft) -> Self {
        EntryPatch {
            title: Some(draft.title),
            category: Some(draft.category),
            tags: Some(draft.tags),
            content: Some(draft.content),
            image_url: Some(draft.image_url),
            relations: Some(draft.relations),
        }
    }
}

/// Remove repeated tags, keeping the first occurrence. Case-sensitive.
pub fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
