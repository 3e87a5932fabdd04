//! Entry store use case
//!
//! Owns the entry collection. Every mutation writes the whole collection to
//! one durable slot; the in-memory collection stays the source of truth for
//! the session even when that write fails.
//!
//! # Policies
//! - `update`/`delete`/`get` on an unknown id are no-ops returning `None`.
//! - Tags are deduplicated (first occurrence wins, case-sensitive) on create,
//!   update and load. A stored entry with repeated tags loads with them
//!   collapsed; it is not treated as malformed.
//! - A stored collection with repeated ids, or with an entry updated before
//!   it was created, is malformed and falls back to the seed set.
//! - A blank search query returns no entries.
//! - Relations are never validated or cascaded; readers skip dangling ones.

use crate::domain::{
    dedupe_tags, search, seed_entries, Category, Entry, EntryDraft, EntryPatch, Relation,
};
use crate::error::{CodexError, Result};
use crate::infrastructure::KeyValueStore;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use uuid::Uuid;

/// Suffix of the slot that receives an unreadable payload before reseeding
pub const CORRUPT_SLOT_SUFFIX: &str = ".corrupt";

/// Where the collection came from at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOrigin {
    /// Loaded from the durable slot
    Persisted,
    /// Slot was empty or unreadable; seed set in use
    Seeded,
    /// Slot held malformed data; it was set aside and the seed set is in use
    Recovered,
}

/// Serialize a collection to the durable slot format (a JSON array of entries)
pub fn encode_entries(entries: &[Entry]) -> Result<String> {
    Ok(serde_json::to_string(entries)?)
}

/// Parse the durable slot format.
///
/// Duplicate ids and `updatedAt` earlier than `createdAt` count as malformed.
/// Repeated tags are collapsed.
pub fn decode_entries(payload: &str) -> Result<Vec<Entry>> {
    let mut entries: Vec<Entry> = serde_json::from_str(payload)?;

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.id.as_str()) {
            return Err(CodexError::Storage(format!(
                "Duplicate entry id in stored collection: {}",
                entry.id
            )));
        }
        if entry.updated_at < entry.created_at {
            return Err(CodexError::Storage(format!(
                "Entry {} was updated before it was created",
                entry.id
            )));
        }
    }

    for entry in &mut entries {
        entry.tags = dedupe_tags(std::mem::take(&mut entry.tags));
    }

    Ok(entries)
}

/// The authoritative in-memory entry collection plus its durable mirror
pub struct EntryStore<S: KeyValueStore> {
    storage: S,
    key: String,
    entries: Vec<Entry>,
    origin: StoreOrigin,
    clock: fn() -> DateTime<Utc>,
    last_write_error: Option<String>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Load the collection from `storage` under `key`, falling back to the
    /// seed set. Never fails.
    pub fn initialize(storage: S, key: impl Into<String>) -> Self {
        Self::initialize_with_clock(storage, key, Utc::now)
    }

    /// Same as `initialize` with an explicit time source
    pub fn initialize_with_clock(
        mut storage: S,
        key: impl Into<String>,
        clock: fn() -> DateTime<Utc>,
    ) -> Self {
        let key = key.into();

        let (entries, origin) = match storage.get(&key) {
            Ok(Some(payload)) => match decode_entries(&payload) {
                Ok(entries) => {
                    log::debug!(
                        "event=store_load module=store status=ok key={} count={}",
                        key,
                        entries.len()
                    );
                    (entries, StoreOrigin::Persisted)
                }
                Err(err) => {
                    log::warn!(
                        "event=store_load module=store status=malformed key={} bytes={} error={}",
                        key,
                        payload.len(),
                        err
                    );
                    let corrupt_key = format!("{}{}", key, CORRUPT_SLOT_SUFFIX);
                    if let Err(err) = storage.set(&corrupt_key, &payload) {
                        log::warn!(
                            "event=store_backup module=store status=error key={} error={}",
                            corrupt_key,
                            err
                        );
                    }
                    (seed_entries(clock()), StoreOrigin::Recovered)
                }
            },
            Ok(None) => {
                log::info!("event=store_load module=store status=empty key={}", key);
                (seed_entries(clock()), StoreOrigin::Seeded)
            }
            Err(err) => {
                log::warn!(
                    "event=store_load module=store status=unreadable key={} error={}",
                    key,
                    err
                );
                (seed_entries(clock()), StoreOrigin::Seeded)
            }
        };

        EntryStore {
            storage,
            key,
            entries,
            origin,
            clock,
            last_write_error: None,
        }
    }

    pub fn origin(&self) -> StoreOrigin {
        self.origin
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Message from the most recent failed write, cleared by the next
    /// successful one
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    /// Full collection, most recently created first
    pub fn list(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Store a new entry at the front of the collection.
    ///
    /// No field validation happens here; see `EntryDraft::validate`.
    pub fn create(&mut self, draft: EntryDraft) -> Entry {
        let id = self.fresh_id();
        let entry = Entry::from_draft(id, draft, (self.clock)());

        self.entries.insert(0, entry.clone());
        log::info!(
            "event=entry_create module=store id={} category={}",
            entry.id,
            entry.category
        );
        self.persist();
        entry
    }

    /// Merge `patch` into the entry with `id` and refresh `updated_at`.
    /// Returns `None` without persisting when the id is unknown.
    pub fn update(&mut self, id: &str, patch: EntryPatch) -> Option<Entry> {
        let now = (self.clock)();
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;

        entry.apply(patch);
        entry.updated_at = next_timestamp(entry.updated_at, now);
        let updated = entry.clone();

        log::info!("event=entry_update module=store id={}", id);
        self.persist();
        Some(updated)
    }

    /// Remove the entry with `id`. Relations pointing at it are left alone.
    /// Returns `None` without persisting when the id is unknown.
    pub fn delete(&mut self, id: &str) -> Option<Entry> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        let removed = self.entries.remove(pos);

        log::info!("event=entry_delete module=store id={}", id);
        self.persist();
        Some(removed)
    }

    /// Entries filed under `category`, in collection order
    pub fn list_by_category(&self, category: Category) -> Vec<&Entry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// Case-insensitive substring search over title, content and tags,
    /// in collection order. Blank queries return nothing.
    pub fn search(&self, query: &str) -> Vec<&Entry> {
        if search::is_blank_query(query) {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|e| search::matches(e, query))
            .collect()
    }

    /// Resolve the relations of entry `id` against the current collection.
    ///
    /// Dangling targets are skipped. Returns an empty list for an unknown id.
    pub fn linked_entries(&self, id: &str) -> Vec<(&Relation, &Entry)> {
        let Some(entry) = self.get(id) else {
            return Vec::new();
        };
        entry
            .relations
            .iter()
            .filter_map(|rel| self.get(&rel.target_id).map(|target| (rel, target)))
            .collect()
    }

    /// Entries that `id` could be related to: everything but itself
    pub fn relation_candidates(&self, id: &str) -> Vec<&Entry> {
        self.entries.iter().filter(|e| e.id != id).collect()
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        let result =
            encode_entries(&self.entries).and_then(|payload| self.storage.set(&self.key, &payload));

        match result {
            Ok(()) => {
                self.last_write_error = None;
            }
            Err(err) => {
                log::warn!(
                    "event=store_write module=store status=error key={} count={} error={}",
                    self.key,
                    self.entries.len(),
                    err
                );
                self.last_write_error = Some(err.to_string());
            }
        }
    }
}

/// `now`, or one millisecond past `previous` if the clock has not moved on
fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}
