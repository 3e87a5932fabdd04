//! Library-level tests for the entry store contract

use codex::application::{decode_entries, encode_entries, EntryStore, StoreOrigin};
use codex::domain::{Category, Entry, EntryDraft, EntryPatch, Relation};
use codex::error::{CodexError, Result};
use codex::infrastructure::{FileStorage, KeyValueStore, MemoryStorage};
use std::collections::HashSet;
use tempfile::TempDir;

const KEY: &str = "codex-entries";

fn store() -> EntryStore<MemoryStorage> {
    EntryStore::initialize(MemoryStorage::new(), KEY)
}

/// Storage whose writes always fail, as with an exhausted quota
#[derive(Default)]
struct FullStorage {
    inner: MemoryStorage,
}

impl KeyValueStore for FullStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(CodexError::Storage("quota exceeded".to_string()))
    }
}

fn persisted(store: &EntryStore<MemoryStorage>) -> Vec<Entry> {
    decode_entries(&store.storage().get(KEY).unwrap().unwrap()).unwrap()
}

#[test]
fn test_create_ids_unique_and_timestamps_equal() {
    let mut store = store();
    let mut ids: HashSet<String> = store.list().iter().map(|e| e.id.clone()).collect();

    for i in 0..50 {
        let entry = store.create(EntryDraft::new(format!("E{}", i), Category::Misc, "x"));
        assert!(ids.insert(entry.id.clone()), "duplicate id {}", entry.id);
        assert_eq!(entry.created_at, entry.updated_at);
    }
    assert_eq!(store.len(), 52);
}

#[test]
fn test_empty_patch_only_advances_updated_at() {
    let mut store = store();
    let original = store.get("2").unwrap().clone();

    let mut previous = original.updated_at;
    for _ in 0..5 {
        let updated = store.update("2", EntryPatch::new()).unwrap();
        assert!(updated.updated_at > previous);
        previous = updated.updated_at;

        let mut expected = original.clone();
        expected.updated_at = updated.updated_at;
        assert_eq!(updated, expected);
    }
}

#[test]
fn test_update_field_by_field() {
    let mut store = store();
    let original = store.get("1").unwrap().clone();

    let updated = store
        .update("1", EntryPatch::new().content("Fallen."))
        .unwrap();
    assert_eq!(updated.content, "Fallen.");
    assert_eq!(updated.title, original.title);
    assert_eq!(updated.category, original.category);
    assert_eq!(updated.tags, original.tags);
    assert_eq!(updated.image_url, original.image_url);
    assert_eq!(updated.relations, original.relations);
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);

    let updated = store
        .update(
            "1",
            EntryPatch::new()
                .category(Category::Timeline)
                .image_url(Some("spire.png".to_string())),
        )
        .unwrap();
    assert_eq!(updated.category, Category::Timeline);
    assert_eq!(updated.image_url.as_deref(), Some("spire.png"));
    assert_eq!(updated.content, "Fallen.");

    assert_eq!(persisted(&store)[0], updated);
}

#[test]
fn test_update_dedupes_tags() {
    let mut store = store();
    let updated = store
        .update(
            "1",
            EntryPatch::new().tags(vec!["a".into(), "b".into(), "a".into()]),
        )
        .unwrap();
    assert_eq!(updated.tags, vec!["a", "b"]);
}

#[test]
fn test_update_unknown_id_is_noop() {
    let mut store = store();
    let before = store.list().to_vec();
    assert!(store.update("missing", EntryPatch::new().title("X")).is_none());
    assert_eq!(store.list(), before.as_slice());
}

#[test]
fn test_delete_then_get_is_absent() {
    let mut store = store();
    let removed = store.delete("1").unwrap();
    assert_eq!(removed.title, "The Iron Spire");
    assert!(store.get("1").is_none());

    assert!(store.delete("1").is_none());
    assert_eq!(store.len(), 1);
    assert_eq!(persisted(&store).len(), 1);
}

#[test]
fn test_search_is_idempotent() {
    let mut store = store();
    store.create(EntryDraft::new("Spire Guard", Category::Characters, "Watches the tower."));

    for query in ["", "spire", "TOWER", "zzz"] {
        let first: Vec<Entry> = store.search(query).into_iter().cloned().collect();
        let second: Vec<Entry> = store.search(query).into_iter().cloned().collect();
        assert_eq!(first, second, "query {:?}", query);
    }
}

#[test]
fn test_search_empty_returns_nothing() {
    let store = store();
    assert!(store.search("").is_empty());
    assert!(store.search(" \t").is_empty());
}

#[test]
fn test_search_collection_order() {
    let mut store = store();
    let created = store.create(EntryDraft::new("Spire Guard", Category::Characters, "x"));

    let ids: Vec<&str> = store.search("spire").iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec![created.id.as_str(), "1"]);
}

#[test]
fn test_list_by_category_partitions_list() {
    let mut store = store();
    for (i, category) in Category::ALL.into_iter().enumerate() {
        store.create(EntryDraft::new(format!("E{}", i), category, "x"));
    }

    let mut seen = HashSet::new();
    let mut total = 0;
    for category in Category::ALL {
        for entry in store.list_by_category(category) {
            assert_eq!(entry.category, category);
            assert!(seen.insert(entry.id.clone()));
            total += 1;
        }
    }
    assert_eq!(total, store.len());
}

#[test]
fn test_persistence_round_trip() {
    let mut store = store();
    let mut draft = EntryDraft::new("Glass Choir", Category::Magic, "Songs that cut.");
    draft.image_url = Some("https://img.example/choir.png".to_string());
    draft.relations.push(Relation::new("2", "Taught"));
    store.create(draft);
    store.update("1", EntryPatch::new().title("Spire"));

    let payload = encode_entries(store.list()).unwrap();
    let decoded = decode_entries(&payload).unwrap();
    assert_eq!(decoded, store.list());

    let reloaded = EntryStore::initialize(store.into_storage(), KEY);
    assert_eq!(reloaded.origin(), StoreOrigin::Persisted);
    assert_eq!(reloaded.list(), decoded.as_slice());
}

#[test]
fn test_dangling_relation_scenario() {
    let mut store = store();
    let b_before = store.get("2").unwrap().clone();

    store.delete("1");

    let b = store.get("2").unwrap();
    assert_eq!(*b, b_before);
    assert_eq!(b.relations, vec![Relation::new("1", "Resident of")]);

    let linked: Vec<&Entry> = b
        .relations
        .iter()
        .filter_map(|r| store.list().iter().find(|e| e.id == r.target_id))
        .collect();
    assert!(linked.is_empty());
    assert!(store.linked_entries("2").is_empty());
}

#[test]
fn test_create_dedupes_duplicate_tags() {
    let mut store = store();
    let mut draft = EntryDraft::new("X", Category::Misc, "hi");
    draft.tags = vec!["a".to_string(), "a".to_string()];

    let entry = store.create(draft);
    assert_eq!(entry.tags, vec!["a"]);
    assert_eq!(persisted(&store)[0].tags, vec!["a"]);
}

#[test]
fn test_write_failure_is_not_fatal() {
    let mut store = EntryStore::initialize(FullStorage::default(), KEY);

    let entry = store.create(EntryDraft::new("X", Category::Misc, "hi"));
    assert_eq!(store.get(&entry.id), Some(&entry));
    assert!(store.last_write_error().unwrap().contains("quota exceeded"));

    assert!(store.update(&entry.id, EntryPatch::new().title("Y")).is_some());
    assert_eq!(store.get(&entry.id).unwrap().title, "Y");
}

#[test]
fn test_successful_write_clears_error() {
    let mut store = EntryStore::initialize(MemoryStorage::new(), KEY);
    store.create(EntryDraft::new("X", Category::Misc, "hi"));
    assert!(store.last_write_error().is_none());
}

#[test]
fn test_file_storage_backed_store() {
    let temp = TempDir::new().unwrap();
    let mut store = EntryStore::initialize(FileStorage::new(temp.path().to_path_buf()), KEY);
    let entry = store.create(EntryDraft::new("X", Category::Cultures, "hi"));

    let reloaded = EntryStore::initialize(FileStorage::new(temp.path().to_path_buf()), KEY);
    assert_eq!(reloaded.origin(), StoreOrigin::Persisted);
    assert_eq!(reloaded.get(&entry.id), Some(&entry));
    assert_eq!(reloaded.list_by_category(Category::Cultures).len(), 1);
}
