//! Sample entries used when no valid persisted collection exists

use crate::domain::{Category, Entry, Relation};
use chrono::{DateTime, Utc};

/// The seed set: a landmark and a character who lives there.
pub fn seed_entries(now: DateTime<Utc>) -> Vec<Entry> {
    vec![
        Entry {
            id: "1".to_string(),
            title: "The Iron Spire".to_string(),
            category: Category::Locations,
            tags: vec!["capital".to_string(), "landmark".to_string()],
            content: "The Iron Spire is the central tower of the High City, visible from \
                leagues away. It serves as both a navigational beacon and the seat of the \
                Grand Council.\n\nConstructed from a mysterious black metal that absorbs \
                light, it is said to predate the current civilization."
                .to_string(),
            image_url: None,
            relations: Vec::new(),
            created_at: now,
            updated_at: now,
        },
        Entry {
            id: "2".to_string(),
            title: "Elyra Vance".to_string(),
            category: Category::Characters,
            tags: vec!["protagonist".to_string(), "mage".to_string()],
            content: "Elyra is a rogue scholar from the lower districts, obsessed with the \
                ancient texts found in the sunken library. She possesses a rare talent for \
                deciphering the Precursor runes."
                .to_string(),
            image_url: None,
            relations: vec![Relation::new("1", "Resident of")],
            created_at: now,
            updated_at: now,
        },
    ]
}
