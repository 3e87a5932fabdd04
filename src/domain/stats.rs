//! Collection statistics shown on the dashboard

use crate::domain::Entry;
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn word_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"\S+").unwrap())
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    word_regex().find_iter(text).count()
}

/// Total words across every entry body
pub fn total_words(entries: &[Entry]) -> usize {
    entries.iter().map(Entry::word_count).sum()
}

/// The `limit` most recently updated entries, newest first.
/// Ties keep collection order.
pub fn recent_entries(entries: &[Entry], limit: usize) -> Vec<&Entry> {
    let mut sorted: Vec<&Entry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    sorted.truncate(limit);
    sorted
}

/// Human-readable distance from `then` to `now`, e.g. "5 minutes ago"
pub fn format_relative(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    if elapsed < Duration::zero() {
        return "just now".to_string();
    }

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "less than a minute ago".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        format!("about {}", plural(hours, "hour"))
    } else if days < 30 {
        plural(days, "day")
    } else if days < 365 {
        plural(days / 30, "month")
    } else {
        format!("about {}", plural(days / 365, "year"))
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
