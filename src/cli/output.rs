//! Output formatting utilities

use crate::application::DashboardSummary;
use crate::domain::{stats, Category, Entry, Relation};
use chrono::{DateTime, Utc};

/// Format a list of entries for display, one per line
pub fn format_entry_list(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format!(
            "{}  {:<10}  {}\n",
            entry.id,
            entry.category.id(),
            entry.title
        ));
    }
    output
}

/// Format one entry with its resolved relations
pub fn format_entry_detail(entry: &Entry, linked: &[(&Relation, &Entry)]) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", entry.title));
    output.push_str(&format!("id:       {}\n", entry.id));
    output.push_str(&format!("category: {}\n", entry.category.label()));
    if !entry.tags.is_empty() {
        output.push_str(&format!("tags:     {}\n", entry.tags.join(", ")));
    }
    if let Some(url) = &entry.image_url {
        output.push_str(&format!("image:    {}\n", url));
    }
    output.push_str(&format!("created:  {}\n", entry.created_at.to_rfc3339()));
    output.push_str(&format!("updated:  {}\n", entry.updated_at.to_rfc3339()));
    output.push('\n');
    output.push_str(&entry.content);
    output.push('\n');

    if !linked.is_empty() {
        output.push_str("\nLinked entries:\n");
        for (relation, target) in linked {
            output.push_str(&format!(
                "  {}: {} ({})\n",
                relation.label, target.title, target.id
            ));
        }
    }
    output
}

/// Format the dashboard summary relative to `now`
pub fn format_summary(summary: &DashboardSummary, now: DateTime<Utc>) -> String {
    let mut output = String::new();
    output.push_str(&format!("Entries:       {}\n", summary.entry_count));
    output.push_str(&format!("Words:         {}\n", summary.word_count));
    let last = summary
        .last_revision
        .map(|t| stats::format_relative(t, now))
        .unwrap_or_else(|| "Awaiting input".to_string());
    output.push_str(&format!("Last revision: {}\n", last));

    output.push_str("\nRecent:\n");
    if summary.recent.is_empty() {
        output.push_str("  The archive is empty\n");
    }
    for entry in &summary.recent {
        output.push_str(&format!(
            "  {}  [{}] {} ({})\n",
            entry.id,
            entry.category.label(),
            entry.title,
            stats::format_relative(entry.updated_at, now)
        ));
    }
    output
}

/// Format category labels with their entry counts
pub fn format_category_list(counts: &[(Category, usize)]) -> String {
    let mut output = String::new();
    for (category, count) in counts {
        output.push_str(&format!(
            "{:<11} {:<14} {}\n",
            category.id(),
            category.label(),
            count
        ));
    }
    output
}
