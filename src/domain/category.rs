//! Entry categories

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of sections an entry can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Characters,
    Locations,
    Cultures,
    Magic,
    Technology,
    Timeline,
    /// Catch-all, also the default for new drafts
    #[default]
    Misc,
}

impl Category {
    /// All categories in sidebar display order
    pub const ALL: [Category; 7] = [
        Category::Characters,
        Category::Locations,
        Category::Cultures,
        Category::Magic,
        Category::Technology,
        Category::Timeline,
        Category::Misc,
    ];

    /// Stable lowercase identifier, as persisted
    pub fn id(&self) -> &'static str {
        match self {
            Category::Characters => "characters",
            Category::Locations => "locations",
            Category::Cultures => "cultures",
            Category::Magic => "magic",
            Category::Technology => "technology",
            Category::Timeline => "timeline",
            Category::Misc => "misc",
        }
    }

    /// Human-facing section title
    pub fn label(&self) -> &'static str {
        match self {
            Category::Characters => "Characters",
            Category::Locations => "Locations",
            Category::Cultures => "Cultures",
            Category::Magic => "Redactory",
            Category::Technology => "Technology",
            Category::Timeline => "Timeline",
            Category::Misc => "Miscellaneous",
        }
    }

    /// Icon name used by front ends
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Characters => "Users",
            Category::Locations => "Map",
            Category::Cultures => "Globe",
            Category::Magic => "Sparkles",
            Category::Technology => "Cpu",
            Category::Timeline => "Clock",
            Category::Misc => "FileBox",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.id() == lower)
            .ok_or_else(|| s.to_string())
    }
}
