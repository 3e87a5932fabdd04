//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "codex")]
#[command(about = "Worldbuilding archive: characters, places and lore", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new archive
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// List entries, newest first
    List {
        /// Only entries in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show one entry with its linked entries
    Show {
        /// Entry id
        id: String,
    },

    /// Create an entry
    New {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// Category (default: misc)
        #[arg(short, long)]
        category: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Image URL
        #[arg(long)]
        image: Option<String>,

        /// Related entry as ID or ID=LABEL (repeatable)
        #[arg(short, long = "relate")]
        relations: Vec<String>,
    },

    /// Edit an entry
    Edit {
        /// Entry id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<String>,

        /// Tag to add (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Tag to remove (repeatable)
        #[arg(long = "untag")]
        untags: Vec<String>,

        /// Remove all tags before adding
        #[arg(long)]
        clear_tags: bool,

        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,

        #[arg(long)]
        clear_image: bool,

        /// Related entry to add as ID or ID=LABEL (repeatable)
        #[arg(short, long = "relate")]
        relations: Vec<String>,

        /// Related entry id to remove (repeatable)
        #[arg(long = "unrelate")]
        unrelations: Vec<String>,

        /// Remove all relations before adding
        #[arg(long)]
        clear_relations: bool,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Search titles, content and tags
    Search {
        query: String,
    },

    /// Show archive statistics and recent entries
    Stats,

    /// List categories with entry counts
    Categories,

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}

/// Split a `--relate` argument into target id and optional label
pub fn parse_relation_arg(arg: &str) -> (&str, Option<&str>) {
    match arg.split_once('=') {
        Some((id, label)) => (id.trim(), Some(label)),
        None => (arg.trim(), None),
    }
}
