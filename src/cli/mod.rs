//! CLI layer - Command-line interface

pub mod commands;
pub mod output;

pub use commands::{parse_relation_arg, Cli, Commands};
pub use output::{format_category_list, format_entry_detail, format_entry_list, format_summary};
