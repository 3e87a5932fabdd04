//! codex - Worldbuilding archive
//!
//! Keeps a flat collection of short entries (characters, locations, lore)
//! in an owned store that mirrors itself to a durable key-value slot after
//! every change.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use application::EntryStore;
pub use error::CodexError;
