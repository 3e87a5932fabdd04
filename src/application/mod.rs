//! Application layer - Use cases and orchestration

pub mod dashboard;
pub mod entry_store;
pub mod init;
pub mod manage_config;
pub mod open_archive;

pub use dashboard::{summarize, DashboardSummary};
pub use entry_store::{decode_entries, encode_entries, EntryStore, StoreOrigin};
pub use manage_config::ConfigService;
pub use open_archive::{open_archive, Archive};
