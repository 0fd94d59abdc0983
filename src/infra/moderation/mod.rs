// Moderation infrastructure - blocklist file and warning storage

mod flat_file_blocklist;
mod sqlite_warning_store;

pub use flat_file_blocklist::FlatFileBlocklistStore;
pub use sqlite_warning_store::SqliteWarningStore;
