//! Persistence: SQLite pool, migrations and the store used by handlers

pub mod db;
pub mod memory;
pub mod migrations;
pub mod store;

// Re-exports for convenience
pub use db::{create_pool, get_connection, DbConnection, DbPool, Sponsor, StatsRecord};
pub use memory::MemoryStore;
pub use store::{SqliteStore, Store};
