//! apchu - inline Telegram bot that measures your Апщу
//!
//! # Module Structure
//!
//! - `measure`: Size generator and classifier (no I/O)
//! - `core`: Configuration, errors, logging, membership lists, metrics, HTTP server
//! - `storage`: SQLite persistence behind the `Store` trait
//! - `telegram`: Dispatcher schema, inline answers and commands

pub mod cli;
pub mod core;
pub mod measure;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use self::core::{config, AppError, AppResult};
pub use measure::{classify, generate};
pub use storage::{create_pool, SqliteStore, Store};
pub use telegram::{schema, HandlerDeps};
