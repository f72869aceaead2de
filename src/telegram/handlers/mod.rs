//! Telegram bot handler tree configuration
//!
//! The handlers are organized in a testable way: the dispatcher schema takes its
//! dependencies by value, so tests can build it around an in-memory store.

mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
