//! Configuration, errors, logging, membership and the HTTP side of the bot

pub mod config;
pub mod error;
pub mod logging;
pub mod membership;
pub mod metrics;
pub mod web_server;

// Re-exports for convenience
pub use error::{AppError, AppResult};
pub use logging::{init_logger, log_startup_configuration};
pub use membership::{IdSet, Membership};
