use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;

/// Database file path
/// Read from DATABASE_PATH environment variable
/// Default: apchu.sqlite
pub static DATABASE_PATH: Lazy<String> =
    Lazy::new(|| env::var("DATABASE_PATH").unwrap_or_else(|_| "apchu.sqlite".to_string()));

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: app.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "app.log".to_string()));

/// Bot token
/// Read from BOT_TOKEN or TELOXIDE_TOKEN environment variable
pub static BOT_TOKEN: Lazy<String> = Lazy::new(|| {
    env::var("BOT_TOKEN")
        .or_else(|_| env::var("TELOXIDE_TOKEN"))
        .unwrap_or_else(|_| String::new())
});

/// HTTP server port (health check + metrics)
/// Read from PORT environment variable, the variable App Engine / Railway set
/// Default: 8080
pub static PORT: Lazy<u16> = Lazy::new(|| {
    env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080)
});

/// Parses a list of numeric Telegram ids separated by commas or whitespace.
/// Anything that doesn't parse is skipped.
pub fn parse_id_list(raw: &str) -> Vec<i64> {
    raw.split([',', ' ', '\n', '\t'])
        .filter_map(|part| part.trim().parse::<i64>().ok())
        .collect()
}

fn id_list_from_env(key: &str) -> Vec<i64> {
    env::var(key).ok().map(|raw| parse_id_list(&raw)).unwrap_or_default()
}

/// Membership lists
pub mod members {
    use super::{id_list_from_env, Lazy};

    /// Admin user IDs, read from ADMIN_IDS
    pub static ADMIN_IDS: Lazy<Vec<i64>> = Lazy::new(|| id_list_from_env("ADMIN_IDS"));

    /// VIP user IDs, read from VIP_IDS
    pub static VIP_IDS: Lazy<Vec<i64>> = Lazy::new(|| id_list_from_env("VIP_IDS"));

    /// Ultra-VIP user IDs, read from ULTRA_VIP_IDS
    pub static ULTRA_VIP_IDS: Lazy<Vec<i64>> = Lazy::new(|| id_list_from_env("ULTRA_VIP_IDS"));
}

/// Size generator constants
pub mod measure {
    /// Smallest possible draw
    pub const MIN_SIZE: i64 = 3;

    /// Largest possible draw
    pub const MAX_SIZE: i64 = 30;

    /// Draws per measurement
    pub const SAMPLE_SIZE: usize = 10;

    /// Index range used when the 2nd and 4th smallest draws are equal
    pub const BIASED_INDEX_MIN: i64 = 6;
    pub const BIASED_INDEX_MAX: i64 = 9;

    /// Index range used otherwise (inclusive, so 6 is reachable)
    pub const PLAIN_INDEX_MIN: i64 = 0;
    pub const PLAIN_INDEX_MAX: i64 = 6;
}

/// Membership bonuses added to the generated size
pub mod bonus {
    /// Added for VIP members
    pub const VIP: i64 = 5;

    /// Added for ultra-VIP members (on top of VIP if both)
    pub const ULTRA_VIP: i64 = 50;
}

/// Inline answer configuration
pub mod inline {
    use super::{env, Lazy};

    /// How long Telegram may cache an inline answer per user (seconds)
    /// Read from INLINE_CACHE_TIME environment variable
    /// Default: 43200 (12 hours)
    pub static CACHE_TIME_SECS: Lazy<u32> = Lazy::new(|| {
        env::var("INLINE_CACHE_TIME")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(43_200)
    });
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API requests (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Database configuration
pub mod database {
    /// Maximum number of pooled SQLite connections
    pub const POOL_MAX_SIZE: u32 = 10;
}
