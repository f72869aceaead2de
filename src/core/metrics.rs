//! Metrics collection for the bot using Prometheus
//!
//! Registered in the default registry and exposed by the web server at `/metrics`.

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter, IntCounterVec,
};

/// Inline queries answered
pub static INLINE_QUERIES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("apchu_inline_queries_total", "Total number of inline queries answered")
        .expect("register apchu_inline_queries_total")
});

/// Distribution of generated sizes (after membership bonus)
pub static GENERATED_SIZE: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "apchu_generated_size_cm",
        "Generated sizes after membership bonus",
        vec![5.0, 8.0, 11.0, 13.0, 15.0, 18.0, 24.0, 30.0, 60.0]
    )
    .expect("register apchu_generated_size_cm")
});

/// Failed store operations
/// Labels: operation (record/average/sponsors)
pub static STORE_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "apchu_store_failures_total",
        "Store operations that failed and were skipped",
        &["operation"]
    )
    .expect("register apchu_store_failures_total")
});

/// Commands handled
/// Labels: command
pub static COMMANDS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!("apchu_commands_total", "Bot commands handled", &["command"])
        .expect("register apchu_commands_total")
});

/// Touch every metric so it shows up in `/metrics` before the first event.
pub fn init_metrics() {
    Lazy::force(&INLINE_QUERIES_TOTAL);
    Lazy::force(&GENERATED_SIZE);
    Lazy::force(&STORE_FAILURES_TOTAL);
    Lazy::force(&COMMANDS_TOTAL);
    log::info!("Metrics registry initialized");
}

pub fn record_store_failure(operation: &str) {
    STORE_FAILURES_TOTAL.with_label_values(&[operation]).inc();
}

pub fn record_command(command: &str) {
    COMMANDS_TOTAL.with_label_values(&[command]).inc();
}
