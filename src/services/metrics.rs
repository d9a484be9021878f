//! Prometheus metrics for invoice-actions.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, HistogramVec, TextEncoder,
};

/// Invoice form action counter by action and outcome.
pub static INVOICE_ACTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoice_actions_total",
        "Total number of invoice form actions",
        &["action", "outcome"] // outcome: ok, invalid, store_error, disabled
    )
    .expect("Failed to register invoice_actions_total")
});

/// Sign-in attempt counter by outcome.
pub static SIGN_IN_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoice_sign_in_total",
        "Total number of sign-in attempts",
        &["outcome"] // ok, rejected, error
    )
    .expect("Failed to register sign_in_total")
});

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "invoice_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&INVOICE_ACTIONS_TOTAL);
    Lazy::force(&SIGN_IN_TOTAL);
    Lazy::force(&DB_QUERY_DURATION);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
