//! Store metrics collection.

use metrics::{counter, histogram};

/// Metric name constants for consistency.
pub mod names {
    /// Total Data API requests by action and status.
    pub const REQUESTS_TOTAL: &str = "store_requests_total";

    /// Total retry attempts by action.
    pub const RETRIES_TOTAL: &str = "store_retries_total";

    /// Request latency in seconds by action.
    pub const LATENCY_SECONDS: &str = "store_latency_seconds";
}

/// Record metrics for a completed Data API request.
pub fn record_request(action: &str, status: u16, latency_ms: f64) {
    counter!(
        names::REQUESTS_TOTAL,
        "action" => action.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        names::LATENCY_SECONDS,
        "action" => action.to_string()
    )
    .record(latency_ms / 1000.0);
}

/// Record a retry attempt.
pub fn record_retry(action: &str) {
    counter!(
        names::RETRIES_TOTAL,
        "action" => action.to_string()
    )
    .increment(1);
}
