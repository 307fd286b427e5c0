use std::time::Instant;

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static LUGGAGE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "luggage_operations_total",
        "Lifecycle operations by outcome",
        &["operation", "outcome"]
    )
    .expect("register luggage_operations_total")
});

pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "luggage_http_request_duration_seconds",
        "Request duration in seconds",
        &["method", "status"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("register luggage_http_request_duration_seconds")
});

pub fn record(operation: &str, outcome: &str) {
    LUGGAGE_OPERATIONS_TOTAL.with_label_values(&[operation, outcome]).inc();
}

/// Middleware: observe request latency by method and status.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let started = Instant::now();
    let res = next.run(req).await;
    HTTP_REQUEST_DURATION
        .with_label_values(&[method.as_str(), res.status().as_str()])
        .observe(started.elapsed().as_secs_f64());
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
