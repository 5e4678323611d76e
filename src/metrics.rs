// =============================================================================
// METRICS MODULE
// =============================================================================
// Prometheus metrics: request counts and latency, plus doctor validation
// outcomes. Scraped from GET /metrics.
// =============================================================================

use anyhow::Result;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

/// HTTP request counter
/// Labels: method, endpoint, status
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";

/// HTTP request duration histogram
/// Labels: method, endpoint
pub const HTTP_REQUEST_DURATION_SECONDS: &str = "http_request_duration_seconds";

/// Doctor validation counter
/// Labels: result (valid/invalid)
pub const DOCTOR_VALIDATIONS_TOTAL: &str = "doctor_validations_total";

/// Initialize the Prometheus recorder and return the handle used to render it.
pub fn setup_metrics() -> Result<PrometheusHandle> {
    // Requests here are pure computation, so the buckets stop well short of
    // the multi-second range.
    let latency_buckets = &[
        0.0001, // 100µs
        0.0005, // 500µs
        0.001,  // 1ms
        0.005,  // 5ms
        0.01,   // 10ms
        0.05,   // 50ms
        0.1,    // 100ms
        0.5,    // 500ms
    ];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION_SECONDS.to_string()),
            latency_buckets,
        )?
        .install_recorder()?;

    describe_counter!(
        HTTP_REQUESTS_TOTAL,
        "Total number of HTTP requests received"
    );

    describe_histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "HTTP request latency in seconds"
    );

    describe_counter!(
        DOCTOR_VALIDATIONS_TOTAL,
        "Doctor records checked, by outcome"
    );

    Ok(handle)
}

/// Record an HTTP request
///
/// # Arguments
/// * `method` - HTTP method (GET, POST, etc.)
/// * `endpoint` - Route pattern (/api/v1/doctors/validate)
/// * `status` - Response status code
/// * `duration_secs` - Request duration in seconds
pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration_secs: f64) {
    counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);

    histogram!(
        HTTP_REQUEST_DURATION_SECONDS,
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}

pub fn record_doctor_validation(valid: bool) {
    let result = if valid { "valid" } else { "invalid" };
    counter!(DOCTOR_VALIDATIONS_TOTAL, "result" => result).increment(1);
}
