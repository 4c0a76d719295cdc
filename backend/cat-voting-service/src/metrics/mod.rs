//! Prometheus metrics for cat-voting-service.
//!
//! Exposes registration/vote/store collectors and an HTTP handler for the `/metrics` endpoint.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Registration attempts by outcome (inserted, existing, upstream_*).
    pub static ref CAT_REGISTRATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cat_registrations_total",
        "Cat registration attempts segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register cat_registrations_total");

    /// Votes by result (recorded, rejected).
    pub static ref CAT_VOTES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cat_votes_total",
        "Vote submissions segmented by result",
        &["result"]
    )
    .expect("failed to register cat_votes_total");

    /// Latency of image provider calls by outcome (ok, unavailable, invalid).
    pub static ref CAT_API_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "cat_api_request_duration_seconds",
        "Image provider request duration segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register cat_api_request_duration_seconds");

    /// Store call latency, pool acquire included, by operation and outcome (ok, error).
    pub static ref CAT_STORE_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "cat_store_operation_duration_seconds",
        "Cat store operation duration segmented by operation and outcome",
        &["operation", "outcome"],
        vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]
    )
    .expect("failed to register cat_store_operation_duration_seconds");

    /// Store failures by operation and error kind.
    pub static ref CAT_STORE_ERRORS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cat_store_errors_total",
        "Cat store failures segmented by operation and error kind",
        &["operation", "kind"]
    )
    .expect("failed to register cat_store_errors_total");
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
