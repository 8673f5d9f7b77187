//! Prometheus metrics for the Bookshelf API.
//!
//! Handlers and middleware record through the `metrics` facade; nothing is
//! collected until [`install_recorder`] installs the Prometheus exporter.
//! Without a recorder every call here is a no-op, which keeps tests free of
//! global state.

use axum::{
    http::{Method, StatusCode},
    routing::get,
    Router,
};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

/// Books created through the API.
pub const BOOKS_CREATED: &str = "bookshelf_books_created_total";
/// Books modified through the API, labelled by `kind` (`patch` or `replace`).
pub const BOOKS_UPDATED: &str = "bookshelf_books_updated_total";
/// Books deleted through the API.
pub const BOOKS_DELETED: &str = "bookshelf_books_deleted_total";
/// Books currently held by the store.
pub const BOOKS_STORED: &str = "bookshelf_books_stored";
/// HTTP requests served, labelled by `method` and `status`.
pub const HTTP_REQUESTS: &str = "http_requests_total";
/// HTTP request latency.
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the Prometheus recorder and return a handle for rendering.
///
/// # Errors
///
/// Returns [`MetricsError::Install`] if a recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[0.0005, 0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Prometheus metrics recorder installed");
    Ok(handle)
}

/// Router exposing `GET /metrics` in Prometheus text format.
pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || std::future::ready(handle.render())))
}

fn register_metrics() {
    describe_counter!(BOOKS_CREATED, "Total number of books created");
    describe_counter!(BOOKS_UPDATED, "Total number of books updated or replaced");
    describe_counter!(BOOKS_DELETED, "Total number of books deleted");
    describe_gauge!(BOOKS_STORED, "Number of books currently stored");
    describe_counter!(HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_histogram!(HTTP_REQUEST_DURATION, "Time taken to serve HTTP requests");
}

/// Record a created book. Also steps the stored-books gauge up by one.
pub fn record_book_created() {
    counter!(BOOKS_CREATED).increment(1);
    gauge!(BOOKS_STORED).increment(1.0);
}

/// Record a modified book; `kind` is `patch` or `replace`.
pub fn record_book_updated(kind: &'static str) {
    counter!(BOOKS_UPDATED, "kind" => kind).increment(1);
}

/// Record a deleted book. Also steps the stored-books gauge down by one.
pub fn record_book_deleted() {
    counter!(BOOKS_DELETED).increment(1);
    gauge!(BOOKS_STORED).decrement(1.0);
}

/// Set the number of stored books outright. Called once at startup; after
/// that, creates and deletes adjust it.
#[allow(clippy::cast_precision_loss)] // Book counts stay far below 2^52
pub fn record_books_stored(count: usize) {
    gauge!(BOOKS_STORED).set(count as f64);
}

/// Record one served HTTP request.
pub fn record_request(method: &Method, status: StatusCode, elapsed: Duration) {
    let method = method.as_str().to_owned();
    let status = status.as_u16().to_string();
    counter!(HTTP_REQUESTS, "method" => method.clone(), "status" => status.clone()).increment(1);
    histogram!(HTTP_REQUEST_DURATION, "method" => method, "status" => status)
        .record(elapsed.as_secs_f64());
}
