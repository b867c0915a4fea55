//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): HTTP latency
//! - `gateway_backend_calls_total` (counter): backend calls by operation, outcome
//! - `gateway_backend_call_duration_seconds` (histogram): backend latency
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP listener on `addr`.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("route", route.to_string()),
        ("status", status.to_string()),
    ];
    counter!("gateway_requests_total", &labels).increment(1);
    histogram!("gateway_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record a completed backend call.
pub fn record_backend_call(operation: &'static str, success: bool, start: Instant) {
    let outcome = if success { "ok" } else { "error" };
    counter!("gateway_backend_calls_total", "operation" => operation, "outcome" => outcome)
        .increment(1);
    histogram!("gateway_backend_call_duration_seconds", "operation" => operation)
        .record(start.elapsed().as_secs_f64());
}
