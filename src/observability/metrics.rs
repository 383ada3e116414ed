//! Metrics collection and exposition.
//!
//! # Metrics
//! - `console_requests_total` (counter): API requests by path, status
//! - `console_request_duration_seconds` (histogram): API latency by path
//! - `console_route_lookups_total` (counter): lookups by outcome (matched, not_found)
//! - `console_composite_fetch_total` (counter): composite loads by origin, reason
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
///
/// Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(path: &str, status: u16, start: Instant) {
    let path = path.to_string();
    counter!(
        "console_requests_total",
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("console_request_duration_seconds", "path" => path)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_route_lookup(matched: bool) {
    let outcome = if matched { "matched" } else { "not_found" };
    counter!("console_route_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_composite_fetch(origin: &'static str, reason: &'static str) {
    counter!(
        "console_composite_fetch_total",
        "origin" => origin,
        "reason" => reason
    )
    .increment(1);
}
