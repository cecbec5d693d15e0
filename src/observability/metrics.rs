//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): relay calls by mode and outcome
//! - `relay_request_duration_seconds` (histogram): end-to-end relay latency by mode
//!
//! Recording is always safe: without an installed exporter the `metrics`
//! macros are no-ops.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed relay call.
pub fn record_request(mode: &'static str, outcome: &'static str, start: Instant) {
    metrics::counter!("relay_requests_total", "mode" => mode, "outcome" => outcome).increment(1);
    metrics::histogram!("relay_request_duration_seconds", "mode" => mode)
        .record(start.elapsed().as_secs_f64());
}
