//! Metrics collection and exposition.
//!
//! # Metrics
//! - `cep_requests_total` (counter): handled requests by stage, status
//! - `cep_request_duration_seconds` (histogram): latency by stage
//! - `cep_lookup_failures_total` (counter): failed requests by stage and
//!   the last phase they reached
//!
//! Without an installed recorder the `metrics` macros are no-ops, so tests
//! and deployments without `metrics_address` pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::domain::Phase;

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_request(stage: &'static str, status: u16, start: Instant) {
    metrics::counter!("cep_requests_total", "stage" => stage, "status" => status.to_string())
        .increment(1);
    metrics::histogram!("cep_request_duration_seconds", "stage" => stage)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_failure(stage: &'static str, phase: Phase) {
    metrics::counter!("cep_lookup_failures_total", "stage" => stage, "phase" => phase.as_str())
        .increment(1);
}
