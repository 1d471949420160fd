//! Metrics collection and exposition.
//!
//! # Metrics
//! - `dispatch_requests_total` (counter): translation requests dispatched
//! - `dispatch_failures_total` (counter): requests where every backend failed
//! - `dispatch_attempts_total` (counter): attempts by backend and outcome
//! - `dispatch_attempt_duration_seconds` (histogram): per-backend round trip
//! - `dispatch_backend_weight` (gauge): selection weight after the latest sample
//!
//! Without an installed recorder every call here is a no-op.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus recorder and serve `/metrics` on `addr`.
/// Must be called from inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_dispatch() {
    counter!("dispatch_requests_total").increment(1);
}

pub fn record_dispatch_failure() {
    counter!("dispatch_failures_total").increment(1);
}

pub fn record_attempt(backend: &str, outcome: &'static str) {
    counter!(
        "dispatch_attempts_total",
        "backend" => backend.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

/// Latency and resulting weight of a completed attempt.
pub fn record_attempt_latency(backend: &str, elapsed: Duration, weight: u64) {
    histogram!("dispatch_attempt_duration_seconds", "backend" => backend.to_string())
        .record(elapsed.as_secs_f64());
    gauge!("dispatch_backend_weight", "backend" => backend.to_string()).set(weight as f64);
}
