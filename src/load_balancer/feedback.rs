//! Latency feedback.
//!
//! Turns the measured round trip of a finished attempt into the backend's next
//! selection weight. The newest sample fully replaces the previous weight; no
//! smoothing or decay is applied.

use std::time::Duration;

use crate::load_balancer::backend::BackendRecord;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Weight for a backend that just answered in `elapsed`.
///
/// `floor(1s / (elapsed + 1ns))`, never below 1.
pub fn weight_for_latency(elapsed: Duration) -> u64 {
    let weight = NANOS_PER_SEC / (elapsed.as_nanos() + 1);
    // at most 1e9, fits comfortably
    (weight as u64).max(1)
}

/// Apply one completed attempt to `backend`. Caller holds the pool lock.
pub fn record_outcome(backend: &mut BackendRecord, elapsed: Duration) {
    backend.last_latency = Some(elapsed);
    backend.weight = weight_for_latency(elapsed);
}
