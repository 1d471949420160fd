//! Backend record.
//!
//! # Responsibilities
//! - Represent a single translation backend
//! - Hold the selection weight and the round-robin accumulator
//! - Remember the latency of the latest completed attempt
//!
//! Records are only ever touched through [`BackendPool`](super::pool::BackendPool),
//! which owns them behind its lock. Nothing here is atomic on purpose.

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Initial weight of every backend.
pub const INITIAL_WEIGHT: u64 = 1;

/// A single translation backend.
#[derive(Debug, Clone)]
pub struct BackendRecord {
    /// Endpoint the transport posts to. Immutable.
    address: Arc<str>,
    /// Relative selection priority, always >= 1.
    pub(crate) weight: u64,
    /// Smooth weighted round-robin accumulator. Can go negative.
    pub(crate) current_weight: i64,
    /// Latency of the most recently completed attempt.
    pub(crate) last_latency: Option<Duration>,
}

impl BackendRecord {
    /// Create a new record with weight 1.
    pub fn new(address: impl Into<Arc<str>>) -> Self {
        Self {
            address: address.into(),
            weight: INITIAL_WEIGHT,
            current_weight: 0,
            last_latency: None,
        }
    }

    /// The backend endpoint.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn shared_address(&self) -> Arc<str> {
        self.address.clone()
    }

    /// Current selection weight.
    pub fn weight(&self) -> u64 {
        self.weight
    }

    /// Current value of the round-robin accumulator.
    pub fn current_weight(&self) -> i64 {
        self.current_weight
    }

    /// Latency of the latest completed attempt, if any.
    pub fn last_latency(&self) -> Option<Duration> {
        self.last_latency
    }

    /// Copy the record out for diagnostics.
    pub fn snapshot(&self) -> BackendSnapshot {
        BackendSnapshot {
            address: self.address.to_string(),
            weight: self.weight,
            current_weight: self.current_weight,
            last_latency_ms: self.last_latency.map(|d| d.as_secs_f64() * 1000.0),
        }
    }
}

/// Point-in-time view of a backend, safe to hand out without the pool lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendSnapshot {
    pub address: String,
    pub weight: u64,
    pub current_weight: i64,
    pub last_latency_ms: Option<f64>,
}
