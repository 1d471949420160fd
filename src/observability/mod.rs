//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! dispatcher / racer / http
//!     → logging.rs (tracing events, EnvFilter + fmt layer)
//!     → metrics.rs (counters, gauges, histograms)
//!         → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Per-attempt events are debug level; total failure is warn
//! - Metrics are labelled by backend address and attempt outcome
//! - The exporter is opt-in through `[observability] metrics_enabled`

pub mod logging;
pub mod metrics;
