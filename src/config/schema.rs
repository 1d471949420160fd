//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML. Every section
//! has defaults, so a config file only needs to list the backends.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DispatcherConfig {
    /// HTTP listener.
    pub listener: ListenerConfig,

    /// Backend pool and fan-out.
    pub dispatch: DispatchConfig,

    /// Outbound HTTP client settings.
    pub transport: TransportConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:1188").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:1188".to_string(),
        }
    }
}

/// Backend pool configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Ordered backend translate URLs. Order breaks selection ties.
    pub backends: Vec<String>,

    /// Maximum backends raced per request.
    pub fan_out: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            backends: Vec::new(),
            fan_out: crate::dispatch::DEFAULT_FAN_OUT,
        }
    }
}

/// Outbound transport configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Total time allowed for one backend call, in seconds.
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            connect_timeout_secs: 3,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
