//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Backend list is non-empty, unique and made of http(s) URLs
//! - Value ranges (fan-out and timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: DispatcherConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;
use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::DispatcherConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no backends configured")]
    NoBackends,

    #[error("invalid backend URL '{url}': {reason}")]
    InvalidBackend { url: String, reason: String },

    #[error("duplicate backend '{0}'")]
    DuplicateBackend(String),

    #[error("dispatch.fan_out must be at least 1")]
    ZeroFanOut,

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("invalid {field} '{value}'")]
    InvalidAddress { field: &'static str, value: String },
}

/// Check every semantic rule and report all violations.
pub fn validate_config(config: &DispatcherConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.dispatch.backends.is_empty() {
        errors.push(ValidationError::NoBackends);
    }

    let mut seen = HashSet::new();
    for backend in &config.dispatch.backends {
        if let Err(reason) = check_backend_url(backend) {
            errors.push(ValidationError::InvalidBackend {
                url: backend.clone(),
                reason,
            });
        }
        if !seen.insert(backend.as_str()) {
            errors.push(ValidationError::DuplicateBackend(backend.clone()));
        }
    }

    if config.dispatch.fan_out == 0 {
        errors.push(ValidationError::ZeroFanOut);
    }

    if config.transport.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("transport.request_timeout_secs"));
    }
    if config.transport.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("transport.connect_timeout_secs"));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_backend_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}
