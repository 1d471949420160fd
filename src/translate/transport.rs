//! Outbound transport to a single backend.
//!
//! # Responsibilities
//! - Send one translation request to one backend address
//! - Map HTTP failures to [`TransportError`]
//!
//! Cancellation is expressed by dropping the future returned from
//! [`Transport::send`]; the HTTP client aborts the request when that happens.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::TransportConfig;
use crate::translate::types::{TranslateRequest, TranslateResponse, TransportError, TransportResult};

/// Anything that can deliver a translation request to a given backend.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, backend: &str, request: &TranslateRequest) -> TransportResult<TranslateResponse>;
}

/// JSON-over-HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport with the configured connect and request timeouts.
    pub fn new(config: &TransportConfig) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, backend: &str, request: &TranslateRequest) -> TransportResult<TranslateResponse> {
        let response = self.client.post(backend).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        Ok(response.json::<TranslateResponse>().await?)
    }
}
