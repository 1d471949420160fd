//! Inbound translation contract.

use async_trait::async_trait;
use std::sync::Arc;

use crate::translate::transport::Transport;
use crate::translate::types::{TranslateRequest, TranslateResponse};

/// What callers of this crate talk to.
///
/// Implementations never fail outright: a response whose
/// [`is_success`](TranslateResponse::is_success) is false signals that nothing
/// could be translated.
#[async_trait]
pub trait TranslateService: Send + Sync + 'static {
    async fn translate(&self, request: TranslateRequest) -> TranslateResponse;
}

/// Undecorated service that always uses one backend.
pub struct SingleBackend<T> {
    address: String,
    transport: Arc<T>,
}

impl<T: Transport> SingleBackend<T> {
    pub fn new(address: impl Into<String>, transport: Arc<T>) -> Self {
        Self {
            address: address.into(),
            transport,
        }
    }
}

#[async_trait]
impl<T: Transport> TranslateService for SingleBackend<T> {
    async fn translate(&self, request: TranslateRequest) -> TranslateResponse {
        match self.transport.send(&self.address, &request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(backend = %self.address, error = %e, "Translation request failed");
                TranslateResponse::default()
            }
        }
    }
}
