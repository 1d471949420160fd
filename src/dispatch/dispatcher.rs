//! Dispatcher facade.
//!
//! Presents the fan-out racer through the same [`TranslateService`] contract
//! as a single backend, so it can be dropped in wherever one is used.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::config::DispatchConfig;
use crate::dispatch::racer::FanOutRacer;
use crate::dispatch::DispatchError;
use crate::load_balancer::{BackendPool, BackendSnapshot};
use crate::observability::metrics;
use crate::translate::{TranslateRequest, TranslateResponse, TranslateService, Transport};

/// Default number of backends raced per request.
pub const DEFAULT_FAN_OUT: usize = 5;

/// Load-balancing translation service.
pub struct Dispatcher<T> {
    racer: FanOutRacer<T>,
}

impl<T: Transport> Dispatcher<T> {
    /// Build a dispatcher over an ordered, non-empty list of backend addresses.
    /// Every backend starts with weight 1.
    pub fn new<I, S>(addresses: I, transport: Arc<T>, fan_out: usize) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let pool = Arc::new(BackendPool::new(addresses)?);
        let racer = FanOutRacer::new(pool, transport, fan_out)?;

        tracing::info!(
            backends = racer.pool().len(),
            fan_out = racer.width(),
            "Dispatcher initialized"
        );
        Ok(Self { racer })
    }

    /// Build a dispatcher from the `[dispatch]` config section.
    pub fn from_config(config: &DispatchConfig, transport: Arc<T>) -> Result<Self, DispatchError> {
        Self::new(config.backends.iter().map(String::as_str), transport, config.fan_out)
    }

    /// Effective number of attempts per request.
    pub fn fan_out(&self) -> usize {
        self.racer.width()
    }

    /// Number of backends in the pool.
    pub fn backend_count(&self) -> usize {
        self.racer.pool().len()
    }

    /// Current state of every backend, in pool order.
    pub fn backends(&self) -> Vec<BackendSnapshot> {
        self.racer.pool().snapshot()
    }

    /// Translate through the pool. Returns the zero response if no backend
    /// produced a usable translation.
    pub async fn dispatch(&self, request: &TranslateRequest) -> TranslateResponse {
        let start = Instant::now();
        metrics::record_dispatch();

        match self.racer.race(request).await {
            Some(response) => {
                tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "Dispatch succeeded");
                response
            }
            None => {
                tracing::warn!(
                    fan_out = self.racer.width(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "all backends failed"
                );
                metrics::record_dispatch_failure();
                TranslateResponse::default()
            }
        }
    }
}

#[async_trait]
impl<T: Transport> TranslateService for Dispatcher<T> {
    async fn translate(&self, request: TranslateRequest) -> TranslateResponse {
        self.dispatch(&request).await
    }
}
