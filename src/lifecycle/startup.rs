//! Startup orchestration.
//!
//! # Order
//! 1. Metrics exporter (optional)
//! 2. Transport and dispatcher (fails on an empty pool)
//! 3. Listener bind
//! 4. Serve until shutdown
//!
//! Any failure before serving is fatal.

use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::DispatcherConfig;
use crate::dispatch::{DispatchError, Dispatcher};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::translate::{HttpTransport, TransportError};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot build HTTP client: {0}")]
    Transport(#[from] TransportError),

    #[error("cannot build dispatcher: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),

    #[error("cannot start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build every component from `config` and serve until `shutdown` fires.
pub async fn run(config: DispatcherConfig, shutdown: Shutdown) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        let addr: SocketAddr = config
            .observability
            .metrics_address
            .parse()
            .map_err(|_| StartupError::MetricsAddress(config.observability.metrics_address.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let transport = Arc::new(HttpTransport::new(&config.transport)?);
    let dispatcher = Arc::new(Dispatcher::from_config(&config.dispatch, transport)?);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        backends = dispatcher.backend_count(),
        fan_out = dispatcher.fan_out(),
        "Listening for translation requests"
    );

    HttpServer::new(dispatcher).run(listener, shutdown.subscribe()).await?;
    Ok(())
}
