//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the translate and diagnostics handlers
//! - Wire up request tracing
//! - Serve until the shutdown signal fires

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::dispatch::Dispatcher;
use crate::http::handlers;
use crate::translate::Transport;

/// Application state injected into handlers.
pub struct AppState<T> {
    pub dispatcher: Arc<Dispatcher<T>>,
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
        }
    }
}

/// HTTP front end for a dispatcher.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server that answers translations through `dispatcher`.
    pub fn new<T: Transport>(dispatcher: Arc<Dispatcher<T>>) -> Self {
        let state = AppState { dispatcher };
        Self {
            router: Self::build_router(state),
        }
    }

    fn build_router<T: Transport>(state: AppState<T>) -> Router {
        Router::new()
            .route("/translate", post(handlers::translate::<T>))
            .route("/", post(handlers::translate::<T>))
            .route("/backends", get(handlers::backends::<T>))
            .route("/health", get(handlers::health::<T>))
            .with_state(state)
            .layer(TraceLayer::new_for_http())
    }

    /// Router without a listener, for embedding or in-process tests.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, mut shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server received shutdown signal");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
