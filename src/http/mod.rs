//! HTTP front end.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum router, TraceLayer)
//!     → handlers.rs
//!         POST /translate → Dispatcher::dispatch → JSON TranslateResponse
//!         GET  /backends  → pool snapshot
//!         GET  /health    → liveness
//! ```

pub mod handlers;
pub mod server;

pub use server::{AppState, HttpServer};
