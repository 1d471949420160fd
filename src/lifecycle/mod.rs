//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config (validated by main) → metrics → transport → dispatcher → listener
//!
//! Shutdown (shutdown.rs):
//!     trigger → broadcast → HTTP server stops accepting and drains
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
