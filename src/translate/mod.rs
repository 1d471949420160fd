//! Translation contracts.
//!
//! # Data Flow
//! ```text
//! caller
//!     → service.rs (TranslateService: request in, response out)
//!         - SingleBackend: one fixed address
//!         - Dispatcher (crate::dispatch): fan-out over the pool
//!     → transport.rs (Transport: request + backend address → response | error)
//!     → backend HTTP endpoint
//! ```
//!
//! # Design Decisions
//! - The inbound contract has no error channel; failure is a zero response
//! - The outbound contract surfaces every failure as `TransportError`
//! - Schema types are plain serde structs with defaults for missing fields

pub mod service;
pub mod transport;
pub mod types;

pub use service::{SingleBackend, TranslateService};
pub use transport::{HttpTransport, Transport};
pub use types::{TranslateRequest, TranslateResponse, TransportError, TransportResult};
