//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Attempt starts
//!     → pool.rs (lock, run selection)
//!         - weighted.rs (smooth weighted round-robin pass)
//!     → transport call (lock released)
//!     → pool.rs (lock, apply feedback)
//!         - feedback.rs (latency → weight)
//! ```
//!
//! # Design Decisions
//! - One lock guards the whole pool; selection and feedback share it
//! - Backend membership is fixed at construction
//! - Pool order is the tie-break order and is never reshuffled
//! - Weight follows the latest latency sample only

pub mod backend;
pub mod feedback;
pub mod pool;
pub mod weighted;

pub use backend::{BackendRecord, BackendSnapshot};
pub use pool::{BackendPool, Selection};
