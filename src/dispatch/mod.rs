//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! TranslateRequest
//!     → dispatcher.rs (TranslateService facade)
//!     → racer.rs (spawn `width` attempts, one shared RaceSignal)
//!         each attempt:
//!             → pool pick → transport send → pool feedback
//!             → qualifying? fire cancel.rs signal; first to fire wins
//!     → winner, or zero response once every attempt has finished
//! ```
//!
//! # Design Decisions
//! - The race is the retry mechanism; no backoff or re-queueing
//! - Winner election and cancellation are one idempotent operation
//! - Width 1 runs through the same racer, just with a single attempt
//! - Total failure is a value, not an error

pub mod cancel;
pub mod dispatcher;
pub mod error;
pub mod racer;

pub use dispatcher::{Dispatcher, DEFAULT_FAN_OUT};
pub use error::DispatchError;
pub use racer::{AttemptOutcome, FanOutRacer};
