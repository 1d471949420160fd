//! Dispatcher construction errors.

use thiserror::Error;

/// Errors that prevent a dispatcher from being built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No backend addresses were supplied.
    #[error("backend pool is empty: at least one backend address is required")]
    EmptyPool,

    /// Fan-out width of zero would never contact a backend.
    #[error("fan-out width must be at least 1")]
    InvalidFanOut,
}
