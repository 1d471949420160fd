//! Backend pool.
//!
//! # Responsibilities
//! - Own every [`BackendRecord`] behind a single lock
//! - Select a backend with smooth weighted round-robin
//! - Apply latency feedback to the backend that served an attempt
//!
//! This is the only mutation surface for backend state. The lock is never held
//! across an `.await`; both operations are short, in-memory passes.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::dispatch::DispatchError;
use crate::load_balancer::{
    backend::{BackendRecord, BackendSnapshot},
    feedback, weighted,
};

/// Result of a pick: which backend to contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Position in the pool, used to report feedback.
    pub(crate) index: usize,
    /// Address handed to the transport.
    pub(crate) address: Arc<str>,
}

impl Selection {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Ordered, fixed-membership set of backends.
#[derive(Debug)]
pub struct BackendPool {
    backends: Mutex<Vec<BackendRecord>>,
    len: usize,
}

impl BackendPool {
    /// Build a pool from an ordered list of addresses. Order is the tie-break
    /// order for selection. An empty list is rejected.
    pub fn new<I, S>(addresses: I) -> Result<Self, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let backends: Vec<BackendRecord> = addresses.into_iter().map(BackendRecord::new).collect();
        if backends.is_empty() {
            return Err(DispatchError::EmptyPool);
        }
        let len = backends.len();
        Ok(Self {
            backends: Mutex::new(backends),
            len,
        })
    }

    /// Number of backends. Never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Choose the next backend.
    pub fn pick(&self) -> Selection {
        let mut backends = self.lock();
        // the pool is non-empty by construction
        let index = weighted::pick(&mut backends).unwrap_or(0);
        Selection {
            index,
            address: backends[index].shared_address(),
        }
    }

    /// Feed the latency of a completed attempt back into its backend.
    /// Returns the backend's new weight, or `None` if the selection does not
    /// belong to this pool.
    pub fn record_outcome(&self, selection: &Selection, elapsed: Duration) -> Option<u64> {
        let mut backends = self.lock();
        match backends.get_mut(selection.index) {
            Some(backend) => {
                feedback::record_outcome(backend, elapsed);
                Some(backend.weight())
            }
            None => {
                tracing::warn!(index = selection.index, "Feedback for unknown backend ignored");
                None
            }
        }
    }

    /// Copy of every backend's state, in pool order.
    pub fn snapshot(&self) -> Vec<BackendSnapshot> {
        self.lock().iter().map(BackendRecord::snapshot).collect()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<BackendRecord>> {
        // records stay consistent even if a holder panicked mid-update
        self.backends.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
