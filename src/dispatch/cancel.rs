//! One-shot cancellation signal shared by the attempts of a race.

use std::sync::Arc;
use tokio::sync::watch;

/// Latched signal: once fired it stays fired, and late subscribers see it.
///
/// Firing doubles as the winner election. Only the first call to
/// [`fire`](Self::fire) returns `true`.
#[derive(Debug, Clone)]
pub struct RaceSignal {
    tx: Arc<watch::Sender<bool>>,
}

impl RaceSignal {
    /// Create an unfired signal.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Fire the signal. Returns `true` only for the caller that fired it.
    pub fn fire(&self) -> bool {
        self.tx.send_if_modified(|fired| {
            if *fired {
                false
            } else {
                *fired = true;
                true
            }
        })
    }

    /// Whether the signal has been fired.
    pub fn is_fired(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the signal has been fired (immediately if it already was).
    pub async fn fired(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives as long as `self`, so this only returns once fired
        let _ = rx.wait_for(|fired| *fired).await;
    }
}

impl Default for RaceSignal {
    fn default() -> Self {
        Self::new()
    }
}
