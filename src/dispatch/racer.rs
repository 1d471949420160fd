//! Fan-out racer.
//!
//! # Responsibilities
//! - Launch up to `width` concurrent attempts per request
//! - Pick one backend per attempt at launch; each attempt calls it and reports latency
//! - Deliver the first qualifying success and cancel the remaining attempts
//! - Report aggregate failure once every attempt has finished without a win
//!
//! # Attempt lifecycle
//! ```text
//! pick backend → spawn → send ─┬─ response/error ──┐
//!                              └─ race signal fired ┴→ record latency ─┬─ qualifying + first to fire → Won
//!                                                                      ├─ qualifying, lost the election → Lost
//!                                                                      ├─ non-qualifying → Rejected
//!                                                                      ├─ error → Failed
//!                                                                      └─ no response yet → Cancelled
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

use crate::dispatch::cancel::RaceSignal;
use crate::dispatch::DispatchError;
use crate::load_balancer::{BackendPool, Selection};
use crate::observability::metrics;
use crate::translate::{TranslateRequest, TranslateResponse, Transport};

/// How a single attempt ended.
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Qualifying success that won the race.
    Won(TranslateResponse),
    /// Qualifying success that arrived after another attempt won.
    Lost,
    /// Transport succeeded but the payload did not qualify.
    Rejected,
    /// Transport error.
    Failed,
    /// Abandoned because the race was already decided.
    Cancelled,
}

impl AttemptOutcome {
    fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Won(_) => "won",
            AttemptOutcome::Lost => "lost",
            AttemptOutcome::Rejected => "rejected",
            AttemptOutcome::Failed => "failed",
            AttemptOutcome::Cancelled => "cancelled",
        }
    }
}

/// Races a bounded number of backends per request.
pub struct FanOutRacer<T> {
    pool: Arc<BackendPool>,
    transport: Arc<T>,
    width: usize,
}

impl<T: Transport> FanOutRacer<T> {
    /// Create a racer. The effective width is `min(fan_out, pool size)`.
    pub fn new(pool: Arc<BackendPool>, transport: Arc<T>, fan_out: usize) -> Result<Self, DispatchError> {
        if fan_out == 0 {
            return Err(DispatchError::InvalidFanOut);
        }
        let width = fan_out.min(pool.len());
        Ok(Self {
            pool,
            transport,
            width,
        })
    }

    /// Number of attempts launched per request.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn pool(&self) -> &Arc<BackendPool> {
        &self.pool
    }

    /// Run one race. Returns the winning response, or `None` once every
    /// attempt has finished without a qualifying success.
    pub async fn race(&self, request: &TranslateRequest) -> Option<TranslateResponse> {
        let request = Arc::new(request.clone());
        let signal = RaceSignal::new();
        let mut attempts = JoinSet::new();

        // Picks are made at launch, so the feedback of a fast attempt cannot
        // steer a sibling of the same race onto the same backend.
        for attempt in 0..self.width {
            let selection = self.pool.pick();
            attempts.spawn(run_attempt(
                attempt,
                selection,
                self.pool.clone(),
                self.transport.clone(),
                request.clone(),
                signal.clone(),
            ));
        }

        let mut winner = None;
        while let Some(joined) = attempts.join_next().await {
            match joined {
                Ok(AttemptOutcome::Won(response)) => {
                    winner = Some(response);
                    break;
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Attempt task did not complete"),
            }
        }

        // Remaining attempts have seen (or will see) the fired signal and wind
        // down on their own, each recording the time it waited.
        attempts.detach_all();
        winner
    }
}

async fn run_attempt<T: Transport>(
    attempt: usize,
    selection: Selection,
    pool: Arc<BackendPool>,
    transport: Arc<T>,
    request: Arc<TranslateRequest>,
    signal: RaceSignal,
) -> AttemptOutcome {
    tracing::debug!(attempt, backend = %selection.address, "Attempt started");

    let start = Instant::now();
    let result = tokio::select! {
        // a response that is already available wins over cancellation
        biased;
        result = transport.send(&selection.address, &request) => Some(result),
        _ = signal.fired() => None,
    };
    // Cancelled attempts report the time they waited: a lower bound on the
    // backend's latency that keeps a degrading backend from holding its old weight.
    let elapsed = start.elapsed();
    let weight = pool.record_outcome(&selection, elapsed);

    let outcome = match result {
        None => AttemptOutcome::Cancelled,
        Some(Ok(response)) if response.is_success() => {
            if signal.fire() {
                AttemptOutcome::Won(response)
            } else {
                AttemptOutcome::Lost
            }
        }
        Some(Ok(response)) => {
            tracing::debug!(
                attempt,
                backend = %selection.address,
                code = response.code,
                "Backend answered without a usable translation"
            );
            AttemptOutcome::Rejected
        }
        Some(Err(e)) => {
            tracing::debug!(attempt, backend = %selection.address, error = %e, "Backend request failed");
            AttemptOutcome::Failed
        }
    };

    tracing::debug!(
        attempt,
        backend = %selection.address,
        elapsed_ms = millis(elapsed),
        weight = ?weight,
        outcome = outcome.label(),
        "Attempt finished"
    );
    metrics::record_attempt(&selection.address, outcome.label());
    if let Some(weight) = weight {
        metrics::record_attempt_latency(&selection.address, elapsed, weight);
    }

    outcome
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{TransportError, TransportResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Replies per backend, recording every address it was asked to call.
    #[derive(Default)]
    struct FakeTransport {
        replies: HashMap<String, (Duration, bool)>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        fn reply(mut self, backend: &str, delay_ms: u64, ok: bool) -> Self {
            self.replies
                .insert(backend.to_string(), (Duration::from_millis(delay_ms), ok));
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, backend: &str, _request: &TranslateRequest) -> TransportResult<TranslateResponse> {
            self.calls.lock().unwrap().push(backend.to_string());
            let (delay, ok) = self.replies.get(backend).copied().unwrap_or((Duration::ZERO, false));
            tokio::time::sleep(delay).await;
            if ok {
                Ok(TranslateResponse {
                    code: 200,
                    data: format!("from {}", backend),
                    ..Default::default()
                })
            } else {
                Err(TransportError::Other(format!("{} unavailable", backend)))
            }
        }
    }

    fn racer(addrs: &[&str], transport: FakeTransport, fan_out: usize) -> (FanOutRacer<FakeTransport>, Arc<FakeTransport>) {
        let pool = Arc::new(BackendPool::new(addrs.iter().copied()).unwrap());
        let transport = Arc::new(transport);
        (FanOutRacer::new(pool, transport.clone(), fan_out).unwrap(), transport)
    }

    #[test]
    fn test_width_bounded_by_pool() {
        let (r, _) = racer(&["a", "b"], FakeTransport::default(), 5);
        assert_eq!(r.width(), 2);

        let (r, _) = racer(&["a", "b", "c", "d", "e", "f"], FakeTransport::default(), 5);
        assert_eq!(r.width(), 5);
    }

    #[test]
    fn test_zero_fan_out_rejected() {
        let pool = Arc::new(BackendPool::new(["a"]).unwrap());
        let err = FanOutRacer::new(pool, Arc::new(FakeTransport::default()), 0).err();
        assert_eq!(err, Some(DispatchError::InvalidFanOut));
    }

    #[tokio::test]
    async fn test_each_attempt_picks_a_distinct_backend() {
        let transport = FakeTransport::default()
            .reply("a", 10, false)
            .reply("b", 10, false)
            .reply("c", 10, false);
        let (r, transport) = racer(&["a", "b", "c"], transport, 5);

        assert!(r.race(&TranslateRequest::default()).await.is_none());

        let mut calls = transport.calls();
        calls.sort();
        assert_eq!(calls, vec!["a", "b", "c"]);
        // every finished attempt left a latency sample behind
        assert!(r.pool().snapshot().iter().all(|b| b.last_latency_ms.is_some()));
    }

    #[tokio::test]
    async fn test_width_one_uses_same_path() {
        let transport = FakeTransport::default().reply("a", 0, true).reply("b", 0, true);
        let (r, transport) = racer(&["a", "b"], transport, 1);

        let first = r.race(&TranslateRequest::default()).await.unwrap();
        assert_eq!(first.data, "from a");
        let snap = r.pool().snapshot();
        assert!(snap[0].last_latency_ms.is_some());
        assert!(snap[1].last_latency_ms.is_none(), "only the chosen backend is touched");

        // a fast reply on `a` raised its weight, so it is chosen again
        let second = r.race(&TranslateRequest::default()).await.unwrap();
        assert_eq!(second.data, "from a");
        assert_eq!(transport.calls(), vec!["a", "a"]);
    }

    #[tokio::test]
    async fn test_width_one_failure_returns_none() {
        let (r, transport) = racer(&["a"], FakeTransport::default().reply("a", 0, false), 1);
        assert!(r.race(&TranslateRequest::default()).await.is_none());
        assert_eq!(transport.calls(), vec!["a"]);

        let snap = r.pool().snapshot();
        assert!(snap[0].last_latency_ms.is_some(), "failed attempts still feed back latency");
        assert!(snap[0].weight >= 1);
    }
}
