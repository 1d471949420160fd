//! Smooth weighted round-robin.
//!
//! Each pick adds every backend's weight to its accumulator, chooses the
//! largest accumulator and charges the winner the round's total weight. Over
//! time each backend is chosen in proportion to its weight, interleaved rather
//! than in bursts.

use crate::load_balancer::backend::BackendRecord;

/// Run one selection pass over `backends` and return the chosen index.
///
/// Ties go to the first backend in slice order. Returns `None` only for an
/// empty slice. Callers must hold the pool lock for the whole call.
pub fn pick(backends: &mut [BackendRecord]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    let mut total: i64 = 0;

    for (idx, backend) in backends.iter_mut().enumerate() {
        let weight = backend.weight as i64;
        backend.current_weight += weight;
        total += weight;

        match best {
            Some((_, top)) if backend.current_weight <= top => {}
            _ => best = Some((idx, backend.current_weight)),
        }
    }

    let (chosen, _) = best?;
    backends[chosen].current_weight -= total;
    Some(chosen)
}
