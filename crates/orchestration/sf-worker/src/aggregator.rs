//! Shared total that worker partial sums are merged into.

use parking_lot::Mutex;
use tracing::warn;

/// Lifecycle of an [`Aggregator`] within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    /// Created, no workers started
    Idle,
    /// Workers running and merging
    Accumulating,
    /// All workers joined, total stable
    Finalized,
}

#[derive(Debug)]
struct Inner {
    total: i128,
    merges: usize,
    state: AggregatorState,
}

/// Mutex-guarded accumulator shared by every worker in a pool.
///
/// Only [`WorkerPool::spawn`](crate::WorkerPool::spawn) creates one.
///
/// The running total has no accessor. It is handed out only by
/// [`WorkerPool::join`](crate::WorkerPool::join), after the join barrier has
/// moved the aggregator to [`AggregatorState::Finalized`].
#[derive(Debug)]
pub struct Aggregator {
    inner: Mutex<Inner>,
}

impl Aggregator {
    /// Create an idle aggregator with a zero total.
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                total: 0,
                merges: 0,
                state: AggregatorState::Idle,
            }),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> AggregatorState {
        self.inner.lock().state
    }

    /// Number of merges applied so far.
    pub fn merges(&self) -> usize {
        self.inner.lock().merges
    }

    /// Add a worker's partial sum to the total.
    ///
    /// Safe to call from any number of threads at once. Returns `false`
    /// and leaves the total untouched unless the aggregator is
    /// accumulating, so a finalized total never moves.
    pub fn merge(&self, delta: i128) -> bool {
        let mut inner = self.inner.lock();
        if inner.state != AggregatorState::Accumulating {
            warn!(state = ?inner.state, delta = %delta, "Merge outside of accumulation, ignored");
            return false;
        }
        inner.total += delta;
        inner.merges += 1;
        true
    }

    /// Idle -> Accumulating. Called when the pool starts its workers.
    pub(crate) fn start(&self) {
        let mut inner = self.inner.lock();
        debug_assert_eq!(inner.state, AggregatorState::Idle);
        inner.state = AggregatorState::Accumulating;
    }

    /// Accumulating -> Finalized. Only the pool's join barrier calls this.
    pub(crate) fn finalize(&self) -> i128 {
        let mut inner = self.inner.lock();
        debug_assert_eq!(inner.state, AggregatorState::Accumulating);
        inner.state = AggregatorState::Finalized;
        inner.total
    }
}
