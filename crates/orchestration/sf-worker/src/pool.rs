//! Fixed-size pool of worker threads draining the record queue.

use crate::aggregator::Aggregator;
use crate::queue::RecordReceiver;
use crate::stats::WorkerReport;
use sf_error::{Result, SfError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, error};

/// Outcome of joining every worker in a pool.
#[derive(Debug, Clone)]
pub struct PoolOutcome {
    /// Finalized aggregate total
    pub total: i128,

    /// Per-worker reports, ordered by worker id
    pub reports: Vec<WorkerReport>,
}

/// A running pool of workers sharing one [`Aggregator`].
///
/// Each worker takes records until the queue is closed and drained, then
/// merges its private partial sum exactly once and exits.
pub struct WorkerPool {
    handles: Vec<JoinHandle<WorkerReport>>,
    aggregator: Arc<Aggregator>,
}

impl WorkerPool {
    /// Start `worker_count` workers consuming from `receiver`.
    ///
    /// The count is used as given; clamping happens in
    /// [`PoolConfig`](crate::PoolConfig).
    pub fn spawn(worker_count: usize, receiver: RecordReceiver, stack_size: usize) -> Result<Self> {
        let aggregator = Arc::new(Aggregator::new());
        aggregator.start();

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let receiver = receiver.clone();
            let aggregator = Arc::clone(&aggregator);

            let handle = thread::Builder::new()
                .name(format!("sumflow-worker-{}", worker_id))
                .stack_size(stack_size)
                .spawn(move || worker_loop(worker_id, receiver, aggregator))
                .map_err(|source| SfError::Spawn {
                    worker: worker_id,
                    source,
                })?;
            handles.push(handle);
        }

        debug!(workers = handles.len(), "Worker pool started");
        Ok(Self {
            handles,
            aggregator,
        })
    }

    /// The pool's aggregator, for observing its state.
    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }

    /// Join barrier: wait for every worker, then finalize the total.
    ///
    /// Blocks until the producer has closed the queue and all records have
    /// been consumed. Fails if any worker panicked.
    pub fn join(self) -> Result<PoolOutcome> {
        let mut reports = Vec::with_capacity(self.handles.len());
        let mut panicked = None;

        for (worker_id, handle) in self.handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    error!(worker = worker_id, "Worker thread panicked");
                    panicked.get_or_insert(worker_id);
                }
            }
        }

        if let Some(worker_id) = panicked {
            return Err(SfError::WorkerPanicked(worker_id));
        }

        let total = self.aggregator.finalize();
        debug!(workers = reports.len(), total = %total, "Worker pool joined");

        Ok(PoolOutcome { total, reports })
    }
}

/// Body of one worker thread.
fn worker_loop(
    worker_id: usize,
    receiver: RecordReceiver,
    aggregator: Arc<Aggregator>,
) -> WorkerReport {
    debug!(worker = worker_id, "Worker started");
    let start = Instant::now();

    let mut records = 0u64;
    let mut partial_sum = 0i128;
    for record in receiver.iter() {
        partial_sum += record.sum();
        records += 1;
    }

    aggregator.merge(partial_sum);

    debug!(
        worker = worker_id,
        records,
        partial_sum = %partial_sum,
        "Worker stopped"
    );

    WorkerReport {
        worker_id,
        records,
        partial_sum,
        elapsed: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::AggregatorState;
    use crate::config::DEFAULT_WORKER_STACK_SIZE;
    use crate::queue;
    use sf_types::Record;

    #[test]
    fn test_pool_sums_records() {
        let (mut producer, receiver) = queue::bounded(4);
        let pool = WorkerPool::spawn(3, receiver, DEFAULT_WORKER_STACK_SIZE).unwrap();
        assert_eq!(pool.aggregator().state(), AggregatorState::Accumulating);

        for i in 0..100 {
            producer.push(Record::new(i, -1)).unwrap();
        }
        producer.close();

        let outcome = pool.join().unwrap();
        let expected: i128 = (0..100).map(|i| i as i128 - 1).sum();
        assert_eq!(outcome.total, expected);
        assert_eq!(outcome.reports.len(), 3);
        assert_eq!(outcome.reports.iter().map(|r| r.records).sum::<u64>(), 100);
        assert_eq!(
            outcome.reports.iter().map(|r| r.partial_sum).sum::<i128>(),
            expected
        );
    }

    #[test]
    fn test_pool_each_worker_merges_once() {
        let (producer, receiver) = queue::bounded(1);
        let pool = WorkerPool::spawn(5, receiver, DEFAULT_WORKER_STACK_SIZE).unwrap();
        let aggregator = Arc::clone(pool.aggregator());
        drop(producer);

        let outcome = pool.join().unwrap();
        assert_eq!(outcome.total, 0);
        assert_eq!(aggregator.merges(), 5);
        assert_eq!(aggregator.state(), AggregatorState::Finalized);
        assert!(!aggregator.merge(5));
        assert_eq!(aggregator.merges(), 5);
        assert!(outcome.reports.iter().all(|r| r.records == 0));
    }

    #[test]
    fn test_reports_ordered_by_worker_id() {
        let (producer, receiver) = queue::bounded(1);
        let pool = WorkerPool::spawn(4, receiver, DEFAULT_WORKER_STACK_SIZE).unwrap();
        drop(producer);

        let ids: Vec<usize> = pool.join().unwrap().reports.iter().map(|r| r.worker_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
