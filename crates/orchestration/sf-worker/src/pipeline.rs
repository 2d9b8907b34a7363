//! Producer side of a run: source -> queue -> pool -> total.

use crate::config::PoolConfig;
use crate::pool::WorkerPool;
use crate::queue::{self, QueueProducer};
use crate::stats::RunSummary;
use chrono::Utc;
use sf_error::{Result, SfError};
use sf_reader_json::RecordSource;
use sf_types::Record;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info, warn};

/// Runs the aggregation for a single record stream.
///
/// The calling thread is the single producer: it pulls records from the
/// source and pushes them into the bounded queue while the pool drains it.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PoolConfig,
}

impl Pipeline {
    /// Create a pipeline, validating the configuration.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate().map_err(SfError::Config)?;
        Ok(Self { config })
    }

    /// The pipeline's configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Sum every record in the file at `path`.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<RunSummary> {
        self.run(RecordSource::open(path)?)
    }

    /// Sum every record in a framed stream.
    pub fn run_reader<R: BufRead>(&self, reader: R) -> Result<RunSummary> {
        self.run(RecordSource::new(reader)?)
    }

    /// Sum every record yielded by `records`.
    ///
    /// The first error from the source stops production. The queue is then
    /// closed, the pool joined, and the error returned; the partial total
    /// is discarded.
    pub fn run<I>(&self, records: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let started_at = Utc::now();
        let worker_count = self.config.effective_worker_count();

        if self.config.is_capped() {
            debug!(
                requested = self.config.worker_count,
                max = self.config.max_workers,
                "Requested worker count exceeds maximum, capping"
            );
        }

        info!(
            workers = worker_count,
            queue_capacity = self.config.queue_capacity,
            "Starting aggregation"
        );

        let (producer, receiver) = queue::bounded(self.config.queue_capacity);
        let pool = WorkerPool::spawn(worker_count, receiver, self.config.worker_stack_size)?;

        let produced = produce(records, producer);
        let joined = pool.join();

        let fed = produced?;
        let outcome = joined?;

        if fed.disconnected {
            return Err(SfError::Other(anyhow::anyhow!(
                "worker pool stopped after {} of the records were queued",
                fed.records
            )));
        }

        let summary = RunSummary {
            total: outcome.total,
            records: fed.records,
            requested_workers: self.config.worker_count,
            worker_count,
            queue_capacity: self.config.queue_capacity,
            workers: outcome.reports,
            started_at,
            completed_at: Utc::now(),
        };

        info!(
            records = summary.records,
            total = %summary.total,
            active_workers = summary.active_workers(),
            elapsed_ms = summary.duration().num_milliseconds(),
            "Aggregation completed"
        );

        Ok(summary)
    }
}

struct Fed {
    records: u64,
    disconnected: bool,
}

/// Push every record into the queue, then close it.
fn produce<I>(records: I, mut producer: QueueProducer) -> Result<Fed>
where
    I: IntoIterator<Item = Result<Record>>,
{
    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(queued = producer.pushed(), error = %e, "Record source failed, closing queue");
                return Err(e);
            }
        };

        if producer.push(record).is_err() {
            return Ok(Fed {
                records: producer.close(),
                disconnected: true,
            });
        }
    }

    let records = producer.close();
    debug!(records, "Record source exhausted, queue closed");

    Ok(Fed {
        records,
        disconnected: false,
    })
}
