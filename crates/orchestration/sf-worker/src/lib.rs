//! sf-worker - Concurrent record aggregation for sumflow.
//!
//! A single producer (the calling thread) streams records into a bounded
//! queue; a fixed pool of worker threads drains it, each keeping a private
//! partial sum that is merged exactly once into a shared total. The total
//! is only readable after every worker has been joined.
//!
//! # Example
//!
//! ```ignore
//! use sf_worker::{Pipeline, PoolConfig};
//!
//! let config = PoolConfig::new()
//!     .with_worker_count(8)
//!     .with_queue_capacity(1000);
//!
//! let summary = Pipeline::new(config)?.run_file("records.json")?;
//! println!("Total sum: {}", summary.total);
//! ```

pub mod aggregator;
pub mod config;
pub mod pipeline;
pub mod pool;
pub mod queue;
pub mod stats;

pub use aggregator::{Aggregator, AggregatorState};
pub use config::{DEFAULT_QUEUE_CAPACITY, MAX_WORKERS, PoolConfig};
pub use pipeline::Pipeline;
pub use pool::{PoolOutcome, WorkerPool};
pub use queue::{QueueProducer, RecordReceiver};
pub use stats::{RunSummary, WorkerReport};
