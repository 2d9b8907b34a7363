//! Configuration types for the worker pool.

use serde::{Deserialize, Serialize};

/// Hard ceiling on worker threads, applied whatever count is requested.
pub const MAX_WORKERS: usize = 1000;

/// Default capacity of the record queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Default stack size for worker threads (256 KiB).
pub const DEFAULT_WORKER_STACK_SIZE: usize = 256 * 1024;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Requested number of worker threads
    pub worker_count: usize,

    /// Ceiling the requested count is clamped to
    pub max_workers: usize,

    /// Capacity of the bounded record queue
    pub queue_capacity: usize,

    /// Stack size for each worker thread, in bytes
    pub worker_stack_size: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus(),
            max_workers: MAX_WORKERS,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            worker_stack_size: DEFAULT_WORKER_STACK_SIZE,
        }
    }
}

impl PoolConfig {
    /// Create a new pool configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested number of workers.
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = count;
        self
    }

    /// Set the worker ceiling.
    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_workers = max;
        self
    }

    /// Set the queue capacity.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Set the worker thread stack size.
    pub fn with_worker_stack_size(mut self, size: usize) -> Self {
        self.worker_stack_size = size;
        self
    }

    /// Number of workers actually started: the request clamped to the ceiling.
    pub fn effective_worker_count(&self) -> usize {
        self.worker_count.min(self.max_workers)
    }

    /// Whether the requested worker count exceeds the ceiling.
    pub fn is_capped(&self) -> bool {
        self.worker_count > self.max_workers
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_count == 0 {
            return Err("worker_count must be at least 1".to_string());
        }
        if self.max_workers == 0 {
            return Err("max_workers must be at least 1".to_string());
        }
        if self.queue_capacity == 0 {
            return Err("queue_capacity must be at least 1".to_string());
        }
        if self.worker_stack_size == 0 {
            return Err("worker_stack_size must be at least 1".to_string());
        }
        Ok(())
    }
}

/// Get the number of available CPUs.
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
