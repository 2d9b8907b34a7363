//! Per-worker reports and run summaries.

use chrono::{DateTime, Duration, Utc};

/// What a single worker did during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerReport {
    /// Worker identifier (0-based)
    pub worker_id: usize,

    /// Records this worker received
    pub records: u64,

    /// Sum of `a + b` over those records, merged once into the total
    pub partial_sum: i128,

    /// Wall time from worker start to merge
    pub elapsed: std::time::Duration,
}

/// Result of a completed pipeline run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Final aggregate, read after the join barrier
    pub total: i128,

    /// Records decoded and queued
    pub records: u64,

    /// Worker count requested before clamping
    pub requested_workers: usize,

    /// Workers actually started
    pub worker_count: usize,

    /// Capacity of the record queue
    pub queue_capacity: usize,

    /// Per-worker reports, ordered by worker id
    pub workers: Vec<WorkerReport>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the last worker was joined
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    /// Total wall time of the run.
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    /// Throughput in records per second.
    ///
    /// `None` when the run took no measurable time.
    pub fn records_per_second(&self) -> Option<f64> {
        let secs = self.duration().to_std().ok()?.as_secs_f64();
        if secs > 0.0 {
            Some(self.records as f64 / secs)
        } else {
            None
        }
    }

    /// Number of workers that received at least one record.
    pub fn active_workers(&self) -> usize {
        self.workers.iter().filter(|w| w.records > 0).count()
    }

    /// Whether the requested worker count was clamped.
    pub fn was_capped(&self) -> bool {
        self.requested_workers > self.worker_count
    }
}
