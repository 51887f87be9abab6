//! Engine configuration

use std::num::NonZeroUsize;
use std::thread;

use crate::error::StatsError;
use crate::quantiles::DEFAULT_HISTOGRAM_BOUND;

/// Per-worker work queue slots used when no depth is given
const QUEUE_SLOTS_PER_WORKER: usize = 64;

/// Tuning for one aggregation run
///
/// # Example
///
/// ```
/// use linestats::pipeline::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_workers(4)
///     .with_histogram_bound(10_000);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.queue_depth, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Exclusive upper bound for line and token lengths
    pub histogram_bound: usize,
    /// Aggregation worker threads
    pub workers: usize,
    /// Lines that may wait for a worker before the coordinator blocks
    pub queue_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self {
            histogram_bound: DEFAULT_HISTOGRAM_BOUND,
            workers,
            queue_depth: workers * QUEUE_SLOTS_PER_WORKER,
        }
    }
}

impl EngineConfig {
    /// Set the worker count; the queue depth follows it
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self.queue_depth = workers.saturating_mul(QUEUE_SLOTS_PER_WORKER);
        self
    }

    /// Set the work queue depth
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }

    /// Set the histogram bound
    pub fn with_histogram_bound(mut self, histogram_bound: usize) -> Self {
        self.histogram_bound = histogram_bound;
        self
    }

    /// Check that every setting is usable
    pub fn validate(&self) -> Result<(), StatsError> {
        if self.histogram_bound == 0 {
            return Err(StatsError::InvalidConfig {
                field: "histogram_bound",
                reason: "must be at least 1",
            });
        }
        if self.workers == 0 {
            return Err(StatsError::InvalidConfig {
                field: "workers",
                reason: "must be at least 1",
            });
        }
        if self.queue_depth == 0 {
            return Err(StatsError::InvalidConfig {
                field: "queue_depth",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
