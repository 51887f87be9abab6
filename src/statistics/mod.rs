//! Statistical summaries for streaming data
//!
//! This module provides algorithms for computing statistics over streams
//! in a single pass with constant memory.
//!
//! # Example
//!
//! ```
//! use linestats::statistics::VarianceAccumulator;
//!
//! let lengths = VarianceAccumulator::default();
//!
//! std::thread::scope(|s| {
//!     for chunk in [[2.0, 4.0], [4.0, 6.0]] {
//!         let lengths = &lengths;
//!         s.spawn(move || lengths.observe_many(chunk));
//!     }
//! });
//!
//! assert_eq!(lengths.count(), 4);
//! println!("Stddev: {}", lengths.stddev().unwrap());
//! ```

mod moments;

pub use moments::RunningStats;

use crate::error::QueryError;
use crate::shared::Shared;

/// Thread-safe Welford accumulator
pub type VarianceAccumulator = Shared<RunningStats>;

impl Shared<RunningStats> {
    /// Record a value; callable from any number of threads
    pub fn observe(&self, value: f64) {
        self.write(|stats| stats.add(value));
    }

    /// Record a batch of values under one lock acquisition
    pub fn observe_many(&self, values: impl IntoIterator<Item = f64>) {
        self.write(|stats| {
            for value in values {
                stats.add(value);
            }
        });
    }

    /// Unbiased sample standard deviation of everything observed so far
    pub fn stddev(&self) -> Result<f64, QueryError> {
        self.read(RunningStats::sample_stddev)
    }

    /// Arithmetic mean, `None` before the first value
    pub fn mean(&self) -> Option<f64> {
        self.read(RunningStats::mean)
    }

    /// Number of values observed
    pub fn count(&self) -> u64 {
        self.read(RunningStats::len)
    }
}
