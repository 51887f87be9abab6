//! Running statistics (mean, sample variance, min, max)
//!
//! Computes streaming statistics using Welford's numerically stable online algorithm.
//! Supports merging for combining partial results.

use core::convert::Infallible;

use crate::error::QueryError;
use crate::traits::{MergeError, Sketch};

/// Running statistics calculator using Welford's algorithm
///
/// Computes mean, sample variance, sample standard deviation, min, and max in a
/// single pass with O(1) memory. The incremental update avoids the catastrophic
/// cancellation of `sum(x²) - n·mean²` on long streams.
///
/// # Example
///
/// ```
/// use linestats::statistics::RunningStats;
///
/// let mut stats = RunningStats::new();
///
/// for value in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
///     stats.add(value);
/// }
///
/// assert_eq!(stats.mean(), Some(5.0));
/// assert!((stats.sample_variance().unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// assert_eq!(stats.min(), Some(2.0));
/// assert_eq!(stats.max(), Some(9.0));
/// ```
///
/// Fewer than two observations have no sample variance:
///
/// ```
/// use linestats::statistics::RunningStats;
/// use linestats::QueryError;
///
/// let mut stats = RunningStats::new();
/// stats.add(3.0);
/// assert_eq!(
///     stats.sample_stddev(),
///     Err(QueryError::InsufficientData { required: 2, found: 1 })
/// );
/// ```
#[derive(Clone, Debug)]
pub struct RunningStats {
    /// Number of values seen
    count: u64,
    /// Running mean
    mean: f64,
    /// Sum of squared differences from mean (M2 in Welford's algorithm)
    m2: f64,
    /// Minimum value
    min: f64,
    /// Maximum value
    max: f64,
}

impl Default for RunningStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RunningStats {
    /// Create a new empty statistics accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a value to the statistics
    ///
    /// NaN values are ignored to prevent poisoning the statistics.
    pub fn add(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }

        self.count += 1;

        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }

        // Welford's algorithm
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    /// Get the number of values
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get the mean, or `None` before the first value
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.mean)
        }
    }

    /// Get the unbiased sample variance (Bessel's correction)
    pub fn sample_variance(&self) -> Result<f64, QueryError> {
        if self.count < 2 {
            return Err(QueryError::InsufficientData {
                required: 2,
                found: self.count,
            });
        }
        Ok(self.m2 / (self.count - 1) as f64)
    }

    /// Get the sample standard deviation
    pub fn sample_stddev(&self) -> Result<f64, QueryError> {
        self.sample_variance().map(f64::sqrt)
    }

    /// Get the minimum value
    pub fn min(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.min)
        }
    }

    /// Get the maximum value
    pub fn max(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.max)
        }
    }

    /// Merge with another RunningStats using Chan et al.'s parallel algorithm
    pub fn merge_stats(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }

        if self.count == 0 {
            *self = other.clone();
            return;
        }

        let combined_count = self.count + other.count;
        let delta = other.mean - self.mean;

        let combined_mean = self.mean + delta * (other.count as f64 / combined_count as f64);
        let combined_m2 = self.m2
            + other.m2
            + delta * delta * (self.count as f64 * other.count as f64 / combined_count as f64);

        self.count = combined_count;
        self.mean = combined_mean;
        self.m2 = combined_m2;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }
}

impl Sketch for RunningStats {
    type Item = f64;
    type Rejection = Infallible;

    fn update(&mut self, item: &f64) -> Result<(), Infallible> {
        self.add(*item);
        Ok(())
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        self.merge_stats(other);
        Ok(())
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn count(&self) -> u64 {
        self.count
    }
}
