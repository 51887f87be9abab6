//! Bounded frequency histogram with exact median
//!
//! Values are small non-negative integers (line and token lengths), so a
//! dense array of counters indexed by value gives O(1) insertion and an exact
//! median in one O(bound) scan, with memory fixed at construction.

use crate::error::{OutOfRange, QueryError};
use crate::traits::{MergeError, Sketch};

/// Default exclusive upper bound for observed values
pub const DEFAULT_HISTOGRAM_BOUND: usize = 4000;

/// Fixed-capacity frequency histogram
///
/// Holds one counter per value in `0..bound`. Values at or above the bound
/// are refused with [`OutOfRange`] and leave the histogram untouched.
///
/// # Example
///
/// ```
/// use linestats::quantiles::BoundedHistogram;
///
/// let mut hist = BoundedHistogram::new(100);
/// for len in [3, 1, 4, 1, 5, 9] {
///     hist.observe(len).unwrap();
/// }
///
/// // Sorted: 1 1 3 4 5 9, middle pair (3, 4)
/// assert_eq!(hist.median(), Ok(3.5));
/// assert!(hist.observe(100).is_err());
/// assert_eq!(hist.len(), 6);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedHistogram {
    /// Counter per value
    counts: Box<[u64]>,
    /// Sum of all counters
    size: u64,
}

impl Default for BoundedHistogram {
    fn default() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BOUND)
    }
}

impl BoundedHistogram {
    /// Create an empty histogram accepting values in `0..bound`
    ///
    /// # Panics
    ///
    /// Panics if `bound` is 0
    pub fn new(bound: usize) -> Self {
        assert!(bound > 0, "bound must be positive");
        Self {
            counts: vec![0u64; bound].into_boxed_slice(),
            size: 0,
        }
    }

    /// Exclusive upper bound on accepted values
    pub fn bound(&self) -> usize {
        self.counts.len()
    }

    /// Number of accepted values
    pub fn len(&self) -> u64 {
        self.size
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// How many times `value` was observed
    pub fn count_at(&self, value: usize) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Record one value
    pub fn observe(&mut self, value: usize) -> Result<(), OutOfRange> {
        let bound = self.bound();
        let slot = self
            .counts
            .get_mut(value)
            .ok_or(OutOfRange { value, bound })?;
        *slot += 1;
        self.size += 1;
        Ok(())
    }

    /// Exact median of the observed values
    ///
    /// For an even count the median is the mean of the two middle values,
    /// which may fall between buckets.
    pub fn median(&self) -> Result<f64, QueryError> {
        if self.size == 0 {
            return Err(QueryError::Empty);
        }

        let even = self.size % 2 == 0;
        let middle = self.size / 2;
        let mut seen = 0u64;

        for (index, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let end = seen + count;
            if end > middle {
                return Ok(index as f64);
            }
            if even && end == middle {
                // Lower middle value is the last one in this bucket
                let next = self.next_populated(index)?;
                return Ok((index + next) as f64 / 2.0);
            }
            seen = end;
        }

        Err(QueryError::CountMismatch {
            expected: self.size,
            found: seen,
        })
    }

    /// Index of the first non-empty bucket after `index`
    fn next_populated(&self, index: usize) -> Result<usize, QueryError> {
        self.counts[index + 1..]
            .iter()
            .position(|&c| c > 0)
            .map(|offset| index + 1 + offset)
            .ok_or(QueryError::NoNextBucket { index })
    }

    /// Smallest observed value
    pub fn min(&self) -> Option<usize> {
        self.counts.iter().position(|&c| c > 0)
    }

    /// Largest observed value
    pub fn max(&self) -> Option<usize> {
        self.counts.iter().rposition(|&c| c > 0)
    }
}

impl Sketch for BoundedHistogram {
    type Item = usize;
    type Rejection = OutOfRange;

    fn update(&mut self, item: &usize) -> Result<(), OutOfRange> {
        self.observe(*item)
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.bound() != other.bound() {
            return Err(MergeError::IncompatibleConfig {
                expected: format!("bound {}", self.bound()),
                found: format!("bound {}", other.bound()),
            });
        }

        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.size += other.size;

        Ok(())
    }

    fn clear(&mut self) {
        self.counts.fill(0);
        self.size = 0;
    }

    fn count(&self) -> u64 {
        self.size
    }
}
