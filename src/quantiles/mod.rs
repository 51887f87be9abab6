//! Median estimation over bounded integer values
//!
//! # Example
//!
//! ```
//! use linestats::quantiles::MedianEstimator;
//!
//! let lengths = MedianEstimator::with_bound(4000);
//! for len in [2, 2, 2] {
//!     lengths.observe(len).unwrap();
//! }
//! assert!(lengths.observe(4000).is_err());
//! assert_eq!(lengths.median(), Ok(2.0));
//! ```

mod histogram;

pub use histogram::{BoundedHistogram, DEFAULT_HISTOGRAM_BOUND};

use crate::error::{OutOfRange, QueryError};
use crate::shared::Shared;

/// Thread-safe histogram median
pub type MedianEstimator = Shared<BoundedHistogram>;

impl Shared<BoundedHistogram> {
    /// Empty estimator accepting values in `0..bound`
    pub fn with_bound(bound: usize) -> Self {
        Shared::new(BoundedHistogram::new(bound))
    }

    /// Record a value; callable from any number of threads
    pub fn observe(&self, value: usize) -> Result<(), OutOfRange> {
        self.write(|hist| hist.observe(value))
    }

    /// Record a batch under one lock acquisition
    ///
    /// Valid values are recorded even when others in the batch are refused.
    /// Returns one error per refused value.
    pub fn observe_many(&self, values: impl IntoIterator<Item = usize>) -> Vec<OutOfRange> {
        self.write(|hist| {
            values
                .into_iter()
                .filter_map(|value| hist.observe(value).err())
                .collect()
        })
    }

    /// Exact median of everything recorded so far
    pub fn median(&self) -> Result<f64, QueryError> {
        self.read(BoundedHistogram::median)
    }

    /// Number of accepted values
    pub fn count(&self) -> u64 {
        self.read(BoundedHistogram::len)
    }

    /// Exclusive upper bound on accepted values
    pub fn bound(&self) -> usize {
        self.read(BoundedHistogram::bound)
    }
}
