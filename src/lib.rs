//! # Linestats
//!
//! Concurrent streaming statistics for text corpora.
//!
//! Linestats reads text line by line and keeps corpus-wide statistics without
//! buffering the corpus: line and token length distributions, repeated lines,
//! and keyword frequencies. Every estimator accepts updates from many threads
//! at once and yields exact results once the input is drained.
//!
//! ## Features
//!
//! - **Variance**: Welford's online mean and sample standard deviation
//! - **Median**: Bounded frequency histogram with O(1) insert and exact median
//! - **Duplicates**: Exact concurrent set with a duplicate counter
//! - **Keywords**: Counts for a fixed, case-folded vocabulary
//! - **Pipeline**: Parallel line readers, bounded worker pool, one completion signal
//!
//! ## Quick Start
//!
//! ```rust
//! use linestats::prelude::*;
//!
//! let coordinator = Coordinator::new(
//!     EngineConfig::default(),
//!     KeywordCounter::from_keywords(["go"]),
//! )?;
//!
//! let source = LineSource::from_readers([
//!     ("first", "ab\ncd\n".as_bytes()),
//!     ("second", "ab\nGo go python\n".as_bytes()),
//! ]);
//! let snapshot = coordinator.run(source)?;
//!
//! assert_eq!(snapshot.duplicates, 1);
//! assert_eq!(snapshot.keyword_count("go"), Some(2));
//! # Ok::<(), StatsError>(())
//! ```
//!
//! ## Single-owner estimators
//!
//! The estimators also work on their own, and merge across workers through
//! the [`Sketch`](traits::Sketch) trait:
//!
//! ```rust
//! use linestats::quantiles::BoundedHistogram;
//! use linestats::traits::Sketch;
//!
//! let mut worker1 = BoundedHistogram::new(4000);
//! let mut worker2 = BoundedHistogram::new(4000);
//!
//! worker1.observe(3).unwrap();
//! worker2.observe(5).unwrap();
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.median(), Ok(4.0));
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): the `linestats` binary (argument parsing, log output)

pub mod error;
pub mod frequency;
pub mod membership;
pub mod pipeline;
pub mod quantiles;
pub mod report;
pub mod shared;
pub mod statistics;
pub mod traits;

pub mod prelude {
    pub use crate::error::{OutOfRange, QueryError, StatsError};
    pub use crate::frequency::KeywordCounter;
    pub use crate::membership::DuplicateTracker;
    pub use crate::pipeline::{Coordinator, EngineConfig, LineSource, Snapshot};
    pub use crate::quantiles::{BoundedHistogram, MedianEstimator};
    pub use crate::report::TabularRecord;
    pub use crate::statistics::{RunningStats, VarianceAccumulator};
    pub use crate::traits::*;
}

pub use error::{OutOfRange, QueryError, StatsError};
pub use pipeline::{Coordinator, EngineConfig, LineSource, Snapshot};
