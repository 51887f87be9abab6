//! Error types for aggregation, queries and runs
//!
//! Errors are split by where they surface:
//!
//! - [`OutOfRange`]: a single observation was rejected by a bounded estimator.
//!   The run keeps going.
//! - [`QueryError`]: a statistic cannot be produced from the current state.
//!   Returned to whoever asked for it.
//! - [`StatsError`]: anything that ends a run or fails to produce its report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A value fell outside the fixed range of a bounded estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("value {value} out of range: histogram holds values below {bound}")]
pub struct OutOfRange {
    /// The rejected value
    pub value: usize,
    /// Exclusive upper bound of the estimator
    pub bound: usize,
}

/// A statistic could not be computed from the recorded observations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Nothing has been observed
    #[error("no observations recorded")]
    Empty,
    /// Fewer observations than the statistic needs
    #[error("insufficient data: need at least {required} observations, have {found}")]
    InsufficientData { required: u64, found: u64 },
    /// Even-sized median landed on a bucket boundary with no populated bucket after it
    #[error("histogram invariant violated: no populated bucket after index {index}")]
    NoNextBucket { index: usize },
    /// Bucket counts do not add up to the recorded size
    #[error("histogram invariant violated: size is {expected} but buckets hold {found}")]
    CountMismatch { expected: u64, found: u64 },
}

/// Run-level error.
#[derive(Debug, Error)]
pub enum StatsError {
    /// An input could not be opened or read. Fatal: the corpus is incomplete.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A statistic needed for the report is unavailable
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Engine configuration rejected by [`EngineConfig::validate`](crate::pipeline::EngineConfig::validate)
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    #[error("run cancelled")]
    Cancelled,
    #[error("aggregation worker panicked")]
    WorkerPanicked,
    #[error("failed to write report: {0}")]
    Report(#[from] csv::Error),
}

impl StatsError {
    /// Wrap an I/O error with the path it came from
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }
}
