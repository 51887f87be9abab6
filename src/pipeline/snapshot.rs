//! Read-only results of a finished run

use crate::error::QueryError;
use crate::quantiles::MedianEstimator;
use crate::statistics::VarianceAccumulator;

/// Distribution summary for one kind of length (lines or tokens)
///
/// `median` and `stddev` carry their failure instead of a placeholder value,
/// so callers have to decide what an empty or single-value corpus means.
#[derive(Debug, Clone, PartialEq)]
pub struct LengthSummary {
    /// Lengths observed, including those the median histogram refused
    pub count: u64,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Exact median over lengths below the histogram bound
    pub median: Result<f64, QueryError>,
    /// Unbiased sample standard deviation
    pub stddev: Result<f64, QueryError>,
}

impl LengthSummary {
    pub(crate) fn read(lengths: &VarianceAccumulator, median: &MedianEstimator) -> Self {
        let stats = lengths.snapshot();
        Self {
            count: stats.len(),
            mean: stats.mean(),
            min: stats.min(),
            max: stats.max(),
            median: median.median(),
            stddev: stats.sample_stddev(),
        }
    }
}

/// Corpus-wide statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Lines aggregated
    pub lines: u64,
    /// Whitespace-delimited tokens aggregated
    pub tokens: u64,
    /// Lines equal to an earlier line
    pub duplicates: u64,
    /// Different lines seen
    pub distinct_lines: u64,
    pub line_length: LengthSummary,
    pub token_length: LengthSummary,
    /// Keyword counts sorted by keyword
    pub keywords: Vec<(String, u64)>,
    /// Line lengths at or above the histogram bound
    pub rejected_line_lengths: u64,
    /// Token lengths at or above the histogram bound
    pub rejected_token_lengths: u64,
}

impl Snapshot {
    /// Count for one keyword, `None` if it is not in the vocabulary
    pub fn keyword_count(&self, keyword: &str) -> Option<u64> {
        let keyword = keyword.to_lowercase();
        self.keywords
            .binary_search_by(|(k, _)| k.as_str().cmp(&keyword))
            .ok()
            .map(|i| self.keywords[i].1)
    }

    /// Whether any length was refused by a median histogram
    pub fn has_rejections(&self) -> bool {
        self.rejected_line_lengths > 0 || self.rejected_token_lengths > 0
    }
}
