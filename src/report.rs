//! Tab-separated report of a finished run
//!
//! One header row and one data row:
//!
//! ```text
//! duplicates  line_median  line_stddev  token_median  token_stddev  <keyword>...
//! 1           2            0            2             0.5           <count>...
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{QueryError, StatsError};
use crate::pipeline::Snapshot;

/// Fixed leading columns, keyword columns follow
pub const FIXED_COLUMNS: [&str; 5] = [
    "duplicates",
    "line_median",
    "line_stddev",
    "token_median",
    "token_stddev",
];

/// Header and data row ready to write
///
/// # Example
///
/// ```
/// use linestats::frequency::KeywordCounter;
/// use linestats::pipeline::{Coordinator, EngineConfig};
/// use linestats::report::TabularRecord;
/// use linestats::StatsError;
///
/// let snapshot = Coordinator::new(EngineConfig::default(), KeywordCounter::from_keywords(["ab"]))?
///     .run(["ab", "cd", "ab"].map(|l| Ok::<_, StatsError>(l.to_string())))?;
///
/// let record = TabularRecord::from_snapshot(&snapshot)?;
/// let mut out = Vec::new();
/// record.write_tsv(&mut out)?;
///
/// let text = String::from_utf8(out).unwrap();
/// assert_eq!(
///     text,
///     "duplicates\tline_median\tline_stddev\ttoken_median\ttoken_stddev\tab\n\
///      1\t2\t0\t2\t0\t2\n"
/// );
/// # Ok::<(), StatsError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TabularRecord {
    pub header: Vec<String>,
    pub values: Vec<String>,
}

impl TabularRecord {
    /// Build the record, failing on the first statistic that is unavailable
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, QueryError> {
        let line_median = snapshot.line_length.median.clone()?;
        let line_stddev = snapshot.line_length.stddev.clone()?;
        let token_median = snapshot.token_length.median.clone()?;
        let token_stddev = snapshot.token_length.stddev.clone()?;

        let mut header: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut values = vec![
            snapshot.duplicates.to_string(),
            line_median.to_string(),
            line_stddev.to_string(),
            token_median.to_string(),
            token_stddev.to_string(),
        ];
        for (keyword, count) in &snapshot.keywords {
            header.push(keyword.clone());
            values.push(count.to_string());
        }

        Ok(Self { header, values })
    }

    /// Write both rows, tab separated
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), StatsError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        writer.write_record(&self.header)?;
        writer.write_record(&self.values)?;
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Create or truncate `path` and write the report there
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), StatsError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| StatsError::io(path, e))?;
        self.write_tsv(file)
    }
}
