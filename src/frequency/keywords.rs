//! Keyword occurrence counting against a fixed vocabulary

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;
use xxhash_rust::xxh3::Xxh3Builder;

use crate::error::StatsError;

/// Concurrent keyword counter seeded with a vocabulary
///
/// Keys are fixed at construction, case-folded. Counting only looks keys up,
/// so memory stays proportional to the vocabulary no matter how large the
/// corpus is. Tokens outside the vocabulary are ignored.
///
/// # Example
///
/// ```
/// use linestats::frequency::KeywordCounter;
///
/// let counter = KeywordCounter::from_keywords(["go"]);
/// for token in ["Go", "go", "python"] {
///     counter.observe(token);
/// }
/// assert_eq!(counter.count("go"), Some(2));
/// assert_eq!(counter.count("python"), None);
/// ```
#[derive(Debug)]
pub struct KeywordCounter {
    counts: HashMap<String, AtomicU64, Xxh3Builder>,
}

impl Default for KeywordCounter {
    fn default() -> Self {
        Self::from_keywords(std::iter::empty::<&str>())
    }
}

impl KeywordCounter {
    /// Seed from keywords; blank entries are skipped and duplicates collapse
    pub fn from_keywords<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = HashMap::with_hasher(Xxh3Builder::new());
        for keyword in keywords {
            let keyword = keyword.as_ref().trim();
            if keyword.is_empty() {
                continue;
            }
            counts
                .entry(keyword.to_lowercase())
                .or_insert_with(|| AtomicU64::new(0));
        }
        Self { counts }
    }

    /// Seed from newline-delimited keywords
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Self::from_keywords(lines))
    }

    /// Seed from a newline-delimited keyword file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| StatsError::io(path, e))?;
        let counter =
            Self::from_reader(BufReader::new(file)).map_err(|e| StatsError::io(path, e))?;
        debug!(path = %path.display(), keywords = counter.len(), "loaded keyword vocabulary");
        Ok(counter)
    }

    /// Count `token` if its case-folded form is a keyword
    ///
    /// Returns whether the token matched.
    pub fn observe(&self, token: &str) -> bool {
        let folded = fold_case(token);
        match self.counts.get(&*folded) {
            Some(count) => {
                count.fetch_add(1, Ordering::Relaxed);
                true
            }
            None => false,
        }
    }

    /// Current count for a keyword, `None` if it is not in the vocabulary
    pub fn count(&self, keyword: &str) -> Option<u64> {
        self.counts
            .get(&*fold_case(keyword))
            .map(|c| c.load(Ordering::Relaxed))
    }

    /// All `(keyword, count)` pairs, sorted by keyword
    pub fn snapshot(&self) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
            .collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Vocabulary size
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Lowercase without allocating when there is nothing to fold
///
/// Titlecase letters such as `ǅ` fold without being uppercase.
fn fold_case(token: &str) -> Cow<'_, str> {
    if token.chars().any(|c| c.to_lowercase().ne(std::iter::once(c))) {
        Cow::Owned(token.to_lowercase())
    } else {
        Cow::Borrowed(token)
    }
}
