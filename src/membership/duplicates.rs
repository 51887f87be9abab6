//! Exact concurrent duplicate-line detection

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashSet;
use xxhash_rust::xxh3::Xxh3Builder;

/// Concurrent set of seen lines with a duplicate counter
///
/// Membership uses exact byte equality; lines need not be valid UTF-8. Insert-and-detect is a single
/// operation on the sharded set, so two threads racing on the same new line
/// see exactly one first occurrence between them.
///
/// # Example
///
/// ```
/// use linestats::membership::DuplicateTracker;
///
/// let tracker = DuplicateTracker::new();
/// for line in ["ab", "cd", "ab"] {
///     tracker.observe(line);
/// }
/// assert_eq!(tracker.duplicate_count(), 1);
/// assert_eq!(tracker.distinct_count(), 2);
/// ```
#[derive(Debug)]
pub struct DuplicateTracker {
    /// Lines seen so far
    seen: DashSet<Vec<u8>, Xxh3Builder>,
    /// Insertions that found an existing entry
    duplicates: AtomicU64,
}

impl Default for DuplicateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DuplicateTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self {
            seen: DashSet::with_hasher(Xxh3Builder::new()),
            duplicates: AtomicU64::new(0),
        }
    }

    /// Record a line, returning `true` if it had been seen before
    pub fn observe(&self, line: impl Into<Vec<u8>>) -> bool {
        let first = self.seen.insert(line.into());
        if !first {
            self.duplicates.fetch_add(1, Ordering::Relaxed);
        }
        !first
    }

    /// Number of observations that repeated an earlier line
    pub fn duplicate_count(&self) -> u64 {
        self.duplicates.load(Ordering::Relaxed)
    }

    /// Number of different lines seen
    pub fn distinct_count(&self) -> u64 {
        self.seen.len() as u64
    }

    /// Total observations
    pub fn observed(&self) -> u64 {
        self.distinct_count() + self.duplicate_count()
    }

    /// Whether `line` has been seen
    pub fn contains(&self, line: impl AsRef<[u8]>) -> bool {
        self.seen.contains(line.as_ref())
    }
}
