//! Set membership for streamed lines
//!
//! This module provides an exact concurrent set used to count repeated
//! lines. Memory grows with the number of distinct lines.
//!
//! # Example
//!
//! ```
//! use linestats::membership::DuplicateTracker;
//!
//! let tracker = DuplicateTracker::new();
//! assert!(!tracker.observe("hello"));
//! assert!(tracker.observe("hello"));
//! ```

mod duplicates;

pub use duplicates::DuplicateTracker;
