//! Frequency counting for streamed tokens
//!
//! # Example
//!
//! ```
//! use linestats::frequency::KeywordCounter;
//!
//! let counter = KeywordCounter::from_keywords(["error", "warn"]);
//! counter.observe("ERROR");
//! counter.observe("info");
//!
//! let counts = counter.snapshot();
//! assert_eq!(counts, vec![("error".to_string(), 1), ("warn".to_string(), 0)]);
//! ```

mod keywords;

pub use keywords::KeywordCounter;
