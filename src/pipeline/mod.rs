//! Concurrent aggregation pipeline
//!
//! ```text
//! input files ─┬─ reader thread ─┐
//!              ├─ reader thread ─┼─► LineSource (rendezvous channel)
//!              └─ reader thread ─┘        │
//!                                         ▼
//!                                    Coordinator ── bounded queue ──► worker pool
//!                                                                         │
//!                     ┌──────────────┬──────────────┬─────────────────────┤
//!                     ▼              ▼              ▼                     ▼
//!              VarianceAccumulator  MedianEstimator  DuplicateTracker  KeywordCounter
//!                     (line and token lengths)
//!                                         │
//!                         all units done  ▼
//!                                      Snapshot
//! ```
//!
//! # Example
//!
//! ```no_run
//! use linestats::frequency::KeywordCounter;
//! use linestats::pipeline::{Coordinator, EngineConfig, LineSource};
//!
//! # fn main() -> Result<(), linestats::StatsError> {
//! let keywords = KeywordCounter::from_path("keywords.txt")?;
//! let coordinator = Coordinator::new(EngineConfig::default(), keywords)?;
//! let snapshot = coordinator.run(LineSource::from_paths(["sample.txt", "text2.txt"]))?;
//!
//! println!("duplicates: {}", snapshot.duplicates);
//! println!("line median: {:?}", snapshot.line_length.median);
//! # Ok(())
//! # }
//! ```

mod config;
mod coordinator;
mod snapshot;
mod source;

pub use config::EngineConfig;
pub use coordinator::{Aggregates, CancelHandle, Coordinator};
pub use snapshot::{LengthSummary, Snapshot};
pub use source::LineSource;
