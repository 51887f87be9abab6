//! Core traits for streaming estimators
//!
//! Single-owner estimators implement [`Sketch`]. They are wrapped in
//! [`Shared`](crate::shared::Shared) when many threads feed the same instance.

use core::fmt::Debug;

use thiserror::Error;

/// Error during sketch merge operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Sketches have incompatible configurations
    #[error("incompatible config: expected {expected}, found {found}")]
    IncompatibleConfig { expected: String, found: String },
}

/// Core trait for all single-owner streaming estimators
pub trait Sketch: Clone + Debug {
    /// The type of item this sketch processes
    type Item: ?Sized;

    /// Why an item can be refused
    type Rejection;

    /// Add an item to the sketch
    ///
    /// A rejected item must leave the sketch unchanged.
    fn update(&mut self, item: &Self::Item) -> Result<(), Self::Rejection>;

    /// Merge another sketch into this one
    ///
    /// Returns an error if sketches are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset sketch to empty state
    fn clear(&mut self);

    /// Number of items accepted
    fn count(&self) -> u64;

    /// Check if sketch is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
