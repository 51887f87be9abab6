//! Lock-guarded wrapper that lets many threads feed one sketch
//!
//! Every mutation takes the exclusive side of the lock, including
//! read-modify-write updates. Queries take the shared side, so a query that
//! runs while writers are active sees a point-in-time state, not a
//! linearizable one.

use parking_lot::RwLock;

use crate::traits::Sketch;

/// A [`Sketch`] behind its own `RwLock`
///
/// Each wrapped sketch has its own lock; there is no cross-sketch locking.
#[derive(Debug)]
pub struct Shared<S> {
    inner: RwLock<S>,
}

impl<S: Sketch + Default> Default for Shared<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S: Sketch> Shared<S> {
    /// Wrap a sketch
    pub fn new(sketch: S) -> Self {
        Self {
            inner: RwLock::new(sketch),
        }
    }

    /// Apply one update under the exclusive lock
    pub fn update(&self, item: &S::Item) -> Result<(), S::Rejection> {
        self.inner.write().update(item)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> S {
        self.inner.read().clone()
    }

    /// Unwrap once no other thread holds a reference
    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        f(&mut *self.inner.write())
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&*self.inner.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistics::RunningStats;

    #[test]
    fn test_update_and_snapshot() {
        let shared = Shared::new(RunningStats::new());
        shared.update(&1.0).unwrap();
        shared.update(&3.0).unwrap();

        let snap = shared.snapshot();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.mean(), Some(2.0));

        // Snapshot is detached from later updates
        shared.update(&5.0).unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(shared.into_inner().len(), 3);
    }
}
