//! Reference count for nodes held by a cache.
//!
//! A cached node tracks how many cache entries point at it, separately from
//! its ordinary owners. The count is checked for two kinds of damage before
//! every change: use after the node was deleted, and a count that went
//! negative.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::error::{PanlensError, Result};

/// Value stored in the count once the node has been deleted.
pub const DELETED_REF_COUNT: i32 = -100;

/// Atomic cache reference count with integrity checks.
#[derive(Debug, Default)]
pub struct NodeRefCount {
    count: AtomicI32,
}

impl NodeRefCount {
    /// Creates a count of zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current count.
    pub fn get(&self) -> i32 {
        self.count.load(Ordering::Acquire)
    }

    /// Returns whether any cache entry still references the node.
    pub fn is_referenced(&self) -> bool {
        self.get() > 0
    }

    /// Checks that the count is not obviously bogus.
    ///
    /// Fails with [`PanlensError::RefCountDeleted`] when the node was already
    /// deleted, and with [`PanlensError::RefCountCorrupt`] when the count is
    /// negative.
    pub fn test_integrity(&self) -> Result<()> {
        check(self.get())
    }

    /// Adds a cache reference.
    pub fn node_ref(&self) -> Result<()> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n >= 0).then_some(n + 1)
            })
            .map(|_| ())
            .map_err(|n| {
                let err = check(n).err().unwrap_or(PanlensError::RefCountCorrupt(n));
                log::error!("node_ref on damaged count: {err}");
                err
            })
    }

    /// Drops a cache reference. Returns whether references remain.
    pub fn node_unref(&self) -> Result<bool> {
        match self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n > 0).then_some(n - 1)
            }) {
            Ok(previous) => Ok(previous > 1),
            Err(n) => {
                // Zero drops to -1: one unref too many.
                let err = check(n).err().unwrap_or(PanlensError::RefCountCorrupt(n - 1));
                log::error!("node_unref on damaged count: {err}");
                Err(err)
            }
        }
    }

    /// Marks the node deleted. A second delete is reported.
    pub fn mark_deleted(&self) -> Result<()> {
        let previous = self.count.swap(DELETED_REF_COUNT, Ordering::AcqRel);
        check(previous).map_err(|err| {
            log::error!("mark_deleted on damaged count: {err}");
            err
        })
    }
}

fn check(count: i32) -> Result<()> {
    if count == DELETED_REF_COUNT {
        Err(PanlensError::RefCountDeleted)
    } else if count < 0 {
        Err(PanlensError::RefCountCorrupt(count))
    } else {
        Ok(())
    }
}
