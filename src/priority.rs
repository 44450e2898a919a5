//! Priority-ordered list with a sorted-on-read cached view.
//!
//! Router chaining, route filtering and route enhancement all need the same
//! discipline: entries are added with an integer priority, consumers read a
//! flattened view sorted by descending priority (insertion order within equal
//! priorities), and the view must never be stale after a mutation. This
//! module implements that once.
//!
//! The sorted view is published through an [`ArcSwap`] snapshot so the
//! request hot path reads it lock-free; mutation only flips a dirty flag and
//! the next read rebuilds. Rebuilding on read (not on every add) preserves
//! amortized cost when many entries are added during composition.

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Entries with integer priorities and a cached, lazily rebuilt sorted view.
///
/// Higher priorities sort first; entries sharing a priority keep their
/// insertion order (the underlying sort is stable).
pub struct PriorityList<T: Clone> {
    entries: RwLock<Vec<(i32, T)>>,
    sorted: ArcSwap<Vec<T>>,
    dirty: AtomicBool,
}

impl<T: Clone> PriorityList<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            sorted: ArcSwap::from_pointee(Vec::new()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Add an entry and invalidate the sorted view.
    pub fn add(&self, item: T, priority: i32) {
        self.entries
            .write()
            .expect("priority list lock poisoned")
            .push((priority, item));
        self.dirty.store(true, Ordering::Release);
    }

    /// Current sorted view, rebuilt if an `add` happened since the last read.
    ///
    /// Readers racing a rebuild observe either the previous complete snapshot
    /// or the new complete snapshot, never a half-built list.
    #[must_use]
    pub fn sorted(&self) -> Arc<Vec<T>> {
        if self.dirty.swap(false, Ordering::AcqRel) {
            let entries = self.entries.read().expect("priority list lock poisoned");
            let mut indices: Vec<usize> = (0..entries.len()).collect();
            indices.sort_by_key(|&i| std::cmp::Reverse(entries[i].0));
            let view: Vec<T> = indices.into_iter().map(|i| entries[i].1.clone()).collect();
            self.sorted.store(Arc::new(view));
        }
        self.sorted.load_full()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .expect("priority list lock poisoned")
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> Default for PriorityList<T> {
    fn default() -> Self {
        Self::new()
    }
}
