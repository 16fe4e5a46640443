use std::cell::Cell;

/// A metrics-only counter cell for `&self` operations.
///
/// Read paths like `peek` and `recency_rank` take `&self`, so their
/// counters cannot live in plain `u64` fields. This cell provides the
/// interior mutability those paths need without promoting them to `&mut`.
///
/// # Safety
/// This type is only safe if all accesses are externally synchronized.
/// In this crate it is protected by the `ConcurrentShelf` RwLock (or by
/// single-threaded ownership of a `ShelfCore`).
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }
}

// SAFETY:
// All access to MetricsCell is externally synchronized by the shelf's
// RwLock. Metrics are observational and do not affect correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}
