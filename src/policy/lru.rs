//! # Bookshelf LRU policy
//!
//! Fixed-capacity store of `(id, popularity)` records with strict
//! least-recently-used eviction ordered by a logical clock.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │                      ConcurrentShelf                             │
//!   │                                                                  │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │               Arc<RwLock<ShelfCore>>                     │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   │                              │                                   │
//!   │                              ▼                                   │
//!   │   ┌──────────────────────────────────────────────────────────┐   │
//!   │   │                     ShelfCore                            │   │
//!   │   │                                                          │   │
//!   │   │   index: FxHashMap<BookId, usize>   (id -> slot)         │   │
//!   │   │                                                          │   │
//!   │   │   shelf: Vec<BookEntry>             (compaction order)   │   │
//!   │   │     [0]          [1]          [2]          [3]           │   │
//!   │   │   ┌────────┐   ┌────────┐   ┌────────┐   ┌────────┐      │   │
//!   │   │   │ id 7   │   │ id 3   │   │ id 12  │   │ id 5   │      │   │
//!   │   │   │ pop 40 │   │ pop 9  │   │ pop 81 │   │ pop 2  │      │   │
//!   │   │   │ t=6    │   │ t=2 ◄──┼── │ t=9    │   │ t=8    │      │   │
//!   │   │   └────────┘   └────────┘   └────────┘   └────────┘      │   │
//!   │   │                  eviction victim (smallest stamp)        │   │
//!   │   │                                                          │   │
//!   │   │   clock: LogicalClock               (next stamp = 10)    │   │
//!   │   └──────────────────────────────────────────────────────────┘   │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations Flow
//!
//! ```text
//!   ADD existing id
//!   ═══════════════════════════════════════════════════════════════════
//!     1. index lookup: O(1)
//!     2. overwrite popularity, restamp from clock, advance clock
//!     3. NO eviction: updates never displace other entries
//!
//!   ADD new id, shelf full
//!   ═══════════════════════════════════════════════════════════════════
//!     1. scan shelf for the smallest stamp (first minimum wins): O(n)
//!     2. remove the victim, compacting leftwards (order preserved)
//!     3. append {id, popularity, stamp = clock}, advance clock
//!
//!   ACCESS
//!   ═══════════════════════════════════════════════════════════════════
//!     hit:  restamp from clock, advance clock, return popularity
//!     miss: return None (no state change, clock NOT advanced)
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation        | Time        | Notes                                |
//! |------------------|-------------|--------------------------------------|
//! | `add` (update)   | O(1) avg    | Index lookup + restamp               |
//! | `add` (insert)   | O(n)        | Victim scan + compaction when full   |
//! | `access`         | O(1) avg    | Index lookup + restamp               |
//! | `peek`           | O(1) avg    | Index lookup only                    |
//! | `peek_victim`    | O(n)        | Stamp scan                           |
//! | `recency_rank`   | O(n)        | Stamp comparison scan                |
//!
//! The O(capacity) eviction scan is the documented complexity ceiling of
//! this policy: capacity is small by contract, and the scan is what makes
//! the first-minimum tie-break exact. The id index is a lookup
//! accelerator only and never participates in victim selection.
//!
//! ## Recency Model
//!
//! Recency is a [`LogicalClock`] stamp, not wall-clock time, so eviction
//! order is exact and reproducible. Every add (insert or update) and every
//! successful access or touch consumes exactly one clock tick; misses and
//! peeks consume none. Stamps among live entries are therefore pairwise
//! distinct, and the eviction victim is always the entry with the globally
//! smallest stamp — true LRU, not an approximation.
//!
//! ## Entry Lifecycle
//!
//! An entry is created by `add` on an absent id, mutated in place by `add`
//! on a present id (popularity + stamp) or by `access`/`touch` (stamp
//! only), and destroyed only by eviction inside `add`. There is no
//! arbitrary removal and no clear.
//!
//! ## Thread Safety
//!
//! - `ShelfCore`: **NOT thread-safe** - single-threaded only.
//! - `ConcurrentShelf`: **thread-safe** via `parking_lot::RwLock`
//!   (feature `concurrency`). Mutating operations take the write lock, so
//!   the clock advance and the entry mutation it accompanies are observed
//!   atomically; clock-neutral reads share the read lock.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::policy::lru::ShelfCore;
//! use shelfkit::traits::{BookShelf, RecencyShelf};
//!
//! let mut shelf = ShelfCore::try_new(2).unwrap();
//!
//! shelf.add(1, 10);
//! shelf.add(2, 20);
//!
//! // Reading book 1 refreshes its stamp; book 2 becomes the victim.
//! assert_eq!(shelf.access(1), Some(10));
//! assert_eq!(shelf.peek_victim(), Some((2, 20)));
//!
//! // A third book displaces book 2.
//! assert_eq!(shelf.add(3, 30), Some((2, 20)));
//! assert_eq!(shelf.access(2), None);
//! ```

use std::fmt;

#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::ds::{LogicalClock, Tick};
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::ShelfMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::ShelfMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, ShelfMetricsReadRecorder, ShelfMetricsRecorder,
};
use crate::traits::{BookId, BookShelf, Popularity, RecencyShelf};

/// One shelved book: id, popularity score, and recency stamp.
///
/// Fields are read-only from outside the policy; entries are mutated only
/// through shelf operations so the stamp discipline cannot be bypassed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookEntry {
    id: BookId,
    popularity: Popularity,
    last_access: Tick,
}

impl BookEntry {
    /// The externally supplied identifier.
    #[inline]
    pub fn id(&self) -> BookId {
        self.id
    }

    /// The most recently written popularity score.
    #[inline]
    pub fn popularity(&self) -> Popularity {
        self.popularity
    }

    /// The stamp of the last add/access/touch that hit this entry.
    #[inline]
    pub fn last_access(&self) -> Tick {
        self.last_access
    }
}

/// Single-threaded bookshelf cache core.
///
/// Storage is a `Vec` in compaction order (an implementation artifact, not
/// a semantic ordering) plus an `FxHashMap` index from id to slot. The
/// index makes lookups O(1); victim selection stays an O(capacity) scan by
/// design (see the module docs).
///
/// # Example
///
/// ```
/// use shelfkit::policy::lru::ShelfCore;
/// use shelfkit::traits::BookShelf;
///
/// let mut shelf = ShelfCore::try_new(100).unwrap();
/// shelf.add(1, 42);
/// assert_eq!(shelf.peek(1), Some(42));
/// ```
pub struct ShelfCore {
    shelf: Vec<BookEntry>,
    index: FxHashMap<BookId, usize>,
    clock: LogicalClock,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: ShelfMetrics,
}

impl ShelfCore {
    /// Creates an empty shelf with the given fixed capacity.
    ///
    /// The clock starts at 1. Storage for `capacity` entries is allocated
    /// up front so steady-state operation never reallocates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::policy::lru::ShelfCore;
    ///
    /// let shelf = ShelfCore::try_new(100).unwrap();
    /// assert_eq!(shelf.clock(), 1);
    ///
    /// assert!(ShelfCore::try_new(0).is_err());
    /// ```
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("shelf capacity must be greater than zero"));
        }
        Ok(Self {
            shelf: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            clock: LogicalClock::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: ShelfMetrics::default(),
        })
    }

    /// Returns the stamp the next stamping operation will assign.
    ///
    /// Observing the clock never advances it.
    #[inline]
    pub fn clock(&self) -> Tick {
        self.clock.now()
    }

    /// Returns the recency stamp of an id, or `None` if it is not shelved.
    ///
    /// Clock-neutral.
    #[inline]
    pub fn stamp(&self, id: BookId) -> Option<Tick> {
        self.index.get(&id).map(|&pos| self.shelf[pos].last_access)
    }

    /// Iterates over live entries in storage order.
    ///
    /// Storage order is a compaction artifact and carries no recency
    /// meaning; use [`recency_rank`](RecencyShelf::recency_rank) for that.
    pub fn iter(&self) -> impl Iterator<Item = &BookEntry> {
        self.shelf.iter()
    }

    /// Locates the current eviction victim: the slot holding the smallest
    /// stamp. A later entry displaces the captured victim only when its
    /// stamp is strictly smaller, so the first minimum in storage order
    /// wins a tie.
    fn victim_slot(&self) -> Option<usize> {
        let mut victim: Option<usize> = None;
        for (pos, entry) in self.shelf.iter().enumerate() {
            match victim {
                Some(best) if self.shelf[best].last_access <= entry.last_access => {},
                _ => victim = Some(pos),
            }
        }
        victim
    }

    /// Removes the victim slot, compacting the shelf leftwards so the
    /// relative order of the survivors is preserved, and repairs the index
    /// positions the shift invalidated.
    fn evict_victim(&mut self) -> BookEntry {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();
        #[cfg(feature = "metrics")]
        for _ in 0..self.shelf.len() {
            self.metrics.record_evict_scan_step();
        }

        let slot = self
            .victim_slot()
            .expect("evict_victim is only called on a non-empty shelf");
        let victim = self.shelf.remove(slot);
        self.index.remove(&victim.id);
        for (offset, entry) in self.shelf[slot..].iter().enumerate() {
            self.index.insert(entry.id, slot + offset);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();

        victim
    }

    /// Validates every structural invariant of the shelf.
    ///
    /// Checked invariants:
    /// - entry count never exceeds capacity;
    /// - the id index and the entry vector agree slot-for-slot (which also
    ///   forces ids to be pairwise distinct);
    /// - recency stamps are pairwise distinct and all precede the clock.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violation found.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::policy::lru::ShelfCore;
    /// use shelfkit::traits::BookShelf;
    ///
    /// let mut shelf = ShelfCore::try_new(4).unwrap();
    /// for id in 0..10 {
    ///     shelf.add(id, id);
    /// }
    /// assert!(shelf.check_invariants().is_ok());
    /// ```
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.shelf.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "shelf holds {} entries but capacity is {}",
                self.shelf.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.shelf.len() {
            return Err(InvariantError::new(format!(
                "index has {} ids for {} entries",
                self.index.len(),
                self.shelf.len()
            )));
        }
        let mut stamps: FxHashSet<Tick> = FxHashSet::default();
        for (pos, entry) in self.shelf.iter().enumerate() {
            match self.index.get(&entry.id) {
                Some(&indexed) if indexed == pos => {},
                Some(&indexed) => {
                    return Err(InvariantError::new(format!(
                        "id {} indexed at slot {} but stored at slot {}",
                        entry.id, indexed, pos
                    )));
                },
                None => {
                    return Err(InvariantError::new(format!(
                        "id {} stored at slot {} but missing from the index",
                        entry.id, pos
                    )));
                },
            }
            if entry.last_access == 0 || entry.last_access >= self.clock.now() {
                return Err(InvariantError::new(format!(
                    "id {} carries stamp {} outside the live range 1..{}",
                    entry.id,
                    entry.last_access,
                    self.clock.now()
                )));
            }
            if !stamps.insert(entry.last_access) {
                return Err(InvariantError::new(format!(
                    "stamp {} appears on more than one entry",
                    entry.last_access
                )));
            }
        }
        Ok(())
    }

    /// Debug-build invariant sweep run after every mutation.
    fn validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.check_invariants() {
            panic!("shelf invariant violated: {}", err);
        }
    }
}

impl BookShelf for ShelfCore {
    fn add(&mut self, id: BookId, popularity: Popularity) -> Option<(BookId, Popularity)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_add_call();

        if let Some(&pos) = self.index.get(&id) {
            #[cfg(feature = "metrics")]
            self.metrics.record_add_update();

            // Update path: overwrite + restamp. Never evicts, even when
            // the shelf is otherwise full.
            let stamp = self.clock.tick();
            let entry = &mut self.shelf[pos];
            entry.popularity = popularity;
            entry.last_access = stamp;

            self.validate();
            return None;
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_add_new();

        let mut evicted = None;
        if self.shelf.len() == self.capacity {
            let victim = self.evict_victim();
            evicted = Some((victim.id, victim.popularity));
        }

        let stamp = self.clock.tick();
        self.index.insert(id, self.shelf.len());
        self.shelf.push(BookEntry {
            id,
            popularity,
            last_access: stamp,
        });

        self.validate();
        evicted
    }

    fn access(&mut self, id: BookId) -> Option<Popularity> {
        let pos = match self.index.get(&id) {
            Some(&pos) => pos,
            None => {
                #[cfg(feature = "metrics")]
                self.metrics.record_access_miss();
                // Miss: no state change, clock not advanced.
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_access_hit();

        // The touch is part of the contract even though the caller only
        // reads popularity.
        let stamp = self.clock.tick();
        let entry = &mut self.shelf[pos];
        entry.last_access = stamp;
        let popularity = entry.popularity;

        self.validate();
        Some(popularity)
    }

    #[inline]
    fn peek(&self, id: BookId) -> Option<Popularity> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_call();

        let popularity = self.index.get(&id).map(|&pos| self.shelf[pos].popularity);

        #[cfg(feature = "metrics")]
        if popularity.is_some() {
            (&self.metrics).record_peek_found();
        }

        popularity
    }

    #[inline]
    fn contains(&self, id: BookId) -> bool {
        self.index.contains_key(&id)
    }

    #[inline]
    fn len(&self) -> usize {
        self.shelf.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl RecencyShelf for ShelfCore {
    fn touch(&mut self, id: BookId) -> bool {
        #[cfg(feature = "metrics")]
        self.metrics.record_touch_call();

        let pos = match self.index.get(&id) {
            Some(&pos) => pos,
            None => return false,
        };

        #[cfg(feature = "metrics")]
        self.metrics.record_touch_found();

        let stamp = self.clock.tick();
        self.shelf[pos].last_access = stamp;

        self.validate();
        true
    }

    fn peek_victim(&self) -> Option<(BookId, Popularity)> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_victim_call();

        let slot = self.victim_slot()?;

        #[cfg(feature = "metrics")]
        (&self.metrics).record_peek_victim_found();

        let entry = &self.shelf[slot];
        Some((entry.id, entry.popularity))
    }

    fn recency_rank(&self, id: BookId) -> Option<usize> {
        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_call();

        let target = self.stamp(id)?;
        let mut rank = 0usize;
        for entry in &self.shelf {
            #[cfg(feature = "metrics")]
            (&self.metrics).record_recency_rank_scan_step();

            if entry.last_access > target {
                rank += 1;
            }
        }

        #[cfg(feature = "metrics")]
        (&self.metrics).record_recency_rank_found();

        Some(rank)
    }
}

#[cfg(feature = "metrics")]
impl ShelfCore {
    /// Copies the current counters into a [`ShelfMetricsSnapshot`],
    /// capturing the len/capacity/clock gauges at the same instant.
    pub fn metrics_snapshot(&self) -> ShelfMetricsSnapshot {
        ShelfMetricsSnapshot {
            access_calls: self.metrics.access_calls,
            access_hits: self.metrics.access_hits,
            access_misses: self.metrics.access_misses,
            add_calls: self.metrics.add_calls,
            add_updates: self.metrics.add_updates,
            add_new: self.metrics.add_new,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            evict_scan_steps: self.metrics.evict_scan_steps,
            touch_calls: self.metrics.touch_calls,
            touch_found: self.metrics.touch_found,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            peek_victim_calls: self.metrics.peek_victim_calls.get(),
            peek_victim_found: self.metrics.peek_victim_found.get(),
            recency_rank_calls: self.metrics.recency_rank_calls.get(),
            recency_rank_found: self.metrics.recency_rank_found.get(),
            recency_rank_scan_steps: self.metrics.recency_rank_scan_steps.get(),
            shelf_len: self.shelf.len(),
            capacity: self.capacity,
            clock: self.clock.now(),
        }
    }
}

#[cfg(feature = "metrics")]
impl MetricsSnapshotProvider<ShelfMetricsSnapshot> for ShelfCore {
    fn snapshot(&self) -> ShelfMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl fmt::Debug for ShelfCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShelfCore")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("clock", &self.clock())
            .finish_non_exhaustive()
    }
}

impl Extend<(BookId, Popularity)> for ShelfCore {
    fn extend<T: IntoIterator<Item = (BookId, Popularity)>>(&mut self, iter: T) {
        for (id, popularity) in iter {
            self.add(id, popularity);
        }
    }
}

/// Thread-safe shelf wrapper using `parking_lot::RwLock`.
///
/// `add`, `access`, and `touch` serialize behind the write lock, so the
/// clock advance and the entry mutation it accompanies are applied as one
/// unit; clock-neutral reads (`peek`, `contains`, `len`, `peek_victim`,
/// ...) share the read lock.
///
/// # Example
///
/// ```
/// use shelfkit::policy::lru::ConcurrentShelf;
///
/// let shelf = ConcurrentShelf::try_new(100).unwrap();
/// shelf.add(1, 10);
/// assert_eq!(shelf.access(1), Some(10));
/// assert_eq!(shelf.peek(2), None);
/// ```
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentShelf {
    inner: Arc<RwLock<ShelfCore>>,
}

#[cfg(feature = "concurrency")]
impl ConcurrentShelf {
    /// Creates a new thread-safe shelf with the given fixed capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(ShelfCore::try_new(capacity)?)),
        })
    }

    /// Adds or updates a book. See [`BookShelf::add`].
    pub fn add(&self, id: BookId, popularity: Popularity) -> Option<(BookId, Popularity)> {
        self.inner.write().add(id, popularity)
    }

    /// Reads a popularity, refreshing recency on a hit. See
    /// [`BookShelf::access`].
    ///
    /// Requires the write lock: a successful access restamps the entry.
    pub fn access(&self, id: BookId) -> Option<Popularity> {
        self.inner.write().access(id)
    }

    /// Refreshes an entry's recency without reading it. See
    /// [`RecencyShelf::touch`].
    pub fn touch(&self, id: BookId) -> bool {
        self.inner.write().touch(id)
    }

    /// Reads a popularity without affecting recency.
    ///
    /// Only takes the read lock, allowing concurrent peeks.
    pub fn peek(&self, id: BookId) -> Option<Popularity> {
        self.inner.read().peek(id)
    }

    /// Returns `true` if the id is shelved.
    pub fn contains(&self, id: BookId) -> bool {
        self.inner.read().contains(id)
    }

    /// Returns the current number of shelved books.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the shelf holds no books.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Returns the fixed maximum capacity.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Returns the stamp the next stamping operation will assign.
    pub fn clock(&self) -> Tick {
        self.inner.read().clock()
    }

    /// Returns the entry the next capacity eviction would remove.
    pub fn peek_victim(&self) -> Option<(BookId, Popularity)> {
        self.inner.read().peek_victim()
    }

    /// Returns the recency rank of an id (0 = most recently stamped).
    pub fn recency_rank(&self, id: BookId) -> Option<usize> {
        self.inner.read().recency_rank(id)
    }

    /// Validates structural invariants under the read lock.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl ConcurrentShelf {
    /// Copies the current counters into a [`ShelfMetricsSnapshot`].
    pub fn metrics_snapshot(&self) -> ShelfMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(all(feature = "metrics", feature = "concurrency"))]
impl MetricsSnapshotProvider<ShelfMetricsSnapshot> for ConcurrentShelf {
    fn snapshot(&self) -> ShelfMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl fmt::Debug for ConcurrentShelf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shelf = self.inner.read();
        f.debug_struct("ConcurrentShelf")
            .field("len", &shelf.len())
            .field("capacity", &shelf.capacity())
            .field("clock", &shelf.clock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==============================================
    // CORRECTNESS TESTS MODULE
    // ==============================================
    mod correctness {
        use super::*;

        mod construction {
            use super::*;

            #[test]
            fn test_valid_capacities() {
                for capacity in [1, 2, 100, 4096] {
                    let shelf = ShelfCore::try_new(capacity).unwrap();
                    assert_eq!(shelf.capacity(), capacity);
                    assert_eq!(shelf.len(), 0);
                    assert!(shelf.is_empty());
                }
            }

            #[test]
            fn test_zero_capacity_rejected() {
                let err = ShelfCore::try_new(0).unwrap_err();
                assert!(err.to_string().contains("capacity"));
            }

            #[test]
            fn test_clock_starts_at_one() {
                let shelf = ShelfCore::try_new(4).unwrap();
                assert_eq!(shelf.clock(), 1);
            }
        }

        mod add_semantics {
            use super::*;

            #[test]
            fn test_add_single_book() {
                let mut shelf = ShelfCore::try_new(5).unwrap();

                assert_eq!(shelf.add(1, 100), None);
                assert_eq!(shelf.len(), 1);
                assert!(shelf.contains(1));
                assert_eq!(shelf.stamp(1), Some(1));
            }

            #[test]
            fn test_add_existing_overwrites_popularity() {
                let mut shelf = ShelfCore::try_new(5).unwrap();

                shelf.add(1, 100);
                assert_eq!(shelf.add(1, 200), None);

                assert_eq!(shelf.len(), 1);
                assert_eq!(shelf.peek(1), Some(200));
            }

            #[test]
            fn test_update_refreshes_stamp() {
                let mut shelf = ShelfCore::try_new(5).unwrap();

                shelf.add(1, 100);
                let before = shelf.stamp(1).unwrap();
                shelf.add(1, 100);
                let after = shelf.stamp(1).unwrap();

                assert!(after > before);
            }

            #[test]
            fn test_update_on_full_shelf_never_evicts() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                assert_eq!(shelf.add(1, 11), None);

                assert_eq!(shelf.len(), 2);
                assert!(shelf.contains(1));
                assert!(shelf.contains(2));
            }

            #[test]
            fn test_add_reports_evicted_entry() {
                let mut shelf = ShelfCore::try_new(1).unwrap();

                shelf.add(1, 10);
                assert_eq!(shelf.add(2, 20), Some((1, 10)));
                assert_eq!(shelf.len(), 1);
            }

            #[test]
            fn test_negative_ids_and_popularities() {
                let mut shelf = ShelfCore::try_new(3).unwrap();

                shelf.add(-7, -1);
                shelf.add(0, i64::MIN);
                shelf.add(i64::MAX, i64::MAX);

                assert_eq!(shelf.peek(-7), Some(-1));
                assert_eq!(shelf.peek(0), Some(i64::MIN));
                assert_eq!(shelf.peek(i64::MAX), Some(i64::MAX));
            }
        }

        mod access_semantics {
            use super::*;

            #[test]
            fn test_access_hit_returns_popularity() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, 100);

                assert_eq!(shelf.access(1), Some(100));
            }

            #[test]
            fn test_access_never_changes_popularity() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, 100);

                shelf.access(1);
                shelf.access(1);

                assert_eq!(shelf.peek(1), Some(100));
            }

            #[test]
            fn test_access_hit_refreshes_stamp() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, 100);
                shelf.add(2, 200);

                let before = shelf.stamp(1).unwrap();
                shelf.access(1);
                let after = shelf.stamp(1).unwrap();

                assert!(after > before);
                assert!(after > shelf.stamp(2).unwrap());
            }

            #[test]
            fn test_access_miss_is_clock_neutral() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, 100);

                let clock = shelf.clock();
                let stamp = shelf.stamp(1).unwrap();

                assert_eq!(shelf.access(99), None);

                assert_eq!(shelf.clock(), clock);
                assert_eq!(shelf.stamp(1), Some(stamp));
                assert_eq!(shelf.len(), 1);
            }

            #[test]
            fn test_miss_distinct_from_sentinel_popularity() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, -1);

                // A stored popularity of -1 is still a hit.
                assert_eq!(shelf.access(1), Some(-1));
                assert_eq!(shelf.access(2), None);
            }

            #[test]
            fn test_peek_is_clock_neutral() {
                let mut shelf = ShelfCore::try_new(5).unwrap();
                shelf.add(1, 100);

                let clock = shelf.clock();
                let stamp = shelf.stamp(1).unwrap();

                assert_eq!(shelf.peek(1), Some(100));

                assert_eq!(shelf.clock(), clock);
                assert_eq!(shelf.stamp(1), Some(stamp));
            }
        }

        mod eviction {
            use super::*;

            #[test]
            fn test_oldest_insert_is_first_victim() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                shelf.add(3, 30);

                assert_eq!(shelf.len(), 2);
                assert!(!shelf.contains(1));
                assert!(shelf.contains(2));
                assert!(shelf.contains(3));
            }

            #[test]
            fn test_access_protects_from_eviction() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                shelf.access(1); // 2 is now the stalest

                assert_eq!(shelf.add(3, 30), Some((2, 20)));
                assert!(shelf.contains(1));
                assert!(!shelf.contains(2));
            }

            #[test]
            fn test_touch_protects_from_eviction() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                assert!(shelf.touch(1));

                shelf.add(3, 30);
                assert!(shelf.contains(1));
                assert!(!shelf.contains(2));
            }

            #[test]
            fn test_update_protects_from_eviction() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                shelf.add(1, 11); // restamps 1, so 2 is the victim

                assert_eq!(shelf.add(3, 30), Some((2, 20)));
                assert_eq!(shelf.peek(1), Some(11));
            }

            #[test]
            fn test_victim_is_global_minimum_stamp() {
                let mut shelf = ShelfCore::try_new(4).unwrap();

                for id in 1..=4 {
                    shelf.add(id, id * 10);
                }
                // Restamp everything except 3 in a scrambled order.
                shelf.access(2);
                shelf.access(4);
                shelf.access(1);

                assert_eq!(shelf.peek_victim(), Some((3, 30)));
                assert_eq!(shelf.add(5, 50), Some((3, 30)));
            }

            #[test]
            fn test_eviction_preserves_survivor_order() {
                let mut shelf = ShelfCore::try_new(3).unwrap();

                shelf.add(1, 10);
                shelf.add(2, 20);
                shelf.add(3, 30);
                shelf.access(1); // victim is now 2, in the middle slot

                shelf.add(4, 40);

                let order: Vec<BookId> = shelf.iter().map(|e| e.id()).collect();
                assert_eq!(order, vec![1, 3, 4]);
            }

            #[test]
            fn test_repeated_eviction_holds_capacity() {
                let mut shelf = ShelfCore::try_new(2).unwrap();

                for id in 0..100 {
                    shelf.add(id, id * 10);
                    assert!(shelf.len() <= 2);
                }
                assert_eq!(shelf.len(), 2);
                assert!(shelf.contains(98));
                assert!(shelf.contains(99));
            }
        }

        mod clock_discipline {
            use super::*;

            #[test]
            fn test_each_stamping_op_ticks_once() {
                let mut shelf = ShelfCore::try_new(3).unwrap();

                assert_eq!(shelf.clock(), 1);
                shelf.add(1, 10); // insert
                assert_eq!(shelf.clock(), 2);
                shelf.add(1, 11); // update
                assert_eq!(shelf.clock(), 3);
                shelf.access(1); // hit
                assert_eq!(shelf.clock(), 4);
                shelf.touch(1); // touch
                assert_eq!(shelf.clock(), 5);
            }

            #[test]
            fn test_clock_neutral_ops_do_not_tick() {
                let mut shelf = ShelfCore::try_new(3).unwrap();
                shelf.add(1, 10);

                let clock = shelf.clock();
                shelf.access(99); // miss
                shelf.touch(99); // miss
                shelf.peek(1);
                shelf.peek_victim();
                shelf.contains(1);
                shelf.recency_rank(1);
                assert_eq!(shelf.clock(), clock);
            }

            #[test]
            fn test_eviction_does_not_tick_separately() {
                let mut shelf = ShelfCore::try_new(1).unwrap();

                shelf.add(1, 10); // clock 1 -> 2
                shelf.add(2, 20); // evicts 1, stamps 2: clock 2 -> 3
                assert_eq!(shelf.clock(), 3);
                assert_eq!(shelf.stamp(2), Some(2));
            }

            #[test]
            fn test_stamps_stay_pairwise_distinct() {
                let mut shelf = ShelfCore::try_new(8).unwrap();

                for round in 0..20 {
                    for id in 0..10 {
                        shelf.add(id, round);
                    }
                    shelf.access(round % 10);
                }

                let mut stamps: Vec<Tick> = shelf.iter().map(|e| e.last_access()).collect();
                stamps.sort_unstable();
                stamps.dedup();
                assert_eq!(stamps.len(), shelf.len());
            }
        }

        mod recency_inspection {
            use super::*;

            #[test]
            fn test_peek_victim_empty_shelf() {
                let shelf = ShelfCore::try_new(3).unwrap();
                assert_eq!(shelf.peek_victim(), None);
            }

            #[test]
            fn test_peek_victim_does_not_remove() {
                let mut shelf = ShelfCore::try_new(3).unwrap();
                shelf.add(1, 10);
                shelf.add(2, 20);

                assert_eq!(shelf.peek_victim(), Some((1, 10)));
                assert_eq!(shelf.peek_victim(), Some((1, 10)));
                assert_eq!(shelf.len(), 2);
            }

            #[test]
            fn test_recency_rank_orders_by_stamp() {
                let mut shelf = ShelfCore::try_new(3).unwrap();
                shelf.add(1, 10);
                shelf.add(2, 20);
                shelf.add(3, 30);

                assert_eq!(shelf.recency_rank(3), Some(0));
                assert_eq!(shelf.recency_rank(2), Some(1));
                assert_eq!(shelf.recency_rank(1), Some(2));
                assert_eq!(shelf.recency_rank(99), None);

                shelf.access(1);
                assert_eq!(shelf.recency_rank(1), Some(0));
                assert_eq!(shelf.recency_rank(3), Some(1));
            }

            #[test]
            fn test_extend_feeds_add() {
                let mut shelf = ShelfCore::try_new(2).unwrap();
                shelf.extend([(1, 10), (2, 20), (3, 30)]);

                assert_eq!(shelf.len(), 2);
                assert!(shelf.contains(3));
            }
        }

        mod invariants {
            use super::*;

            #[test]
            fn test_fresh_shelf_is_consistent() {
                let shelf = ShelfCore::try_new(4).unwrap();
                assert!(shelf.check_invariants().is_ok());
            }

            #[test]
            fn test_consistent_after_mixed_workload() {
                let mut shelf = ShelfCore::try_new(8).unwrap();

                // Deterministic scramble of adds, updates, hits, and misses.
                let mut state: u64 = 0x9e3779b97f4a7c15;
                for _ in 0..2000 {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    let id = (state % 24) as BookId;
                    match state % 4 {
                        0 | 1 => {
                            shelf.add(id, (state % 1000) as Popularity);
                        },
                        2 => {
                            shelf.access(id);
                        },
                        _ => {
                            shelf.touch(id);
                        },
                    }
                }

                assert!(shelf.check_invariants().is_ok());
                assert!(shelf.len() <= shelf.capacity());
            }
        }
    }

    // ==============================================
    // EDGE CASE TESTS MODULE
    // ==============================================
    mod edge_cases {
        use super::*;

        #[test]
        fn test_capacity_one_churn() {
            let mut shelf = ShelfCore::try_new(1).unwrap();

            shelf.add(1, 5);
            assert_eq!(shelf.add(1, 9), None); // update in place
            assert_eq!(shelf.len(), 1);
            assert_eq!(shelf.access(1), Some(9));

            assert_eq!(shelf.add(2, 7), Some((1, 9)));
            assert_eq!(shelf.access(1), None);
            assert_eq!(shelf.access(2), Some(7));
        }

        #[test]
        fn test_empty_shelf_behavior() {
            let mut shelf = ShelfCore::try_new(5).unwrap();

            assert_eq!(shelf.len(), 0);
            assert_eq!(shelf.access(1), None);
            assert_eq!(shelf.peek(1), None);
            assert!(!shelf.contains(1));
            assert!(!shelf.touch(1));
            assert_eq!(shelf.peek_victim(), None);
            assert_eq!(shelf.recency_rank(1), None);
            assert_eq!(shelf.stamp(1), None);
        }

        #[test]
        fn test_never_filled_shelf_misses() {
            let mut shelf = ShelfCore::try_new(2).unwrap();
            assert_eq!(shelf.access(99), None);
            assert_eq!(shelf.clock(), 1);
        }

        #[test]
        fn test_debug_formatting() {
            let mut shelf = ShelfCore::try_new(3).unwrap();
            shelf.add(1, 10);

            let dbg = format!("{:?}", shelf);
            assert!(dbg.contains("ShelfCore"));
            assert!(dbg.contains("len"));
        }
    }

    // ==============================================
    // CONCURRENT WRAPPER TESTS MODULE
    // ==============================================
    #[cfg(feature = "concurrency")]
    mod concurrent {
        use super::*;

        #[test]
        fn test_basic_round_trip() {
            let shelf = ConcurrentShelf::try_new(2).unwrap();

            shelf.add(1, 10);
            shelf.add(2, 20);
            assert_eq!(shelf.access(1), Some(10));

            shelf.add(3, 30);
            assert!(!shelf.contains(2));
            assert!(shelf.contains(1));
            assert_eq!(shelf.len(), 2);
        }

        #[test]
        fn test_zero_capacity_rejected() {
            assert!(ConcurrentShelf::try_new(0).is_err());
        }

        #[test]
        fn test_clone_shares_state() {
            let shelf = ConcurrentShelf::try_new(4).unwrap();
            let alias = shelf.clone();

            shelf.add(1, 10);
            assert_eq!(alias.peek(1), Some(10));
        }

        #[test]
        fn test_cross_thread_adds() {
            let shelf = ConcurrentShelf::try_new(16).unwrap();

            let handles: Vec<_> = (0..4)
                .map(|worker| {
                    let shelf = shelf.clone();
                    std::thread::spawn(move || {
                        for i in 0..100 {
                            let id = (worker * 100 + i) as BookId;
                            shelf.add(id, id);
                            shelf.access(id);
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(shelf.len(), 16);
            assert!(shelf.check_invariants().is_ok());
        }
    }
}
