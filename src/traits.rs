//! # Shelf Trait Hierarchy
//!
//! This module defines the trait seam for the bookshelf cache, separating
//! the universal operation set from the recency-specific surface.
//!
//! ## Architecture
//!
//! ```text
//!            ┌───────────────────────────────────────────────┐
//!            │                 BookShelf                     │
//!            │                                               │
//!            │  add(&mut, BookId, Popularity) → evicted?     │
//!            │  access(&mut, BookId) → Option<Popularity>    │
//!            │  peek(&, BookId) → Option<Popularity>         │
//!            │  contains(&, BookId) → bool                   │
//!            │  len(&) → usize                               │
//!            │  is_empty(&) → bool                           │
//!            │  capacity(&) → usize                          │
//!            └───────────────────────┬───────────────────────┘
//!                                    │
//!                                    ▼
//!            ┌───────────────────────────────────────────────┐
//!            │           RecencyShelf: BookShelf             │
//!            │                                               │
//!            │  touch(&mut, BookId) → bool                   │
//!            │  peek_victim(&) → Option<(BookId, Pop)>       │
//!            │  recency_rank(&, BookId) → Option<usize>      │
//!            │                                               │
//!            │  ⚠ No arbitrary removal, no clear!            │
//!            └───────────────────────────────────────────────┘
//! ```
//!
//! ## Why There Is No `remove`
//!
//! Entries on the shelf are destroyed by exactly one path: capacity
//! eviction inside [`add`](BookShelf::add). Offering `remove` or `clear`
//! would create states the recency model never produces (holes in the
//! lifetime of an id without a corresponding eviction), so the trait
//! surface deliberately omits them — the same reasoning that keeps
//! arbitrary removal off a FIFO queue.
//!
//! ## Trait Summary
//!
//! | Trait          | Extends     | Purpose                                |
//! |----------------|-------------|----------------------------------------|
//! | `BookShelf`    | -           | Universal shelf operations             |
//! | `RecencyShelf` | `BookShelf` | Recency inspection and explicit touch  |
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::policy::lru::ShelfCore;
//! use shelfkit::traits::BookShelf;
//!
//! // Function accepting any shelf implementation
//! fn warm_shelf<S: BookShelf>(shelf: &mut S, records: &[(i64, i64)]) {
//!     for &(id, popularity) in records {
//!         shelf.add(id, popularity);
//!     }
//! }
//!
//! let mut shelf = ShelfCore::try_new(10).unwrap();
//! warm_shelf(&mut shelf, &[(1, 10), (2, 20)]);
//! assert_eq!(shelf.len(), 2);
//! ```

/// Identifier of a shelved book. Externally supplied; unique among live
/// entries while present.
pub type BookId = i64;

/// Application-supplied popularity score. Overwritten on every
/// [`add`](BookShelf::add) of an existing id; never changed by
/// [`access`](BookShelf::access).
pub type Popularity = i64;

/// Core operations every shelf supports.
///
/// # Example
///
/// ```
/// use shelfkit::policy::lru::ShelfCore;
/// use shelfkit::traits::BookShelf;
///
/// let mut shelf = ShelfCore::try_new(2).unwrap();
/// shelf.add(1, 10);
///
/// assert_eq!(shelf.access(1), Some(10));
/// assert_eq!(shelf.access(99), None);
/// ```
pub trait BookShelf {
    /// Adds or updates a book.
    ///
    /// An existing id gets its popularity overwritten and its recency
    /// stamp refreshed; no eviction happens on that path even when the
    /// shelf is full. A new id on a full shelf first evicts the entry
    /// with the smallest recency stamp. Returns the evicted entry as an
    /// `(id, popularity)` pair, or `None` when nothing was displaced.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::policy::lru::ShelfCore;
    /// use shelfkit::traits::BookShelf;
    ///
    /// let mut shelf = ShelfCore::try_new(1).unwrap();
    /// assert_eq!(shelf.add(1, 10), None);
    /// assert_eq!(shelf.add(1, 11), None); // update, never evicts
    /// assert_eq!(shelf.add(2, 20), Some((1, 11))); // full: 1 displaced
    /// ```
    fn add(&mut self, id: BookId, popularity: Popularity) -> Option<(BookId, Popularity)>;

    /// Reads a book's popularity, refreshing its recency stamp on a hit.
    ///
    /// The touch is an intended observable side effect: a hit protects
    /// the entry from being the next eviction victim. A miss returns
    /// `None` and leaves the shelf (including its clock) untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::policy::lru::ShelfCore;
    /// use shelfkit::traits::BookShelf;
    ///
    /// let mut shelf = ShelfCore::try_new(2).unwrap();
    /// shelf.add(1, 10);
    /// shelf.add(2, 20);
    ///
    /// assert_eq!(shelf.access(1), Some(10)); // 2 is now the victim
    /// shelf.add(3, 30);
    /// assert_eq!(shelf.access(2), None);
    /// assert_eq!(shelf.access(1), Some(10));
    /// ```
    fn access(&mut self, id: BookId) -> Option<Popularity>;

    /// Reads a book's popularity without refreshing its recency stamp.
    ///
    /// Clock-neutral: use [`access`](Self::access) when the read should
    /// count as a use of the entry.
    fn peek(&self, id: BookId) -> Option<Popularity>;

    /// Checks whether an id is shelved, without affecting recency.
    fn contains(&self, id: BookId) -> bool;

    /// Returns the current number of shelved books.
    fn len(&self) -> usize;

    /// Returns `true` if the shelf holds no books.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fixed maximum capacity of the shelf.
    fn capacity(&self) -> usize;
}

/// Recency-specific operations for shelves that evict by least recent use.
///
/// # Example
///
/// ```
/// use shelfkit::policy::lru::ShelfCore;
/// use shelfkit::traits::{BookShelf, RecencyShelf};
///
/// let mut shelf = ShelfCore::try_new(3).unwrap();
/// shelf.add(1, 10);
/// shelf.add(2, 20);
/// shelf.add(3, 30);
///
/// // Book 1 is the current eviction victim
/// assert_eq!(shelf.peek_victim(), Some((1, 10)));
///
/// // Touch it without reading; book 2 becomes the victim
/// assert!(shelf.touch(1));
/// assert_eq!(shelf.peek_victim(), Some((2, 20)));
/// ```
pub trait RecencyShelf: BookShelf {
    /// Refreshes an entry's recency stamp without reading its popularity.
    ///
    /// Returns `true` if the id was found and restamped, `false`
    /// otherwise. A miss is clock-neutral.
    fn touch(&mut self, id: BookId) -> bool;

    /// Returns the entry the next capacity eviction would remove, without
    /// removing it or affecting recency.
    ///
    /// `None` on an empty shelf.
    fn peek_victim(&self) -> Option<(BookId, Popularity)>;

    /// Returns the recency rank of an id (0 = most recently stamped,
    /// higher = staler). `None` if the id is not shelved.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::policy::lru::ShelfCore;
    /// use shelfkit::traits::{BookShelf, RecencyShelf};
    ///
    /// let mut shelf = ShelfCore::try_new(3).unwrap();
    /// shelf.add(1, 10);
    /// shelf.add(2, 20);
    /// shelf.add(3, 30);
    ///
    /// assert_eq!(shelf.recency_rank(3), Some(0)); // most recent
    /// assert_eq!(shelf.recency_rank(1), Some(2)); // stalest
    /// assert_eq!(shelf.recency_rank(99), None);
    /// ```
    fn recency_rank(&self, id: BookId) -> Option<usize>;
}
