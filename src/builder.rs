//! Shelf builder.
//!
//! Provides a small configuration front end so callers validate capacity
//! in one place regardless of which shelf flavor they construct.
//!
//! ## Example
//!
//! ```
//! use shelfkit::builder::ShelfBuilder;
//! use shelfkit::traits::BookShelf;
//!
//! let mut shelf = ShelfBuilder::new(100).try_build().unwrap();
//! shelf.add(1, 10);
//! assert_eq!(shelf.access(1), Some(10));
//! ```

use crate::error::ConfigError;
#[cfg(feature = "concurrency")]
use crate::policy::lru::ConcurrentShelf;
use crate::policy::lru::ShelfCore;

/// Builder for shelf instances.
#[derive(Debug, Clone)]
pub struct ShelfBuilder {
    capacity: usize,
}

impl ShelfBuilder {
    /// Creates a builder with the specified capacity.
    ///
    /// Validation happens at build time, so a zero capacity is accepted
    /// here and reported by `try_build`.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Builds a single-threaded [`ShelfCore`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use shelfkit::builder::ShelfBuilder;
    ///
    /// assert!(ShelfBuilder::new(8).try_build().is_ok());
    /// assert!(ShelfBuilder::new(0).try_build().is_err());
    /// ```
    pub fn try_build(self) -> Result<ShelfCore, ConfigError> {
        ShelfCore::try_new(self.capacity)
    }

    /// Builds a thread-safe [`ConcurrentShelf`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured capacity is zero.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent(self) -> Result<ConcurrentShelf, ConfigError> {
        ConcurrentShelf::try_new(self.capacity)
    }
}
