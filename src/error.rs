//! Error types for the shelfkit library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when shelf configuration parameters are
//!   invalid (e.g. zero capacity).
//! - [`InvariantError`]: Returned when internal data-structure invariants
//!   are violated (`check_invariants` methods).
//! - [`CommandError`]: Returned when a protocol command line cannot be
//!   parsed.
//!
//! ## Example Usage
//!
//! ```
//! use shelfkit::error::ConfigError;
//! use shelfkit::policy::lru::ShelfCore;
//!
//! // Fallible constructor for user-configurable parameters
//! let shelf: Result<ShelfCore, ConfigError> = ShelfCore::try_new(100);
//! assert!(shelf.is_ok());
//!
//! // Zero capacity is caught without panicking
//! let bad = ShelfCore::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when shelf configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`ShelfCore::try_new`](crate::policy::lru::ShelfCore::try_new) and
/// [`ShelfBuilder::try_build`](crate::builder::ShelfBuilder::try_build).
/// Carries a human-readable description of which parameter failed
/// validation.
///
/// # Example
///
/// ```
/// use shelfkit::policy::lru::ShelfCore;
///
/// let err = ShelfCore::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal shelf invariants are violated.
///
/// Produced by
/// [`ShelfCore::check_invariants`](crate::policy::lru::ShelfCore::check_invariants).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Error returned when a protocol line cannot be parsed into a command.
///
/// Produced by the [`protocol`](crate::protocol) layer (`FromStr` impls for
/// [`Command`](crate::protocol::Command) and
/// [`Header`](crate::protocol::Header)). Carries a human-readable
/// description of what was malformed.
///
/// # Example
///
/// ```
/// use shelfkit::protocol::Command;
///
/// let err = "ADD one 10".parse::<Command>().unwrap_err();
/// assert!(err.to_string().contains("id"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandError(String);

impl CommandError {
    /// Creates a new `CommandError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for CommandError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
