//! Error types for lfukit.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when cache configuration is invalid
//!   (a negative capacity).
//! - [`InvariantError`]: Returned by `check_invariants` when the internal
//!   structures disagree with each other.
//!
//! ## Example Usage
//!
//! ```
//! use lfukit::error::ConfigError;
//! use lfukit::policy::lfu::LfuCache;
//!
//! let cache: Result<LfuCache<u64, u64>, ConfigError> = LfuCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! let bad = LfuCache::<u64, u64>::try_new(-1);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Produced by [`LfuCache::check_invariants`](crate::policy::lfu::LfuCache::check_invariants)
/// and [`LruCache::check_invariants`](crate::policy::lru::LruCache::check_invariants).
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
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`LfuCache::try_new`](crate::policy::lfu::LfuCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(-3).unwrap_err();
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

/// Converts a signed capacity into a `usize`.
///
/// Negative values are rejected, as are values the target's `usize` cannot
/// hold (only possible on 32-bit platforms).
pub(crate) fn checked_capacity(capacity: i64) -> Result<usize, ConfigError> {
    if capacity < 0 {
        tracing::debug!(capacity, "rejected negative cache capacity");
        return Err(ConfigError::new(format!(
            "cache capacity must be non-negative, got {}",
            capacity
        )));
    }
    usize::try_from(capacity).map_err(|_| {
        tracing::debug!(capacity, "rejected oversized cache capacity");
        ConfigError::new(format!(
            "cache capacity {} exceeds the platform maximum of {}",
            capacity,
            usize::MAX
        ))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
