//! # Cache Trait Hierarchy
//!
//! Shared interface for the cache policies in this crate.
//!
//! ```text
//!                 ┌─────────────────────────────────────┐
//!                 │          CoreCache<K, V>            │
//!                 │  insert, get, contains, len,        │
//!                 │  is_empty, capacity, clear          │
//!                 └──────────────────┬──────────────────┘
//!                                    │
//!                 ┌──────────────────┴──────────────────┐
//!                 │         MutableCache<K, V>          │
//!                 │  remove                             │
//!                 └──────────────────┬──────────────────┘
//!                                    │
//!            ┌───────────────────────┴───────────────────────┐
//!            ▼                                               ▼
//!   ┌──────────────────────────┐                ┌──────────────────────────┐
//!   │   LfuCacheTrait<K, V>    │                │   LruCacheTrait<K, V>    │
//!   │  pop_lfu, peek_lfu,      │                │  pop_lru, peek_lru,      │
//!   │  frequency,              │                │  touch                   │
//!   │  reset_frequency,        │                └──────────────────────────┘
//!   │  increment_frequency     │
//!   └──────────────────────────┘
//! ```
//!
//! The concrete caches also expose inherent methods that accept borrowed
//! keys (`K: Borrow<Q>`); the traits take `&K` so they stay object-friendly
//! and easy to write generic code against.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//! use lfukit::traits::{CoreCache, LfuCacheTrait, MutableCache};
//!
//! fn warm<C: CoreCache<u64, String>>(cache: &mut C, data: &[(u64, String)]) {
//!     for (key, value) in data {
//!         cache.insert(*key, value.clone());
//!     }
//! }
//!
//! let mut cache: LfuCache<u64, String> = LfuCache::new(8);
//! warm(&mut cache, &[(1, "one".into()), (2, "two".into())]);
//! cache.increment_frequency(&1);
//! assert_eq!(cache.pop_lfu().map(|(k, _)| k), Some(2));
//! assert_eq!(cache.remove(&1), Some("one".to_string()));
//! ```

/// Operations every cache policy supports.
pub trait CoreCache<K, V> {
    /// Inserts or updates `key`, returning the previous value on update.
    ///
    /// May evict another entry when the cache is full. A zero-capacity
    /// cache drops the value and returns `None`.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, recording the access with the policy.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Returns `true` if `key` is cached. Does not record an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of cached entries.
    fn len(&self) -> usize;

    /// Returns `true` if nothing is cached.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Removes every entry.
    fn clear(&mut self);
}

/// Caches that allow removing an arbitrary key.
pub trait MutableCache<K, V>: CoreCache<K, V> {
    /// Removes `key`, returning its value if it was cached.
    fn remove(&mut self, key: &K) -> Option<V>;
}

/// Frequency-based eviction with explicit frequency control.
///
/// # Example
///
/// ```
/// use lfukit::policy::lfu::LfuCache;
/// use lfukit::traits::{CoreCache, LfuCacheTrait};
///
/// let mut cache: LfuCache<u64, &str> = LfuCache::new(10);
/// cache.insert(1, "first");
/// cache.insert(2, "second");
/// cache.get(&2);
///
/// assert_eq!(cache.frequency(&2), Some(2));
/// assert_eq!(cache.peek_lfu().map(|(k, _)| *k), Some(1));
/// ```
pub trait LfuCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the eviction candidate: lowest frequency, least
    /// recently touched among ties.
    fn pop_lfu(&mut self) -> Option<(K, V)>;

    /// Returns the eviction candidate without removing or touching it.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Current access frequency of `key`.
    fn frequency(&self, key: &K) -> Option<u64>;

    /// Moves `key` back to frequency 1, returning its previous frequency.
    fn reset_frequency(&mut self, key: &K) -> Option<u64>;

    /// Records an access without reading the value; returns the new frequency.
    fn increment_frequency(&mut self, key: &K) -> Option<u64>;
}

/// Recency-based eviction.
pub trait LruCacheTrait<K, V>: MutableCache<K, V> {
    /// Removes and returns the least recently used entry.
    fn pop_lru(&mut self) -> Option<(K, V)>;

    /// Returns the least recently used entry without touching it.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Marks `key` as most recently used; returns `false` if absent.
    fn touch(&mut self, key: &K) -> bool;
}
