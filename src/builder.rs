//! Runtime selection between the cache policies.
//!
//! ## Example
//!
//! ```rust
//! use lfukit::builder::{CacheBuilder, CachePolicy};
//!
//! let mut cache = CacheBuilder::new(100).build::<u64, String>(CachePolicy::Lfu);
//! cache.insert(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! ```

use std::hash::Hash;

use crate::error::{ConfigError, checked_capacity};
use crate::policy::lfu::LfuCache;
use crate::policy::lru::LruCache;
use crate::traits::CoreCache;

/// Available cache eviction policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Least Frequently Used, ties broken by recency.
    Lfu,
    /// Least Recently Used.
    Lru,
}

/// Cache wrapper with the same API regardless of policy.
#[derive(Debug)]
pub struct Cache<K, V> {
    inner: CacheInner<K, V>,
}

#[derive(Debug)]
enum CacheInner<K, V> {
    Lfu(LfuCache<K, V>),
    Lru(LruCache<K, V>),
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Insert a key-value pair. Returns the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lfu(lfu) => lfu.put(key, value),
            CacheInner::Lru(lru) => lru.put(key, value),
        }
    }

    /// Get a value, recording the access with the policy.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        match &mut self.inner {
            CacheInner::Lfu(lfu) => lfu.get(key),
            CacheInner::Lru(lru) => lru.get(key),
        }
    }

    /// Get a value without recording an access.
    pub fn peek(&self, key: &K) -> Option<&V> {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.peek(key),
            CacheInner::Lru(lru) => lru.peek(key),
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.contains(key),
            CacheInner::Lru(lru) => lru.contains(key),
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        match &mut self.inner {
            CacheInner::Lfu(lfu) => lfu.remove(key),
            CacheInner::Lru(lru) => lru.remove(key),
        }
    }

    pub fn len(&self) -> usize {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.len(),
            CacheInner::Lru(lru) => lru.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        match &self.inner {
            CacheInner::Lfu(lfu) => lfu.capacity(),
            CacheInner::Lru(lru) => lru.capacity(),
        }
    }

    pub fn clear(&mut self) {
        match &mut self.inner {
            CacheInner::Lfu(lfu) => lfu.clear(),
            CacheInner::Lru(lru) => lru.clear(),
        }
    }

    /// Policy this cache was built with.
    pub fn policy(&self) -> CachePolicy {
        match &self.inner {
            CacheInner::Lfu(_) => CachePolicy::Lfu,
            CacheInner::Lru(_) => CachePolicy::Lru,
        }
    }
}

impl<K, V> CoreCache<K, V> for Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        Cache::insert(self, key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        Cache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Cache::contains(self, key)
    }

    fn len(&self) -> usize {
        Cache::len(self)
    }

    fn capacity(&self) -> usize {
        Cache::capacity(self)
    }

    fn clear(&mut self) {
        Cache::clear(self);
    }
}

/// Builder for creating cache instances.
///
/// Capacity is taken as `i64` so that callers passing through untrusted
/// signed values get a [`ConfigError`] instead of a wrapped-around size.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    capacity: i64,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: i64) -> Self {
        Self { capacity }
    }

    /// Build a cache with the specified policy, rejecting a negative capacity.
    ///
    /// ```rust
    /// use lfukit::builder::{CacheBuilder, CachePolicy};
    ///
    /// assert!(CacheBuilder::new(-1).try_build::<u64, u64>(CachePolicy::Lfu).is_err());
    ///
    /// let cache = CacheBuilder::new(0).try_build::<u64, u64>(CachePolicy::Lru).unwrap();
    /// assert_eq!(cache.capacity(), 0);
    /// ```
    pub fn try_build<K, V>(self, policy: CachePolicy) -> Result<Cache<K, V>, ConfigError>
    where
        K: Eq + Hash + Clone,
    {
        let capacity = checked_capacity(self.capacity)?;
        tracing::debug!(?policy, capacity, "building cache");
        let inner = match policy {
            CachePolicy::Lfu => CacheInner::Lfu(LfuCache::new(capacity)),
            CachePolicy::Lru => CacheInner::Lru(LruCache::new(capacity)),
        };
        Ok(Cache { inner })
    }

    /// Build a cache with the specified policy.
    ///
    /// # Panics
    ///
    /// Panics if the capacity is negative. Use [`try_build`](Self::try_build)
    /// to handle that case.
    pub fn build<K, V>(self, policy: CachePolicy) -> Cache<K, V>
    where
        K: Eq + Hash + Clone,
    {
        match self.try_build(policy) {
            Ok(cache) => cache,
            Err(err) => panic!("{err}"),
        }
    }
}
