//! LRU (Least Recently Used) cache.
//!
//! One [`EntryList`] ordered from least to most recently used, sharing the
//! arena and index primitives with [`LfuCache`](crate::policy::lfu::LfuCache).
//! Useful as a baseline when comparing hit rates against LFU.
//!
//! ```text
//!   head (LRU)                                   tail (MRU)
//!     [k3] ◄──► [k1] ◄──► [k4] ◄──► [k2]
//!      ▲                              ▲
//!   evicted next               touched last
//! ```
//!
//! ```
//! use lfukit::policy::lru::LruCache;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);
//! cache.put(3, "three");
//!
//! assert!(cache.contains(&1));
//! assert!(!cache.contains(&2));
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use crate::ds::{EntryList, KeyIndex, Linked, Links, SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError, checked_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::{LruMetrics, LruMetricsSnapshot};
use crate::traits::{CoreCache, LruCacheTrait, MutableCache};

const PREALLOC_LIMIT: usize = 4096;

#[derive(Debug)]
struct LruEntry<K, V> {
    links: Links,
    key: K,
    value: V,
}

impl<K, V> Linked for LruEntry<K, V> {
    #[inline]
    fn links(&self) -> &Links {
        &self.links
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// Fixed-capacity cache evicting the least recently used entry.
#[derive(Debug)]
pub struct LruCache<K, V> {
    entries: SlotArena<LruEntry<K, V>>,
    index: KeyIndex<K>,
    order: EntryList,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: LruMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "creating lru cache");
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Self {
            entries: SlotArena::with_capacity(prealloc),
            index: KeyIndex::with_capacity(prealloc),
            order: EntryList::new(),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMetrics::default(),
        }
    }

    /// Like [`new`](Self::new) but rejects negative capacities.
    pub fn try_new(capacity: i64) -> Result<Self, ConfigError> {
        checked_capacity(capacity).map(Self::new)
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains(key)
    }

    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        #[cfg(feature = "metrics")]
        {
            self.metrics.get_calls += 1;
        }

        let Some(id) = self.index.lookup(key) else {
            #[cfg(feature = "metrics")]
            {
                self.metrics.get_misses += 1;
            }
            return None;
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.get_hits += 1;
        }

        self.order.move_to_back(&mut self.entries, id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`, returning the previous value on update.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_calls += 1;
        }

        if self.capacity == 0 {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_dropped += 1;
            }
            tracing::trace!("dropping put into zero-capacity lru cache");
            return None;
        }

        if let Some(id) = self.index.lookup(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }
            let entry = self.entries.get_mut(id)?;
            let previous = std::mem::replace(&mut entry.value, value);
            self.order.move_to_back(&mut self.entries, id);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_new += 1;
        }

        if self.entries.len() >= self.capacity && self.evict().is_some() {
            #[cfg(feature = "metrics")]
            {
                self.metrics.evicted_entries += 1;
            }
            tracing::trace!(remaining = self.entries.len(), "evicted lru entry");
        }

        let id = self.entries.insert(LruEntry {
            links: Links::default(),
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.order.push_back(&mut self.entries, id);
        None
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.order.remove(&mut self.entries, id);
        self.entries.remove(id).map(|entry| entry.value)
    }

    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lru_calls += 1;
        }

        let popped = self.evict()?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lru_found += 1;
        }
        Some(popped)
    }

    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_lru_calls.incr();

        let entry = self.entries.get(self.order.front()?)?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_lru_found.incr();

        Some((&entry.key, &entry.value))
    }

    /// Marks `key` most recently used without reading it.
    pub fn touch<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        match self.index.lookup(key) {
            Some(id) => self.order.move_to_back(&mut self.entries, id),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.order.clear();
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        self.order.check(&self.entries)?;
        if self.order.len() != self.entries.len() || self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "list {} / index {} / arena {} disagree",
                self.order.len(),
                self.index.len(),
                self.entries.len()
            )));
        }
        for (id, entry) in self.entries.iter() {
            if self.index.lookup(&entry.key) != Some(id) {
                return Err(InvariantError::new(format!(
                    "slot {} is not indexed by its key",
                    id.index()
                )));
            }
        }
        Ok(())
    }

    fn evict(&mut self) -> Option<(K, V)> {
        let id: SlotId = self.order.pop_front(&mut self.entries)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value))
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LruMetricsSnapshot {
        LruMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_dropped: self.metrics.insert_dropped,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            peek_lru_calls: self.metrics.peek_lru_calls.get(),
            peek_lru_found: self.metrics.peek_lru_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> CoreCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        LruCache::get(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        LruCache::contains(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn capacity(&self) -> usize {
        LruCache::capacity(self)
    }

    fn clear(&mut self) {
        LruCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<V> {
        LruCache::remove(self, key)
    }
}

impl<K, V> LruCacheTrait<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lru(&mut self) -> Option<(K, V)> {
        LruCache::pop_lru(self)
    }

    fn peek_lru(&self) -> Option<(&K, &V)> {
        LruCache::peek_lru(self)
    }

    fn touch(&mut self, key: &K) -> bool {
        LruCache::touch(self, key)
    }
}
