//! # LFU (Least Frequently Used) Cache
//!
//! Fixed-capacity cache that evicts the entry with the fewest recorded
//! accesses. Ties between entries of equal frequency go to the one touched
//! least recently, so a burst of one-off keys never displaces an entry that
//! has proven itself.
//!
//! ## Architecture
//!
//! ```text
//!   ┌───────────────────────────────────────────────────────────────────────┐
//!   │                           LfuCache<K, V>                              │
//!   │                                                                       │
//!   │   KeyIndex<K>            SlotArena<CacheEntry<K, V>>                  │
//!   │   ┌────────┬────────┐    ┌──────┬─────────────────────────────────┐   │
//!   │   │ key_a  │ slot 0 │──► │  0   │ key_a  value  freq=3  prev/next │   │
//!   │   │ key_b  │ slot 1 │──► │  1   │ key_b  value  freq=1  prev/next │   │
//!   │   │ key_c  │ slot 2 │──► │  2   │ key_c  value  freq=1  prev/next │   │
//!   │   └────────┴────────┘    └──────┴─────────────────────────────────┘   │
//!   │                                                                       │
//!   │   FrequencyBuckets (ascending chain)                                  │
//!   │                                                                       │
//!   │     min_freq ──► freq 1: [key_b] ◄──► [key_c]                         │
//!   │                    │      oldest        newest                        │
//!   │                    ▼                                                  │
//!   │                  freq 3: [key_a]                                      │
//!   │                                                                       │
//!   │   capacity: usize                                                     │
//!   └───────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Operations
//!
//! ```text
//!   get(key)          lookup ─► touch ─► value
//!
//!   touch(entry f)    push into bucket f+1 (create if needed)
//!                     unlink from bucket f, drop bucket f if empty
//!                     if bucket f was min_freq and emptied: min_freq += 1
//!
//!   put(new key)      if full: pop_front(bucket[min_freq]) ─► evict
//!                     insert with freq 1 ─► min_freq = 1
//!
//!   put(known key)    replace value ─► touch
//! ```
//!
//! | Operation           | Time | Notes                                  |
//! |---------------------|------|----------------------------------------|
//! | `get` / `peek`      | O(1) | `peek` does not touch                  |
//! | `put`               | O(1) | at most one eviction                   |
//! | `remove`            | O(1) | next minimum read from bucket chain    |
//! | `pop_lfu`           | O(1) |                                        |
//! | `reset_frequency`   | O(1) |                                        |
//!
//! ## Zero capacity
//!
//! A cache built with capacity 0 accepts every call and stores nothing:
//! `put` is dropped and `get` always misses.
//!
//! ## Frequency saturation
//!
//! Frequencies are `u64`. An entry already at `u64::MAX` keeps its frequency
//! when touched and is moved to the most recent end of its bucket.
//!
//! ## Example
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put("a", 1);
//! cache.put("b", 2);
//! cache.get("a");
//! cache.put("c", 3);
//!
//! assert!(cache.contains("a"));
//! assert!(!cache.contains("b"));
//! assert_eq!(cache.frequency("a"), Some(2));
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use crate::ds::{FrequencyBuckets, KeyIndex, Linked, Links, SlotArena, SlotId};
use crate::error::{ConfigError, InvariantError, checked_capacity};
#[cfg(feature = "metrics")]
use crate::metrics::{LfuMetrics, LfuMetricsSnapshot};
use crate::traits::{CoreCache, LfuCacheTrait, MutableCache};

/// Upper bound on slots reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 4096;

#[derive(Debug)]
struct CacheEntry<K, V> {
    links: Links,
    freq: u64,
    key: K,
    value: V,
}

impl<K, V> Linked for CacheEntry<K, V> {
    #[inline]
    fn links(&self) -> &Links {
        &self.links
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

/// Fixed-capacity LFU cache with least-recently-used tie-breaking.
///
/// See the [module documentation](self) for the layout and complexity.
#[derive(Debug)]
pub struct LfuCache<K, V> {
    entries: SlotArena<CacheEntry<K, V>>,
    index: KeyIndex<K>,
    buckets: FrequencyBuckets,
    capacity: usize,
    /// Lowest populated frequency; 0 while the cache is empty.
    min_freq: u64,
    #[cfg(feature = "metrics")]
    metrics: LfuMetrics,
}

impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// Capacity 0 produces a cache that never stores anything.
    pub fn new(capacity: usize) -> Self {
        tracing::debug!(capacity, "creating lfu cache");
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Self {
            entries: SlotArena::with_capacity(prealloc),
            index: KeyIndex::with_capacity(prealloc),
            buckets: FrequencyBuckets::new(),
            capacity,
            min_freq: 0,
            #[cfg(feature = "metrics")]
            metrics: LfuMetrics::default(),
        }
    }

    /// Creates a cache from a signed capacity, rejecting negative values.
    ///
    /// ```
    /// use lfukit::policy::lfu::LfuCache;
    ///
    /// assert!(LfuCache::<u32, u32>::try_new(8).is_ok());
    /// assert!(LfuCache::<u32, u32>::try_new(-1).is_err());
    /// ```
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

    /// Returns `true` if `key` is cached. Does not touch the entry.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains(key)
    }

    /// Returns the value for `key` and records one access.
    ///
    /// A miss leaves the cache untouched and returns `None`.
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

        self.touch(id);
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Returns the value for `key` without recording an access.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Inserts or updates `key`.
    ///
    /// Updating replaces the value, counts as an access and returns the old
    /// value. Inserting a new key into a full cache first evicts the least
    /// frequently used entry; the new key starts at frequency 1.
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
            tracing::trace!("dropping put into zero-capacity lfu cache");
            return None;
        }

        if let Some(id) = self.index.lookup(&key) {
            #[cfg(feature = "metrics")]
            {
                self.metrics.insert_updates += 1;
            }
            let entry = self.entries.get_mut(id)?;
            let previous = std::mem::replace(&mut entry.value, value);
            self.touch(id);
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        {
            self.metrics.insert_new += 1;
        }

        if self.entries.len() >= self.capacity {
            let victim_freq = self.min_freq;
            if self.evict().is_some() {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.evicted_entries += 1;
                }
                tracing::trace!(
                    freq = victim_freq,
                    remaining = self.entries.len(),
                    "evicted lfu entry"
                );
            }
        }

        let id = self.entries.insert(CacheEntry {
            links: Links::default(),
            freq: 1,
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);
        self.buckets.get_or_create(1).push_back(&mut self.entries, id);
        self.min_freq = 1;

        None
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        #[cfg(feature = "metrics")]
        {
            self.metrics.remove_calls += 1;
        }

        let id = self.index.remove(key)?;
        let entry = self.unlink(id)?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.remove_found += 1;
        }

        Some(entry.value)
    }

    /// Removes and returns the entry [`put`](Self::put) would evict next.
    pub fn pop_lfu(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lfu_calls += 1;
        }

        let (key, value) = self.evict()?;

        #[cfg(feature = "metrics")]
        {
            self.metrics.pop_lfu_found += 1;
        }

        Some((key, value))
    }

    /// Returns the next eviction candidate without touching it.
    pub fn peek_lfu(&self) -> Option<(&K, &V)> {
        #[cfg(feature = "metrics")]
        self.metrics.peek_lfu_calls.incr();

        let id = self.buckets.get(self.min_freq)?.front()?;
        let entry = self.entries.get(id)?;

        #[cfg(feature = "metrics")]
        self.metrics.peek_lfu_found.incr();

        Some((&entry.key, &entry.value))
    }

    /// Access frequency of `key`, or `None` if it is not cached.
    pub fn frequency<Q>(&self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Lowest frequency among cached entries, or `None` when empty.
    pub fn min_frequency(&self) -> Option<u64> {
        if self.is_empty() {
            None
        } else {
            Some(self.min_freq)
        }
    }

    /// Records an access to `key` without reading it; returns the new frequency.
    pub fn increment_frequency<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        self.touch(id)
    }

    /// Drops `key` back to frequency 1 as its most recent member.
    ///
    /// Returns the frequency it had before the reset.
    pub fn reset_frequency<Q>(&mut self, key: &Q) -> Option<u64>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let id = self.index.lookup(key)?;
        let freq = self.entries.get(id)?.freq;

        let list = self.buckets.get_mut(freq)?;
        if freq == 1 {
            list.move_to_back(&mut self.entries, id);
            return Some(freq);
        }

        list.remove(&mut self.entries, id);
        let vacated = list.is_empty();
        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = 1;
        }
        self.buckets.get_or_create(1).push_back(&mut self.entries, id);
        if vacated {
            self.buckets.prune_if_empty(freq);
        }
        self.min_freq = 1;

        Some(freq)
    }

    /// Removes every entry. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.buckets.clear();
        self.min_freq = 0;
    }

    /// Walks every structure and verifies they describe the same entries.
    ///
    /// Intended for tests and fuzzing; runs in O(n).
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.entries.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.entries.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but arena holds {} entries",
                self.index.len(),
                self.entries.len()
            )));
        }

        self.buckets.check(&self.entries)?;

        if self.entries.is_empty() {
            if !self.buckets.is_empty() {
                return Err(InvariantError::new("empty cache still has buckets"));
            }
            return Ok(());
        }

        if self.buckets.lowest() != Some(self.min_freq) {
            return Err(InvariantError::new(format!(
                "min_freq {} but lowest bucket is {:?}",
                self.min_freq,
                self.buckets.lowest()
            )));
        }

        let mut linked = 0usize;
        for (freq, list) in self.buckets.iter() {
            for (id, entry) in list.iter(&self.entries) {
                if entry.freq != freq {
                    return Err(InvariantError::new(format!(
                        "entry with freq {} linked into bucket {}",
                        entry.freq, freq
                    )));
                }
                if self.index.lookup(&entry.key) != Some(id) {
                    return Err(InvariantError::new(format!(
                        "bucket {} holds slot {} that the index does not map to",
                        freq,
                        id.index()
                    )));
                }
                linked += 1;
            }
        }
        if linked != self.entries.len() {
            return Err(InvariantError::new(format!(
                "{} entries linked into buckets, {} stored",
                linked,
                self.entries.len()
            )));
        }

        for (key, id) in self.index.iter() {
            match self.entries.get(id) {
                Some(entry) if entry.key == *key => {},
                _ => {
                    return Err(InvariantError::new(format!(
                        "index maps a key to slot {} holding a different entry",
                        id.index()
                    )));
                },
            }
        }

        Ok(())
    }

    /// Moves `id` from its bucket to the next one up.
    ///
    /// The target bucket is created and filled before the source bucket is
    /// pruned so the chain always has a neighbor to link against.
    fn touch(&mut self, id: SlotId) -> Option<u64> {
        let freq = self.entries.get(id)?.freq;

        if freq == u64::MAX {
            self.buckets
                .get_mut(freq)?
                .move_to_back(&mut self.entries, id);
            return Some(freq);
        }

        let next = freq + 1;
        let list = self.buckets.get_mut(freq)?;
        list.remove(&mut self.entries, id);
        let vacated = list.is_empty();
        if vacated && freq == self.min_freq {
            self.min_freq = next;
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next;
        }
        self.buckets
            .get_or_create(next)
            .push_back(&mut self.entries, id);
        if vacated {
            self.buckets.prune_if_empty(freq);
        }

        debug_assert_eq!(self.buckets.lowest(), Some(self.min_freq));
        Some(next)
    }

    /// Evicts the least recently touched entry of the lowest bucket.
    fn evict(&mut self) -> Option<(K, V)> {
        let freq = self.min_freq;
        let id = self.buckets.get_mut(freq)?.pop_front(&mut self.entries)?;
        self.buckets.prune_if_empty(freq);

        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        self.min_freq = self.buckets.lowest().unwrap_or(0);

        Some((entry.key, entry.value))
    }

    /// Unlinks `id` from its bucket and frees its slot. The caller owns the
    /// index update.
    fn unlink(&mut self, id: SlotId) -> Option<CacheEntry<K, V>> {
        let freq = self.entries.get(id)?.freq;
        if let Some(list) = self.buckets.get_mut(freq) {
            list.remove(&mut self.entries, id);
        }
        if self.buckets.prune_if_empty(freq) && freq == self.min_freq {
            self.min_freq = self.buckets.lowest().unwrap_or(0);
        }
        self.entries.remove(id)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> LfuMetricsSnapshot {
        LfuMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_dropped: self.metrics.insert_dropped,
            evicted_entries: self.metrics.evicted_entries,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            pop_lfu_calls: self.metrics.pop_lfu_calls,
            pop_lfu_found: self.metrics.pop_lfu_found,
            peek_lfu_calls: self.metrics.peek_lfu_calls.get(),
            peek_lfu_found: self.metrics.peek_lfu_found.get(),
            cache_len: self.len(),
            capacity: self.capacity,
        }
    }
}

impl<K, V> CoreCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        LfuCache::get(self, key)
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        LfuCache::contains(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        LfuCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        LfuCache::capacity(self)
    }

    fn clear(&mut self) {
        LfuCache::clear(self);
    }
}

impl<K, V> MutableCache<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    #[inline]
    fn remove(&mut self, key: &K) -> Option<V> {
        LfuCache::remove(self, key)
    }
}

impl<K, V> LfuCacheTrait<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn pop_lfu(&mut self) -> Option<(K, V)> {
        LfuCache::pop_lfu(self)
    }

    fn peek_lfu(&self) -> Option<(&K, &V)> {
        LfuCache::peek_lfu(self)
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        LfuCache::frequency(self, key)
    }

    fn reset_frequency(&mut self, key: &K) -> Option<u64> {
        LfuCache::reset_frequency(self, key)
    }

    fn increment_frequency(&mut self, key: &K) -> Option<u64> {
        LfuCache::increment_frequency(self, key)
    }
}
