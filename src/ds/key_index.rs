//! Key → [`SlotId`] index.
//!
//! A thin wrapper over `FxHashMap` that gives the caches the three
//! operations they need (`lookup`, `insert`, `remove`) with O(1) expected
//! cost and no ordering guarantee. The index never owns entries; the arena
//! does, and the index only records where each key's entry lives.

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::SlotId;

#[derive(Debug)]
pub struct KeyIndex<K> {
    map: FxHashMap<K, SlotId>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the handle recorded for `key`.
    #[inline]
    pub fn lookup<Q>(&self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.get(key).copied()
    }

    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Records `key → id`, returning the handle it replaced.
    #[inline]
    pub fn insert(&mut self, key: K, id: SlotId) -> Option<SlotId> {
        self.map.insert(key, id)
    }

    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<SlotId>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Iterates all `(key, handle)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, SlotId)> {
        self.map.iter().map(|(key, id)| (key, *id))
    }
}

impl<K> Default for KeyIndex<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
