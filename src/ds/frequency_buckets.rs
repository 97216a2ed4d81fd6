//! Frequency buckets: one ordered entry list per populated access frequency.
//!
//! Maps a frequency count to the [`EntryList`] of entries currently at that
//! frequency. Buckets are created on first use and pruned as soon as they
//! empty, so the map only ever holds populated frequencies and
//! `contains(f)` is an exact O(1) "is anything at frequency `f`" test.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: FxHashMap<u64, Bucket>   (frequency → list + chain links)
//!
//!   lowest = 1
//!      │
//!      ▼
//!   freq=1: head ──► [id_2] ◄──► [id_5] ◄── tail
//!                    oldest       newest
//!      │ next
//!      ▼
//!   freq=3: head ──► [id_0] ◄── tail
//!      │ next
//!      ▼
//!   freq=4: head ──► [id_1] ◄──► [id_3] ◄── tail
//! ```
//!
//! Buckets are also chained to each other in ascending frequency order.
//! Caches keep their own minimum-frequency pointer, but after an arbitrary
//! removal empties the lowest bucket the chain gives the next populated
//! frequency without a scan.
//!
//! ## Bucket Creation
//!
//! A new bucket for `f` links directly after `f - 1` when that bucket is
//! present, or in front of the chain when `f` is below the current lowest.
//! Those are the only two cases an LFU cache produces (touch creates
//! `f + 1` while `f` still exists, insert creates `1`). Anything else falls
//! back to walking the chain.

use rustc_hash::FxHashMap;

use crate::ds::entry_list::{EntryList, Linked};
use crate::ds::slot_arena::SlotArena;
use crate::error::InvariantError;

/// Most entries cluster at low frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

#[derive(Debug, Default)]
struct Bucket {
    list: EntryList,
    prev: Option<u64>,
    next: Option<u64>,
}

/// Sparse frequency → [`EntryList`] map with ascending chain links.
#[derive(Debug)]
pub struct FrequencyBuckets {
    buckets: FxHashMap<u64, Bucket>,
    lowest: Option<u64>,
}

impl FrequencyBuckets {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUCKET_PREALLOC)
    }

    /// Creates an empty map with room for `bucket_hint` distinct frequencies.
    pub fn with_capacity(bucket_hint: usize) -> Self {
        Self {
            buckets: FxHashMap::with_capacity_and_hasher(bucket_hint, Default::default()),
            lowest: None,
        }
    }

    /// Number of populated frequencies.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Returns `true` if a bucket exists for `freq`.
    #[inline]
    pub fn contains(&self, freq: u64) -> bool {
        self.buckets.contains_key(&freq)
    }

    /// Smallest frequency with a bucket.
    #[inline]
    pub fn lowest(&self) -> Option<u64> {
        self.lowest
    }

    #[inline]
    pub fn get(&self, freq: u64) -> Option<&EntryList> {
        self.buckets.get(&freq).map(|bucket| &bucket.list)
    }

    #[inline]
    pub fn get_mut(&mut self, freq: u64) -> Option<&mut EntryList> {
        self.buckets.get_mut(&freq).map(|bucket| &mut bucket.list)
    }

    /// Returns the list for `freq`, creating an empty bucket on first access.
    pub fn get_or_create(&mut self, freq: u64) -> &mut EntryList {
        if !self.buckets.contains_key(&freq) {
            self.insert_bucket(freq);
        }
        &mut self.buckets.entry(freq).or_default().list
    }

    /// Drops the bucket for `freq` if its list is empty.
    ///
    /// Returns `true` if a bucket was removed.
    pub fn prune_if_empty(&mut self, freq: u64) -> bool {
        let (prev, next) = match self.buckets.get(&freq) {
            Some(bucket) if bucket.list.is_empty() => (bucket.prev, bucket.next),
            _ => return false,
        };
        self.buckets.remove(&freq);

        match prev.and_then(|prev| self.buckets.get_mut(&prev)) {
            Some(prev_bucket) => prev_bucket.next = next,
            None => self.lowest = next,
        }
        if let Some(next_bucket) = next.and_then(|next| self.buckets.get_mut(&next)) {
            next_bucket.prev = prev;
        }
        true
    }

    /// Drops every bucket. Entry links are left to the caller's arena.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.lowest = None;
    }

    /// Iterates `(freq, list)` in ascending frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &EntryList)> {
        let mut cursor = self.lowest;
        std::iter::from_fn(move || {
            let freq = cursor?;
            let bucket = self.buckets.get(&freq)?;
            cursor = bucket.next;
            Some((freq, &bucket.list))
        })
    }

    /// Populated frequencies in ascending order.
    pub fn frequencies(&self) -> impl Iterator<Item = u64> + '_ {
        self.iter().map(|(freq, _)| freq)
    }

    /// Checks the chain, pruning and every list's links.
    pub fn check<T: Linked>(&self, arena: &SlotArena<T>) -> Result<(), InvariantError> {
        let mut reached = 0usize;
        let mut last: Option<u64> = None;
        let mut cursor = self.lowest;

        while let Some(freq) = cursor {
            let bucket = self.buckets.get(&freq).ok_or_else(|| {
                InvariantError::new(format!("chain reaches missing bucket {}", freq))
            })?;
            if bucket.prev != last {
                return Err(InvariantError::new(format!(
                    "bucket {} has prev {:?}, expected {:?}",
                    freq, bucket.prev, last
                )));
            }
            if last.is_some_and(|last| last >= freq) {
                return Err(InvariantError::new(format!(
                    "bucket chain not ascending at {}",
                    freq
                )));
            }
            if bucket.list.is_empty() {
                return Err(InvariantError::new(format!("bucket {} is empty", freq)));
            }
            bucket.list.check(arena)?;

            reached += 1;
            if reached > self.buckets.len() {
                return Err(InvariantError::new("bucket chain has a cycle"));
            }
            last = Some(freq);
            cursor = bucket.next;
        }

        if reached != self.buckets.len() {
            return Err(InvariantError::new(format!(
                "{} buckets present, {} reachable from lowest",
                self.buckets.len(),
                reached
            )));
        }
        Ok(())
    }

    fn insert_bucket(&mut self, freq: u64) {
        let (prev, next) = self.neighbors_for(freq);
        self.buckets.insert(
            freq,
            Bucket {
                list: EntryList::new(),
                prev,
                next,
            },
        );

        match prev.and_then(|prev| self.buckets.get_mut(&prev)) {
            Some(prev_bucket) => prev_bucket.next = Some(freq),
            None => self.lowest = Some(freq),
        }
        if let Some(next_bucket) = next.and_then(|next| self.buckets.get_mut(&next)) {
            next_bucket.prev = Some(freq);
        }
    }

    fn neighbors_for(&self, freq: u64) -> (Option<u64>, Option<u64>) {
        if let Some(below) = freq.checked_sub(1) {
            if let Some(bucket) = self.buckets.get(&below) {
                return (Some(below), bucket.next);
            }
        }
        match self.lowest {
            None => (None, None),
            Some(lowest) if freq < lowest => (None, Some(lowest)),
            Some(_) => self.walk_neighbors(freq),
        }
    }

    fn walk_neighbors(&self, freq: u64) -> (Option<u64>, Option<u64>) {
        let mut prev = None;
        let mut cursor = self.lowest;
        while let Some(current) = cursor {
            if current > freq {
                break;
            }
            prev = Some(current);
            cursor = self.buckets.get(&current).and_then(|bucket| bucket.next);
        }
        (prev, cursor)
    }
}

impl Default for FrequencyBuckets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ds::entry_list::Links;
    use crate::ds::slot_arena::SlotId;

    #[derive(Debug, Default)]
    struct Node {
        links: Links,
    }

    impl Linked for Node {
        fn links(&self) -> &Links {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }
    }

    fn push(buckets: &mut FrequencyBuckets, arena: &mut SlotArena<Node>, freq: u64) -> SlotId {
        let id = arena.insert(Node::default());
        buckets.get_or_create(freq).push_back(arena, id);
        id
    }

    #[test]
    fn get_or_create_is_lazy() {
        let mut buckets = FrequencyBuckets::new();
        assert!(buckets.is_empty());
        assert!(!buckets.contains(1));
        assert!(buckets.get_or_create(1).is_empty());
        assert!(buckets.contains(1));
        assert_eq!(buckets.lowest(), Some(1));
    }

    #[test]
    fn prune_only_removes_empty_buckets() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        let id = push(&mut buckets, &mut arena, 1);

        assert!(!buckets.prune_if_empty(1));
        assert!(buckets.contains(1));

        buckets.get_mut(1).unwrap().remove(&mut arena, id);
        assert!(buckets.prune_if_empty(1));
        assert!(!buckets.contains(1));
        assert_eq!(buckets.lowest(), None);
        assert!(!buckets.prune_if_empty(1));
    }

    #[test]
    fn successor_bucket_links_after_current() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        push(&mut buckets, &mut arena, 1);
        push(&mut buckets, &mut arena, 2);
        push(&mut buckets, &mut arena, 5);
        push(&mut buckets, &mut arena, 3);

        let freqs: Vec<_> = buckets.frequencies().collect();
        assert_eq!(freqs, vec![1, 2, 3, 5]);
        buckets.check(&arena).unwrap();
    }

    #[test]
    fn frequency_one_goes_in_front() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        push(&mut buckets, &mut arena, 4);
        push(&mut buckets, &mut arena, 1);

        assert_eq!(buckets.lowest(), Some(1));
        assert_eq!(buckets.frequencies().collect::<Vec<_>>(), vec![1, 4]);
        buckets.check(&arena).unwrap();
    }

    #[test]
    fn out_of_order_creation_walks_the_chain() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        push(&mut buckets, &mut arena, 2);
        push(&mut buckets, &mut arena, 10);
        push(&mut buckets, &mut arena, 6);
        push(&mut buckets, &mut arena, 12);

        assert_eq!(buckets.frequencies().collect::<Vec<_>>(), vec![2, 6, 10, 12]);
        buckets.check(&arena).unwrap();
    }

    #[test]
    fn pruning_lowest_advances_to_next_populated() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        let low = push(&mut buckets, &mut arena, 1);
        push(&mut buckets, &mut arena, 2);
        push(&mut buckets, &mut arena, 7);

        buckets.get_mut(1).unwrap().remove(&mut arena, low);
        buckets.prune_if_empty(1);
        assert_eq!(buckets.lowest(), Some(2));
        buckets.check(&arena).unwrap();
    }

    #[test]
    fn pruning_middle_relinks_neighbors() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        push(&mut buckets, &mut arena, 1);
        let mid = push(&mut buckets, &mut arena, 2);
        push(&mut buckets, &mut arena, 3);

        buckets.get_mut(2).unwrap().remove(&mut arena, mid);
        buckets.prune_if_empty(2);
        assert_eq!(buckets.frequencies().collect::<Vec<_>>(), vec![1, 3]);
        buckets.check(&arena).unwrap();
    }

    #[test]
    fn check_rejects_empty_bucket() {
        let arena: SlotArena<Node> = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        buckets.get_or_create(3);
        let err = buckets.check(&arena).unwrap_err();
        assert!(err.message().contains("empty"));
    }

    #[test]
    fn clear_drops_everything() {
        let mut arena = SlotArena::new();
        let mut buckets = FrequencyBuckets::new();
        push(&mut buckets, &mut arena, 1);
        push(&mut buckets, &mut arena, 2);
        buckets.clear();
        assert!(buckets.is_empty());
        assert_eq!(buckets.lowest(), None);
        assert_eq!(buckets.iter().count(), 0);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::ds::entry_list::Links;
    use crate::ds::slot_arena::SlotId;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Default)]
    struct Node {
        links: Links,
    }

    impl Linked for Node {
        fn links(&self) -> &Links {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }
    }

    proptest! {
        /// Property: chain order and lowest() track a sorted reference model
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_chain_matches_sorted_model(
            ops in prop::collection::vec((any::<bool>(), 1u64..16), 0..150)
        ) {
            let mut arena = SlotArena::new();
            let mut buckets = FrequencyBuckets::new();
            let mut model: BTreeMap<u64, Vec<SlotId>> = BTreeMap::new();

            for (add, freq) in ops {
                if add {
                    let id = arena.insert(Node::default());
                    buckets.get_or_create(freq).push_back(&mut arena, id);
                    model.entry(freq).or_default().push(id);
                } else if let Some(ids) = model.get_mut(&freq) {
                    let id = ids.remove(0);
                    prop_assert!(buckets.get_mut(freq).unwrap().remove(&mut arena, id));
                    arena.remove(id);
                    if ids.is_empty() {
                        model.remove(&freq);
                    }
                    buckets.prune_if_empty(freq);
                }

                buckets.check(&arena).unwrap();
                prop_assert_eq!(buckets.lowest(), model.keys().next().copied());
                let freqs: Vec<u64> = buckets.frequencies().collect();
                let expected: Vec<u64> = model.keys().copied().collect();
                prop_assert_eq!(freqs, expected);
            }
        }
    }
}
