//! Ordered doubly linked list threaded through [`SlotArena`] entries.
//!
//! The list itself stores only its two ends and a count. Link fields live
//! inside the entries (anything implementing [`Linked`]), so many lists can
//! share one arena and an entry can move between lists by handle without
//! reallocating. Callers always hold the [`SlotId`] of the entry they want
//! to unlink; there is no search.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<T: Linked>)
//!   ┌────────┬──────────────────────────────────────────┐
//!   │ SlotId │ entry { .., links: { prev, next } }      │
//!   ├────────┼──────────────────────────────────────────┤
//!   │ id_4   │ { prev: None,       next: Some(id_1) }   │
//!   │ id_1   │ { prev: Some(id_4), next: Some(id_7) }   │
//!   │ id_7   │ { prev: Some(id_1), next: None }         │
//!   └────────┴──────────────────────────────────────────┘
//!
//!   head ─► [id_4] ◄──► [id_1] ◄──► [id_7] ◄── tail
//!           oldest                   newest
//! ```
//!
//! The `None` links at either end play the role of head/tail sentinels:
//! no placeholder entries are allocated and no handle ever refers to a
//! sentinel.
//!
//! ## Operations
//!
//! | Operation      | Time | Notes                                 |
//! |----------------|------|---------------------------------------|
//! | `push_back`    | O(1) | Entry must be detached                |
//! | `remove`       | O(1) | Uses the entry's own links            |
//! | `pop_front`    | O(1) | Oldest entry, `None` when empty       |
//! | `move_to_back` | O(1) | `remove` + `push_back`                |
//! | `iter`         | O(n) | Diagnostics and tests only            |

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Previous/next handles of an entry inside its current list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Links {
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

impl Links {
    /// Handle of the entry closer to the head, if any.
    pub fn prev(&self) -> Option<SlotId> {
        self.prev
    }

    /// Handle of the entry closer to the tail, if any.
    pub fn next(&self) -> Option<SlotId> {
        self.next
    }

    fn clear(&mut self) {
        self.prev = None;
        self.next = None;
    }
}

/// Entries that can be threaded onto an [`EntryList`].
pub trait Linked {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;
}

#[inline]
fn links_mut<T: Linked>(arena: &mut SlotArena<T>, id: SlotId) -> Option<&mut Links> {
    arena.get_mut(id).map(Linked::links_mut)
}

/// Head, tail and length of one ordered list of arena entries.
///
/// Order is least recently touched at the head, most recently touched at
/// the tail.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntryList {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl EntryList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of linked entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle at the head (least recently touched).
    #[inline]
    pub fn front(&self) -> Option<SlotId> {
        self.head
    }

    /// Handle at the tail (most recently touched).
    #[inline]
    pub fn back(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links `id` at the tail.
    ///
    /// `id` must be occupied in `arena` and must not belong to any list.
    pub fn push_back<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        debug_assert!(self.head != Some(id), "entry already linked at head");
        let old_tail = self.tail;
        match links_mut(arena, id) {
            Some(links) => {
                debug_assert_eq!(*links, Links::default(), "entry still linked into a list");
                links.prev = old_tail;
                links.next = None;
            },
            None => {
                debug_assert!(false, "push_back of vacant slot {:?}", id);
                return;
            },
        }
        match old_tail.and_then(|tail| links_mut(arena, tail)) {
            Some(tail_links) => tail_links.next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Unlinks `id`, which must currently belong to this list.
    ///
    /// Returns `false` if `id` is vacant in `arena`. The entry's links are
    /// cleared so it can be pushed onto another list.
    pub fn remove<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        let Some(links) = arena.get(id).map(|entry| *entry.links()) else {
            return false;
        };

        match links.prev {
            Some(prev) => {
                if let Some(prev_links) = links_mut(arena, prev) {
                    prev_links.next = links.next;
                }
            },
            None => {
                debug_assert_eq!(self.head, Some(id), "entry is not the head of this list");
                self.head = links.next;
            },
        }
        match links.next {
            Some(next) => {
                if let Some(next_links) = links_mut(arena, next) {
                    next_links.prev = links.prev;
                }
            },
            None => {
                debug_assert_eq!(self.tail, Some(id), "entry is not the tail of this list");
                self.tail = links.prev;
            },
        }

        if let Some(links) = links_mut(arena, id) {
            links.clear();
        }
        self.len -= 1;
        true
    }

    /// Unlinks and returns the head handle, or `None` if the list is empty.
    pub fn pop_front<T: Linked>(&mut self, arena: &mut SlotArena<T>) -> Option<SlotId> {
        let id = self.head?;
        self.remove(arena, id).then_some(id)
    }

    /// Moves `id` to the tail of this list.
    pub fn move_to_back<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) -> bool {
        if self.tail == Some(id) {
            return arena.contains(id);
        }
        if !self.remove(arena, id) {
            return false;
        }
        self.push_back(arena, id);
        true
    }

    /// Forgets all entries without touching the arena.
    ///
    /// Only valid when the arena is being cleared as well.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates `(SlotId, &T)` from head to tail.
    pub fn iter<'a, T: Linked>(&self, arena: &'a SlotArena<T>) -> EntryListIter<'a, T> {
        EntryListIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Walks the list and checks link symmetry, ends and length.
    pub fn check<T: Linked>(&self, arena: &SlotArena<T>) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() || self.len != 0 {
                return Err(InvariantError::new(format!(
                    "list ends disagree: head={:?} tail={:?} len={}",
                    self.head, self.tail, self.len
                )));
            }
            return Ok(());
        }

        let mut current = self.head;
        let mut last = None;
        let mut count = 0usize;
        while let Some(id) = current {
            let entry = arena
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("list links vacant slot {:?}", id)))?;
            let links = entry.links();
            if links.prev() != last {
                return Err(InvariantError::new(format!(
                    "slot {:?} has prev {:?}, expected {:?}",
                    id, links.prev(), last
                )));
            }
            count += 1;
            if count > self.len {
                return Err(InvariantError::new(format!(
                    "list longer than recorded len {}",
                    self.len
                )));
            }
            last = Some(id);
            current = links.next();
        }

        if self.tail != last {
            return Err(InvariantError::new(format!(
                "tail is {:?}, walk ended at {:?}",
                self.tail, last
            )));
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "walked {} entries, recorded len {}",
                count, self.len
            )));
        }
        Ok(())
    }
}

/// Iterator over `(SlotId, &T)` from head to tail.
pub struct EntryListIter<'a, T> {
    arena: &'a SlotArena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T: Linked> Iterator for EntryListIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let entry = self.arena.get(id)?;
        self.current = entry.links().next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Debug)]
    struct Node {
        value: u16,
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
        /// Property: the list behaves like a deque with keyed removal
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_deque(
            ops in prop::collection::vec((0u8..4, any::<u16>()), 0..200)
        ) {
            let mut arena = SlotArena::new();
            let mut list = EntryList::new();
            let mut model: VecDeque<(SlotId, u16)> = VecDeque::new();

            for (op, value) in ops {
                match op {
                    0 => {
                        let id = arena.insert(Node { value, links: Links::default() });
                        list.push_back(&mut arena, id);
                        model.push_back((id, value));
                    },
                    1 => {
                        let popped = list.pop_front(&mut arena);
                        let expected = model.pop_front().map(|(id, _)| id);
                        prop_assert_eq!(popped, expected);
                        if let Some(id) = popped {
                            arena.remove(id);
                        }
                    },
                    2 if !model.is_empty() => {
                        let pos = value as usize % model.len();
                        let (id, _) = model.remove(pos).unwrap();
                        prop_assert!(list.remove(&mut arena, id));
                        arena.remove(id);
                    },
                    3 if !model.is_empty() => {
                        let pos = value as usize % model.len();
                        let entry = model.remove(pos).unwrap();
                        prop_assert!(list.move_to_back(&mut arena, entry.0));
                        model.push_back(entry);
                    },
                    _ => {},
                }

                list.check(&arena).unwrap();
                let actual: Vec<u16> = list.iter(&arena).map(|(_, n)| n.value).collect();
                let expected: Vec<u16> = model.iter().map(|(_, v)| *v).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
