//! Building blocks shared by the cache policies.
//!
//! - [`SlotArena`]: owns entries, hands out [`SlotId`] handles.
//! - [`EntryList`]: ordered doubly linked list threaded through arena entries.
//! - [`FrequencyBuckets`]: frequency → [`EntryList`], chained in ascending order.
//! - [`KeyIndex`]: key → [`SlotId`].

pub mod entry_list;
pub mod frequency_buckets;
pub mod key_index;
pub mod slot_arena;

pub use entry_list::{EntryList, Linked, Links};
pub use frequency_buckets::FrequencyBuckets;
pub use key_index::KeyIndex;
pub use slot_arena::{SlotArena, SlotId};
