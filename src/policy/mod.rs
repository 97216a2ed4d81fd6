//! Eviction policies.
//!
//! - [`lfu::LfuCache`]: least frequently used, least recent among ties.
//! - [`lru::LruCache`]: strict recency.

pub mod lfu;
pub mod lru;
