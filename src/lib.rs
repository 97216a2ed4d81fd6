//! lfukit: a fixed-capacity LFU cache with LRU tie-breaking.
//!
//! The cache keeps three structures in lockstep: a key index, one ordered
//! list per populated access frequency, and an incrementally maintained
//! minimum-frequency pointer. Lookups and insertions are O(1) regardless
//! of capacity.
//!
//! ```
//! use lfukit::policy::lfu::LfuCache;
//!
//! let mut cache = LfuCache::new(2);
//! cache.put(1, 10);
//! cache.put(2, 20);
//! assert_eq!(cache.get(&1), Some(&10));
//!
//! // Key 2 has the lowest frequency and is evicted.
//! cache.put(3, 30);
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(&30));
//! ```
//!
//! A strict-recency [`LruCache`](policy::lru::LruCache) built on the same
//! list primitive is also provided, and [`builder::CacheBuilder`] picks
//! between the two at runtime.

pub mod builder;
pub mod ds;
pub mod error;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod policy;
pub mod prelude;
pub mod traits;
