pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{EntryList, FrequencyBuckets, KeyIndex, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::{LfuMetricsSnapshot, LruMetricsSnapshot};
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
pub use crate::traits::{CoreCache, LfuCacheTrait, LruCacheTrait, MutableCache};
