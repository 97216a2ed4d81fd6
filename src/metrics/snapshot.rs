/// Point-in-time copy of an [`LfuCache`](crate::policy::lfu::LfuCache)'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LfuMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_dropped: u64,

    pub evicted_entries: u64,

    pub remove_calls: u64,
    pub remove_found: u64,
    pub pop_lfu_calls: u64,
    pub pop_lfu_found: u64,
    pub peek_lfu_calls: u64,
    pub peek_lfu_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

impl LfuMetricsSnapshot {
    /// Fraction of `get` calls that hit, or `0.0` before any call.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / self.get_calls as f64
        }
    }
}

/// Point-in-time copy of an [`LruCache`](crate::policy::lru::LruCache)'s counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LruMetricsSnapshot {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,

    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub insert_dropped: u64,

    pub evicted_entries: u64,

    pub pop_lru_calls: u64,
    pub pop_lru_found: u64,
    pub peek_lru_calls: u64,
    pub peek_lru_found: u64,

    pub cache_len: usize,
    pub capacity: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_rate_handles_no_calls() {
        let snapshot = LfuMetricsSnapshot::default();
        assert_eq!(snapshot.hit_rate(), 0.0);
    }

    #[test]
    fn hit_rate_is_hits_over_calls() {
        let snapshot = LfuMetricsSnapshot {
            get_calls: 4,
            get_hits: 3,
            ..Default::default()
        };
        assert!((snapshot.hit_rate() - 0.75).abs() < f64::EPSILON);
    }
}
