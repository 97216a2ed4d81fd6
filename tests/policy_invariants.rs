// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavior every policy must share when driven through the builder and the
// common traits.

use lfukit::builder::{CacheBuilder, CachePolicy};
use lfukit::policy::lfu::LfuCache;
use lfukit::policy::lru::LruCache;
use lfukit::traits::{CoreCache, MutableCache};

const POLICIES: [CachePolicy; 2] = [CachePolicy::Lfu, CachePolicy::Lru];

// ==============================================
// Capacity-0 Behavior
// ==============================================

mod zero_capacity {
    use super::*;

    #[test]
    fn capacity_zero_is_honored() {
        for policy in POLICIES {
            let cache = CacheBuilder::new(0).build::<u32, u32>(policy);
            assert_eq!(cache.capacity(), 0, "{policy:?} coerced capacity 0");
        }
    }

    #[test]
    fn capacity_zero_rejects_inserts() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(0).build::<u32, u32>(policy);
            assert_eq!(cache.insert(1, 1), None);
            assert_eq!(cache.len(), 0, "{policy:?} stored into capacity 0");
            assert_eq!(cache.get(&1), None);
        }
    }
}

// ==============================================
// Negative Capacity
// ==============================================

mod negative_capacity {
    use super::*;

    #[test]
    fn rejected_by_every_constructor() {
        for policy in POLICIES {
            assert!(CacheBuilder::new(-1).try_build::<u32, u32>(policy).is_err());
        }
        assert!(LfuCache::<u32, u32>::try_new(-1).is_err());
        assert!(LruCache::<u32, u32>::try_new(-1).is_err());
    }
}

// ==============================================
// Capacity Bound and Read-After-Write
// ==============================================

mod generic_contract {
    use super::*;

    fn exercise<C: MutableCache<u64, u64>>(cache: &mut C) {
        let capacity = cache.capacity() as u64;
        for key in 0..capacity * 3 {
            cache.insert(key, key * 2);
            assert!(cache.len() <= cache.capacity());
            assert_eq!(cache.get(&key), Some(&(key * 2)));
        }

        let last = capacity * 3 - 1;
        assert_eq!(cache.remove(&last), Some(last * 2));
        assert!(!cache.contains(&last));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity() as u64, capacity);
    }

    #[test]
    fn lfu_honors_contract() {
        let mut cache = LfuCache::new(5);
        exercise(&mut cache);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn lru_honors_contract() {
        let mut cache = LruCache::new(5);
        exercise(&mut cache);
        assert!(cache.check_invariants().is_ok());
    }

    #[test]
    fn builder_caches_honor_core_contract() {
        for policy in POLICIES {
            let mut cache = CacheBuilder::new(4).build::<u64, u64>(policy);
            for key in 0..32 {
                CoreCache::insert(&mut cache, key, key);
                assert!(CoreCache::len(&cache) <= 4);
                assert_eq!(CoreCache::get(&mut cache, &key), Some(&key));
            }
        }
    }
}
