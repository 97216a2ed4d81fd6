// ==============================================
// END-TO-END LFU SCENARIOS (integration)
// ==============================================

use lfukit::policy::lfu::LfuCache;

#[test]
fn capacity_two_walkthrough() {
    let mut cache = LfuCache::new(2);

    cache.put(1, 10);
    cache.put(2, 20);
    assert_eq!(cache.get(&1), Some(&10));
    assert_eq!(cache.get(&1), Some(&10));

    // 1 has frequency 3, 2 has frequency 1.
    cache.put(3, 30);
    assert_eq!(cache.get(&2), None);
    assert_eq!(cache.get(&3), Some(&30));
    assert_eq!(cache.get(&1), Some(&10));

    // 1 at frequency 4, 3 at frequency 2.
    cache.put(4, 40);
    assert_eq!(cache.get(&3), None);
    assert_eq!(cache.get(&4), Some(&40));
    assert_eq!(cache.get(&1), Some(&10));

    assert_eq!(cache.frequency(&1), Some(5));
    assert_eq!(cache.frequency(&4), Some(2));
    assert_eq!(cache.min_frequency(), Some(2));
    assert!(cache.check_invariants().is_ok());
}

#[test]
fn zero_capacity_cache_is_inert() {
    let mut cache: LfuCache<&str, u32> = LfuCache::new(0);
    for i in 0..10 {
        assert_eq!(cache.put("key", i), None);
        assert_eq!(cache.get("key"), None);
    }
    assert_eq!(cache.len(), 0);
    assert_eq!(cache.capacity(), 0);
    assert_eq!(cache.peek_lfu(), None);
}

#[test]
fn negative_capacity_never_builds_a_cache() {
    for capacity in [-1i64, -2, i64::MIN] {
        let err = LfuCache::<u32, u32>::try_new(capacity).unwrap_err();
        assert!(err.to_string().contains(&capacity.to_string()));
    }
}

#[test]
fn hot_keys_survive_a_scan() {
    let mut cache = LfuCache::new(8);
    for key in 0..4u32 {
        cache.put(key, key);
        for _ in 0..5 {
            cache.get(&key);
        }
    }

    for key in 100..1_000u32 {
        cache.put(key, key);
    }

    for key in 0..4u32 {
        assert!(cache.contains(&key), "hot key {key} was evicted by a scan");
    }
    assert_eq!(cache.len(), 8);
    assert!(cache.check_invariants().is_ok());
}

#[test]
fn value_updates_count_as_accesses() {
    let mut cache = LfuCache::new(2);
    cache.put("a", 1);
    cache.put("b", 1);
    cache.put("a", 2);
    cache.put("c", 1);

    assert_eq!(cache.peek("a"), Some(&2));
    assert!(!cache.contains("b"));
}

#[test]
fn string_keys_and_owned_values() {
    let mut cache: LfuCache<String, Vec<u8>> = LfuCache::new(3);
    cache.put("one".to_string(), vec![1]);
    cache.put("two".to_string(), vec![2, 2]);
    assert_eq!(cache.get("two").map(Vec::len), Some(2));
    assert_eq!(cache.remove("one"), Some(vec![1]));
    assert_eq!(cache.len(), 1);
}
