#![no_main]

use libfuzzer_sys::fuzz_target;
use lfukit::policy::lfu::LfuCache;

// Fuzz arbitrary operation sequences on LfuCache
//
// The first byte picks the capacity; every following triple is
// (op, key, value). Invariants are audited after each operation.
fuzz_target!(|data: &[u8]| {
    let Some((&capacity, rest)) = data.split_first() else {
        return;
    };

    let capacity = usize::from(capacity % 17);
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);

    for chunk in rest.chunks_exact(3) {
        let op = chunk[0] % 8;
        let key = chunk[1] % 32;
        let value = chunk[2];

        match op {
            0 | 1 => {
                let previous = cache.peek(&key).copied();
                assert_eq!(cache.put(key, value), previous);
                if capacity > 0 {
                    assert_eq!(cache.peek(&key), Some(&value));
                }
            },
            2 | 3 => {
                let before = cache.frequency(&key);
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, before.is_some());
                if let Some(freq) = before {
                    assert_eq!(cache.frequency(&key), Some(freq.saturating_add(1)));
                }
            },
            4 => {
                cache.remove(&key);
                assert!(!cache.contains(&key));
            },
            5 => {
                let expected = cache.peek_lfu().map(|(k, _)| *k);
                assert_eq!(cache.pop_lfu().map(|(k, _)| k), expected);
            },
            6 => {
                if cache.reset_frequency(&key).is_some() {
                    assert_eq!(cache.frequency(&key), Some(1));
                    assert_eq!(cache.min_frequency(), Some(1));
                }
            },
            7 => {
                cache.increment_frequency(&key);
            },
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        if let Err(err) = cache.check_invariants() {
            panic!("invariant violated: {err}");
        }
    }
});
