//! Runs the same access pattern through LFU and LRU caches built at runtime.

use lfukit::builder::{CacheBuilder, CachePolicy};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let accesses = ["a", "b", "a", "c", "a", "d", "a", "e", "a", "f"];

    for policy in [CachePolicy::Lfu, CachePolicy::Lru] {
        let mut cache = match CacheBuilder::new(3).try_build::<&str, usize>(policy) {
            Ok(cache) => cache,
            Err(err) => {
                eprintln!("{err}");
                return;
            },
        };

        let mut hits = 0;
        for (step, &key) in accesses.iter().enumerate() {
            if cache.get(&key).is_some() {
                hits += 1;
            } else {
                cache.insert(key, step);
            }
        }

        println!(
            "{policy:?}: {hits}/{} hits, still holds \"a\": {}",
            accesses.len(),
            cache.contains(&"a")
        );
    }
}
