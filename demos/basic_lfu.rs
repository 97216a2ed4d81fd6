//! Walks an LFU cache through a small workload and prints what it keeps.
//!
//! Run with `RUST_LOG=lfukit=trace cargo run --example basic_lfu` to see
//! eviction events.

use lfukit::policy::lfu::LfuCache;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut cache = LfuCache::new(3);

    cache.put("index.html", "<html>…</html>");
    cache.put("style.css", "body {}");
    cache.put("app.js", "main()");

    for _ in 0..3 {
        cache.get("index.html");
    }
    cache.get("app.js");

    // style.css has the lowest frequency and goes first.
    cache.put("logo.png", "\u{89}PNG");

    for key in ["index.html", "style.css", "app.js", "logo.png"] {
        match cache.frequency(key) {
            Some(freq) => println!("{key:<12} cached, frequency {freq}"),
            None => println!("{key:<12} evicted"),
        }
    }

    if let Some((key, _)) = cache.peek_lfu() {
        println!("next eviction candidate: {key}");
    }
    if let Err(err) = cache.check_invariants() {
        eprintln!("invariant violated: {err}");
    }
}
