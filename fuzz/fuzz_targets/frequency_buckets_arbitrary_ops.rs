#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use lfukit::ds::{FrequencyBuckets, Linked, Links, SlotArena, SlotId};

struct Node {
    links: Links,
}

impl Linked for Node {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

// Fuzz bucket creation and pruning in arbitrary frequency order.
//
// Each pair is (op, freq). The chain must stay ascending and `lowest()`
// must match the smallest populated frequency of a BTreeMap model.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Node> = SlotArena::new();
    let mut buckets = FrequencyBuckets::new();
    let mut model: BTreeMap<u64, Vec<SlotId>> = BTreeMap::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 3;
        let freq = u64::from(pair[1]).max(1);

        match op {
            0 => {
                let id = arena.insert(Node {
                    links: Links::default(),
                });
                buckets.get_or_create(freq).push_back(&mut arena, id);
                model.entry(freq).or_default().push(id);
            },
            1 => {
                if let Some(ids) = model.get_mut(&freq) {
                    let id = ids.remove(0);
                    if let Some(list) = buckets.get_mut(freq) {
                        assert_eq!(list.pop_front(&mut arena), Some(id));
                    }
                    arena.remove(id);
                    if ids.is_empty() {
                        model.remove(&freq);
                    }
                }
                buckets.prune_if_empty(freq);
            },
            2 => {
                buckets.prune_if_empty(freq);
            },
            _ => unreachable!(),
        }

        assert_eq!(buckets.lowest(), model.keys().next().copied());
        assert_eq!(buckets.len(), model.len());
        let freqs: Vec<u64> = buckets.frequencies().collect();
        let expected: Vec<u64> = model.keys().copied().collect();
        assert_eq!(freqs, expected);
        if let Err(err) = buckets.check(&arena) {
            panic!("invariant violated: {err}");
        }
    }
});
