#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use lfukit::ds::{EntryList, Linked, Links, SlotArena, SlotId};

struct Node {
    links: Links,
    tag: u8,
}

impl Linked for Node {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

// Fuzz EntryList against a VecDeque of handles.
fuzz_target!(|data: &[u8]| {
    let mut arena: SlotArena<Node> = SlotArena::new();
    let mut list = EntryList::new();
    let mut model: VecDeque<SlotId> = VecDeque::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 4;
        let arg = pair[1];

        match op {
            0 => {
                let id = arena.insert(Node {
                    links: Links::default(),
                    tag: arg,
                });
                list.push_back(&mut arena, id);
                model.push_back(id);
            },
            1 => {
                let popped = list.pop_front(&mut arena);
                assert_eq!(popped, model.pop_front());
                if let Some(id) = popped {
                    arena.remove(id);
                }
            },
            2 if !model.is_empty() => {
                let pos = usize::from(arg) % model.len();
                if let Some(id) = model.remove(pos) {
                    assert!(list.remove(&mut arena, id));
                    arena.remove(id);
                }
            },
            3 if !model.is_empty() => {
                let pos = usize::from(arg) % model.len();
                if let Some(id) = model.remove(pos) {
                    assert!(list.move_to_back(&mut arena, id));
                    model.push_back(id);
                }
            },
            _ => {},
        }

        assert_eq!(list.len(), model.len());
        assert_eq!(list.front(), model.front().copied());
        assert_eq!(list.back(), model.back().copied());
        if let Err(err) = list.check(&arena) {
            panic!("invariant violated: {err}");
        }
    }

    let walked: Vec<u8> = list.iter(&arena).map(|(_, node)| node.tag).collect();
    assert_eq!(walked.len(), model.len());
});
