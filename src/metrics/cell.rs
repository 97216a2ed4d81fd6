use std::cell::Cell;

/// Counter that can be bumped through a shared reference.
///
/// Not `Sync`: caches are single-threaded and callers that share one
/// across threads already serialize access behind their own lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get().saturating_add(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incr_through_shared_ref() {
        let cell = MetricsCell::new();
        let shared = &cell;
        shared.incr();
        shared.incr();
        assert_eq!(cell.get(), 2);
    }
}
