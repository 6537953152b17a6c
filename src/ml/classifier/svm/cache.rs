//! Least-recently-used cache of kernel matrix rows.

use std::rc::Rc;

use ahash::AHashMap;

/// Holds up to `capacity` rows of the solver's Q matrix.
#[derive(Debug)]
pub(crate) struct KernelCache {
    capacity: usize,
    clock: u64,
    rows: AHashMap<usize, (Rc<[f64]>, u64)>,
    hits: u64,
    misses: u64,
}

impl KernelCache {
    pub(crate) fn new(capacity: usize) -> Self {
        KernelCache {
            capacity: capacity.max(1),
            clock: 0,
            rows: AHashMap::with_capacity(capacity.max(1)),
            hits: 0,
            misses: 0,
        }
    }

    /// Get row `i` and mark it as most recently used.
    pub(crate) fn get(&mut self, i: usize) -> Option<Rc<[f64]>> {
        self.clock += 1;
        match self.rows.get_mut(&i) {
            Some((row, last_used)) => {
                *last_used = self.clock;
                self.hits += 1;
                Some(Rc::clone(row))
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store row `i`, evicting the least recently used row when full.
    pub(crate) fn insert(&mut self, i: usize, row: Rc<[f64]>) {
        self.clock += 1;
        if !self.rows.contains_key(&i) && self.rows.len() >= self.capacity {
            let oldest = self
                .rows
                .iter()
                .min_by_key(|(_, (_, last_used))| *last_used)
                .map(|(&key, _)| key);
            if let Some(key) = oldest {
                self.rows.remove(&key);
            }
        }
        self.rows.insert(i, (row, self.clock));
    }

    /// `(hits, misses)` since creation.
    pub(crate) fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
