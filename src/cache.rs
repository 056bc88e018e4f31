//! Memoization cache for BDD operations.
//!
//! A thin wrapper over a hash map that counts hits and misses. Entries
//! reference nodes by id only and carry no ownership, so a cache can be
//! dropped or cleared at any time without touching the node table. The
//! engine clears its caches on `clear_cache` and before a `sweep`.

use std::cell::Cell;
use std::hash::Hash;

use rustc_hash::FxHashMap;

pub struct OpCache<K, V> {
    map: FxHashMap<K, V>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl<K, V> OpCache<K, V> {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            hits: Cell::new(0),
            misses: Cell::new(0),
        }
    }

    /// Number of cache hits since creation.
    pub fn hits(&self) -> usize {
        self.hits.get()
    }
    /// Number of cache misses since creation.
    pub fn misses(&self) -> usize {
        self.misses.get()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drops all entries. The hit/miss counters are kept.
    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V> OpCache<K, V>
where
    K: Eq + Hash,
    V: Copy,
{
    pub fn get(&self, key: &K) -> Option<V> {
        match self.map.get(key) {
            Some(&value) => {
                self.hits.set(self.hits.get() + 1);
                Some(value)
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    pub fn insert(&mut self, key: K, value: V) {
        self.map.insert(key, value);
    }
}

impl<K, V> Default for OpCache<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
