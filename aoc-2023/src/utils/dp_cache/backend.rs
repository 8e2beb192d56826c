//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

/// Where a [`DpCache`](super::DpCache) keeps computed values.
///
/// # Contract
///
/// - `get` returns `None` for indices that were never inserted
/// - `get_or_insert` only calls `compute` when the index is vacant and never
///   overwrites an existing value
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K;
}

/// Dense `usize` indices starting from 0; grows on demand.
#[derive(Debug)]
pub struct VecBackend<K> {
    data: Vec<Option<K>>,
}

impl<K> VecBackend<K> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }
}

impl<K> Default for VecBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Backend<usize, K> for VecBackend<K> {
    fn get(&self, index: &usize) -> Option<&K> {
        self.data.get(*index)?.as_ref()
    }

    fn get_or_insert<F>(&mut self, index: usize, compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        if index >= self.data.len() {
            self.data.resize_with(index + 1, || None);
        }
        self.data[index].get_or_insert_with(compute)
    }
}

/// Fixed `rows x cols` grid of `(row, col)` indices, allocated once.
///
/// # Panics
///
/// `get_or_insert` panics on an index outside the grid.
#[derive(Debug)]
pub struct Vec2DBackend<K> {
    cols: usize,
    data: Vec<Option<K>>,
}

impl<K> Vec2DBackend<K> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            data: (0..rows * cols).map(|_| None).collect(),
        }
    }

    fn offset(&self, (row, col): (usize, usize)) -> Option<usize> {
        (col < self.cols)
            .then_some(row * self.cols + col)
            .filter(|&i| i < self.data.len())
    }
}

impl<K> Backend<(usize, usize), K> for Vec2DBackend<K> {
    fn get(&self, index: &(usize, usize)) -> Option<&K> {
        self.offset(*index).and_then(|i| self.data[i].as_ref())
    }

    fn get_or_insert<F>(&mut self, index: (usize, usize), compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        let Some(offset) = self.offset(index) else {
            panic!("index {:?} outside of {}-column grid", index, self.cols);
        };
        self.data[offset].get_or_insert_with(compute)
    }
}

/// Sparse or non-integer indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(compute)
    }
}
