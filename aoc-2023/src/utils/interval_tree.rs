//! Binary search tree over disjoint half-open intervals.
//!
//! Each interval carries a value. Overlapping inserts are rejected, which keeps
//! point lookups to a single root-to-leaf walk.

use std::ops::Range;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntervalTreeError {
    #[error("interval {new:?} overlaps existing interval {existing:?}")]
    Overlap {
        new: Range<u64>,
        existing: Range<u64>,
    },
    #[error("interval {0:?} is empty")]
    Empty(Range<u64>),
}

#[derive(Debug)]
struct Node<T> {
    interval: Range<u64>,
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

/// Unbalanced interval BST.
///
/// ```
/// use aoc_2023::utils::interval_tree::IntervalTree;
///
/// let mut tree = IntervalTree::new();
/// tree.insert(98..100, "a").unwrap();
/// tree.insert(50..98, "b").unwrap();
///
/// assert_eq!(tree.search(99), Some(&"a"));
/// assert_eq!(tree.search(10), None);
/// assert!(tree.insert(90..95, "c").is_err());
/// ```
#[derive(Debug)]
pub struct IntervalTree<T> {
    root: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn overlaps(a: &Range<u64>, b: &Range<u64>) -> bool {
    a.start < b.end && b.start < a.end
}

impl<T> IntervalTree<T> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert `interval` with `value`; fails if it is empty or overlaps.
    pub fn insert(&mut self, interval: Range<u64>, value: T) -> Result<(), IntervalTreeError> {
        if interval.is_empty() {
            return Err(IntervalTreeError::Empty(interval));
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            if overlaps(&node.interval, &interval) {
                return Err(IntervalTreeError::Overlap {
                    new: interval,
                    existing: node.interval.clone(),
                });
            }
            slot = if interval.start >= node.interval.end {
                &mut node.right
            } else {
                &mut node.left
            };
        }

        *slot = Some(Box::new(Node {
            interval,
            value,
            left: None,
            right: None,
        }));
        self.len += 1;
        Ok(())
    }

    /// Value of the interval containing `key`.
    pub fn search(&self, key: u64) -> Option<&T> {
        self.search_entry(key).map(|(_, value)| value)
    }

    /// Interval and value containing `key`.
    pub fn search_entry(&self, key: u64) -> Option<(&Range<u64>, &T)> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = if key < node.interval.start {
                node.left.as_deref()
            } else if key >= node.interval.end {
                node.right.as_deref()
            } else {
                return Some((&node.interval, &node.value));
            };
        }
        None
    }

    /// All entries in ascending interval order.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Entries intersecting `range`, in ascending order.
    pub fn overlapping(&self, range: Range<u64>) -> impl Iterator<Item = (&Range<u64>, &T)> {
        let Range { start, end } = range;
        let mut iter = Iter { stack: Vec::new() };
        // descend to the first interval ending after `start`, skipping
        // every subtree that lies entirely before it
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.interval.end <= start {
                current = node.right.as_deref();
            } else {
                iter.stack.push(node);
                current = node.left.as_deref();
            }
        }
        iter.take_while(move |(interval, _)| interval.start < end)
    }
}

/// In-order iterator over an [`IntervalTree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Range<u64>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((&node.interval, &node.value))
    }
}
