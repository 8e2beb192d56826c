//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::{ClosureProblem, DpProblem};

/// Memoising evaluator for a [`DpProblem`].
///
/// Dependencies are resolved recursively on first access and every index is
/// computed at most once.
///
/// # Warning: No Cycle Detection
///
/// A cyclic dependency graph overflows the stack. Dependencies must form a DAG.
///
/// ```rust
/// use aoc_2023::utils::dp_cache::{DpCache, HashMapBackend};
///
/// // number of ways to climb `n` steps taking 1 or 2 at a time
/// let stairs = DpCache::new(
///     HashMapBackend::new(),
///     |n: &u32| if *n <= 1 { vec![] } else { vec![n - 1, n - 2] },
///     |n: &u32, deps: Vec<u64>| if *n <= 1 { 1 } else { deps[0] + deps[1] },
/// );
///
/// assert_eq!(stairs.get(&5), 8);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn with_problem(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value at `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // no borrow is held while dependencies recurse
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .into_iter()
            .map(|dep| self.get(&dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }
}

impl<I, K, B> DpCache<I, K, B, ClosureProblem<I, K, fn(&I) -> Vec<I>, fn(&I, Vec<K>) -> K>>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
{
    /// Closure-based constructor, see [`ClosureProblem`].
    pub fn new<D, C>(
        backend: B,
        dep_fn: D,
        compute_fn: C,
    ) -> DpCache<I, K, B, ClosureProblem<I, K, D, C>>
    where
        D: Fn(&I) -> Vec<I>,
        C: Fn(&I, Vec<K>) -> K,
    {
        DpCache::with_problem(backend, ClosureProblem::new(dep_fn, compute_fn))
    }
}
