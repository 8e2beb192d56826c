//! Tests for the DP cache module.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use super::*;

struct NoDeps;

impl DpProblem<usize, i32> for NoDeps {
    fn deps(&self, _n: &usize) -> Vec<usize> {
        vec![]
    }

    fn compute(&self, n: &usize, _deps: Vec<i32>) -> i32 {
        (*n as i32) * 2
    }
}

struct Fibonacci;

impl DpProblem<usize, u64> for Fibonacci {
    fn deps(&self, n: &usize) -> Vec<usize> {
        if *n <= 1 { vec![] } else { vec![n - 1, n - 2] }
    }

    fn compute(&self, n: &usize, deps: Vec<u64>) -> u64 {
        if *n <= 1 { *n as u64 } else { deps[0] + deps[1] }
    }
}

fn fib_iterative(n: usize) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

#[test]
fn test_values_without_dependencies() {
    let cache = DpCache::with_problem(VecBackend::new(), NoDeps);

    assert_eq!(cache.get(&5), 10);
    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&100), 200);
}

#[test]
fn test_fibonacci_linear_dependency_chain() {
    let cache = DpCache::with_problem(VecBackend::with_capacity(21), Fibonacci);

    assert_eq!(cache.get(&0), 0);
    assert_eq!(cache.get(&1), 1);
    assert_eq!(cache.get(&5), 5);
    assert_eq!(cache.get(&10), 55);
    assert_eq!(cache.get(&20), 6765);
}

#[test]
fn test_diamond_dependency_memoization() {
    // 0 depends on 1 and 2, which both depend on 3
    struct Diamond {
        count: Rc<Cell<i32>>,
    }

    impl DpProblem<usize, i32> for Diamond {
        fn deps(&self, n: &usize) -> Vec<usize> {
            match *n {
                0 => vec![1, 2],
                1 | 2 => vec![3],
                _ => vec![],
            }
        }

        fn compute(&self, n: &usize, deps: Vec<i32>) -> i32 {
            self.count.set(self.count.get() + 1);
            match *n {
                0 => deps[0] + deps[1],
                1 => deps[0] * 2,
                2 => deps[0] * 3,
                _ => 5,
            }
        }
    }

    let count = Rc::new(Cell::new(0));
    let cache = DpCache::with_problem(
        VecBackend::new(),
        Diamond {
            count: Rc::clone(&count),
        },
    );

    assert_eq!(cache.get(&0), 25);
    assert_eq!(count.get(), 4);

    // fully cached now
    assert_eq!(cache.get(&0), 25);
    assert_eq!(cache.get(&3), 5);
    assert_eq!(count.get(), 4);
}

#[test]
fn test_closure_constructor_with_hashmap_backend() {
    let cache = DpCache::new(
        HashMapBackend::new(),
        |s: &String| {
            if s.len() <= 1 {
                vec![]
            } else {
                vec![s[1..].to_string()]
            }
        },
        |s: &String, deps: Vec<usize>| s.len() + deps.first().copied().unwrap_or(0),
    );

    // 3 + 2 + 1
    assert_eq!(cache.get(&"abc".to_string()), 6);
}

#[test]
fn test_grid_paths_with_vec2d_backend() {
    let cache = DpCache::new(
        Vec2DBackend::new(3, 4),
        |&(r, c): &(usize, usize)| {
            let mut deps = Vec::new();
            if r > 0 {
                deps.push((r - 1, c));
            }
            if c > 0 {
                deps.push((r, c - 1));
            }
            deps
        },
        |_: &(usize, usize), deps: Vec<u64>| if deps.is_empty() { 1 } else { deps.iter().sum() },
    );

    assert_eq!(cache.get(&(2, 3)), 10);
    assert_eq!(cache.get(&(0, 3)), 1);
}

#[test]
fn test_vec2d_backend_bounds() {
    let mut backend: Vec2DBackend<u8> = Vec2DBackend::new(2, 2);

    assert_eq!(backend.get(&(1, 1)), None);
    assert_eq!(*backend.get_or_insert((1, 1), || 7), 7);
    assert_eq!(backend.get(&(1, 1)), Some(&7));
    assert_eq!(backend.get(&(0, 2)), None);
    assert_eq!(backend.get(&(2, 0)), None);
}

#[test]
#[should_panic]
fn test_vec2d_backend_insert_out_of_bounds() {
    let mut backend: Vec2DBackend<u8> = Vec2DBackend::new(2, 2);
    backend.get_or_insert((0, 2), || 1);
}

#[test]
fn test_get_or_insert_keeps_first_value() {
    let mut vec: VecBackend<i32> = VecBackend::new();
    assert_eq!(*vec.get_or_insert(4, || 1), 1);
    assert_eq!(*vec.get_or_insert(4, || 2), 1);
    assert_eq!(vec.get(&3), None);

    let mut map: HashMapBackend<&str, i32> = HashMapBackend::default();
    assert_eq!(*map.get_or_insert("a", || 1), 1);
    assert_eq!(*map.get_or_insert("a", || 2), 1);
    assert_eq!(map.get(&"b"), None);
}

proptest! {
    #[test]
    fn prop_fibonacci_matches_iterative(n in 0usize..90) {
        let cache = DpCache::with_problem(VecBackend::new(), Fibonacci);
        prop_assert_eq!(cache.get(&n), fib_iterative(n));
    }

    #[test]
    fn prop_query_order_does_not_matter(queries in prop::collection::vec(0usize..60, 1..20)) {
        let cache = DpCache::with_problem(HashMapBackend::new(), Fibonacci);
        for n in queries {
            prop_assert_eq!(cache.get(&n), fib_iterative(n));
        }
    }
}
