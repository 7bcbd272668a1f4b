//! Stress tests that push the skew heap through long operation sequences
//!
//! These cover degenerate insertion orders (which build very deep trees),
//! heavy update_key traffic, and large merges.

use rust_skew_heap::path::{Direction, Path};
use rust_skew_heap::skew::SkewHeap;

/// Small deterministic generator so runs are reproducible
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 33
    }
}

#[test]
fn test_massive_operations() {
    let mut heap = SkewHeap::new();
    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.pop_min(), Some(i));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_descending_inserts_build_deep_tree() {
    let mut heap = SkewHeap::new();
    for i in (0..100_000).rev() {
        heap.insert(i);
    }

    // Every insert became the new root with the old tree on its left.
    let deep: Path = std::iter::repeat(Direction::Left).take(99_999).collect();
    assert_eq!(heap.navigate(&deep).unwrap().key(), Some(&99_999));
    assert!(heap.root().is_heap_ordered());

    let sorted = heap.into_sorted_vec();
    assert!(sorted.iter().copied().eq(0..100_000));
}

#[test]
fn test_alternating_ops() {
    let mut heap = SkewHeap::new();
    for i in 0..500 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert_eq!(heap.pop_min(), Some(i));
    }
    assert_eq!(heap.len(), 500);
    assert!(heap.root().is_heap_ordered());
}

#[test]
fn test_many_update_keys() {
    let mut rng = Lcg::new(7);
    let mut heap: SkewHeap<u64> = (0..2_000).map(|_| rng.next() % 10_000).collect();

    for round in 0..2_000 {
        // Walk a random distance down a random branch, stopping at a leaf.
        let mut path = Path::root();
        let mut node = heap.root();
        for _ in 0..(rng.next() % 12) {
            let step = if rng.next() % 2 == 0 {
                Direction::Left
            } else {
                Direction::Right
            };
            let child = match step {
                Direction::Left => node.left(),
                Direction::Right => node.right(),
            };
            if child.is_empty() {
                break;
            }
            path.push(step);
            node = child;
        }

        heap.update_key(&path, rng.next() % 10_000).unwrap();
        assert_eq!(heap.len(), 2_000);
        if round % 100 == 0 {
            assert!(heap.root().is_heap_ordered());
        }
    }

    let sorted = heap.into_sorted_vec();
    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn test_large_merges() {
    let mut rng = Lcg::new(42);
    let mut heaps: Vec<SkewHeap<u64>> = (0..64)
        .map(|_| (0..200).map(|_| rng.next()).collect())
        .collect();

    // Pairwise merge rounds down to a single heap.
    while heaps.len() > 1 {
        let mut next = Vec::with_capacity(heaps.len() / 2);
        while let (Some(a), Some(b)) = (heaps.pop(), heaps.pop()) {
            next.push(a.union(b));
        }
        heaps = next;
    }

    let heap = heaps.pop().unwrap();
    assert_eq!(heap.len(), 64 * 200);
    assert!(heap.root().is_heap_ordered());
    let sorted = heap.into_sorted_vec();
    assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));
}
