//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for mergeable min-heaps:
//!
//! - [`Heap`]: Base trait with push/peek/pop and merge
//! - [`UpdateKeyHeap`]: Extended trait adding handle-based key updates
//!
//! The base [`Heap`] trait follows the shape of Rust's standard heap API,
//! except that it is a min-heap and the key itself is the priority.

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HeapError {
    /// The operation needs a minimum but the heap holds no keys
    #[error("heap is empty")]
    EmptyHeap,
    /// A navigation step tried to follow a child that does not exist
    #[error("path leaves the tree at step {depth}")]
    InvalidPath {
        /// Index of the first step that could not be taken
        depth: usize,
    },
}

/// Base trait for mergeable min-heaps
///
/// # Example
///
/// ```rust
/// use rust_skew_heap::Heap;
/// use rust_skew_heap::skew::SkewHeap;
///
/// let mut heap = SkewHeap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.pop(), Some(1));
/// ```
pub trait Heap<K: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of keys in the heap
    fn len(&self) -> usize;

    /// Inserts a key
    fn push(&mut self, key: K);

    /// Returns the minimum key without removing it
    fn peek(&self) -> Option<&K>;

    /// Removes and returns the minimum key
    fn pop(&mut self) -> Option<K>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with arbitrary key updates
///
/// A handle names an element that is currently stored in the heap. How a
/// handle is obtained, and how long it stays meaningful, depends on the
/// implementation; for [`SkewHeap`](crate::skew::SkewHeap) it is a
/// [`Path`](crate::path::Path) from the root, which describes a tree position
/// and not a particular key.
pub trait UpdateKeyHeap<K: Ord>: Heap<K> {
    /// The handle type used to name an element
    type Handle;

    /// Replaces the key named by `handle` with `new_key`
    ///
    /// The new key may be smaller or larger than the old one.
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap is empty and
    /// `HeapError::InvalidPath` if the handle does not name an element.
    fn update_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(HeapError::EmptyHeap.to_string(), "heap is empty");
        assert_eq!(
            HeapError::InvalidPath { depth: 2 }.to_string(),
            "path leaves the tree at step 2"
        );
    }
}
