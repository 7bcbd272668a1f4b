//! Skew Heaps for Rust
//!
//! This crate provides a skew heap: a self-adjusting, mergeable min-heap
//! stored as a plain binary tree with no balance bookkeeping. Besides the
//! usual priority-queue operations it can replace the key at any node,
//! addressed by a [`Path`](path::Path) of left/right steps from the root.
//!
//! # Features
//!
//! - **Skew Heap**: O(log n) amortized merge, insert, extract-min and update-key
//! - **Sessions**: a line-oriented command protocol (`CREAR`, `INSERTAR`,
//!   `BORRAR`, `MIN`, `MODIFICAR`, `FIN`) that drives a heap and prints it
//!   after every command; the `skew-heap` binary runs one over stdin/stdout
//!
//! # Example
//!
//! ```rust
//! use rust_skew_heap::skew::SkewHeap;
//! use rust_skew_heap::{Heap, HeapError};
//!
//! let mut heap = SkewHeap::new();
//! heap.push(5);
//! heap.push(3);
//! assert_eq!(heap.peek(), Some(&3));
//!
//! heap.extract_min().unwrap();
//! heap.extract_min().unwrap();
//! assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
//! ```

pub mod config;
pub mod path;
pub mod session;
pub mod skew;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{Heap, HeapError, UpdateKeyHeap};
