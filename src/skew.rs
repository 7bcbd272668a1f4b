//! Skew Heap implementation
//!
//! A skew heap is a self-adjusting, heap-ordered binary tree. It keeps no
//! balance information at all: every merge step unconditionally swaps the
//! children of the node it descends through, and that alone gives the
//! amortized logarithmic bound.
//!
//! Every mutating operation is expressed as a merge of owned subtrees whose
//! result is moved into the slot being mutated:
//!
//! - `insert` merges the root with a one-node tree
//! - `extract_min` replaces the root by the merge of its two children
//! - `update_key` does the same at an internal node named by a [`Path`], then
//!   inserts the new key from the root
//!
//! # Time Complexity
//!
//! | Operation     | Amortized  | Worst case |
//! |---------------|------------|------------|
//! | `merge`       | O(log n)   | O(n)       |
//! | `insert`      | O(log n)   | O(n)       |
//! | `extract_min` | O(log n)   | O(n)       |
//! | `peek_min`    | O(1)       | O(1)       |
//! | `update_key`  | O(log n)   | O(n)       |
//! | `navigate`    | O(path)    | O(path)    |
//!
//! # Example
//!
//! ```rust
//! use rust_skew_heap::path::Path;
//! use rust_skew_heap::skew::SkewHeap;
//!
//! let mut heap = SkewHeap::singleton(5);
//! heap.insert(3);
//! heap.insert(8);
//! heap.insert(1);
//! assert_eq!(heap.peek_min(), Ok(&1));
//!
//! // Replace whatever key sits at the root's left child.
//! let old = *heap.navigate(&Path::root().left()).unwrap().key().unwrap();
//! heap.update_key(&Path::root().left(), 2).unwrap();
//! assert_eq!(heap.len(), 4);
//! assert!(!heap.iter().any(|&k| k == old));
//! ```

use crate::path::{Direction, Path};
use crate::traits::{Heap, HeapError, UpdateKeyHeap};
use std::fmt;

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn leaf(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
        })
    }
}

/// Merges two subtrees into one holding the union of their keys.
///
/// The root with the smaller key wins (the first operand on ties). Its right
/// subtree is merged with the loser, the result becomes its new left subtree,
/// and its old left subtree becomes its right one. The merge continues down
/// the left slot of each winner, so it runs as a loop.
fn merge<K: Ord>(mut a: Link<K>, mut b: Link<K>) -> Link<K> {
    let mut merged: Link<K> = None;
    let mut slot = &mut merged;
    loop {
        match (a, b) {
            (None, rest) | (rest, None) => {
                *slot = rest;
                return merged;
            }
            (Some(x), Some(y)) => {
                let (mut small, large) = if x.key <= y.key { (x, y) } else { (y, x) };
                let small_right = small.right.take();
                small.right = small.left.take();
                a = Some(large);
                b = small_right;
                slot = &mut slot.insert(small).left;
            }
        }
    }
}

/// Removes the key stored in `slot`, leaving the merge of its children there.
fn remove_root<K: Ord>(slot: &mut Link<K>) -> Option<K> {
    let node = slot.take()?;
    let Node { key, left, right } = *node;
    *slot = merge(left, right);
    Some(key)
}

/// A skew heap of totally ordered keys
///
/// The heap owns its tree. Internal nodes are addressed by [`Path`] and
/// inspected through [`Subtree`] views, which borrow the heap and therefore
/// cannot outlive the next mutation.
pub struct SkewHeap<K> {
    root: Link<K>,
    len: usize,
}

impl<K> SkewHeap<K> {
    /// Creates an empty heap
    pub const fn new() -> Self {
        SkewHeap { root: None, len: 0 }
    }

    /// Creates a heap holding exactly one key
    pub fn singleton(key: K) -> Self {
        SkewHeap {
            root: Some(Node::leaf(key)),
            len: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every key
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns a view of the whole tree
    pub fn root(&self) -> Subtree<'_, K> {
        Subtree {
            node: self.root.as_deref(),
        }
    }

    /// Iterates over the keys in pre-order, which is not sorted order
    pub fn iter(&self) -> Iter<'_, K> {
        self.root().iter()
    }

    /// Follows `path` from the root and returns a view of the node it names.
    ///
    /// The empty path names the root, which is the empty subtree when the
    /// heap is empty.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidPath` if a step leads to a child that does
    /// not exist.
    pub fn navigate(&self, path: &Path) -> Result<Subtree<'_, K>, HeapError> {
        let mut node = self.root.as_deref();
        for (depth, step) in path.iter().enumerate() {
            let current = node.ok_or(HeapError::InvalidPath { depth })?;
            let child = match step {
                Direction::Left => current.left.as_deref(),
                Direction::Right => current.right.as_deref(),
            };
            node = Some(child.ok_or(HeapError::InvalidPath { depth })?);
        }
        Ok(Subtree { node })
    }

    /// Resolves `path` to the storage slot of the node it names
    fn slot_mut(&mut self, path: &Path) -> Result<&mut Link<K>, HeapError> {
        let mut slot = &mut self.root;
        for (depth, step) in path.iter().enumerate() {
            let node = match slot {
                Some(node) => node,
                None => return Err(HeapError::InvalidPath { depth }),
            };
            let child = match step {
                Direction::Left => &mut node.left,
                Direction::Right => &mut node.right,
            };
            if child.is_none() {
                return Err(HeapError::InvalidPath { depth });
            }
            slot = child;
        }
        Ok(slot)
    }
}

impl<K: Ord> SkewHeap<K> {
    /// Merges two heaps into one holding the keys of both
    ///
    /// Both operands are consumed, so neither can be observed half-merged.
    /// Clone an operand first to keep it.
    pub fn union(mut self, mut other: Self) -> Self {
        let len = self.len + other.len;
        let root = merge(self.root.take(), other.root.take());
        SkewHeap { root, len }
    }

    /// Inserts a key
    pub fn insert(&mut self, key: K) {
        self.root = merge(self.root.take(), Some(Node::leaf(key)));
        self.len += 1;
        tracing::trace!(len = self.len, "inserted key");
    }

    /// Returns the minimum key
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no keys.
    pub fn peek_min(&self) -> Result<&K, HeapError> {
        self.root
            .as_ref()
            .map(|node| &node.key)
            .ok_or(HeapError::EmptyHeap)
    }

    /// Removes the minimum key without returning it
    ///
    /// Read the minimum with [`peek_min`](Self::peek_min) first if it is
    /// needed, or use [`pop_min`](Self::pop_min).
    ///
    /// # Errors
    /// Returns `HeapError::EmptyHeap` if the heap holds no keys.
    pub fn extract_min(&mut self) -> Result<(), HeapError> {
        self.pop_min().map(drop).ok_or(HeapError::EmptyHeap)
    }

    /// Removes and returns the minimum key
    pub fn pop_min(&mut self) -> Option<K> {
        let key = remove_root(&mut self.root)?;
        self.len -= 1;
        tracing::trace!(len = self.len, "removed minimum");
        Some(key)
    }

    /// Replaces the key at the node named by `path` with `new_key`
    ///
    /// The node's current key is removed by merging its two subtrees in its
    /// place, then `new_key` is inserted starting from the root. This works
    /// for both larger and smaller keys. The new key generally ends up at a
    /// different position, so `path` should not be reused afterwards.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidPath` if `path` leaves the tree and
    /// `HeapError::EmptyHeap` if the heap is empty. The heap is unchanged in
    /// both cases.
    pub fn update_key(&mut self, path: &Path, new_key: K) -> Result<(), HeapError> {
        let slot = self.slot_mut(path)?;
        remove_root(slot).ok_or(HeapError::EmptyHeap)?;
        self.root = merge(self.root.take(), Some(Node::leaf(new_key)));
        tracing::trace!(depth = path.len(), len = self.len, "updated key");
        Ok(())
    }

    /// Drains the heap in non-decreasing order
    pub fn into_sorted_vec(mut self) -> Vec<K> {
        let mut sorted = Vec::with_capacity(self.len);
        while let Some(key) = self.pop_min() {
            sorted.push(key);
        }
        sorted
    }
}

impl<K: Ord> Heap<K> for SkewHeap<K> {
    fn new() -> Self {
        SkewHeap::new()
    }

    fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, key: K) {
        self.insert(key);
    }

    fn peek(&self) -> Option<&K> {
        self.peek_min().ok()
    }

    fn pop(&mut self) -> Option<K> {
        self.pop_min()
    }

    fn merge(&mut self, other: Self) {
        let this = std::mem::take(self);
        *self = this.union(other);
    }
}

impl<K: Ord> UpdateKeyHeap<K> for SkewHeap<K> {
    type Handle = Path;

    fn update_key(&mut self, handle: &Path, new_key: K) -> Result<(), HeapError> {
        SkewHeap::update_key(self, handle, new_key)
    }
}

impl<K> Default for SkewHeap<K> {
    fn default() -> Self {
        Self::new()
    }
}

// Descending inserts build a left spine as long as the heap, so teardown
// must not recurse.
impl<K> Drop for SkewHeap<K> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Clone> Clone for SkewHeap<K> {
    fn clone(&self) -> Self {
        enum Step<'a, K> {
            Enter(Option<&'a Node<K>>),
            Build(&'a K),
        }

        let mut work = vec![Step::Enter(self.root.as_deref())];
        let mut built: Vec<Link<K>> = Vec::new();
        while let Some(step) = work.pop() {
            match step {
                Step::Enter(None) => built.push(None),
                Step::Enter(Some(node)) => {
                    work.push(Step::Build(&node.key));
                    work.push(Step::Enter(node.right.as_deref()));
                    work.push(Step::Enter(node.left.as_deref()));
                }
                Step::Build(key) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        key: key.clone(),
                        left,
                        right,
                    })));
                }
            }
        }

        SkewHeap {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for SkewHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewHeap")
            .field("len", &self.len)
            .field("keys", &DebugKeys(self.root()))
            .finish()
    }
}

struct DebugKeys<'a, K>(Subtree<'a, K>);

impl<K: fmt::Debug> fmt::Debug for DebugKeys<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

/// Renders the tree depth-first, as `RAIZ(k) IZQ(k) [..] DER(k) [..]`
///
/// `IZQ` and `DER` carry the parent's key and wrap the rendering of the left
/// and right child; absent children are omitted. An empty heap renders as
/// `Monticulo vacio`.
impl<K: fmt::Display> fmt::Display for SkewHeap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}

impl<K: Ord> FromIterator<K> for SkewHeap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut heap = SkewHeap::new();
        heap.extend(iter);
        heap
    }
}

impl<K: Ord> Extend<K> for SkewHeap<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a SkewHeap<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// A read-only view of one node of a [`SkewHeap`] and everything below it
///
/// A view may be empty: the root of an empty heap, or the child of a leaf.
pub struct Subtree<'a, K> {
    node: Option<&'a Node<K>>,
}

impl<K> Clone for Subtree<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Subtree<'_, K> {}

impl<'a, K> Subtree<'a, K> {
    pub fn is_empty(&self) -> bool {
        self.node.is_none()
    }

    /// The key stored at this node, or `None` for an empty subtree
    pub fn key(&self) -> Option<&'a K> {
        self.node.map(|node| &node.key)
    }

    /// The left child; empty if this subtree or its left child is empty
    pub fn left(&self) -> Subtree<'a, K> {
        Subtree {
            node: self.node.and_then(|node| node.left.as_deref()),
        }
    }

    /// The right child; empty if this subtree or its right child is empty
    pub fn right(&self) -> Subtree<'a, K> {
        Subtree {
            node: self.node.and_then(|node| node.right.as_deref()),
        }
    }

    /// Number of keys in this subtree
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'a, K> {
        Iter {
            pending: self.node.into_iter().collect(),
        }
    }

    /// Checks that no child holds a smaller key than its parent
    pub fn is_heap_ordered(&self) -> bool
    where
        K: Ord,
    {
        let mut pending: Vec<&Node<K>> = self.node.into_iter().collect();
        while let Some(node) = pending.pop() {
            for child in [node.left.as_deref(), node.right.as_deref()]
                .into_iter()
                .flatten()
            {
                if child.key < node.key {
                    return false;
                }
                pending.push(child);
            }
        }
        true
    }
}

impl<K: fmt::Debug> fmt::Debug for Subtree<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subtree")
            .field("key", &self.key())
            .field("len", &self.len())
            .finish()
    }
}

impl<K: fmt::Display> fmt::Display for Subtree<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        enum Piece<'a, K> {
            Node(&'a Node<K>),
            Child(&'static str, &'a K),
            Close,
        }

        let Some(root) = self.node else {
            return f.write_str("Monticulo vacio");
        };

        let mut pieces = vec![Piece::Node(root)];
        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Node(node) => {
                    write!(f, "RAIZ({})", node.key)?;
                    if let Some(right) = node.right.as_deref() {
                        pieces.push(Piece::Close);
                        pieces.push(Piece::Node(right));
                        pieces.push(Piece::Child("DER", &node.key));
                    }
                    if let Some(left) = node.left.as_deref() {
                        pieces.push(Piece::Close);
                        pieces.push(Piece::Node(left));
                        pieces.push(Piece::Child("IZQ", &node.key));
                    }
                }
                Piece::Child(label, key) => write!(f, " {label}({key}) [")?,
                Piece::Close => f.write_str("]")?,
            }
        }
        Ok(())
    }
}

/// Pre-order iterator over the keys of a subtree
pub struct Iter<'a, K> {
    pending: Vec<&'a Node<K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let node = self.pending.pop()?;
        self.pending.extend(node.right.as_deref());
        self.pending.extend(node.left.as_deref());
        Some(&node.key)
    }
}
