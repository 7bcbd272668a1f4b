//! Navigation paths into a heap-ordered binary tree
//!
//! A [`Path`] is a sequence of [`Direction`] steps taken from the root. The
//! empty path names the root itself. Paths describe positions, not keys: after
//! any mutation the same path may name a different key, or no node at all.

use smallvec::SmallVec;
use std::fmt;

/// A single step from a node to one of its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

/// A sequence of steps from the root of a tree
///
/// Short paths are stored inline; a skew heap of a few thousand keys rarely
/// needs more.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    steps: SmallVec<[Direction; 16]>,
}

impl Path {
    /// The empty path, naming the root
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by one left step
    pub fn left(mut self) -> Self {
        self.steps.push(Direction::Left);
        self
    }

    /// Returns this path extended by one right step
    pub fn right(mut self) -> Self {
        self.steps.push(Direction::Right);
        self
    }

    pub fn push(&mut self, step: Direction) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.steps.iter().copied()
    }
}

impl FromIterator<Direction> for Path {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Path {
            steps: iter.into_iter().collect(),
        }
    }
}

impl From<&[Direction]> for Path {
    fn from(steps: &[Direction]) -> Self {
        steps.iter().copied().collect()
    }
}

impl Extend<Direction> for Path {
    fn extend<I: IntoIterator<Item = Direction>>(&mut self, iter: I) {
        self.steps.extend(iter);
    }
}

/// Renders as `L`/`R` letters, or `.` for the root
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.steps.is_empty() {
            return f.write_str(".");
        }
        for step in &self.steps {
            f.write_str(match step {
                Direction::Left => "L",
                Direction::Right => "R",
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let path = Path::root().left().right().left();
        assert_eq!(
            path.steps(),
            &[Direction::Left, Direction::Right, Direction::Left]
        );
        assert_eq!(path.len(), 3);
        assert!(!path.is_empty());
        assert!(Path::root().is_empty());
    }

    #[test]
    fn test_collect_and_display() {
        let path: Path = [Direction::Right, Direction::Right].into_iter().collect();
        assert_eq!(path.to_string(), "RR");
        assert_eq!(Path::root().to_string(), ".");

        let mut extended = Path::from(&[Direction::Left][..]);
        extended.extend(path.iter());
        assert_eq!(extended.to_string(), "LRR");
    }

    #[test]
    fn test_long_path_spills() {
        let path: Path = std::iter::repeat(Direction::Left).take(40).collect();
        assert_eq!(path.len(), 40);
        assert!(path.iter().all(|step| step == Direction::Left));
    }
}
