use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Position;

/// The positions covered by matches on a board.
///
/// A position that belongs to both a horizontal and a vertical run is only
/// contained once. Iteration is in row-major order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    positions: BTreeSet<Position>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the position was newly inserted.
    pub fn insert(&mut self, pos: Position) -> bool {
        self.positions.insert(pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.positions.iter().copied()
    }
}

impl FromIterator<Position> for MatchSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        Self {
            positions: BTreeSet::from_iter(iter),
        }
    }
}

impl Extend<Position> for MatchSet {
    fn extend<T: IntoIterator<Item = Position>>(&mut self, iter: T) {
        self.positions.extend(iter)
    }
}

impl IntoIterator for MatchSet {
    type Item = Position;
    type IntoIter = std::collections::btree_set::IntoIter<Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.into_iter()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = Position;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, Position>>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter().copied()
    }
}
