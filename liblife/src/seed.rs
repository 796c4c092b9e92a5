use std::collections::BTreeSet;

use crate::pos::Coordinate;

/// Initially-alive coordinates, collected before a grid is seeded.
///
/// Adding a coordinate twice is a no-op. Iteration is row-major so seeding is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    cells: BTreeSet<Coordinate>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the coordinate was already present.
    pub fn insert<P>(&mut self, pos: P) -> bool
    where
        P: Into<Coordinate>,
    {
        self.cells.insert(pos.into())
    }

    pub fn remove<P>(&mut self, pos: P) -> bool
    where
        P: Into<Coordinate>,
    {
        self.cells.remove(&pos.into())
    }

    pub fn contains<P>(&self, pos: P) -> bool
    where
        P: Into<Coordinate>,
    {
        self.cells.contains(&pos.into())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.cells.iter().copied()
    }
}

impl<P> FromIterator<P> for SeedSet
where
    P: Into<Coordinate>,
{
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<P> Extend<P> for SeedSet
where
    P: Into<Coordinate>,
{
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.cells.extend(iter.into_iter().map(Into::into));
    }
}
