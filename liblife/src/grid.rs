use itertools::Itertools;
use rayon::prelude::*;

use crate::{error::GridError, pos::Coordinate, seed::SeedSet};

/// A fixed-size square grid of cells stored row-major: `index = row * side + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    side: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(side: usize) -> Result<Self, GridError> {
        let cell_count = side
            .checked_mul(side)
            .filter(|cell_count| *cell_count > 0)
            .ok_or(GridError::InvalidDimension { side })?;

        let cells = vec![CellState::default(); cell_count];
        Ok(Self::with_cells(side, cells))
    }

    pub fn new_random(side: usize, alive_cells: usize) -> Result<Self, GridError> {
        let mut grid = Self::new(side)?;

        let mut available_positions = (0..side)
            .cartesian_product(0..side)
            .map(Coordinate::from)
            .collect_vec();

        if alive_cells > available_positions.len() {
            return Err(GridError::TooManyCells {
                requested: alive_cells,
                available: available_positions.len(),
            });
        }

        for _ in 0..alive_cells {
            let chosen_index = rand::random_range(0..available_positions.len());
            let chosen_position = available_positions.swap_remove(chosen_index);

            grid.set_alive(chosen_position)?;
        }

        Ok(grid)
    }

    /// Builds a grid from a literal boolean matrix, `true` being alive.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, GridError>
    where
        R: AsRef<[bool]>,
    {
        let side = rows.len();

        if side == 0 {
            return Err(GridError::InvalidDimension { side });
        }

        if rows.iter().any(|row| row.as_ref().len() != side) {
            return Err(GridError::InvalidDimension { side });
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied().map(CellState::from))
            .collect();

        Ok(Self::with_cells(side, cells))
    }

    pub(crate) fn with_cells(side: usize, cells: Vec<CellState>) -> Self {
        debug_assert_eq!(Some(cells.len()), side.checked_mul(side));
        Self { side, cells }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cell<P>(&self, pos: P) -> Option<CellState>
    where
        P: Into<Coordinate>,
    {
        let index = self.pos_to_index(pos)?;
        self.cells.get(index).copied()
    }

    fn cell_mut<P>(&mut self, pos: P) -> Result<&mut CellState, GridError>
    where
        P: Into<Coordinate>,
    {
        let pos = pos.into();
        let index = self.checked_index(pos)?;
        Ok(&mut self.cells[index])
    }

    pub fn is_alive<P>(&self, pos: P) -> Result<bool, GridError>
    where
        P: Into<Coordinate>,
    {
        let pos = pos.into();
        let index = self.checked_index(pos)?;
        Ok(self.cells[index].is_alive())
    }

    pub fn set_alive<P>(&mut self, pos: P) -> Result<(), GridError>
    where
        P: Into<Coordinate>,
    {
        *self.cell_mut(pos)? = CellState::Alive;
        Ok(())
    }

    pub fn set_dead<P>(&mut self, pos: P) -> Result<(), GridError>
    where
        P: Into<Coordinate>,
    {
        *self.cell_mut(pos)? = CellState::Dead;
        Ok(())
    }

    /// Marks every seed alive. Nothing is written unless all seeds are in bounds.
    pub fn seed(&mut self, seeds: &SeedSet) -> Result<(), GridError> {
        let indices: Vec<usize> = seeds
            .iter()
            .map(|pos| self.checked_index(pos))
            .collect::<Result<_, _>>()?;

        for index in indices {
            self.cells[index] = CellState::Alive;
        }

        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Copy of the current cell states, detached from the grid.
    pub fn snapshot(&self) -> Vec<bool> {
        self.cells.iter().map(|cell| cell.is_alive()).collect()
    }

    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Coordinate, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), *cell))
    }

    /// Parallel counterpart of [`Grid::enumerate_cells`], in the same row-major order.
    pub fn par_enumerate_cells(
        &self,
    ) -> impl IndexedParallelIterator<Item = (Coordinate, CellState)> + '_ {
        self.cells
            .par_iter()
            .enumerate()
            .map(|(index, cell)| (self.index_to_pos(index), *cell))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> {
        self.cells.chunks(self.side)
    }

    fn checked_index(&self, pos: Coordinate) -> Result<usize, GridError> {
        self.pos_to_index(pos).ok_or(GridError::OutOfBounds {
            row: pos.row,
            col: pos.col,
            side: self.side,
        })
    }

    pub fn pos_to_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Coordinate>,
    {
        let Coordinate { row, col } = pos.into();

        if row >= self.side {
            return None;
        }

        if col >= self.side {
            return None;
        }

        Some(row * self.side + col)
    }

    pub fn index_to_pos(&self, index: usize) -> Coordinate {
        let row = index / self.side;
        let col = index % self.side;
        Coordinate { row, col }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    Alive,

    #[default]
    Dead,
}

impl CellState {
    pub fn is_alive(self) -> bool {
        self == CellState::Alive
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            CellState::Alive
        } else {
            CellState::Dead
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_dead() {
        for side in 1..=12 {
            let grid = Grid::new(side).unwrap();

            assert_eq!(grid.side(), side);
            assert_eq!(grid.snapshot().len(), side * side);
            assert_eq!(grid.alive_count(), 0);
        }
    }

    #[test]
    fn zero_side_is_rejected() {
        assert_eq!(Grid::new(0), Err(GridError::InvalidDimension { side: 0 }));
    }

    #[test]
    fn overflowing_side_is_rejected() {
        for side in [usize::MAX, usize::MAX / 2 + 1] {
            assert_eq!(Grid::new(side), Err(GridError::InvalidDimension { side }));
            assert_eq!(
                Grid::new_random(side, 1),
                Err(GridError::InvalidDimension { side })
            );
        }
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn side_whose_square_wraps_is_rejected() {
        let side = 1usize << 32;
        assert_eq!(Grid::new(side), Err(GridError::InvalidDimension { side }));
    }

    #[test]
    fn out_of_bounds_access_fails() {
        let mut grid = Grid::new(4).unwrap();

        for pos in [(4, 0), (0, 4), (4, 4), (usize::MAX, 1)] {
            assert!(matches!(
                grid.is_alive(pos),
                Err(GridError::OutOfBounds { side: 4, .. })
            ));
            assert!(matches!(
                grid.set_alive(pos),
                Err(GridError::OutOfBounds { side: 4, .. })
            ));
        }

        assert_eq!(grid.alive_count(), 0);
    }

    #[test]
    fn set_alive_is_idempotent() {
        let mut once = Grid::new(3).unwrap();
        once.set_alive((1, 2)).unwrap();

        let mut twice = Grid::new(3).unwrap();
        twice.set_alive((1, 2)).unwrap();
        twice.set_alive((1, 2)).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.alive_count(), 1);
    }

    #[test]
    fn index_mapping_is_row_major() {
        let grid = Grid::new(5).unwrap();

        assert_eq!(grid.pos_to_index((1, 2)), Some(7));
        assert_eq!(grid.index_to_pos(7), Coordinate::new(1, 2));

        for index in 0..25 {
            assert_eq!(grid.pos_to_index(grid.index_to_pos(index)), Some(index));
        }
    }

    #[test]
    fn snapshot_is_detached() {
        let mut grid = Grid::new(2).unwrap();
        let before = grid.snapshot();

        grid.set_alive((0, 1)).unwrap();

        assert_eq!(before, vec![false; 4]);
        assert_eq!(grid.snapshot(), vec![false, true, false, false]);
    }

    #[test]
    fn from_rows_requires_square() {
        let ragged: [&[bool]; 2] = [&[true, false], &[true]];
        assert!(Grid::from_rows(&ragged).is_err());

        let empty: [[bool; 0]; 0] = [];
        assert!(Grid::from_rows(&empty).is_err());

        let grid = Grid::from_rows(&[[false, true], [true, false]]).unwrap();
        assert_eq!(grid.is_alive((0, 1)), Ok(true));
        assert_eq!(grid.is_alive((1, 1)), Ok(false));
    }

    #[test]
    fn seeding_is_all_or_nothing() {
        let mut grid = Grid::new(3).unwrap();
        let seeds: SeedSet = [(0, 0), (1, 1), (3, 0)].into_iter().collect();

        assert!(grid.seed(&seeds).is_err());
        assert_eq!(grid.alive_count(), 0);

        let seeds: SeedSet = [(0, 0), (1, 1), (0, 0)].into_iter().collect();
        grid.seed(&seeds).unwrap();
        assert_eq!(grid.alive_count(), 2);
    }

    #[test]
    fn random_grid_has_requested_population() {
        let grid = Grid::new_random(6, 10).unwrap();
        assert_eq!(grid.alive_count(), 10);

        assert_eq!(
            Grid::new_random(2, 5),
            Err(GridError::TooManyCells {
                requested: 5,
                available: 4
            })
        );
    }

    #[test]
    fn parallel_enumeration_keeps_order() {
        let grid = Grid::new_random(7, 20).unwrap();

        let sequential = grid.enumerate_cells().collect_vec();
        let parallel: Vec<_> = grid.par_enumerate_cells().collect();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn clear_kills_everything() {
        let mut grid = Grid::new_random(4, 16).unwrap();
        grid.clear();

        assert_eq!(grid.alive_count(), 0);
    }
}
