use grid::{CellState, Grid};
use pos::Coordinate;
use rayon::iter::ParallelIterator;
use rule::Rule;

pub mod error;
pub mod grid;
pub mod pos;
pub mod rule;
pub mod seed;

pub use error::GridError;

/// Relative (row, col) positions of the eight cells surrounding a cell, clockwise from the top left.
pub const NEIGHBOR_OFFSETS: [[isize; 2]; 8] = [
    [-1, -1],
    [-1, 0],
    [-1, 1],
    [0, 1],
    [1, 1],
    [1, 0],
    [1, -1],
    [0, -1],
];

/// Computes the next generation of a grid.
///
/// Every step reads only the generation it was given, so the result does not depend on the
/// order in which cells are visited. Neighbors past the grid edge do not exist, there is no
/// wraparound.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationEngine {
    pub rule: Rule,
}

impl GenerationEngine {
    pub fn new(rule: Rule) -> Self {
        Self { rule }
    }

    pub fn step(&self, current: &Grid) -> Grid {
        let next_cells = current
            .enumerate_cells()
            .map(|(pos, cell)| self.next_cell(current, pos, cell))
            .collect();

        Grid::with_cells(current.side(), next_cells)
    }

    /// Same result as [`GenerationEngine::step`], with cells computed on the rayon thread pool.
    pub fn step_parallel(&self, current: &Grid) -> Grid {
        let next_cells = current
            .par_enumerate_cells()
            .map(|(pos, cell)| self.next_cell(current, pos, cell))
            .collect();

        Grid::with_cells(current.side(), next_cells)
    }

    pub fn step_in_place(&self, grid: &mut Grid) {
        *grid = self.step(grid);
    }

    pub fn live_neighbor_count<P>(&self, grid: &Grid, pos: P) -> usize
    where
        P: Into<Coordinate>,
    {
        let pos = pos.into();

        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|[row_offset, col_offset]| {
                let neighbor_pos = pos.offset(*row_offset, *col_offset)?;
                grid.cell(neighbor_pos)
            })
            .filter(|neighbor| neighbor.is_alive())
            .count()
    }

    fn next_cell(&self, current: &Grid, pos: Coordinate, cell: CellState) -> CellState {
        let alive_neighbor_count = self.live_neighbor_count(current, pos);

        self.rule
            .next_state(cell.is_alive(), alive_neighbor_count)
            .into()
    }
}

/// A grid together with the engine that advances it and the number of generations elapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    pub grid: Grid,
    pub engine: GenerationEngine,
    pub generation: u64,
}

impl Game {
    pub fn new(grid: Grid, rule: Rule) -> Self {
        Self {
            grid,
            engine: GenerationEngine::new(rule),
            generation: 0,
        }
    }

    pub fn tick(&mut self) {
        self.grid = self.engine.step(&self.grid);
        self.generation += 1;
    }

    pub fn tick_n(&mut self, times: usize) {
        for _ in 0..times {
            self.tick();
        }
    }

    /// Replaces the grid and restarts the generation counter.
    pub fn reset(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(side: usize, alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(side).unwrap();
        for pos in alive {
            grid.set_alive(*pos).unwrap();
        }
        grid
    }

    #[test]
    fn full_grid_neighbor_counts() {
        let engine = GenerationEngine::default();
        let grid = Grid::from_rows(&[[true; 3]; 3]).unwrap();

        assert_eq!(engine.live_neighbor_count(&grid, (0, 0)), 3);
        assert_eq!(engine.live_neighbor_count(&grid, (0, 1)), 5);
        assert_eq!(engine.live_neighbor_count(&grid, (1, 1)), 8);
        assert_eq!(engine.live_neighbor_count(&grid, (2, 2)), 3);
    }

    #[test]
    fn no_wraparound() {
        let engine = GenerationEngine::default();
        // Live cells along the far edges would be neighbors of (0, 0) on a torus.
        let grid = grid_with(4, &[(3, 3), (0, 3), (3, 0)]);

        assert_eq!(engine.live_neighbor_count(&grid, (0, 0)), 0);
    }

    #[test]
    fn step_preserves_side() {
        let engine = GenerationEngine::default();

        for side in 1..6 {
            let grid = Grid::new_random(side, side).unwrap();
            assert_eq!(engine.step(&grid).side(), side);
        }
    }

    #[test]
    fn single_cell_grid_dies() {
        let engine = GenerationEngine::default();
        let grid = grid_with(1, &[(0, 0)]);

        assert_eq!(engine.step(&grid).alive_count(), 0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let engine = GenerationEngine::default();
        let mut grid = Grid::new_random(24, 200).unwrap();

        for _ in 0..10 {
            let next = engine.step(&grid);
            assert_eq!(engine.step_parallel(&grid), next);
            grid = next;
        }
    }

    #[test]
    fn parallel_step_on_edge_sizes() {
        let engine = GenerationEngine::default();

        for side in 1..4 {
            let grid = Grid::from_rows(&vec![vec![true; side]; side]).unwrap();
            assert_eq!(engine.step_parallel(&grid), engine.step(&grid));
        }
    }

    #[test]
    fn game_counts_generations() {
        let mut game = Game::new(grid_with(5, &[(2, 1), (2, 2), (2, 3)]), Rule::default());

        game.tick_n(3);
        assert_eq!(game.generation, 3);

        game.reset(Grid::new(5).unwrap());
        assert_eq!(game.generation, 0);
        assert_eq!(game.grid.alive_count(), 0);
    }
}
