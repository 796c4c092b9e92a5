use liblife::{pos::Coordinate, seed::SeedSet};

/// A named shape, cells given relative to its top left corner as (row, col).
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// The pattern's cells shifted so its top left corner sits at `anchor`.
    ///
    /// Returns `None` if a shifted cell can't be represented at all.
    pub fn placed_at(&self, anchor: Coordinate) -> Option<SeedSet> {
        self.cells
            .iter()
            .map(|&(row, col)| {
                Some(Coordinate::new(
                    anchor.row.checked_add(row)?,
                    anchor.col.checked_add(col)?,
                ))
            })
            .collect()
    }

    pub fn height(&self) -> usize {
        self.cells.iter().map(|(row, _)| row + 1).max().unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.cells.iter().map(|(_, col)| col + 1).max().unwrap_or(0)
    }
}
