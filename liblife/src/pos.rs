#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Applies a signed offset, returning `None` if either axis would go negative.
    /// Upper bounds are the grid's business.
    pub fn offset(self, row_offset: isize, col_offset: isize) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(row_offset)?,
            col: self.col.checked_add_signed(col_offset)?,
        })
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<[usize; 2]> for Coordinate {
    fn from(value: [usize; 2]) -> Self {
        Self {
            row: value[0],
            col: value[1],
        }
    }
}

impl From<Coordinate> for [usize; 2] {
    fn from(value: Coordinate) -> Self {
        [value.row, value.col]
    }
}
