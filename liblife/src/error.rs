use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Invalid grid dimension: side must be positive, got {side}")]
    InvalidDimension { side: usize },

    #[error("Cell ({row}, {col}) is outside the {side}x{side} grid")]
    OutOfBounds { row: usize, col: usize, side: usize },

    #[error("Requested {requested} alive cells but the grid only has {available}")]
    TooManyCells { requested: usize, available: usize },
}
