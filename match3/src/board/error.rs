use crate::MAX_BOARD_SIZE;

/// The error type for building a [`Board`](crate::Board) from explicit rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardShapeError {
    NoRows,
    TooLarge { size: usize },
    RaggedRow { row: usize, len: usize, expected: usize },
    InvalidSymbol { row: usize, col: usize, symbol: char },
}

impl std::error::Error for BoardShapeError {}

impl std::fmt::Display for BoardShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardShapeError::NoRows => write!(f, "A board needs at least one row"),
            BoardShapeError::TooLarge { size } => write!(
                f,
                "A board of size {} is larger than the maximum of {}",
                size, MAX_BOARD_SIZE
            ),
            BoardShapeError::RaggedRow { row, len, expected } => write!(
                f,
                "Row {} has {} cells, but the board is {} cells wide",
                row, len, expected
            ),
            BoardShapeError::InvalidSymbol { row, col, symbol } => write!(
                f,
                "Symbol '{}' at ({}, {}) is neither a tile letter nor '.'",
                symbol, row, col
            ),
        }
    }
}
