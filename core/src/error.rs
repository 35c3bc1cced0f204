use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least 1x1")]
    InvalidSize,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Reasons a save string could not be turned back into a game.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaveError {
    #[error("save is missing the {0} field")]
    MissingField(&'static str),
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("unknown status code {0}")]
    UnknownStatus(u8),
    #[error("unknown cell state code {0}")]
    UnknownCellState(u8),
    #[error("malformed cell token {0:?}")]
    MalformedCell(String),
    #[error("board dimensions must be positive")]
    ZeroSize,
    #[error("row {row} is not terminated")]
    UnterminatedRow { row: usize },
    #[error("expected {expected} rows, found {actual}")]
    RowCount { expected: Coord, actual: usize },
    #[error("row {row}: expected {expected} cells, found {actual}")]
    ColumnCount {
        row: usize,
        expected: Coord,
        actual: usize,
    },
    #[error("unexpected trailing data after the board")]
    TrailingData,
}
