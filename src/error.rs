use thiserror::Error;

use crate::{CellCount, Coord};

/// Contract violations caught at construction time. In-play requests never
/// fail: out-of-bounds coordinates and redundant input (re-opening an open
/// cell, moves after the match ended) are absorbed as no-op outcomes.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("board dimensions must be at least 1x1, got {rows}x{cols}")]
    InvalidDimensions { rows: Coord, cols: Coord },
    #[error("{mines} mines do not leave a safe first click on a {rows}x{cols} board")]
    TooManyMines {
        mines: CellCount,
        rows: Coord,
        cols: Coord,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
