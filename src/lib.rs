use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions and mine budget for one match.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid size as `(rows, cols)`.
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// 9x9 board with 10 mines.
    pub const EASY: Self = Self::new((9, 9), 10);
    /// 16x16 board with 40 mines.
    pub const MEDIUM: Self = Self::new((16, 16), 40);
    /// 16 rows by 30 columns with 100 mines.
    pub const HARD: Self = Self::new((16, 30), 100);

    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Rejects configurations the engine cannot honor: degenerate dimensions,
    /// or a mine budget that leaves no room for a safe first click.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        if self.mines >= self.total_cells() {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                rows,
                cols,
            });
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::EASY
    }
}

/// Outcome of a flag-cycle or press request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Outcome of an open request.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    Exploded,
    Won,
}

impl OpenOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use OpenOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Exploded => true,
            Won => true,
        }
    }
}
