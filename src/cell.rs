use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
///
/// `PressedClosed`/`PressedMarked` are the transient left-button-down
/// affordance; `Exploded` and `WrongFlag` only appear once the match is lost.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Closed,
    Open,
    Flagged,
    Marked,
    PressedClosed,
    PressedMarked,
    Exploded,
    WrongFlag,
}

impl CellState {
    /// States a cell never leaves once entered.
    pub const fn is_terminal(self) -> bool {
        use CellState::*;
        matches!(self, Open | Exploded | WrongFlag)
    }

    pub const fn is_pressed(self) -> bool {
        use CellState::*;
        matches!(self, PressedClosed | PressedMarked)
    }

    /// Left-button-down transition: show the pressed affordance on cells the
    /// player could still open.
    pub const fn pressed(self) -> Self {
        use CellState::*;
        match self {
            Closed => PressedClosed,
            Marked => PressedMarked,
            other => other,
        }
    }

    /// Reverts a pressed affordance without opening anything.
    pub const fn released(self) -> Self {
        use CellState::*;
        match self {
            PressedClosed => Closed,
            PressedMarked => Marked,
            other => other,
        }
    }

    /// Right-button-release transition: the Closed -> Flagged -> Marked cycle.
    /// Open and post-loss states are unaffected.
    pub const fn cycled(self) -> Self {
        use CellState::*;
        match self {
            Closed => Flagged,
            Flagged => Marked,
            Marked => Closed,
            other => other,
        }
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Closed
    }
}

/// One grid cell: identity fixed at generation time (mine flag and adjacency
/// count), plus the mutable visibility state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) state: CellState,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Number of mines in the 8-neighborhood. Unused when the cell itself is
    /// a mine.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }
}
