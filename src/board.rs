use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::*;

/// Rectangular grid of cells plus the bookkeeping shared by every request.
///
/// A board starts out as an ungenerated placeholder: no mines, every cell
/// Closed. Mine placement is deferred until the match controller knows which
/// cell must stay safe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Cell>,
    mine_count: CellCount,
    flag_count: CellCount,
    generated: bool,
    pressed: Option<Coord2>,
}

impl Board {
    pub fn new(config: GameConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid: Array2::default(config.size.to_nd_index()),
            mine_count: config.mines,
            flag_count: 0,
            generated: false,
            pressed: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.grid.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn in_bounds(&self, (row, col): Coord2) -> bool {
        let (rows, cols) = self.size();
        row < rows && col < cols
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.to_nd_index()]
    }

    /// How many mines have not been flagged yet. Negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count as isize)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.grid.iter_neighbors(coords)
    }

    /// Restores the ungenerated placeholder: no mines, all cells Closed.
    pub fn clear(&mut self) {
        self.grid.fill(Cell::default());
        self.flag_count = 0;
        self.generated = false;
        self.pressed = None;
    }

    /// Turns a cell into a mine. Part of the generation seam, along with
    /// [`Board::clear`] and [`Board::finish_generation`]. Returns whether the
    /// cell was previously mine-free.
    pub fn place_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.grid[coords.to_nd_index()];
        let placed = !cell.is_mine;
        cell.is_mine = true;
        placed
    }

    /// Computes every non-mine cell's adjacency count from the placed mines
    /// and marks the board generated. Last step of the generation seam.
    pub fn finish_generation(&mut self) {
        let (rows, cols) = self.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                if self.cell_at(coords).is_mine {
                    continue;
                }
                let count = self
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cell_at(pos).is_mine)
                    .count()
                    .try_into()
                    .unwrap();
                self.grid[coords.to_nd_index()].adjacent_mines = count;
            }
        }
        self.generated = true;
    }

    /// Right-release: advance the Closed -> Flagged -> Marked cycle and keep
    /// the remaining-mine counter in step.
    pub(crate) fn cycle_flag(&mut self, coords: Coord2) -> FlagOutcome {
        use CellState::*;

        let state = self.cell_at(coords).state;
        let next = state.cycled();
        if next == state {
            return FlagOutcome::NoChange;
        }
        match (state, next) {
            (Closed, Flagged) => self.flag_count += 1,
            (Flagged, Marked) => self.flag_count -= 1,
            _ => {}
        }
        self.grid[coords.to_nd_index()].state = next;
        FlagOutcome::Changed
    }

    /// Left-press affordance. At most one cell is pressed at a time; pressing
    /// elsewhere releases the previous one.
    pub(crate) fn press(&mut self, coords: Coord2) -> FlagOutcome {
        self.release_pressed();
        let cell = &mut self.grid[coords.to_nd_index()];
        let next = cell.state.pressed();
        if next == cell.state {
            return FlagOutcome::NoChange;
        }
        cell.state = next;
        self.pressed = Some(coords);
        FlagOutcome::Changed
    }

    /// Reverts the pressed affordance, if any, without opening anything.
    pub(crate) fn release_pressed(&mut self) -> FlagOutcome {
        match self.pressed.take() {
            Some(coords) => {
                let cell = &mut self.grid[coords.to_nd_index()];
                cell.state = cell.state.released();
                FlagOutcome::Changed
            }
            None => FlagOutcome::NoChange,
        }
    }

    /// Opens a cell and flood-fills through its zero-adjacency region.
    ///
    /// Only Closed cells open; `force` additionally opens through Flagged and
    /// Marked (used for the very first reveal and the end-of-match sweep).
    /// Cascaded openings never force, so player annotations survive a
    /// neighboring cascade. Re-opening an open cell is a no-op.
    pub(crate) fn reveal(&mut self, coords: Coord2, force: bool) {
        use CellState::*;

        let cell = self.cell_at(coords);
        match cell.state {
            Closed => {}
            Open => return,
            _ if force => {
                if cell.state == Flagged {
                    self.flag_count -= 1;
                }
            }
            _ => return,
        }

        self.grid[coords.to_nd_index()].state = Open;
        log::debug!(
            "opened cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines
        );

        if cell.is_mine || cell.adjacent_mines != 0 {
            return;
        }

        let mut visited = HashSet::from([coords]);
        let mut to_visit: VecDeque<_> = self
            .iter_neighbors(coords)
            .filter(|&pos| matches!(self.cell_at(pos).state, Closed))
            .collect();
        log::trace!(
            "starting flood fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            // skip cells the player annotated or a previous pass opened
            if !matches!(self.cell_at(visit_coords).state, Closed) {
                log::trace!("skipping cell at {:?}", visit_coords);
                continue;
            }

            let visit_cell = &mut self.grid[visit_coords.to_nd_index()];
            visit_cell.state = Open;
            let visit_count = visit_cell.adjacent_mines;
            log::trace!(
                "flood opened cell at {:?}, adjacent mines: {}",
                visit_coords,
                visit_count
            );

            if visit_count == 0 {
                to_visit.extend(
                    self.iter_neighbors(visit_coords)
                        .filter(|&pos| matches!(self.cell_at(pos).state, Closed))
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Marks the losing cell. The caller follows up with [`Board::open_mines`].
    pub(crate) fn explode(&mut self, coords: Coord2) {
        self.grid[coords.to_nd_index()].state = CellState::Exploded;
    }

    /// Post-loss sweep, run once: reveal every still-Closed mine and expose
    /// every flag sitting on a mine-free cell. Correctly flagged mines keep
    /// their flag.
    pub(crate) fn open_mines(&mut self) {
        use CellState::*;
        for cell in self.grid.iter_mut() {
            match (cell.is_mine, cell.state) {
                (true, Closed) => cell.state = Open,
                (false, Flagged) => cell.state = WrongFlag,
                _ => {}
            }
        }
    }

    /// Post-win sweep: flag every mine and open every remaining safe cell,
    /// which also drives the remaining-mine counter to zero.
    pub(crate) fn flag_mines(&mut self) {
        use CellState::*;
        for cell in self.grid.iter_mut() {
            if cell.is_mine {
                if cell.state != Flagged {
                    cell.state = Flagged;
                    self.flag_count += 1;
                }
            } else if cell.state != Open {
                cell.state = Open;
            }
        }
    }

    /// Win test: every mine-free cell is open and none of them is flagged.
    pub(crate) fn is_cleared(&self) -> bool {
        use CellState::*;
        self.grid
            .iter()
            .all(|cell| cell.is_mine || !matches!(cell.state, Closed | Flagged))
    }
}
