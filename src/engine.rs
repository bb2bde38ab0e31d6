use chrono::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::*;

/// Lifecycle of one match.
///
/// Valid transitions:
/// - Pending -> InProgress
/// - Pending -> Won | Lost (first request already decides the match)
/// - InProgress -> Won | Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MatchStatus {
    /// Created, board not necessarily generated, timer not running
    Pending,
    /// Timer running, board generated
    InProgress,
    /// Match ended and player won
    Won,
    /// Match ended and player lost
    Lost,
}

impl MatchStatus {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Indicates the match has ended and no moves are accepted anymore.
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for MatchStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One match from construction to win or loss.
///
/// Owns the board and the placement strategy, defers generation to the first
/// request so the first click is always safe, runs win/loss detection after
/// every mutating request, and keeps the timer and score. The input
/// collaborator calls the mutating methods; the presentation collaborator
/// reads [`Game::snapshot`].
pub struct Game {
    board: Board,
    generator: Box<dyn BoardGenerator>,
    status: MatchStatus,
    first_move: bool,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    score: Option<u32>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(config, Box::new(RowSampleGenerator::from_entropy()))
    }

    /// Swaps the placement strategy, e.g. a seeded generator for reproducible
    /// layouts.
    pub fn with_generator(config: GameConfig, generator: Box<dyn BoardGenerator>) -> Result<Self> {
        Ok(Self {
            board: Board::new(config)?,
            generator,
            status: Default::default(),
            first_move: true,
            started_at: None,
            ended_at: None,
            score: None,
        })
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move
    }

    pub fn mines_left(&self) -> isize {
        self.board.mines_left()
    }

    /// Defined only once the match is won.
    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Seconds since the match started, frozen at the end stamp once it ends,
    /// 0 while Pending. Pure read, safe to sample between events.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Left-button-down affordance on a cell. No board consequence until the
    /// matching open request.
    pub fn press(&mut self, coords: Coord2) -> FlagOutcome {
        if self.status.is_final() || !self.board.in_bounds(coords) {
            return FlagOutcome::NoChange;
        }
        self.board.press(coords)
    }

    /// Reverts a pressed cell without opening it (pointer dragged away or
    /// release landed outside the board).
    pub fn cancel_press(&mut self) -> FlagOutcome {
        self.board.release_pressed()
    }

    /// Open request (left release on `coords`).
    ///
    /// The first open request generates the board with `coords` kept
    /// mine-free and starts the timer. Later requests explode on a mine or
    /// cascade through the reveal logic. Out-of-bounds coordinates, annotated
    /// cells, and requests after the match ended are no-ops.
    pub fn open(&mut self, coords: Coord2) -> OpenOutcome {
        use OpenOutcome::*;

        if self.status.is_final() {
            return NoChange;
        }
        self.board.release_pressed();
        if !self.board.in_bounds(coords) {
            return NoChange;
        }

        if self.first_move {
            self.first_move = false;
            self.generator.generate(&mut self.board, coords);
            self.board.reveal(coords, true);
            self.mark_started();
            return self.check_win().unwrap_or(Revealed);
        }

        let cell = self.board.cell_at(coords);
        if cell.state() != CellState::Closed {
            return NoChange;
        }

        if cell.is_mine() {
            self.board.explode(coords);
            self.board.open_mines();
            self.finish(false);
            Exploded
        } else {
            self.board.reveal(coords, false);
            self.mark_started();
            self.check_win().unwrap_or(Revealed)
        }
    }

    /// Flag request (right release on `coords`): advance the cell's
    /// Closed -> Flagged -> Marked cycle.
    ///
    /// On the very first request this generates the board around `coords`
    /// without opening anything, so a pre-flagged board still honors the
    /// safe-cell guarantee.
    pub fn flag(&mut self, coords: Coord2) -> FlagOutcome {
        if self.status.is_final() {
            return FlagOutcome::NoChange;
        }
        self.board.release_pressed();
        if !self.board.in_bounds(coords) {
            return FlagOutcome::NoChange;
        }

        if self.first_move {
            self.first_move = false;
            self.generator.generate(&mut self.board, coords);
        }

        let outcome = self.board.cycle_flag(coords);
        self.check_win();
        outcome
    }

    /// Abandons the current match and starts a fresh Pending one with the
    /// same configuration. Takes effect immediately and unconditionally.
    pub fn reset(&mut self) {
        self.board.clear();
        self.status = MatchStatus::Pending;
        self.first_move = true;
        self.started_at = None;
        self.ended_at = None;
        self.score = None;
        log::debug!("match reset");
    }

    /// Read model for the presentation collaborator.
    pub fn snapshot(&self) -> Snapshot {
        let (rows, cols) = self.board.size();
        let mut cells = Vec::with_capacity(usize::from(rows) * usize::from(cols));
        for row in 0..rows {
            for col in 0..cols {
                let cell = self.board.cell_at((row, col));
                let content = if cell.is_mine() {
                    CellContent::Mine
                } else {
                    CellContent::Count(cell.adjacent_mines())
                };
                cells.push(SnapshotCell {
                    content,
                    state: cell.state(),
                });
            }
        }
        Snapshot {
            size: (rows, cols),
            cells,
            mines_left: self.board.mines_left(),
            status: self.status,
            elapsed_secs: self.elapsed_secs(),
            score: self.score,
        }
    }

    /// Records the start stamp and moves Pending -> InProgress.
    fn mark_started(&mut self) {
        if self.status.is_pending() {
            let now = Utc::now();
            log::debug!("match started at {}", now);
            self.started_at = Some(now);
            self.status = MatchStatus::InProgress;
        }
    }

    /// Won iff every safe cell is open and no safe cell is flagged. Runs the
    /// post-win sweep and scoring when it holds.
    fn check_win(&mut self) -> Option<OpenOutcome> {
        if self.status != MatchStatus::InProgress || !self.board.is_cleared() {
            return None;
        }
        self.board.flag_mines();
        self.finish(true);
        Some(OpenOutcome::Won)
    }

    fn finish(&mut self, won: bool) {
        let now = Utc::now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.ended_at = Some(now);
        self.status = if won {
            MatchStatus::Won
        } else {
            MatchStatus::Lost
        };

        if won {
            let base = u32::from(self.board.mine_count()) * 100;
            let secs = self.elapsed_secs();
            self.score = Some(if secs == 0 { base } else { base / secs });
        }
        log::debug!("match ended at {}, status: {:?}", now, self.status);
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .field("status", &self.status)
            .field("first_move", &self.first_move)
            .field("score", &self.score)
            .finish_non_exhaustive()
    }
}

/// What a cell hides: a mine, or its adjacency count.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    Count(u8),
}

/// Read-only view of a single cell.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCell {
    pub content: CellContent,
    pub state: CellState,
}

/// Read-only view of the whole match, the sole surface the presentation
/// collaborator consumes. Cells are row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Vec<SnapshotCell>,
    pub mines_left: isize,
    pub status: MatchStatus,
    pub elapsed_secs: u32,
    pub score: Option<u32>,
}

impl Snapshot {
    pub fn cell(&self, (row, col): Coord2) -> &SnapshotCell {
        &self.cells[usize::from(row) * usize::from(self.size.1) + usize::from(col)]
    }
}
