use crate::*;
pub use random::*;

mod random;

/// Mine placement strategy, swappable so tests can pin exact layouts.
///
/// Implementations work through the board's generation seam ([`Board::clear`],
/// [`Board::place_mine`], [`Board::finish_generation`]) and must leave exactly
/// `mine_count` mines with the safe cell mine-free.
pub trait BoardGenerator: std::fmt::Debug {
    fn generate(&mut self, board: &mut Board, safe: Coord2);
}
