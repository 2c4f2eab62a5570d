use crate::location::Location;
use crate::pair::PairId;

/// A finished stroke, kept so it can be taken back with [`Board::undo`](crate::Board::undo).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Move {
    /// The pair that was drawn.
    pub pair: PairId,
    /// Its path once the stroke was over.
    pub path: Vec<Location>,
    /// Its path just before the stroke began.
    pub previous: Vec<Location>,
}
