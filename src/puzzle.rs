use crate::error::InvalidReason;
use crate::location::Coord;
use crate::pair::{PairId, PuzzlePair};

/// An immutable puzzle description: a square grid and the pairs to connect on it.
///
/// Definitions are produced by a [`PuzzleBuilder`](crate::builder::PuzzleBuilder), usually through the
/// [`loader`](crate::loader). A definition is always produced, even for broken input; check
/// [`is_valid`](Self::is_valid) or let [`Board::new`](crate::Board::new) refuse it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleDefinition {
    pub(crate) name: String,
    pub(crate) file_name: Option<String>,
    pub(crate) size: Coord,
    pub(crate) pairs: Vec<PuzzlePair>,
    pub(crate) invalid_reasons: Vec<InvalidReason>,
}

impl PuzzleDefinition {
    /// A definition that failed before its size was known.
    pub(crate) fn rejected(name: impl Into<String>, reason: InvalidReason) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            size: 0,
            pairs: Vec::new(),
            invalid_reasons: vec![reason],
        }
    }

    /// Display name of the puzzle.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The file this definition was loaded from, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Number of rows (and columns) of the grid.
    pub fn size(&self) -> Coord {
        self.size
    }

    /// All pairs, ordered by id.
    pub fn pairs(&self) -> &[PuzzlePair] {
        &self.pairs
    }

    /// The pair with id `id`.
    pub fn pair(&self, id: PairId) -> Option<&PuzzlePair> {
        self.pairs.get(id)
    }

    /// Whether this definition may be played.
    pub fn is_valid(&self) -> bool {
        self.invalid_reasons.is_empty()
    }

    /// Why this definition is invalid; empty when it is valid.
    pub fn invalid_reasons(&self) -> &[InvalidReason] {
        &self.invalid_reasons
    }
}
