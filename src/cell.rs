use crate::pair::PairId;

/// What a single grid cell shows, frozen for output or printing.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum CellView {
    /// One of the two fixed endpoints of `pair`.
    Terminus {
        /// Owner of the endpoint.
        pair: PairId,
    },
    /// A cell claimed by the path of `pair`.
    Path {
        /// Owner of the path.
        pair: PairId,
    },
    /// Nothing here.
    #[default]
    Empty,
}

impl CellView {
    /// The pair owning this cell, if any.
    pub fn pair(&self) -> Option<PairId> {
        match self {
            Self::Terminus { pair } | Self::Path { pair } => Some(*pair),
            Self::Empty => None,
        }
    }
}
