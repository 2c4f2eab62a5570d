use itertools::Itertools;

use crate::location::{Coord, Location};
use crate::pair::PairId;

/// Reasons a puzzle definition may be invalid.
///
/// A definition carrying any of these must never be turned into a [`Board`](crate::Board).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReason {
    /// The document is not well-formed XML.
    #[error("malformed document: {0}")]
    Syntax(String),
    /// The document could not be read at all.
    #[error("unreadable file: {0}")]
    Unreadable(String),
    /// The root element is not `<puzzle>`.
    #[error("root element is <{0}>, expected <puzzle>")]
    NotAPuzzle(String),
    /// The root element has no `size` attribute.
    #[error("missing size attribute")]
    MissingSize,
    /// The `size` attribute is not an integer.
    #[error("size {0:?} is not an integer")]
    UnparseableSize(String),
    /// The grid dimension is outside the playable range.
    #[error("size {0} is outside 5..=14")]
    SizeOutOfRange(Coord),
    /// A point lacks a coordinate or carries a coordinate which is not an integer.
    #[error("pair {pair} has a malformed point")]
    MalformedPoint {
        /// Position of the offending pair in the document.
        pair: usize,
    },
    /// A pair element does not contain exactly two well-formed points.
    #[error("pair {pair} has {points} usable points, expected 2")]
    MalformedPair {
        /// Position of the offending pair in the document.
        pair: usize,
        /// How many usable points it had.
        points: usize,
    },
    /// An endpoint lies outside the grid.
    #[error("endpoint {0:?} is outside the grid")]
    EndpointOutOfBounds(Location),
    /// Both endpoints of one pair are the same cell.
    #[error("both endpoints of a pair are {0:?}")]
    DegenerateEndpoints(Location),
    /// Two pairs claim the same endpoint cell.
    #[error("endpoint {location:?} is already taken by pair {owner}")]
    SharedEndpoint {
        /// The contested cell.
        location: Location,
        /// The pair declared first at that cell.
        owner: PairId,
    },
}

/// Reasons a [`Snapshot`](crate::Snapshot) cannot be restored into a [`Board`](crate::Board).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    /// The saved pair list does not describe a valid puzzle.
    #[error("saved pairs are invalid: {}", .0.iter().join("; "))]
    Definition(Vec<InvalidReason>),
    /// The flat grid does not hold `size * size` cells.
    #[error("grid holds {found} cells, expected {expected}")]
    GridShape {
        /// `size * size`.
        expected: usize,
        /// What the snapshot held.
        found: usize,
    },
    /// A grid cell or path names a pair that does not exist.
    #[error("unknown pair {0}")]
    UnknownPair(PairId),
    /// A path visits a cell outside the grid.
    #[error("path of pair {pair} leaves the grid at {location:?}")]
    OffGrid {
        /// The pair whose path is broken.
        pair: PairId,
        /// The offending cell.
        location: Location,
    },
    /// A path does not start at one of its pair's endpoints.
    #[error("path of pair {0} does not start at an endpoint")]
    Unanchored(PairId),
    /// Two consecutive path cells are not neighbors.
    #[error("path of pair {pair} jumps from {from:?} to {to:?}")]
    Disjoint {
        /// The pair whose path is broken.
        pair: PairId,
        /// Last cell before the jump.
        from: Location,
        /// First cell after the jump.
        to: Location,
    },
    /// A path visits the same cell twice.
    #[error("path of pair {pair} revisits {location:?}")]
    Revisit {
        /// The pair whose path is broken.
        pair: PairId,
        /// The repeated cell.
        location: Location,
    },
    /// The saved `finished` flag contradicts whether the saved paths connect every pair.
    #[error("snapshot says finished is {finished}, but its paths say otherwise")]
    FinishedMismatch {
        /// The flag as saved.
        finished: bool,
    },
    /// A grid cell and the paths disagree on who owns it.
    #[error("cell {0:?} is not owned consistently by the grid and the paths")]
    Ownership(Location),
}

/// Errors surfaced by the fallible operations around the engine.
///
/// Stroke handling itself never fails; see [`Board`](crate::Board).
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// A board was requested for an invalid definition.
    #[error("puzzle {name:?} is invalid: {}", .reasons.iter().join("; "))]
    InvalidPuzzle {
        /// Display name of the rejected puzzle.
        name: String,
        /// Why it was rejected.
        reasons: Vec<InvalidReason>,
    },
    /// A snapshot failed validation.
    #[error("cannot restore snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    /// Filesystem access failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// A snapshot could not be encoded or decoded.
    #[error("snapshot encoding: {0}")]
    Json(#[from] serde_json::Error),
    /// A settings file could not be parsed.
    #[error("settings: {0}")]
    SettingsRead(#[from] toml::de::Error),
    /// Settings could not be encoded.
    #[error("settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),
}
