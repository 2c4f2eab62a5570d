use std::collections::{BTreeMap, HashSet};

use itertools::Itertools;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::Board;
use crate::builder::PuzzleBuilder;
use crate::error::{SnapshotError, TraceError};
use crate::location::{Coord, Location};
use crate::pair::{PairId, PuzzlePair};
use crate::shape::{BoardShape, SquareStep};

/// A saved pair, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPair {
    /// Character the pair prints as.
    pub display: char,
    /// Both endpoints.
    pub endpoints: [Location; 2],
}

/// Everything needed to resume a board later: the pairs, the occupation of every cell, every path and whether the
/// puzzle was finished.
///
/// Strokes in progress, the undo history and any collaborators are not part of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name of the puzzle.
    pub name: String,
    /// File the puzzle came from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Cells per side.
    pub size: Coord,
    /// Pairs, indexed by id.
    pub pairs: Vec<SavedPair>,
    /// Occupation of every cell in row-major order.
    pub grid: Vec<Option<PairId>>,
    /// Path of every pair which has one.
    pub paths: BTreeMap<PairId, Vec<Location>>,
    /// Whether the puzzle was solved.
    pub finished: bool,
}

impl Snapshot {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, TraceError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode from JSON. The result is not validated until it is [restored](Board::restore).
    pub fn from_json(text: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Board {
    /// Capture the current state. A stroke in progress is saved as drawn so far.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            name: self.puzzle.name.clone(),
            file_name: self.puzzle.file_name.clone(),
            size: self.puzzle.size,
            pairs: self.puzzle.pairs.iter()
                .map(|pair| {
                    let (a, b) = pair.endpoints();
                    SavedPair { display: pair.display, endpoints: [a, b] }
                })
                .collect_vec(),
            grid: self.grid.iter().copied().collect_vec(),
            paths: self.paths.iter()
                .enumerate()
                .filter(|(_, path)| !path.is_empty())
                .map(|(pair, path)| (pair, path.clone()))
                .collect(),
            finished: self.finished,
        }
    }

    /// Rebuild a board from `snapshot`, idle and with an empty history.
    ///
    /// The whole snapshot is checked against the same invariants a live board keeps; any inconsistency is reported as
    /// a [`SnapshotError`] rather than producing a board in an impossible state.
    pub fn restore(snapshot: Snapshot) -> Result<Self, TraceError> {
        let mut builder = PuzzleBuilder::with_size(snapshot.name, snapshot.size);
        if let Some(file_name) = snapshot.file_name {
            builder.file_name(file_name);
        }
        for pair in &snapshot.pairs {
            builder.add_pair(pair.display, (pair.endpoints[0], pair.endpoints[1]));
        }
        if let Some(reasons) = builder.is_valid() {
            return Err(SnapshotError::Definition(reasons.clone()).into());
        }
        let puzzle = builder.build();

        let size = puzzle.size;
        let found = snapshot.grid.len();
        let grid = Array2::from_shape_vec((size, size), snapshot.grid)
            .map_err(|_| SnapshotError::GridShape { expected: size * size, found })?;

        let mut paths = vec![Vec::new(); puzzle.pairs.len()];
        for (pair, path) in snapshot.paths {
            let slot = paths.get_mut(pair).ok_or(SnapshotError::UnknownPair(pair))?;
            *slot = path;
        }

        for ((row, col), occupant) in grid.indexed_iter() {
            if let Some(pair) = occupant {
                if *pair >= puzzle.pairs.len() {
                    return Err(SnapshotError::UnknownPair(*pair).into());
                }
            }
            // endpoints stay with their pair no matter what
            if let Some(owner) = puzzle.pairs.iter().find(|pair| pair.is_endpoint(Location(row, col))) {
                if *occupant != Some(owner.id) {
                    return Err(SnapshotError::Ownership(Location(row, col)).into());
                }
            }
        }

        let mut on_paths = HashSet::new();
        for (pair, path) in paths.iter().enumerate() {
            check_path(&puzzle.pairs[pair], path, size)?;
            for location in path {
                if grid[location.as_index()] != Some(pair) {
                    return Err(SnapshotError::Ownership(*location).into());
                }
                on_paths.insert(*location);
            }
        }

        // a claimed cell off every path would be unreachable by any stroke
        for ((row, col), occupant) in grid.indexed_iter() {
            let location = Location(row, col);
            if let Some(pair) = occupant {
                if !puzzle.pairs[*pair].is_endpoint(location) && !on_paths.contains(&location) {
                    return Err(SnapshotError::Ownership(location).into());
                }
            }
        }

        // only a solved board is ever finished, and a solved board always is unless it has no pairs
        let solved = puzzle.pairs.iter().all(|pair| pair.joined_by(&paths[pair.id]));
        if snapshot.finished != solved && (snapshot.finished || !puzzle.pairs.is_empty()) {
            return Err(SnapshotError::FinishedMismatch { finished: snapshot.finished }.into());
        }

        debug!(name = %puzzle.name, finished = snapshot.finished, "snapshot restored");
        Ok(Board::from_parts(puzzle, grid, paths, snapshot.finished))
    }
}

fn check_path(pair: &PuzzlePair, path: &[Location], size: Coord) -> Result<(), SnapshotError> {
    let Some(first) = path.first() else {
        return Ok(());
    };

    if let Some(location) = path.iter().find(|location| !location.within(size)) {
        return Err(SnapshotError::OffGrid { pair: pair.id, location: *location });
    }
    if !pair.is_endpoint(*first) {
        return Err(SnapshotError::Unanchored(pair.id));
    }
    if let Some((from, to)) = path.iter().tuple_windows().find(|(from, to)| !SquareStep::adjacent(**from, **to)) {
        return Err(SnapshotError::Disjoint { pair: pair.id, from: *from, to: *to });
    }
    if let Some(location) = path.iter().duplicates().next() {
        return Err(SnapshotError::Revisit { pair: pair.id, location: *location });
    }

    Ok(())
}
