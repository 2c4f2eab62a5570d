use ndarray::Array2;
use unordered_pair::UnorderedPair;

use crate::error::InvalidReason;
use crate::location::{Coord, Location};
use crate::pair::{PairId, PuzzlePair};
use crate::puzzle::PuzzleDefinition;

/// Smallest playable grid dimension.
pub const MIN_SIZE: Coord = 5;
/// Largest playable grid dimension.
pub const MAX_SIZE: Coord = 14;

/// A builder for square puzzle definitions.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// The first problem encountered is recorded and every later addition is ignored;
/// [`build`](Self::build) always yields a definition, carrying that reason if there was one.
#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    name: String,
    file_name: Option<String>,
    size: Coord,
    // endpoint owners; empty when the size itself is unusable
    cells: Array2<Option<PairId>>,
    pairs: Vec<PuzzlePair>,
    invalid_reasons: Vec<InvalidReason>,
}

impl PuzzleBuilder {
    /// Construct a new builder for a `size` by `size` grid.
    ///
    /// Enters a [`SizeOutOfRange`](InvalidReason::SizeOutOfRange) invalid state unless `MIN_SIZE <= size <= MAX_SIZE`.
    pub fn with_size(name: impl Into<String>, size: Coord) -> Self {
        let in_range = (MIN_SIZE..=MAX_SIZE).contains(&size);

        Self {
            name: name.into(),
            file_name: None,
            size,
            cells: if in_range { Array2::from_elem((size, size), None) } else { Array2::from_elem((0, 0), None) },
            pairs: Default::default(),
            invalid_reasons: if in_range { Vec::new() } else { vec![InvalidReason::SizeOutOfRange(size)] },
        }
    }

    /// Remember the file this puzzle came from.
    pub fn file_name(&mut self, file_name: impl Into<String>) -> &mut Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Add a pair of endpoints. The order in which `locations` are specified does not matter.
    ///
    /// May cause the builder to enter an invalid state if either location is off the grid, if both locations are the
    /// same cell, or if another pair already has an endpoint at either location.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_pair(&mut self, display: char, locations: (Location, Location)) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !location.within(self.size) {
                self.invalid_reasons.push(InvalidReason::EndpointOutOfBounds(location));
                return self;
            }
        }

        if locations.0 == locations.1 {
            self.invalid_reasons.push(InvalidReason::DegenerateEndpoints(locations.0));
            return self;
        }

        for location in [locations.0, locations.1] {
            if let Some(owner) = self.cells[location.as_index()] {
                self.invalid_reasons.push(InvalidReason::SharedEndpoint { location, owner });
                return self;
            }
        }

        let id = self.pairs.len();
        for location in [locations.0, locations.1] {
            self.cells[location.as_index()] = Some(id);
        }
        self.pairs.push(PuzzlePair {
            id,
            display,
            endpoints: UnorderedPair::from(locations),
        });

        self
    }

    /// Mark the builder invalid for a reason found outside of it, e.g. by a document parser.
    ///
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn reject(&mut self, reason: InvalidReason) -> &mut Self {
        if self.invalid_reasons.is_empty() {
            self.invalid_reasons.push(reason);
        }

        self
    }

    /// Number of pairs added so far.
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Check the validity of this builder.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<InvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<InvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`PuzzleDefinition`], valid or not.
    pub fn build(&self) -> PuzzleDefinition {
        PuzzleDefinition {
            name: self.name.clone(),
            file_name: self.file_name.clone(),
            size: self.size,
            pairs: self.pairs.clone(),
            invalid_reasons: self.invalid_reasons.clone(),
        }
    }
}
