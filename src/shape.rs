use std::hash::Hash;

use strum::VariantArray;

use crate::location::Location;

/// Functionality that must be implemented on a case-by-case basis for any cell geometry.
///
/// [`SquareStep`] is the only built-in implementation; paths move between orthogonal neighbors.
pub trait Step: Sized + Copy + VariantArray + PartialEq + Eq + Hash + Ord + PartialOrd {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    fn attempt_from(&self, location: Location) -> Location;
}

/// The four orthogonal steps on a square grid.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Towards row 0.
    Up,
    /// Away from row 0.
    Down,
    /// Towards column 0.
    Left,
    /// Away from column 0.
    Right,
}

impl Step for SquareStep {
    fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
            Self::Right => location.offset_by((0, 1)),
        }
    }
}

/// Functionality on top of [`Step`] with identical implementation for every geometry.
pub trait BoardShape: Step {
    /// Determine the direction from `a` to `b` by calling [`attempt_from`](Step::attempt_from) until one works.
    ///
    /// Returns [`None`] unless the two locations are neighbors.
    fn direction_to(a: Location, b: Location) -> Option<Self>;
    /// Whether `a` and `b` are neighbors.
    fn adjacent(a: Location, b: Location) -> bool {
        Self::direction_to(a, b).is_some()
    }
}

impl<Sh> BoardShape for Sh
where
    Sh: Step,
{
    fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }
}
