use serde::{Deserialize, Serialize};

pub type Coord = usize;

/// A cell on the grid, addressed as `(row, column)` and indexed from zero.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug, Serialize, Deserialize)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    /// The `(row, column)` index of this location into a row-major [`ndarray::Array2`].
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.0, self.1)
    }

    /// Offset this location by `(rows, columns)`.
    ///
    /// Stepping off the top or left edge wraps to a huge coordinate, which every bounds check treats as off the grid.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a `size` by `size` grid.
    pub fn within(&self, size: Coord) -> bool {
        self.0 < size && self.1 < size
    }
}

impl From<(Coord, Coord)> for Location {
    fn from(value: (Coord, Coord)) -> Self {
        Self(value.0, value.1)
    }
}

/// A pointer position as resolved by the rendering side: either a grid cell or an explicit "off the grid" sentinel.
///
/// A [`Probe::Cell`] may still fall outside a particular board; the engine checks bounds itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Probe {
    /// The pointer is over this cell.
    Cell(Location),
    /// The pointer is outside the grid.
    OutOfBounds,
}

impl From<Location> for Probe {
    fn from(value: Location) -> Self {
        Self::Cell(value)
    }
}

impl From<Option<Location>> for Probe {
    fn from(value: Option<Location>) -> Self {
        value.map_or(Self::OutOfBounds, Self::Cell)
    }
}

impl Probe {
    /// Resolve signed coordinates, as handed over by hosts that use `-1` for "outside", into a probe.
    pub fn from_signed(row: i64, col: i64) -> Self {
        match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => Self::Cell(Location(row, col)),
            _ => Self::OutOfBounds,
        }
    }

    /// The cell this probe refers to, if it lies on a `size` by `size` grid.
    pub fn on_grid(self, size: Coord) -> Option<Location> {
        match self {
            Self::Cell(location) if location.within(size) => Some(location),
            _ => None,
        }
    }
}
