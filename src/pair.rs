use unordered_pair::UnorderedPair;

use crate::location::Location;

/// Dense identifier of a pair, assigned in load order starting at 0.
pub type PairId = usize;

/// Two endpoint cells which must be joined by a path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PuzzlePair {
    pub(crate) id: PairId,
    pub(crate) display: char,
    pub(crate) endpoints: UnorderedPair<Location>,
}

impl PuzzlePair {
    /// The identifier of this pair.
    pub fn id(&self) -> PairId {
        self.id
    }

    /// The character used to print this pair.
    pub fn display(&self) -> char {
        self.display
    }

    /// Both endpoints, in the order they were declared.
    pub fn endpoints(&self) -> (Location, Location) {
        (self.endpoints.0, self.endpoints.1)
    }

    /// Whether `location` is one of this pair's endpoints.
    pub fn is_endpoint(&self, location: Location) -> bool {
        self.endpoints.0 == location || self.endpoints.1 == location
    }

    /// Whether `path` joins both endpoints of this pair, in either direction.
    pub(crate) fn joined_by(&self, path: &[Location]) -> bool {
        path.contains(&self.endpoints.0) && path.contains(&self.endpoints.1)
    }
}

const DISPLAY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The default display character for the pair with id `id`, cycling through the alphabet.
pub(crate) fn display_for(id: PairId) -> char {
    DISPLAY_ALPHABET[id % DISPLAY_ALPHABET.len()] as char
}
