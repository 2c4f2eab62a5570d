//! Reading puzzle definitions from XML documents.
//!
//! A document looks like this:
//!
//! ```xml
//! <puzzle size="5" nom="First steps">
//!     <paire>
//!         <point ligne="0" colonne="0"/>
//!         <point ligne="0" colonne="4"/>
//!     </paire>
//! </puzzle>
//! ```
//!
//! `nom` is optional and defaults to the file name without its extension. Loading never fails: any problem yields a
//! definition which is not [valid](PuzzleDefinition::is_valid) and says why.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node};
use tracing::{debug, warn};

use crate::builder::PuzzleBuilder;
use crate::error::InvalidReason;
use crate::location::{Coord, Location};
use crate::pair::display_for;
use crate::puzzle::PuzzleDefinition;

const ROOT_TAG: &str = "puzzle";
const NAME_ATTR: &str = "nom";
const SIZE_ATTR: &str = "size";
const PAIR_TAG: &str = "paire";
const POINT_TAG: &str = "point";
const ROW_ATTR: &str = "ligne";
const COL_ATTR: &str = "colonne";

/// The name a puzzle gets when its document does not carry one.
fn fallback_name(file_name: &str) -> &str {
    file_name.strip_suffix(".xml").unwrap_or(file_name)
}

/// Parse the document `text`, which was read from `file_name`.
pub fn parse_puzzle(file_name: &str, text: &str) -> PuzzleDefinition {
    let definition = parse_document(file_name, text);
    if let Some(reason) = definition.invalid_reasons().first() {
        warn!(file_name, %reason, "invalid puzzle definition");
    } else {
        debug!(file_name, name = definition.name(), pairs = definition.pairs().len(), "puzzle loaded");
    }

    definition
}

/// Read and parse the document at `path`.
///
/// An unreadable file yields an invalid definition named after the file.
pub fn load_puzzle(path: impl AsRef<Path>) -> PuzzleDefinition {
    let path = path.as_ref();
    let file_name = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();

    match fs::read_to_string(path) {
        Ok(text) => parse_puzzle(&file_name, &text),
        Err(err) => {
            warn!(path = %path.display(), %err, "cannot read puzzle file");
            let mut definition = PuzzleDefinition::rejected(fallback_name(&file_name), InvalidReason::Unreadable(err.to_string()));
            definition.file_name = Some(file_name);
            definition
        }
    }
}

fn parse_document(file_name: &str, text: &str) -> PuzzleDefinition {
    let rejected = |reason: InvalidReason| {
        let mut definition = PuzzleDefinition::rejected(fallback_name(file_name), reason);
        definition.file_name = Some(file_name.to_owned());
        definition
    };

    let document = match Document::parse(text) {
        Ok(document) => document,
        Err(err) => return rejected(InvalidReason::Syntax(err.to_string())),
    };

    let root = document.root_element();
    if !root.has_tag_name(ROOT_TAG) {
        return rejected(InvalidReason::NotAPuzzle(root.tag_name().name().to_owned()));
    }

    let size = match root.attribute(SIZE_ATTR).map(|raw| (raw, raw.trim().parse::<Coord>())) {
        None => return rejected(InvalidReason::MissingSize),
        Some((raw, Err(_))) => return rejected(InvalidReason::UnparseableSize(raw.to_owned())),
        Some((_, Ok(size))) => size,
    };

    let name = root.attribute(NAME_ATTR).unwrap_or_else(|| fallback_name(file_name));
    let mut builder = PuzzleBuilder::with_size(name, size);
    builder.file_name(file_name);

    for (index, pair) in root.children().filter(|node| node.has_tag_name(PAIR_TAG)).enumerate() {
        match read_points(pair) {
            None => {
                builder.reject(InvalidReason::MalformedPoint { pair: index });
            }
            Some(points) => match points.as_slice() {
                [a, b] => {
                    let display = display_for(builder.pair_count());
                    builder.add_pair(display, (*a, *b));
                }
                _ => {
                    builder.reject(InvalidReason::MalformedPair { pair: index, points: points.len() });
                }
            },
        }
    }

    builder.build()
}

// every <point> child of a <paire>, or None if any of them is malformed
fn read_points(pair: Node<'_, '_>) -> Option<Vec<Location>> {
    pair.children()
        .filter(|node| node.has_tag_name(POINT_TAG))
        .map(|point| {
            let coord = |attr: &str| point.attribute(attr).and_then(|raw| raw.trim().parse::<Coord>().ok());
            Some(Location(coord(ROW_ATTR)?, coord(COL_ATTR)?))
        })
        .collect()
}
