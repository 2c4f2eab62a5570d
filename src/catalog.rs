use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use tracing::debug;

use crate::error::TraceError;
use crate::loader::load_puzzle;
use crate::puzzle::PuzzleDefinition;

/// One puzzle file found by [`scan`].
#[derive(Clone, Debug)]
pub struct CatalogEntry {
    /// Where the file lives.
    pub path: PathBuf,
    /// What it describes; check [`PuzzleDefinition::is_valid`] before playing it.
    pub definition: PuzzleDefinition,
}

/// Load every `.xml` file directly inside `dir`, ordered by file name.
///
/// Invalid puzzles are listed too, so a menu can show them and refuse to open them.
/// Fails only if `dir` itself cannot be listed.
pub fn scan(dir: impl AsRef<Path>) -> Result<Vec<CatalogEntry>, TraceError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml")) {
            paths.push(path);
        }
    }

    let entries = paths.into_iter()
        .sorted()
        .map(|path| CatalogEntry { definition: load_puzzle(&path), path })
        .collect_vec();

    debug!(
        dir = %dir.as_ref().display(),
        found = entries.len(),
        playable = entries.iter().filter(|entry| entry.definition.is_valid()).count(),
        "catalog scanned"
    );

    Ok(entries)
}
