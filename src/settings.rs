use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TraceError;

/// User preferences around the engine, stored as TOML.
///
/// Nothing here affects how strokes are traced; settings are handed to renderers and front ends explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Draw pairs in shades of gray instead of distinct hues.
    pub reduced_color: bool,
    /// Where puzzle files are looked up.
    pub puzzle_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_color: false,
            puzzle_dir: PathBuf::from("puzzles"),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text; missing keys take their default values.
    pub fn from_toml(text: &str) -> Result<Self, TraceError> {
        Ok(toml::from_str(text)?)
    }

    /// Read settings from `path`, falling back to the defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        match fs::read_to_string(path.as_ref()) {
            Ok(text) => Self::from_toml(&text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.as_ref().display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Write these settings to `path` as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TraceError> {
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }
}
