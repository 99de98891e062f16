//! Loading of the pattern specification file.
//!
//! The file is a JSON object whose keys are pattern-group names and whose
//! values are either a single regex string or an array of regex strings.
//! Key order in the file is the processing order.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

/// The regexes attached to one pattern group.
///
/// The two JSON shapes are resolved once at load time; downstream code
/// always iterates [`PatternValue::patterns`], of length 1 for the scalar
/// case.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PatternValue {
    /// A single regex.
    Single(String),
    /// An ordered list of regexes, evaluated independently.
    Many(Vec<String>),
}

impl PatternValue {
    /// The regexes in evaluation order.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        match self {
            Self::Single(pattern) => std::slice::from_ref(pattern),
            Self::Many(list) => list,
        }
    }

    /// Whether the group was declared as an array in the file.
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

/// One named entry of the pattern file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternGroup {
    /// The group name, i.e. the JSON key.
    pub name: String,
    /// The regexes under that key.
    pub patterns: PatternValue,
}

/// Load the pattern groups from a JSON file, preserving file order.
///
/// # Errors
///
/// Fails if the file cannot be read, is not valid JSON, is not a JSON
/// object, or holds a value that is neither a string nor an array of
/// strings.
pub fn load_pattern_file(path: &Path) -> Result<Vec<PatternGroup>, LoadError> {
    let contents = fs::read_to_string(path).map_err(LoadError::Io)?;
    parse_patterns(&contents)
}

/// Parse pattern groups out of a JSON document.
///
/// # Errors
///
/// Same contract as [`load_pattern_file`], minus the I/O.
pub fn parse_patterns(contents: &str) -> Result<Vec<PatternGroup>, LoadError> {
    let object: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(contents).map_err(LoadError::Json)?;

    object
        .into_iter()
        .map(|(name, value)| match serde_json::from_value(value) {
            Ok(patterns) => Ok(PatternGroup { name, patterns }),
            Err(_) => Err(LoadError::InvalidShape { key: name }),
        })
        .collect()
}

/// Error while loading the pattern file.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not valid JSON, or not a JSON object.
    Json(serde_json::Error),
    /// A key holds something that is neither a regex string nor an array
    /// of regex strings.
    InvalidShape {
        /// The offending key.
        key: String,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read file: {err}"),
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::InvalidShape { key } => write!(
                f,
                "key `{key}` must hold a regex string or an array of regex strings"
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::InvalidShape { .. } => None,
        }
    }
}
