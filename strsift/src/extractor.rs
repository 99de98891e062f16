//! Extraction of printable strings from a file.

use std::io;
use std::path::Path;
use std::process::Command;

/// A source of printable strings extracted from a file.
///
/// The production implementation shells out to an external program. This
/// seam exists so the rest of the pipeline can run against canned strings
/// in tests, without invoking any real tool.
pub trait StringExtractor {
    /// Extract the ordered list of printable strings found in `path`.
    fn extract(&self, path: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Extractor invoking an external `strings`-like program.
///
/// The program is expected to print one extracted string per line on its
/// standard output, and to exit with a non-zero status when it cannot
/// handle the given file.
#[derive(Debug, Clone)]
pub struct StringsTool {
    program: String,
}

impl StringsTool {
    /// Use the `strings` program found on the PATH.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program("strings")
    }

    /// Use a specific line-producing program instead of `strings`.
    #[must_use]
    pub fn with_program<S: Into<String>>(program: S) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Name of the program this extractor invokes.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for StringsTool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringExtractor for StringsTool {
    fn extract(&self, path: &Path) -> Result<Vec<String>, ExtractError> {
        let output = Command::new(&self.program)
            .arg(path)
            .output()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    ExtractError::ProgramNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    ExtractError::Io(err)
                }
            })?;

        if !output.status.success() {
            return Err(ExtractError::ProgramFailed {
                program: self.program.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::to_owned)
            .collect())
    }
}

/// Error while extracting strings from a file.
#[derive(Debug)]
pub enum ExtractError {
    /// The extraction program is not installed or not on the PATH.
    ProgramNotFound {
        /// Name of the program that could not be found.
        program: String,
    },
    /// The extraction program ran but reported a failure for the file.
    ProgramFailed {
        /// Name of the program that was invoked.
        program: String,
        /// What the program printed on its standard error.
        stderr: String,
    },
    /// The extraction program could not be invoked.
    Io(io::Error),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProgramNotFound { program } => {
                write!(f, "`{program}` not found, make sure it is installed")
            }
            Self::ProgramFailed { program, stderr } => {
                if stderr.is_empty() {
                    write!(f, "`{program}` failed")
                } else {
                    write!(f, "`{program}` failed: {stderr}")
                }
            }
            Self::Io(err) => write!(f, "cannot invoke extraction program: {err}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::ProgramNotFound { .. } | Self::ProgramFailed { .. } => None,
        }
    }
}
