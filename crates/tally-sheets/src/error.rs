//! Build error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`BuildError`]
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// Errors from the top-level build surface
///
/// Configuration problems ("fix your input") and workbook/IO problems
/// ("fix your environment") stay distinct, catchable kinds.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Bad input: unknown column, empty sheet name, malformed style pattern
    #[error(transparent)]
    Config(#[from] tally_sheets_core::Error),

    /// Workbook write/read failure, including IO
    #[error(transparent)]
    Workbook(#[from] tally_sheets_xlsx::XlsxError),

    /// Path-uniquing could not derive a usable substitute path
    #[error("could not derive a unique output path for '{}'", .0.display())]
    PathFormat(PathBuf),
}

impl BuildError {
    /// Check if this error is an IO failure
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            BuildError::Workbook(tally_sheets_xlsx::XlsxError::Io(_))
        )
    }
}
