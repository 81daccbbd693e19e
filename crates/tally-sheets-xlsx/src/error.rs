//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors that can occur while writing or reading workbooks
///
/// IO failures stay a distinct kind from configuration errors so callers
/// can tell "fix your environment" apart from "fix your input".
#[derive(Debug, Error)]
pub enum XlsxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Write-side engine error
    #[error("workbook write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// Read-side error
    #[error("workbook read error: {0}")]
    Read(#[from] calamine::XlsxError),

    /// Sheet not found by name
    #[error("sheet not found: {0}")]
    SheetNotFound(String),

    /// Sheet index out of bounds
    #[error("sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    /// Core error
    #[error("core error: {0}")]
    Core(#[from] tally_sheets_core::Error),
}
