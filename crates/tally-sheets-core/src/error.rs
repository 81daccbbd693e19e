//! Error types for tally-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while computing a sheet layout
#[derive(Debug, Error)]
pub enum Error {
    /// A column named in totals or classification input is not in the header.
    ///
    /// The message carries the full letter-to-name header map so the bad
    /// input can be debugged without re-running the build.
    #[error("column '{name}' was not found in the header map [{}]", .header.join(", "))]
    UnknownColumn {
        /// The offending column name
        name: String,
        /// Header map entries, one `LETTER=NAME` string per column
        header: Vec<String>,
    },

    /// Sheet name is empty or whitespace-only
    #[error("sheet name must not be empty")]
    EmptySheetName,

    /// A style directive address matched none of the three pattern forms
    #[error("unrecognized style address pattern: '{0}'")]
    InvalidStylePattern(String),

    /// Column letters could not be parsed
    #[error("invalid column letters: '{0}'")]
    InvalidColumnLetters(String),

    /// Cell address could not be parsed
    #[error("invalid cell address: '{0}'")]
    InvalidAddress(String),

    /// Chunk size must be at least one row
    #[error("chunk size must be >= 1, got {0}")]
    InvalidChunkSize(usize),

    /// Failure propagated from the workbook engine
    #[error("workbook engine error: {0}")]
    Engine(String),
}

impl Error {
    /// Build an [`Error::UnknownColumn`] from the offending name and the
    /// header's column names in sheet order.
    pub fn unknown_column<'a, I>(name: &str, header_names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Error::UnknownColumn {
            name: name.to_string(),
            header: header_names
                .into_iter()
                .enumerate()
                .map(|(i, n)| format!("{}={}", crate::column::column_letters(i as u32), n))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_column_message_dumps_header_map() {
        let err = Error::unknown_column("MISSING", ["CUSIP", "DATE", "ACTION"]);
        let msg = err.to_string();
        assert!(msg.contains("'MISSING'"));
        assert!(msg.contains("A=CUSIP"));
        assert!(msg.contains("B=DATE"));
        assert!(msg.contains("C=ACTION"));
    }
}
