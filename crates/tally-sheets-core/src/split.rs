//! Chunked sheet splitting
//!
//! Pure partitioning: a rectangular grid of data rows is cut into
//! consecutive chunks of at most `max_rows` rows, and the source header's
//! column names are re-attached to each chunk row positionally. Writing
//! each chunk out is the caller's concern.

use crate::error::{Error, Result};
use crate::row::{Row, Scalar};

/// Partition data rows into header-keyed chunks.
///
/// `header` supplies the column names; `data` holds the rows (header
/// excluded). Row `j`'s positional value `k` gets key `header[k]`. A
/// dataset with `N` rows and chunk size `k` yields `ceil(N/k)` chunks, the
/// last possibly smaller, original order preserved.
///
/// # Examples
/// ```
/// use tally_sheets_core::{chunk_rows, Scalar};
///
/// let header = vec!["A".to_string(), "B".to_string()];
/// let data: Vec<Vec<Scalar>> = (0..10)
///     .map(|i| vec![Scalar::Number(i as f64), Scalar::Null])
///     .collect();
///
/// let chunks = chunk_rows(&header, &data, 6).unwrap();
/// assert_eq!(chunks.len(), 2);
/// assert_eq!((chunks[0].len(), chunks[1].len()), (6, 4));
/// ```
pub fn chunk_rows(
    header: &[String],
    data: &[Vec<Scalar>],
    max_rows: usize,
) -> Result<Vec<Vec<Row>>> {
    if max_rows == 0 {
        return Err(Error::InvalidChunkSize(max_rows));
    }

    Ok(data
        .chunks(max_rows)
        .map(|chunk| chunk.iter().map(|values| keyed_row(header, values)).collect())
        .collect())
}

fn keyed_row(header: &[String], values: &[Scalar]) -> Row {
    header
        .iter()
        .zip(values.iter())
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
