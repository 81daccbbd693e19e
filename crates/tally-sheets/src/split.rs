//! File-level sheet splitting
//!
//! Reads a sheet back out of a workbook, partitions its data rows into
//! fixed-size chunks, and writes one file per chunk with the source header
//! and sheet name re-attached.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use log::info;
use tally_sheets_core::{chunk_rows, Totals};
use tally_sheets_xlsx::reader::{sheet_name, sheet_to_array};
use tally_sheets_xlsx::SheetSelector;

use crate::build::{simple, SimpleOptions};
use crate::error::{BuildError, BuildResult};

/// Split one sheet of `path` into files of at most `max_rows` data rows.
///
/// The header row is excluded from the count and re-attached to every
/// chunk; chunk files land next to the source and run through the usual
/// collision policy. Returns the written paths in chunk order.
pub fn split_sheet<P: AsRef<Path>>(
    path: P,
    sheet_index: usize,
    max_rows: usize,
) -> BuildResult<Vec<PathBuf>> {
    let path = path.as_ref();
    let name = sheet_name(path, sheet_index)?;
    let grid = sheet_to_array(path, SheetSelector::Index(sheet_index))?;

    let Some((header_row, data)) = grid.split_first() else {
        return Ok(Vec::new());
    };
    let header: Vec<String> = header_row.iter().map(|v| v.to_string()).collect();
    let chunks = chunk_rows(&header, data, max_rows)?;

    let mut written = Vec::with_capacity(chunks.len());
    for (i, chunk) in chunks.into_iter().enumerate() {
        let dest = chunk_path(path, i)?;
        written.push(simple(chunk, Totals::new(), &name, dest, &SimpleOptions::default())?);
    }

    info!("split {} into {} file(s)", path.display(), written.len());
    Ok(written)
}

fn chunk_path(source: &Path, index: usize) -> BuildResult<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(OsStr::to_str)
        .ok_or_else(|| BuildError::PathFormat(source.to_path_buf()))?;

    let file_name = match source.extension().and_then(OsStr::to_str) {
        Some(ext) => format!("{stem}_split{index}.{ext}"),
        None => format!("{stem}_split{index}"),
    };
    Ok(source.with_file_name(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_paths_are_siblings() {
        let path = chunk_path(Path::new("/tmp/trades.xlsx"), 1).unwrap();
        assert_eq!(path, Path::new("/tmp/trades_split1.xlsx"));
    }
}
