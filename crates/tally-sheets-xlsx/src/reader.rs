//! Workbook reading via calamine
//!
//! The read-back half of the engine contract: sheets come back as 2D
//! scalar arrays in physical row order, plus sheet-name enumeration and
//! line counting.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use tally_sheets_core::Scalar;

use crate::error::{XlsxError, XlsxResult};

/// How to pick a sheet out of a workbook
#[derive(Debug, Clone, Copy)]
pub enum SheetSelector<'a> {
    /// By 0-based position
    Index(usize),
    /// By name
    Name(&'a str),
}

fn open(path: &Path) -> XlsxResult<Xlsx<BufReader<File>>> {
    Ok(open_workbook(path)?)
}

/// Read one sheet into a 2D scalar array
pub fn sheet_to_array(path: &Path, selector: SheetSelector<'_>) -> XlsxResult<Vec<Vec<Scalar>>> {
    let mut workbook = open(path)?;
    let range = match selector {
        SheetSelector::Index(index) => workbook
            .worksheet_range_at(index)
            .ok_or_else(|| XlsxError::SheetOutOfBounds(index, workbook.sheet_names().len()))??,
        SheetSelector::Name(name) => workbook
            .worksheet_range(name)
            .map_err(|_| XlsxError::SheetNotFound(name.to_string()))?,
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(scalar_from).collect())
        .collect())
}

/// Ordered sheet names of a workbook
pub fn sheet_names(path: &Path) -> XlsxResult<Vec<String>> {
    Ok(open(path)?.sheet_names().to_vec())
}

/// The name of the sheet at `index`
pub fn sheet_name(path: &Path, index: usize) -> XlsxResult<String> {
    let names = sheet_names(path)?;
    names
        .get(index)
        .cloned()
        .ok_or(XlsxError::SheetOutOfBounds(index, names.len()))
}

/// The position of the named sheet; not finding it is an error
pub fn sheet_index_by_name(path: &Path, name: &str) -> XlsxResult<usize> {
    sheet_names(path)?
        .iter()
        .position(|n| n == name)
        .ok_or_else(|| XlsxError::SheetNotFound(name.to_string()))
}

/// Number of lines in a sheet.
///
/// A sheet whose whole content is a single empty cell counts as zero
/// lines, not one.
pub fn num_lines(path: &Path, sheet_index: usize) -> XlsxResult<usize> {
    let grid = sheet_to_array(path, SheetSelector::Index(sheet_index))?;
    if grid.len() == 1 && grid[0].len() == 1 && grid[0][0].is_null() {
        return Ok(0);
    }
    Ok(grid.len())
}

fn scalar_from(data: &Data) -> Scalar {
    match data {
        Data::Empty => Scalar::Null,
        Data::String(s) => Scalar::Text(s.clone()),
        Data::Float(f) => Scalar::Number(*f),
        Data::Int(i) => Scalar::Number(*i as f64),
        Data::Bool(b) => Scalar::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Scalar::Number(dt.as_f64()),
        Data::DateTimeIso(s) => Scalar::Text(s.clone()),
        Data::DurationIso(s) => Scalar::Text(s.clone()),
        Data::Error(e) => Scalar::Text(e.to_string()),
    }
}
