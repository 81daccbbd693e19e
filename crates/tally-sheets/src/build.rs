//! Top-level build surface
//!
//! Every build runs the same pipeline: resolve the collision-safe output
//! path, pre-flight the destination for writability, lay each sheet out
//! through the engine, then save. Any failure aborts the build; callers
//! must treat an error as "no usable file produced" even though the
//! pre-flight may have left an empty placeholder at the target path.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use tally_sheets_core::{build_sheet, ColumnTypes, Row, SheetSpec, Totals, WorkbookEngine, WorkbookMeta};
use tally_sheets_xlsx::{XlsxEngine, XlsxError};

use crate::error::BuildResult;
use crate::paths::unique_path;

/// Options for [`simple`] builds: metadata plus the column declarations a
/// default-styled sheet still needs
#[derive(Debug, Clone, Default)]
pub struct SimpleOptions {
    /// Workbook document properties
    pub meta: WorkbookMeta,
    /// Columns written as numbers
    pub numeric_columns: Vec<String>,
    /// Custom display formats by column name
    pub custom_formats: Vec<(String, String)>,
}

/// Build a single sheet with default styling.
///
/// Returns the path actually written, which differs from `path` when the
/// target already existed.
pub fn simple<P: AsRef<Path>>(
    rows: Vec<Row>,
    totals: Totals,
    sheet_name: &str,
    path: P,
    options: &SimpleOptions,
) -> BuildResult<PathBuf> {
    let mut types = ColumnTypes::new().numeric(options.numeric_columns.iter().cloned());
    for (name, format) in &options.custom_formats {
        types = types.format(name.clone(), format.clone());
    }

    let spec = SheetSpec::new(sheet_name, rows)
        .with_totals(totals)
        .with_types(types);
    write_workbook(path.as_ref(), &options.meta, std::slice::from_ref(&spec))
}

/// Build a single sheet with full control: column types, custom formats
/// and widths, style directives, and the freeze-header flag all come from
/// the spec.
pub fn advanced<P: AsRef<Path>>(
    spec: SheetSpec,
    path: P,
    meta: &WorkbookMeta,
) -> BuildResult<PathBuf> {
    write_workbook(path.as_ref(), meta, std::slice::from_ref(&spec))
}

/// Build a workbook with one sheet per spec, in order, sharing the
/// workbook-level metadata.
pub fn workbook<P: AsRef<Path>>(
    path: P,
    meta: &WorkbookMeta,
    sheets: &[SheetSpec],
) -> BuildResult<PathBuf> {
    write_workbook(path.as_ref(), meta, sheets)
}

fn write_workbook(path: &Path, meta: &WorkbookMeta, sheets: &[SheetSpec]) -> BuildResult<PathBuf> {
    let path = unique_path(path)?;
    initialize_file(&path)?;

    let mut engine = XlsxEngine::new();
    engine.set_metadata(meta)?;
    for spec in sheets {
        build_sheet(&mut engine, spec)?;
    }
    engine.save(&path)?;

    info!("wrote {} sheet(s) to {}", sheets.len(), path.display());
    Ok(path)
}

/// Pre-flight the destination: an unwritable path should fail before any
/// layout work happens.
fn initialize_file(path: &Path) -> BuildResult<()> {
    fs::write(path, b"").map_err(XlsxError::Io)?;
    Ok(())
}
