//! Convenience re-exports for common usage
//!
//! ```
//! use tally_sheets::prelude::*;
//! ```

pub use crate::build::{advanced, simple, workbook, SimpleOptions};
pub use crate::error::{BuildError, BuildResult};
pub use crate::split::split_sheet;
pub use tally_sheets_core::{
    column_index, column_letters, CellRef, Color, ColumnType, ColumnTypes, Row, Scalar,
    SheetSpec, Style, StyleDirective, TotalValue, Totals, WorkbookMeta,
};
pub use tally_sheets_xlsx::reader::{
    num_lines as num_lines_in_sheet, sheet_index_by_name, sheet_name, sheet_names, sheet_to_array,
};
pub use tally_sheets_xlsx::{translate_file, MarkupStyles, SheetSelector, XlsxEngine};
