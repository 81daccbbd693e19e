//! # tally-sheets
//!
//! Consistently formatted `.xlsx` report workbooks from row/total arrays.
//!
//! Sheets get a styled header row, per-column numeric/formula/text typing,
//! footer totals (including multi-row stacks), custom widths, freeze
//! panes, and multi-sheet workbooks, with the binary format delegated to
//! the workbook engine crates.
//!
//! ## Example
//!
//! ```no_run
//! use tally_sheets::prelude::*;
//!
//! let rows = vec![
//!     Row::from_pairs([("CUSIP", "123456789"), ("PRICE", "101.25")]),
//!     Row::from_pairs([("CUSIP", "987654321"), ("PRICE", "99.50")]),
//! ];
//! let totals = Totals::single("PRICE", 200.75);
//!
//! let mut options = SimpleOptions::default();
//! options.numeric_columns = vec!["PRICE".to_string()];
//!
//! let written = tally_sheets::simple(rows, totals, "positions", "out.xlsx", &options).unwrap();
//! let grid = tally_sheets::sheet_to_array(&written, SheetSelector::Index(0)).unwrap();
//! assert_eq!(grid[0][0], Scalar::text("CUSIP"));
//! ```

pub mod build;
pub mod error;
pub mod paths;
pub mod prelude;
pub mod split;

// Re-export core types
pub use tally_sheets_core::{
    build_sheet, chunk_rows, column_index, column_letters, CellRef, Color, ColumnType,
    ColumnTypes, MarkupToken, MemoryEngine, Row, Scalar, SheetSpec, Style, StyleDirective,
    TotalValue, Totals, WorkbookEngine, WorkbookMeta,
};
pub use tally_sheets_core::markup::{split_markup, tag_from_string};
pub use tally_sheets_core::Error as CoreError;

// Re-export the engine surface
pub use tally_sheets_xlsx::{translate_file, MarkupStyles, SheetSelector, XlsxEngine, XlsxError};

pub use build::{advanced, simple, workbook, SimpleOptions};
pub use error::{BuildError, BuildResult};
pub use paths::unique_path;
pub use split::split_sheet;

// Re-export the read surface
pub use tally_sheets_xlsx::reader::{
    num_lines as num_lines_in_sheet, sheet_index_by_name, sheet_name, sheet_names, sheet_to_array,
};
