//! # tally-sheets-core
//!
//! Core layout logic for the tally-sheets report-workbook builder.
//!
//! This crate computes *what* to write: cell addresses, cell types, header
//! and footer placement, style resolution, chunking, and markup
//! tokenization. It never touches the `.xlsx` format itself; all physical
//! writes go through the [`WorkbookEngine`] trait, implemented elsewhere by
//! an adapter over a real spreadsheet library.
//!
//! ## Example
//!
//! ```rust
//! use tally_sheets_core::{build_sheet, MemoryEngine, Row, SheetSpec, Totals};
//!
//! let rows = vec![Row::from_pairs([("NAME", "widget"), ("QTY", "3")])];
//! let spec = SheetSpec::new("inventory", rows).with_totals(Totals::single("QTY", 3.0));
//!
//! let mut engine = MemoryEngine::new();
//! let sheet = build_sheet(&mut engine, &spec).unwrap();
//! assert_eq!(engine.text_at(sheet, "A1"), Some("NAME".to_string()));
//! ```

pub mod classify;
pub mod column;
pub mod engine;
pub mod error;
pub mod header;
pub mod layout;
pub mod markup;
pub mod row;
pub mod split;
pub mod style;

// Re-exports for convenience
pub use classify::{coerce, ColumnPlan, ColumnType, ColumnTypes};
pub use column::{column_index, column_letters, CellRef};
pub use engine::{ColumnWidth, MemoryEngine, SheetId, WorkbookEngine, WorkbookMeta};
pub use error::{Error, Result};
pub use header::HeaderIndex;
pub use layout::{build_sheet, SheetSpec, StyleDirective, TotalValue, Totals};
pub use markup::{split_markup, tag_from_string, MarkupToken};
pub use row::{Row, Scalar};
pub use split::chunk_rows;
pub use style::{Color, Style};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;
