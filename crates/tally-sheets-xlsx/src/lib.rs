//! # tally-sheets-xlsx
//!
//! The `.xlsx` workbook engine for tally-sheets.
//!
//! [`XlsxEngine`] implements the core crate's `WorkbookEngine` contract
//! over `rust_xlsxwriter`; [`reader`] provides the read-back surface over
//! `calamine`; [`markup`] rewrites inline-markup cells as rich text.

pub mod engine;
pub mod error;
pub mod markup;
pub mod reader;

pub use engine::XlsxEngine;
pub use error::{XlsxError, XlsxResult};
pub use markup::{translate_file, MarkupStyles};
pub use reader::SheetSelector;
