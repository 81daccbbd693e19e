//! The workbook engine seam
//!
//! The layout algorithm is pure bookkeeping; every physical effect goes
//! through [`WorkbookEngine`]. The production implementation lives in the
//! `tally-sheets-xlsx` crate; [`MemoryEngine`] here is an in-memory
//! implementation used by unit tests and dry runs.

use crate::classify::ColumnType;
use crate::column::CellRef;
use crate::error::{Error, Result};
use crate::row::Scalar;
use crate::style::Style;
use std::collections::BTreeMap;

/// Index of a sheet within one engine instance
pub type SheetId = usize;

/// Column width request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnWidth {
    /// Size the column to fit its contents
    Auto,
    /// Explicit width in character units
    Chars(f64),
}

/// Workbook-level document properties
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkbookMeta {
    /// Document title
    pub title: String,
    /// Document subject
    pub subject: String,
    /// Creator / author
    pub creator: String,
    /// Free-form description
    pub description: String,
    /// Keyword list
    pub keywords: String,
    /// Category label
    pub category: String,
}

impl Default for WorkbookMeta {
    fn default() -> Self {
        Self {
            title: "Default Title".to_string(),
            subject: "Default Subject".to_string(),
            creator: "tally-sheets".to_string(),
            description: "Default description.".to_string(),
            keywords: "keywords".to_string(),
            category: "category".to_string(),
        }
    }
}

impl WorkbookMeta {
    /// Create the default metadata set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = title.into();
        self
    }

    /// Set the subject
    pub fn with_subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = subject.into();
        self
    }

    /// Set the creator
    pub fn with_creator<S: Into<String>>(mut self, creator: S) -> Self {
        self.creator = creator.into();
        self
    }

    /// Set the description
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Set the keywords
    pub fn with_keywords<S: Into<String>>(mut self, keywords: S) -> Self {
        self.keywords = keywords.into();
        self
    }

    /// Set the category
    pub fn with_category<S: Into<String>>(mut self, category: S) -> Self {
        self.category = category.into();
        self
    }
}

/// The contract the layout algorithm writes through.
///
/// Implementations are free to buffer; nothing here implies a file exists
/// before `save` on the concrete type is called. `cell_value` must return
/// what was physically written, since footer resolution can fall back to
/// reading the header row back out of the sheet.
pub trait WorkbookEngine {
    /// Append a sheet and return its id
    fn add_sheet(&mut self, name: &str) -> Result<SheetId>;

    /// Set workbook-level document properties
    fn set_metadata(&mut self, meta: &WorkbookMeta) -> Result<()>;

    /// Write one cell with its type and optional display format
    fn set_cell(
        &mut self,
        sheet: SheetId,
        at: CellRef,
        value: &Scalar,
        kind: ColumnType,
        format: Option<&str>,
    ) -> Result<()>;

    /// Read back a previously written cell value
    fn cell_value(&self, sheet: SheetId, at: CellRef) -> Option<Scalar>;

    /// Highest written row index, if any cell was written
    fn highest_row(&self, sheet: SheetId) -> Option<u32>;

    /// Highest written column index, if any cell was written
    fn highest_column(&self, sheet: SheetId) -> Option<u16>;

    /// Apply a visual style to one cell
    fn apply_style(&mut self, sheet: SheetId, at: CellRef, style: &Style) -> Result<()>;

    /// Set a column's width
    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: ColumnWidth) -> Result<()>;

    /// Freeze panes so that rows above `at` and columns left of `at` stay
    /// visible on scroll
    fn freeze_panes(&mut self, sheet: SheetId, at: CellRef) -> Result<()>;
}

/// One buffered sheet of a [`MemoryEngine`]
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    /// Sheet name
    pub name: String,
    /// Written cells: value, type, and display format per address
    pub cells: BTreeMap<(u32, u16), (Scalar, ColumnType, Option<String>)>,
    /// Applied styles per address
    pub styles: BTreeMap<(u32, u16), Style>,
    /// Column width requests
    pub widths: BTreeMap<u16, ColumnWidth>,
    /// Freeze-pane anchor, if any
    pub frozen: Option<CellRef>,
}

/// In-memory [`WorkbookEngine`] for tests and dry runs
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    /// Workbook document properties
    pub meta: WorkbookMeta,
    sheets: Vec<MemorySheet>,
}

impl MemoryEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow a buffered sheet
    pub fn sheet(&self, id: SheetId) -> Option<&MemorySheet> {
        self.sheets.get(id)
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Convenience accessor: the value at an A1-style address
    pub fn value_at(&self, id: SheetId, a1: &str) -> Option<Scalar> {
        let at = CellRef::parse(a1).ok()?;
        self.cell_value(id, at)
    }

    /// Convenience accessor: the text at an A1-style address
    pub fn text_at(&self, id: SheetId, a1: &str) -> Option<String> {
        match self.value_at(id, a1)? {
            Scalar::Text(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut MemorySheet> {
        self.sheets
            .get_mut(id)
            .ok_or_else(|| Error::Engine(format!("no sheet with id {id}")))
    }
}

impl WorkbookEngine for MemoryEngine {
    fn add_sheet(&mut self, name: &str) -> Result<SheetId> {
        self.sheets.push(MemorySheet {
            name: name.to_string(),
            ..MemorySheet::default()
        });
        Ok(self.sheets.len() - 1)
    }

    fn set_metadata(&mut self, meta: &WorkbookMeta) -> Result<()> {
        self.meta = meta.clone();
        Ok(())
    }

    fn set_cell(
        &mut self,
        sheet: SheetId,
        at: CellRef,
        value: &Scalar,
        kind: ColumnType,
        format: Option<&str>,
    ) -> Result<()> {
        self.sheet_mut(sheet)?.cells.insert(
            (at.row, at.col),
            (value.clone(), kind, format.map(str::to_string)),
        );
        Ok(())
    }

    fn cell_value(&self, sheet: SheetId, at: CellRef) -> Option<Scalar> {
        self.sheets
            .get(sheet)?
            .cells
            .get(&(at.row, at.col))
            .map(|(v, _, _)| v.clone())
    }

    fn highest_row(&self, sheet: SheetId) -> Option<u32> {
        self.sheets.get(sheet)?.cells.keys().map(|(r, _)| *r).max()
    }

    fn highest_column(&self, sheet: SheetId) -> Option<u16> {
        self.sheets.get(sheet)?.cells.keys().map(|(_, c)| *c).max()
    }

    fn apply_style(&mut self, sheet: SheetId, at: CellRef, style: &Style) -> Result<()> {
        self.sheet_mut(sheet)?
            .styles
            .insert((at.row, at.col), style.clone());
        Ok(())
    }

    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: ColumnWidth) -> Result<()> {
        self.sheet_mut(sheet)?.widths.insert(col, width);
        Ok(())
    }

    fn freeze_panes(&mut self, sheet: SheetId, at: CellRef) -> Result<()> {
        self.sheet_mut(sheet)?.frozen = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_engine_tracks_extents() {
        let mut engine = MemoryEngine::new();
        let sheet = engine.add_sheet("s").unwrap();

        assert_eq!(engine.highest_row(sheet), None);

        engine
            .set_cell(sheet, CellRef::new(0, 0), &Scalar::text("A"), ColumnType::Text, None)
            .unwrap();
        engine
            .set_cell(sheet, CellRef::new(4, 2), &Scalar::Number(1.0), ColumnType::Numeric, None)
            .unwrap();

        assert_eq!(engine.highest_row(sheet), Some(4));
        assert_eq!(engine.highest_column(sheet), Some(2));
        assert_eq!(engine.text_at(sheet, "A1").as_deref(), Some("A"));
        assert_eq!(engine.value_at(sheet, "C5"), Some(Scalar::Number(1.0)));
    }

    #[test]
    fn metadata_defaults() {
        let meta = WorkbookMeta::new().with_title("Trades").with_creator("desk");
        assert_eq!(meta.title, "Trades");
        assert_eq!(meta.creator, "desk");
        assert_eq!(meta.subject, "Default Subject");
    }
}
