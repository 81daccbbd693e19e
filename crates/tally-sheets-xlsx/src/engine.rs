//! The rust_xlsxwriter-backed workbook engine
//!
//! Cell writes are buffered per sheet and rendered in one pass at save
//! time, when display formats and late-applied styles can be merged into a
//! single format object per cell. The buffer also serves the engine
//! contract's read-back: `cell_value` returns exactly what was written.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;
use rust_xlsxwriter::{DocProperties, Format, Formula, Workbook, Worksheet};
use tally_sheets_core::{
    CellRef, ColumnType, ColumnWidth, Error, Result, Scalar, SheetId, Style, WorkbookEngine,
    WorkbookMeta,
};

use crate::error::XlsxResult;

#[derive(Debug, Clone)]
struct CellState {
    value: Scalar,
    kind: ColumnType,
    format: Option<String>,
}

#[derive(Debug, Clone, Default)]
struct SheetBuffer {
    name: String,
    cells: BTreeMap<(u32, u16), CellState>,
    styles: BTreeMap<(u32, u16), Style>,
    widths: BTreeMap<u16, ColumnWidth>,
    frozen: Option<CellRef>,
}

/// A buffered `.xlsx` workbook engine
///
/// Nothing is written to disk until [`XlsxEngine::save`]; a failed build
/// leaves no workbook behind beyond whatever pre-flight file the caller
/// created.
#[derive(Debug, Default)]
pub struct XlsxEngine {
    meta: WorkbookMeta,
    sheets: Vec<SheetBuffer>,
}

impl XlsxEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every buffered sheet and save the workbook to `path`
    pub fn save(&mut self, path: &Path) -> XlsxResult<()> {
        let mut workbook = Workbook::new();
        workbook.set_properties(&doc_properties(&self.meta));

        for buffer in &self.sheets {
            let worksheet = workbook.add_worksheet();
            render_sheet(worksheet, buffer)?;
        }

        workbook.save(path)?;
        debug!(
            "saved workbook with {} sheet(s) to {}",
            self.sheets.len(),
            path.display()
        );
        Ok(())
    }

    fn buffer_mut(&mut self, sheet: SheetId) -> Result<&mut SheetBuffer> {
        self.sheets
            .get_mut(sheet)
            .ok_or_else(|| Error::Engine(format!("no sheet with id {sheet}")))
    }
}

impl WorkbookEngine for XlsxEngine {
    fn add_sheet(&mut self, name: &str) -> Result<SheetId> {
        self.sheets.push(SheetBuffer {
            name: name.to_string(),
            ..SheetBuffer::default()
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
        self.buffer_mut(sheet)?.cells.insert(
            (at.row, at.col),
            CellState {
                value: value.clone(),
                kind,
                format: format.map(str::to_string),
            },
        );
        Ok(())
    }

    fn cell_value(&self, sheet: SheetId, at: CellRef) -> Option<Scalar> {
        self.sheets
            .get(sheet)?
            .cells
            .get(&(at.row, at.col))
            .map(|cell| cell.value.clone())
    }

    fn highest_row(&self, sheet: SheetId) -> Option<u32> {
        self.sheets.get(sheet)?.cells.keys().map(|(r, _)| *r).max()
    }

    fn highest_column(&self, sheet: SheetId) -> Option<u16> {
        self.sheets.get(sheet)?.cells.keys().map(|(_, c)| *c).max()
    }

    fn apply_style(&mut self, sheet: SheetId, at: CellRef, style: &Style) -> Result<()> {
        self.buffer_mut(sheet)?
            .styles
            .insert((at.row, at.col), style.clone());
        Ok(())
    }

    fn set_column_width(&mut self, sheet: SheetId, col: u16, width: ColumnWidth) -> Result<()> {
        self.buffer_mut(sheet)?.widths.insert(col, width);
        Ok(())
    }

    fn freeze_panes(&mut self, sheet: SheetId, at: CellRef) -> Result<()> {
        self.buffer_mut(sheet)?.frozen = Some(at);
        Ok(())
    }
}

fn render_sheet(worksheet: &mut Worksheet, buffer: &SheetBuffer) -> XlsxResult<()> {
    worksheet.set_name(buffer.name.as_str())?;
    worksheet.set_landscape();

    for ((row, col), cell) in &buffer.cells {
        let format = cell_format(cell.format.as_deref(), buffer.styles.get(&(*row, *col)));
        write_cell(worksheet, *row, *col, cell, &format)?;
    }

    let mut autofit = false;
    for (col, width) in &buffer.widths {
        match width {
            ColumnWidth::Chars(chars) => {
                worksheet.set_column_width(*col, *chars)?;
            }
            ColumnWidth::Auto => autofit = true,
        }
    }
    // Autofit after the cells exist; it measures written content.
    if autofit {
        worksheet.autofit();
    }

    if let Some(at) = buffer.frozen {
        worksheet.set_freeze_panes(at.row, at.col)?;
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellState,
    format: &Format,
) -> XlsxResult<()> {
    match (&cell.kind, &cell.value) {
        // Typed blank: a null is never rendered as zero or empty text.
        (_, Scalar::Null) => {
            worksheet.write_blank(row, col, format)?;
        }
        (ColumnType::Numeric, Scalar::Number(n)) => {
            worksheet.write_number_with_format(row, col, *n, format)?;
        }
        // Unparseable numeric text was left as text by the classifier.
        (ColumnType::Numeric, Scalar::Text(s)) => {
            worksheet.write_string_with_format(row, col, s.as_str(), format)?;
        }
        (ColumnType::Formula, value) => {
            worksheet.write_formula_with_format(row, col, Formula::new(value.to_string()), format)?;
        }
        (ColumnType::Text, value) => {
            worksheet.write_string_with_format(row, col, value.to_string(), format)?;
        }
    }
    Ok(())
}

fn cell_format(format: Option<&str>, style: Option<&Style>) -> Format {
    let mut f = Format::new();
    if let Some(code) = format {
        f = f.set_num_format(code);
    }
    if let Some(style) = style {
        f = style_to_format(f, style);
    }
    f
}

/// Translate a core style payload onto a rust_xlsxwriter format
pub(crate) fn style_to_format(mut f: Format, style: &Style) -> Format {
    if let Some(fill) = style.fill {
        f = f.set_background_color(rust_xlsxwriter::Color::RGB(fill.rgb()));
    }
    if let Some(color) = style.font_color {
        f = f.set_font_color(rust_xlsxwriter::Color::RGB(color.rgb()));
    }
    if style.bold {
        f = f.set_bold();
    }
    if style.italic {
        f = f.set_italic();
    }
    if style.text_wrap {
        f = f.set_text_wrap();
    }
    f
}

fn doc_properties(meta: &WorkbookMeta) -> DocProperties {
    DocProperties::new()
        .set_title(meta.title.as_str())
        .set_subject(meta.subject.as_str())
        .set_author(meta.creator.as_str())
        .set_comment(meta.description.as_str())
        .set_keywords(meta.keywords.as_str())
        .set_category(meta.category.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffered_cells_read_back() {
        let mut engine = XlsxEngine::new();
        let sheet = engine.add_sheet("s").unwrap();
        engine
            .set_cell(
                sheet,
                CellRef::new(0, 1),
                &Scalar::text("DATE"),
                ColumnType::Text,
                None,
            )
            .unwrap();

        assert_eq!(
            engine.cell_value(sheet, CellRef::new(0, 1)),
            Some(Scalar::text("DATE"))
        );
        assert_eq!(engine.cell_value(sheet, CellRef::new(0, 0)), None);
        assert_eq!(engine.highest_row(sheet), Some(0));
        assert_eq!(engine.highest_column(sheet), Some(1));
    }

    #[test]
    fn bad_sheet_id_is_an_engine_error() {
        let mut engine = XlsxEngine::new();
        let err = engine
            .set_cell(7, CellRef::new(0, 0), &Scalar::Null, ColumnType::Text, None)
            .unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
    }
}
