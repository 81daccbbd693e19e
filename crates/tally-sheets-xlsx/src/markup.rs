//! Inline-markup translation to rich text
//!
//! Reads a workbook, rewrites every cell whose text carries `<tag>` markup
//! as a rich-text run sequence (one run per token, styled runs for tags
//! with a rule), and writes the result to a new file. Cells without markup
//! pass through unchanged.

use std::path::Path;

use ahash::AHashMap;
use log::debug;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tally_sheets_core::markup::{has_markup, split_markup, MarkupToken};
use tally_sheets_core::{Scalar, Style};

use crate::engine::style_to_format;
use crate::error::XlsxResult;
use crate::reader::{sheet_names, sheet_to_array, SheetSelector};

/// Per-tag text style rules
#[derive(Debug, Clone, Default)]
pub struct MarkupStyles {
    by_tag: AHashMap<String, Style>,
}

impl MarkupStyles {
    /// Create an empty rule set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule: runs tagged `tag` get `style`
    pub fn set<T: Into<String>>(mut self, tag: T, style: Style) -> Self {
        self.by_tag.insert(tag.into(), style);
        self
    }

    /// Look up the rule for a tag
    pub fn get(&self, tag: &str) -> Option<&Style> {
        self.by_tag.get(tag)
    }
}

/// Translate every markup-carrying cell of `path` and write the result to
/// `dest`.
pub fn translate_file(path: &Path, dest: &Path, styles: &MarkupStyles) -> XlsxResult<()> {
    let mut workbook = Workbook::new();

    for name in sheet_names(path)? {
        let grid = sheet_to_array(path, SheetSelector::Name(&name))?;
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name.as_str())?;

        for (row, values) in grid.iter().enumerate() {
            for (col, value) in values.iter().enumerate() {
                write_translated(worksheet, row as u32, col as u16, value, styles)?;
            }
        }
    }

    workbook.save(dest)?;
    debug!("translated markup of {} into {}", path.display(), dest.display());
    Ok(())
}

fn write_translated(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Scalar,
    styles: &MarkupStyles,
) -> XlsxResult<()> {
    match value {
        Scalar::Null => {}
        Scalar::Number(n) => {
            worksheet.write_number(row, col, *n)?;
        }
        Scalar::Text(s) if has_markup(s) => write_rich(worksheet, row, col, s, styles)?,
        Scalar::Text(s) => {
            worksheet.write_string(row, col, s.as_str())?;
        }
    }
    Ok(())
}

fn write_rich(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    text: &str,
    styles: &MarkupStyles,
) -> XlsxResult<()> {
    let tokens = split_markup(text);
    let last = tokens.len().saturating_sub(1);

    let mut runs: Vec<(Format, String)> = Vec::new();
    for (i, token) in tokens.iter().enumerate() {
        let (format, mut segment) = match token {
            // A styled run drops its tags; an unstyled tag passes through raw.
            MarkupToken::Tagged { tag, text } => match styles.get(tag) {
                Some(style) => (style_to_format(Format::new(), style), text.clone()),
                None => (Format::new(), format!("<{tag}>{text}</{tag}>")),
            },
            MarkupToken::Plain(s) => (Format::new(), s.clone()),
        };

        // Restore the inter-word spacing lost by tokenization.
        if i < last {
            segment.push(' ');
        }
        if !segment.is_empty() {
            runs.push((format, segment));
        }
    }

    match runs.len() {
        0 => {}
        1 => {
            worksheet.write_string_with_format(row, col, runs[0].1.as_str(), &runs[0].0)?;
        }
        _ => {
            let parts: Vec<(&Format, &str)> =
                runs.iter().map(|(f, s)| (f, s.as_str())).collect();
            worksheet.write_rich_string(row, col, &parts)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::XlsxEngine;
    use tally_sheets_core::{CellRef, Color, ColumnType, WorkbookEngine};

    #[test]
    fn translation_preserves_cell_text() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.xlsx");
        let dest = dir.path().join("translated.xlsx");

        let mut engine = XlsxEngine::new();
        let sheet = engine.add_sheet("notes").unwrap();
        engine
            .set_cell(
                sheet,
                CellRef::new(0, 0),
                &Scalar::text("This <ins>adds</ins> ok?"),
                ColumnType::Text,
                None,
            )
            .unwrap();
        engine
            .set_cell(
                sheet,
                CellRef::new(1, 0),
                &Scalar::text("plain"),
                ColumnType::Text,
                None,
            )
            .unwrap();
        engine.save(&source).unwrap();

        let styles = MarkupStyles::new().set("ins", Style::new().with_bold());
        translate_file(&source, &dest, &styles).unwrap();

        let grid = sheet_to_array(&dest, SheetSelector::Index(0)).unwrap();
        // Rich text reads back as its concatenated runs, tags gone.
        assert_eq!(grid[0][0], Scalar::text("This adds ok?"));
        assert_eq!(grid[1][0], Scalar::text("plain"));
    }

    #[test]
    fn unstyled_tags_pass_through_raw() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.xlsx");
        let dest = dir.path().join("translated.xlsx");

        let mut engine = XlsxEngine::new();
        let sheet = engine.add_sheet("notes").unwrap();
        engine
            .set_cell(
                sheet,
                CellRef::new(0, 0),
                &Scalar::text("keep <del>this</del> raw"),
                ColumnType::Text,
                None,
            )
            .unwrap();
        engine.save(&source).unwrap();

        // No rule for <del>: the tag survives translation verbatim.
        let styles = MarkupStyles::new().set("ins", Style::new().with_font_color(Color::RED));
        translate_file(&source, &dest, &styles).unwrap();

        let grid = sheet_to_array(&dest, SheetSelector::Index(0)).unwrap();
        assert_eq!(grid[0][0], Scalar::text("keep <del>this</del> raw"));
    }
}
