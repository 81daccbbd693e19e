//! Sheet layout: the full set of cell writes for one sheet
//!
//! Turns a [`SheetSpec`] into engine calls in dependency order: header row,
//! classification, data rows, footer totals, style directives, freeze pane.
//! Any fatal condition aborts the build; callers must treat an error as "no
//! usable file produced".

use crate::classify::{coerce, ColumnPlan, ColumnType, ColumnTypes};
use crate::column::CellRef;
use crate::engine::{ColumnWidth, SheetId, WorkbookEngine};
use crate::error::{Error, Result};
use crate::header::HeaderIndex;
use crate::row::{Row, Scalar};
use crate::style::Style;
use log::{debug, warn};

/// A footer total for one column: one value or a vertical stack of values
#[derive(Debug, Clone, PartialEq)]
pub enum TotalValue {
    /// One value, written to the first footer row
    Single(Scalar),
    /// Values written to successive footer rows, first at the footer start
    Stacked(Vec<Scalar>),
}

/// Ordered footer totals, keyed by column name
///
/// Every key must exist in the header; an unknown key aborts the build.
#[derive(Debug, Clone, Default)]
pub struct Totals {
    entries: Vec<(String, TotalValue)>,
}

impl Totals {
    /// Create an empty totals set
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a totals set with one scalar entry
    pub fn single<N: Into<String>, V: Into<Scalar>>(name: N, value: V) -> Self {
        Self::new().set(name, value)
    }

    /// Add a scalar total for a column
    pub fn set<N: Into<String>, V: Into<Scalar>>(mut self, name: N, value: V) -> Self {
        self.entries
            .push((name.into(), TotalValue::Single(value.into())));
        self
    }

    /// Add a multi-row total for a column, one footer row per element
    pub fn set_stacked<N, I, V>(mut self, name: N, values: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.entries.push((
            name.into(),
            TotalValue::Stacked(values.into_iter().map(Into::into).collect()),
        ));
        self
    }

    /// Check if no totals were declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TotalValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A style rule addressed by column name and row scope
///
/// Three pattern forms are recognized:
/// - `Name` — the column's header cell
/// - `Name:*` — every data row in the column
/// - `Name:N` — exactly spreadsheet row N of the column
///
/// Any other shape is a fatal configuration error. A pattern naming a
/// column absent from the header is silently skipped; stale styling hints
/// are tolerated where totals and classification are not.
#[derive(Debug, Clone)]
pub struct StyleDirective {
    /// The address pattern
    pub pattern: String,
    /// The style payload applied verbatim by the engine
    pub style: Style,
}

impl StyleDirective {
    /// Create a directive from a pattern and style
    pub fn new<P: Into<String>>(pattern: P, style: Style) -> Self {
        Self {
            pattern: pattern.into(),
            style,
        }
    }
}

enum StyleTarget<'a> {
    Header(&'a str),
    AllRows(&'a str),
    SingleRow(&'a str, u32),
}

fn parse_style_pattern(pattern: &str) -> Result<StyleTarget<'_>> {
    match pattern.split_once(':') {
        None => Ok(StyleTarget::Header(pattern)),
        Some((name, "*")) => Ok(StyleTarget::AllRows(name)),
        Some((name, row)) => row
            .parse::<u32>()
            .ok()
            .filter(|n| *n >= 1)
            .map(|n| StyleTarget::SingleRow(name, n))
            .ok_or_else(|| Error::InvalidStylePattern(pattern.to_string())),
    }
}

/// Everything needed to lay out one sheet
#[derive(Debug, Clone, Default)]
pub struct SheetSpec {
    /// Sheet name; must not be empty
    pub name: String,
    /// Data rows; the first row's key order defines column order
    pub rows: Vec<Row>,
    /// Footer totals
    pub totals: Totals,
    /// Column type declarations
    pub types: ColumnTypes,
    /// Style directives
    pub styles: Vec<StyleDirective>,
    /// Custom column widths by column name; unlisted columns auto-size
    pub widths: Vec<(String, f64)>,
    /// Freeze the pane below the header row
    pub freeze_header: bool,
}

impl SheetSpec {
    /// Create a spec for a named sheet over a dataset
    pub fn new<S: Into<String>>(name: S, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
            ..Self::default()
        }
    }

    /// Set the footer totals
    pub fn with_totals(mut self, totals: Totals) -> Self {
        self.totals = totals;
        self
    }

    /// Set the column type declarations
    pub fn with_types(mut self, types: ColumnTypes) -> Self {
        self.types = types;
        self
    }

    /// Add a style directive
    pub fn with_style<P: Into<String>>(mut self, pattern: P, style: Style) -> Self {
        self.styles.push(StyleDirective::new(pattern, style));
        self
    }

    /// Set a custom width for a column
    pub fn with_width<N: Into<String>>(mut self, name: N, chars: f64) -> Self {
        self.widths.push((name.into(), chars));
        self
    }

    /// Freeze the header row
    pub fn with_freeze_header(mut self) -> Self {
        self.freeze_header = true;
        self
    }

    fn width_for(&self, name: &str) -> Option<f64> {
        self.widths
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }
}

/// Lay out one sheet through the engine and return its id.
///
/// An empty dataset produces a valid blank sheet. Any fatal condition
/// (empty name, unknown totals or classification column, malformed style
/// pattern, engine failure) aborts immediately.
pub fn build_sheet<E: WorkbookEngine>(engine: &mut E, spec: &SheetSpec) -> Result<SheetId> {
    if spec.name.trim().is_empty() {
        return Err(Error::EmptySheetName);
    }
    let sheet = engine.add_sheet(&spec.name)?;

    if spec.rows.is_empty() {
        debug!("sheet '{}' built from an empty dataset", spec.name);
        // No header exists, so any totals key is unresolvable.
        if let Some((name, _)) = spec.totals.iter().next() {
            return Err(Error::unknown_column(name, std::iter::empty::<&str>()));
        }
        return Ok(sheet);
    }

    let header = HeaderIndex::from_row(&spec.rows[0]);
    write_header(engine, sheet, &header, spec)?;

    let plan = spec.types.resolve(&header)?;
    write_data_rows(engine, sheet, &plan, &spec.rows)?;
    write_footer(engine, sheet, &header, &plan, &spec.totals)?;
    apply_directives(engine, sheet, &header, spec)?;

    if spec.freeze_header {
        engine.freeze_panes(sheet, CellRef::new(1, 0))?;
    }

    Ok(sheet)
}

fn write_header<E: WorkbookEngine>(
    engine: &mut E,
    sheet: SheetId,
    header: &HeaderIndex,
    spec: &SheetSpec,
) -> Result<()> {
    for (col, name) in header.names().iter().enumerate() {
        let col = col as u16;
        let at = CellRef::new(0, col);
        engine.set_cell(sheet, at, &Scalar::text(name.clone()), ColumnType::Text, None)?;
        engine.apply_style(sheet, at, &Style::header())?;

        let width = match spec.width_for(name) {
            Some(chars) => ColumnWidth::Chars(chars),
            None => ColumnWidth::Auto,
        };
        engine.set_column_width(sheet, col, width)?;
    }
    Ok(())
}

fn write_data_rows<E: WorkbookEngine>(
    engine: &mut E,
    sheet: SheetId,
    plan: &ColumnPlan,
    rows: &[Row],
) -> Result<()> {
    for (i, row) in rows.iter().enumerate() {
        for (col, value) in row.values().enumerate() {
            let col = col as u16;
            let (kind, format) = plan.disposition(col);
            let value = coerce(value, kind);
            // Data starts one row below the header.
            engine.set_cell(sheet, CellRef::new(i as u32 + 1, col), &value, kind, format)?;
        }
    }
    Ok(())
}

fn write_footer<E: WorkbookEngine>(
    engine: &mut E,
    sheet: SheetId,
    header: &HeaderIndex,
    plan: &ColumnPlan,
    totals: &Totals,
) -> Result<()> {
    if totals.is_empty() {
        return Ok(());
    }

    // The footer anchor is fixed before any total is written; stacked
    // totals must not push later entries further down.
    let footer_start = engine.highest_row(sheet).map_or(0, |r| r + 1);

    for (name, value) in totals.iter() {
        let col = resolve_total_column(engine, sheet, header, name)?;
        let (kind, format) = plan.disposition(col);
        match value {
            TotalValue::Single(v) => {
                let v = coerce(v, kind);
                engine.set_cell(sheet, CellRef::new(footer_start, col), &v, kind, format)?;
            }
            TotalValue::Stacked(values) => {
                for (offset, v) in values.iter().enumerate() {
                    let v = coerce(v, kind);
                    let at = CellRef::new(footer_start + offset as u32, col);
                    engine.set_cell(sheet, at, &v, kind, format)?;
                }
            }
        }
    }
    Ok(())
}

/// Resolve a totals column, preferring the original header names and
/// falling back to whatever was physically written into row 1. The
/// fallback keeps resolution working if the engine ever normalizes header
/// text on write.
fn resolve_total_column<E: WorkbookEngine>(
    engine: &E,
    sheet: SheetId,
    header: &HeaderIndex,
    name: &str,
) -> Result<u16> {
    if let Some(col) = header.column(name) {
        return Ok(col);
    }

    if let Some(max_col) = engine.highest_column(sheet) {
        for col in 0..=max_col {
            if let Some(Scalar::Text(written)) = engine.cell_value(sheet, CellRef::new(0, col)) {
                if written == name {
                    return Ok(col);
                }
            }
        }
    }

    Err(Error::unknown_column(name, header.name_strs()))
}

fn apply_directives<E: WorkbookEngine>(
    engine: &mut E,
    sheet: SheetId,
    header: &HeaderIndex,
    spec: &SheetSpec,
) -> Result<()> {
    let data_rows = spec.rows.len() as u32;

    for directive in &spec.styles {
        let target = parse_style_pattern(&directive.pattern)?;
        let (name, cells): (&str, Vec<CellRef>) = match target {
            StyleTarget::Header(name) => match header.column(name) {
                Some(col) => (name, vec![CellRef::new(0, col)]),
                None => (name, Vec::new()),
            },
            StyleTarget::AllRows(name) => match header.column(name) {
                Some(col) => (
                    name,
                    (1..=data_rows).map(|r| CellRef::new(r, col)).collect(),
                ),
                None => (name, Vec::new()),
            },
            StyleTarget::SingleRow(name, display_row) => match header.column(name) {
                Some(col) => (name, vec![CellRef::new(display_row - 1, col)]),
                None => (name, Vec::new()),
            },
        };

        if cells.is_empty() {
            warn!(
                "style directive '{}' names unknown column '{}'; skipped",
                directive.pattern, name
            );
            continue;
        }
        for at in cells {
            engine.apply_style(sheet, at, &directive.style)?;
        }
    }
    Ok(())
}
