//! Column classification: numeric / formula / text dispatch
//!
//! Classification tables are per-build values threaded through the layout
//! pipeline. They are never process-wide state; two concurrent builds with
//! different tables must not observe each other.

use crate::error::{Error, Result};
use crate::header::HeaderIndex;
use crate::row::Scalar;
use ahash::AHashMap;

/// Default display format for numeric columns without a custom format
pub const NUMERIC_FORMAT_DEFAULT: &str = "#,##0.00";

/// Default display format for text columns ("store as text")
pub const TEXT_FORMAT_DEFAULT: &str = "@";

/// How a column's cells are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    /// Literal text (the default)
    #[default]
    Text,
    /// Numeric value
    Numeric,
    /// Live formula expression
    Formula,
}

/// Caller-supplied column type declarations for one sheet build
#[derive(Debug, Clone, Default)]
pub struct ColumnTypes {
    numeric: Vec<String>,
    formula: Vec<String>,
    formats: Vec<(String, String)>,
}

impl ColumnTypes {
    /// Create an empty declaration set (every column defaults to text)
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare columns that must be written as numbers
    pub fn numeric<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare columns that must be written as formulas
    pub fn formula<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.formula.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a custom display format for a column
    pub fn format<N: Into<String>, F: Into<String>>(mut self, name: N, format: F) -> Self {
        self.formats.push((name.into(), format.into()));
        self
    }

    /// Check if no declarations were made
    pub fn is_empty(&self) -> bool {
        self.numeric.is_empty() && self.formula.is_empty() && self.formats.is_empty()
    }

    /// Resolve every declared name against the header, producing the
    /// per-column dispatch table for this build.
    ///
    /// A declared name absent from the header is a fatal configuration
    /// error: proceeding would silently mis-render the column's data.
    pub fn resolve(&self, header: &HeaderIndex) -> Result<ColumnPlan> {
        let mut types: AHashMap<u16, ColumnType> = AHashMap::new();
        let mut formats: AHashMap<u16, String> = AHashMap::new();

        // Numeric is registered first and wins when a column is declared both
        // numeric and formula.
        for name in &self.formula {
            let col = lookup(header, name)?;
            types.insert(col, ColumnType::Formula);
        }
        for name in &self.numeric {
            let col = lookup(header, name)?;
            types.insert(col, ColumnType::Numeric);
        }
        for (name, format) in &self.formats {
            let col = lookup(header, name)?;
            formats.insert(col, format.clone());
        }

        Ok(ColumnPlan { types, formats })
    }
}

fn lookup(header: &HeaderIndex, name: &str) -> Result<u16> {
    header
        .column(name)
        .ok_or_else(|| Error::unknown_column(name, header.name_strs()))
}

/// Resolved per-column dispatch table for one sheet build
#[derive(Debug, Clone, Default)]
pub struct ColumnPlan {
    types: AHashMap<u16, ColumnType>,
    formats: AHashMap<u16, String>,
}

impl ColumnPlan {
    /// The type a column's cells are written as
    pub fn column_type(&self, col: u16) -> ColumnType {
        self.types.get(&col).copied().unwrap_or_default()
    }

    /// The display format for a column: the custom format when declared,
    /// otherwise the type's default ([`NUMERIC_FORMAT_DEFAULT`] for numeric,
    /// [`TEXT_FORMAT_DEFAULT`] for text, none for formulas).
    pub fn format(&self, col: u16) -> Option<&str> {
        if let Some(custom) = self.formats.get(&col) {
            return Some(custom);
        }
        match self.column_type(col) {
            ColumnType::Numeric => Some(NUMERIC_FORMAT_DEFAULT),
            ColumnType::Text => Some(TEXT_FORMAT_DEFAULT),
            ColumnType::Formula => None,
        }
    }

    /// Type and format for a column in one call
    pub fn disposition(&self, col: u16) -> (ColumnType, Option<&str>) {
        (self.column_type(col), self.format(col))
    }
}

/// Normalize a caller-supplied scalar for its column type.
///
/// Numeric columns parse numeric-looking text into numbers; nulls stay null
/// (a null in a numeric column must never become zero). Text columns render
/// numbers as their display text. Formula columns pass values through
/// unchanged; the expression text is the value.
pub fn coerce(value: &Scalar, kind: ColumnType) -> Scalar {
    match (kind, value) {
        (ColumnType::Numeric, Scalar::Text(s)) => match s.trim().parse::<f64>() {
            Ok(n) => Scalar::Number(n),
            Err(_) => value.clone(),
        },
        (ColumnType::Text, Scalar::Number(n)) => Scalar::Text(n.to_string()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::Row;

    fn header() -> HeaderIndex {
        HeaderIndex::from_row(&Row::from_pairs([
            ("CUSIP", Scalar::text("123456789")),
            ("PRICE", Scalar::Number(101.25)),
            ("TOTAL", Scalar::text("=B2*2")),
        ]))
    }

    #[test]
    fn defaults_to_text() {
        let plan = ColumnTypes::new().resolve(&header()).unwrap();
        assert_eq!(plan.column_type(0), ColumnType::Text);
        assert_eq!(plan.format(0), Some(TEXT_FORMAT_DEFAULT));
    }

    #[test]
    fn numeric_and_formula_resolution() {
        let plan = ColumnTypes::new()
            .numeric(["PRICE"])
            .formula(["TOTAL"])
            .resolve(&header())
            .unwrap();

        assert_eq!(plan.column_type(1), ColumnType::Numeric);
        assert_eq!(plan.format(1), Some(NUMERIC_FORMAT_DEFAULT));
        assert_eq!(plan.column_type(2), ColumnType::Formula);
        assert_eq!(plan.format(2), None);
    }

    #[test]
    fn numeric_wins_over_formula() {
        let plan = ColumnTypes::new()
            .numeric(["PRICE"])
            .formula(["PRICE"])
            .resolve(&header())
            .unwrap();
        assert_eq!(plan.column_type(1), ColumnType::Numeric);
    }

    #[test]
    fn custom_format_overrides_default() {
        let plan = ColumnTypes::new()
            .numeric(["PRICE"])
            .format("PRICE", "0.0000")
            .resolve(&header())
            .unwrap();
        assert_eq!(plan.format(1), Some("0.0000"));
    }

    #[test]
    fn unknown_name_is_fatal() {
        let err = ColumnTypes::new()
            .numeric(["MISSING"])
            .resolve(&header())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownColumn { .. }));
    }

    #[test]
    fn coerce_numeric() {
        assert_eq!(
            coerce(&Scalar::text("101.25"), ColumnType::Numeric),
            Scalar::Number(101.25)
        );
        assert_eq!(
            coerce(&Scalar::text("n/a"), ColumnType::Numeric),
            Scalar::text("n/a")
        );
        // Null must stay null, not become zero
        assert_eq!(coerce(&Scalar::Null, ColumnType::Numeric), Scalar::Null);
    }

    #[test]
    fn coerce_text_renders_numbers() {
        assert_eq!(
            coerce(&Scalar::Number(4.0), ColumnType::Text),
            Scalar::text("4")
        );
    }
}
