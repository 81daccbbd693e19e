//! Header row indexing
//!
//! Built once per sheet from the dataset's first row. Resolves column names
//! to column positions (and letters) for data writes, footer totals, and
//! style directives.

use crate::column::column_letters;
use crate::row::Row;
use ahash::AHashMap;

/// Name-to-column lookup table for one sheet
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    names: Vec<String>,
    by_name: AHashMap<String, u16>,
}

impl HeaderIndex {
    /// Build the index from the dataset's first row.
    ///
    /// An empty dataset has no header; callers skip the build entirely and
    /// emit a legitimately blank sheet.
    pub fn from_row(row: &Row) -> Self {
        let names: Vec<String> = row.names().map(str::to_string).collect();
        let by_name = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i as u16))
            .collect();
        Self { names, by_name }
    }

    /// Column names in sheet order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column position by name
    pub fn column(&self, name: &str) -> Option<u16> {
        self.by_name.get(name).copied()
    }

    /// Look up a column's Excel letters by name
    pub fn letters(&self, name: &str) -> Option<String> {
        self.column(name).map(|c| column_letters(c as u32))
    }

    /// Reverse lookup: the name at a column position
    pub fn name_at(&self, col: u16) -> Option<&str> {
        self.names.get(col as usize).map(String::as_str)
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the header has no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column names as borrowed strs, for error diagnostics
    pub fn name_strs(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> HeaderIndex {
        HeaderIndex::from_row(&Row::from_pairs([
            ("CUSIP", "123456789"),
            ("DATE", "2018-01-01"),
            ("ACTION", "BUY"),
        ]))
    }

    #[test]
    fn lookups_both_ways() {
        let h = header();
        assert_eq!(h.column("CUSIP"), Some(0));
        assert_eq!(h.column("ACTION"), Some(2));
        assert_eq!(h.column("MISSING"), None);
        assert_eq!(h.letters("ACTION").as_deref(), Some("C"));
        assert_eq!(h.name_at(1), Some("DATE"));
        assert_eq!(h.name_at(3), None);
    }

    #[test]
    fn empty_header() {
        let h = HeaderIndex::from_row(&Row::new());
        assert!(h.is_empty());
        assert_eq!(h.column("ANY"), None);
    }
}
