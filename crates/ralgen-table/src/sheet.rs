//! Sheets and workbooks: the tabular source the resolver consumes.

use std::collections::BTreeMap;

/// A named table: a header row plus ordered data rows.
///
/// Rows are padded to the header width at construction, so positional
/// access never runs past a ragged row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        for row in &mut rows {
            while row.len() < width {
                row.push(String::new());
            }
        }
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Index of a header column, matched case-insensitively on the trimmed
    /// label.
    pub fn column(&self, label: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(label))
    }

    pub fn has_column(&self, label: &str) -> bool {
        self.column(label).is_some()
    }
}

/// By-name sheet lookup, the capability the resolver is written against.
pub trait TableSource {
    fn sheet(&self, name: &str) -> Option<&Sheet>;
}

/// An in-memory collection of named sheets.
#[derive(Debug, Default, Clone)]
pub struct Workbook {
    sheets: BTreeMap<String, Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a sheet, replacing any previous sheet of the same name.
    pub fn insert(&mut self, sheet: Sheet) {
        self.sheets.insert(sheet.name().to_string(), sheet);
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl TableSource for Workbook {
    fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name)
    }
}
