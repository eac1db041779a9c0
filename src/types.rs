use std::collections::HashSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Fill value for text columns that have no values to take a mode from
pub const UNKNOWN_PLACEHOLDER: &str = "Unknown";

/// Declared type of a column, as tracked by [`ColumnData`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    Text,
    Number,
    Date,
}

/// Cell storage for one column. `None` is the missing value marker.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Number(Vec<Option<f64>>),
    Date(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    pub fn dtype(&self) -> DType {
        match self {
            ColumnData::Text(_) => DType::Text,
            ColumnData::Number(_) => DType::Number,
            ColumnData::Date(_) => DType::Date,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.len(),
            ColumnData::Number(v) => v.len(),
            ColumnData::Date(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn missing_count(&self) -> usize {
        match self {
            ColumnData::Text(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Number(v) => v.iter().filter(|c| c.is_none()).count(),
            ColumnData::Date(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Keep only the rows whose entry in `keep` is true
    fn retain_rows(&mut self, keep: &[bool]) {
        fn retain<T>(cells: &mut Vec<T>, keep: &[bool]) {
            let mut idx = 0;
            cells.retain(|_| {
                let kept = keep[idx];
                idx += 1;
                kept
            });
        }

        match self {
            ColumnData::Text(v) => retain(v, keep),
            ColumnData::Number(v) => retain(v, keep),
            ColumnData::Date(v) => retain(v, keep),
        }
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn text<S: Into<String>>(name: &str, cells: Vec<Option<S>>) -> Self {
        Self::new(
            name,
            ColumnData::Text(cells.into_iter().map(|c| c.map(Into::into)).collect()),
        )
    }

    pub fn number(name: &str, cells: Vec<Option<f64>>) -> Self {
        Self::new(name, ColumnData::Number(cells))
    }

    pub fn date(name: &str, cells: Vec<Option<NaiveDateTime>>) -> Self {
        Self::new(name, ColumnData::Date(cells))
    }

    pub fn dtype(&self) -> DType {
        self.data.dtype()
    }
}

/// Rectangular table of uniquely named columns
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table, checking that names are unique and every column has the same length
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "Duplicate column name: {}",
                    col.name
                )));
            }
        }

        if let Some(first) = columns.first() {
            let rows = first.data.len();
            if let Some(bad) = columns.iter().find(|c| c.data.len() != rows) {
                return Err(Error::InvalidInput(format!(
                    "Column '{}' has {} rows, expected {}",
                    bad.name,
                    bad.data.len(),
                    rows
                )));
            }
        }

        Ok(Self { columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Rebuild every column through `f`. Callers must keep names and row counts intact.
    pub(crate) fn map_columns<F>(self, mut f: F) -> Self
    where
        F: FnMut(usize, Column) -> Column,
    {
        let columns = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(idx, col)| f(idx, col))
            .collect();
        Self { columns }
    }

    /// Drop every row whose entry in `keep` is false
    pub(crate) fn retain_rows(mut self, keep: &[bool]) -> Self {
        debug_assert_eq!(keep.len(), self.row_count());
        for col in &mut self.columns {
            col.data.retain_rows(keep);
        }
        self
    }
}

/// Supported input file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Tsv,
    Excel,
}

impl FileFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "tsv" | "tab" => Some(FileFormat::Tsv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(FileFormat::Excel),
            _ => None,
        }
    }
}

/// Options for reading an input file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadOptions {
    /// Worksheet to read from a workbook (first sheet if not set)
    pub sheet: Option<String>,
}

/// Result type for the application
pub type Result<T> = std::result::Result<T, crate::error::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rejects_ragged_columns() {
        let result = Table::new(vec![
            Column::text("a", vec![Some("x"), Some("y")]),
            Column::number("b", vec![Some(1.0)]),
        ]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_table_rejects_duplicate_names() {
        let result = Table::new(vec![
            Column::number("a", vec![Some(1.0)]),
            Column::number("a", vec![Some(2.0)]),
        ]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(Vec::new()).unwrap();
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.column_count(), 0);
    }

    #[test]
    fn test_retain_rows() {
        let table = Table::new(vec![
            Column::text("a", vec![Some("x"), None, Some("z")]),
            Column::number("b", vec![Some(1.0), Some(2.0), None]),
        ])
        .unwrap();

        let table = table.retain_rows(&[true, false, true]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(
            table.column("a").unwrap().data,
            ColumnData::Text(vec![Some("x".to_string()), Some("z".to_string())])
        );
        assert_eq!(table.column("b").unwrap().data.missing_count(), 1);
    }

    #[test]
    fn test_file_format_from_extension() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("tab"), Some(FileFormat::Tsv));
        assert_eq!(FileFormat::from_extension("xlsx"), Some(FileFormat::Excel));
        assert_eq!(FileFormat::from_extension("json"), None);
    }
}
