use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::Error;
use crate::inference::{is_missing, parse_datetime};
use crate::types::{Column, ColumnData, FileFormat, ReadOptions, Result, Table};

use super::{unique_headers, TableReader};

/// Excel file reader (supports .xlsx, .xls, .xlsm, .xlsb, .ods)
pub struct ExcelReader {
    path: PathBuf,
}

/// How a single non-missing cell would like to be typed
enum CellShape {
    Number(f64),
    Date(NaiveDateTime),
    Other,
}

impl ExcelReader {
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Convert Excel Data to string representation
    fn data_to_string(dt: &Data) -> String {
        match dt {
            Data::Empty => String::new(),
            Data::String(s) => s.clone(),
            Data::Float(f) => f.to_string(),
            Data::Int(i) => i.to_string(),
            Data::Bool(true) => "True".to_string(),
            Data::Bool(false) => "False".to_string(),
            Data::DateTime(d) => match Self::excel_serial_to_datetime(d.as_f64()) {
                Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => d.as_f64().to_string(),
            },
            Data::DateTimeIso(s) => s.clone(),
            Data::DurationIso(s) => s.clone(),
            Data::Error(e) => format!("#{:?}", e),
        }
    }

    /// Convert an Excel serial date to a timestamp.
    /// Excel's epoch is 1899-12-30 (accounting for the 1900 leap year bug).
    fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
        if !serial.is_finite() {
            return None;
        }
        let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
        let millis = (serial * 86_400_000.0).round() as i64;
        base.checked_add_signed(Duration::try_milliseconds(millis)?)
    }

    /// Check if a Data represents a missing value
    fn is_missing_data(dt: &Data) -> bool {
        match dt {
            Data::Empty => true,
            Data::String(s) => is_missing(s),
            Data::Error(_) => true,
            _ => false,
        }
    }

    fn shape(dt: &Data) -> CellShape {
        match dt {
            Data::Float(f) => CellShape::Number(*f),
            Data::Int(i) => CellShape::Number(*i as f64),
            Data::DateTime(d) => Self::excel_serial_to_datetime(d.as_f64())
                .map_or(CellShape::Other, CellShape::Date),
            Data::DateTimeIso(s) => parse_datetime(s).map_or(CellShape::Other, CellShape::Date),
            _ => CellShape::Other,
        }
    }

    /// Type a column from its cells: all numbers, all dates, or text.
    /// A column with no values at all is numeric.
    fn type_cells(cells: &[Data]) -> ColumnData {
        let shapes: Vec<Option<CellShape>> = cells
            .iter()
            .map(|c| (!Self::is_missing_data(c)).then(|| Self::shape(c)))
            .collect();

        let numbers: Option<Vec<Option<f64>>> = shapes
            .iter()
            .map(|s| match s {
                None => Some(None),
                Some(CellShape::Number(n)) => Some(Some(*n)),
                Some(_) => None,
            })
            .collect();
        if let Some(numbers) = numbers {
            return ColumnData::Number(numbers);
        }

        let dates: Option<Vec<Option<NaiveDateTime>>> = shapes
            .iter()
            .map(|s| match s {
                None => Some(None),
                Some(CellShape::Date(d)) => Some(Some(*d)),
                Some(_) => None,
            })
            .collect();
        if let Some(dates) = dates {
            return ColumnData::Date(dates);
        }

        ColumnData::Text(
            cells
                .iter()
                .map(|c| (!Self::is_missing_data(c)).then(|| Self::data_to_string(c)))
                .collect(),
        )
    }

    /// The requested worksheet, or the first one when none is named
    fn select_sheet(sheet_names: &[String], requested: Option<&str>) -> Result<String> {
        match requested {
            Some(name) if sheet_names.iter().any(|s| s == name) => Ok(name.to_string()),
            Some(name) => Err(Error::Unreadable(format!("Worksheet '{}' not found", name))),
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| Error::Unreadable("Workbook has no worksheets".to_string())),
        }
    }

    fn range_to_table(range: &Range<Data>) -> Result<Table> {
        let mut rows = range.rows();
        let Some(header_row) = rows.next() else {
            return Ok(Table::default());
        };

        // Header text is taken literally, as the CSV reader does: only an
        // empty cell falls back to an `Unnamed` name
        let raw_headers: Vec<String> = header_row.iter().map(Self::data_to_string).collect();
        let headers = unique_headers(&raw_headers);

        let mut raw_columns: Vec<Vec<Data>> = vec![Vec::new(); headers.len()];
        for row in rows {
            for (col_idx, cells) in raw_columns.iter_mut().enumerate() {
                cells.push(row.get(col_idx).cloned().unwrap_or(Data::Empty));
            }
        }

        let columns = headers
            .into_iter()
            .zip(raw_columns)
            .map(|(name, cells)| Column::new(name, Self::type_cells(&cells)))
            .collect();

        Table::new(columns)
    }
}

impl TableReader for ExcelReader {
    fn read(&mut self, options: &ReadOptions) -> Result<Table> {
        let mut workbook: Sheets<std::io::BufReader<std::fs::File>> =
            open_workbook_auto(&self.path)?;

        let sheet_name = Self::select_sheet(&workbook.sheet_names(), options.sheet.as_deref())?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(Error::Excel)?;

        Self::range_to_table(&range)
    }

    fn format(&self) -> FileFormat {
        FileFormat::Excel
    }
}
