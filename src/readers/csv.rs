use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::{Reader, ReaderBuilder};

use crate::error::Error;
use crate::inference::{is_missing, parse_numeric};
use crate::types::{Column, ColumnData, FileFormat, ReadOptions, Result, Table};

use super::{unique_headers, TableReader};

/// CSV/TSV file reader
pub struct CsvReader {
    path: PathBuf,
    delimiter: u8,
}

impl CsvReader {
    /// Create a new CSV reader
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b',',
        })
    }

    /// Create a new TSV reader
    pub fn new_tsv(path: &Path) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            delimiter: b'\t',
        })
    }

    fn create_reader(&self) -> Result<Reader<BufReader<File>>> {
        let file = File::open(&self.path)?;
        Ok(build_reader(BufReader::new(file), self.delimiter))
    }
}

fn build_reader<R: Read>(input: R, delimiter: u8) -> Reader<R> {
    ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input)
}

impl TableReader for CsvReader {
    fn read(&mut self, _options: &ReadOptions) -> Result<Table> {
        let reader = self.create_reader()?;
        read_delimited(reader)
    }

    fn format(&self) -> FileFormat {
        if self.delimiter == b'\t' {
            FileFormat::Tsv
        } else {
            FileFormat::Csv
        }
    }
}

/// Read delimited text from any source
pub fn read_from<R: Read>(input: R, delimiter: u8) -> Result<Table> {
    read_delimited(build_reader(input, delimiter))
}

fn read_delimited<R: Read>(mut reader: Reader<R>) -> Result<Table> {
    let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    // An empty file yields a single empty header
    if raw_headers.is_empty() || (raw_headers.len() == 1 && raw_headers[0].is_empty()) {
        return Err(Error::Unreadable("No columns to parse from file".to_string()));
    }

    let headers = unique_headers(&raw_headers);
    let num_cols = headers.len();

    let mut raw_columns: Vec<Vec<Option<String>>> = vec![Vec::new(); num_cols];

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;

        if record.len() > num_cols {
            return Err(Error::Unreadable(format!(
                "Expected {} fields in line {}, saw {}",
                num_cols,
                row_idx + 2,
                record.len()
            )));
        }

        for (col_idx, cells) in raw_columns.iter_mut().enumerate() {
            let cell = record
                .get(col_idx)
                .filter(|field| !is_missing(field))
                .map(str::to_string);
            cells.push(cell);
        }
    }

    let columns = headers
        .into_iter()
        .zip(raw_columns)
        .map(|(name, cells)| Column::new(name, type_column(cells)))
        .collect();

    Table::new(columns)
}

/// Decide a column's type from its raw text: numeric when every present
/// value parses as a number (an all-missing column counts), text otherwise.
pub fn type_column(cells: Vec<Option<String>>) -> ColumnData {
    let numbers: Option<Vec<Option<f64>>> = cells
        .iter()
        .map(|cell| match cell {
            Some(raw) => parse_numeric(raw).map(Some),
            None => Some(None),
        })
        .collect();

    match numbers {
        Some(numbers) => ColumnData::Number(numbers),
        None => ColumnData::Text(cells),
    }
}
