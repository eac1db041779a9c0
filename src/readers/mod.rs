pub mod csv;
pub mod excel;

use std::collections::HashSet;
use std::path::Path;

use crate::types::{FileFormat, ReadOptions, Result, Table};

/// Common trait for table readers
pub trait TableReader {
    /// Read the file into a table
    fn read(&mut self, options: &ReadOptions) -> Result<Table>;

    fn format(&self) -> FileFormat;
}

/// Determine the file format from the path's extension
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");

    FileFormat::from_extension(ext).ok_or_else(|| {
        crate::error::Error::UnsupportedFormat(format!(
            "Unsupported file extension: .{}",
            ext
        ))
    })
}

/// Create a reader for the given file path
pub fn create_reader(path: &Path) -> Result<Box<dyn TableReader>> {
    match detect_format(path)? {
        FileFormat::Csv => Ok(Box::new(csv::CsvReader::new(path)?)),
        FileFormat::Tsv => Ok(Box::new(csv::CsvReader::new_tsv(path)?)),
        FileFormat::Excel => Ok(Box::new(excel::ExcelReader::new(path)?)),
    }
}

/// Read a table from a file, picking the reader by extension
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<Table> {
    create_reader(path)?.read(options)
}

/// Make header names usable as column names: blanks become `Unnamed: {idx}`
/// and repeats get a `.1`, `.2`, ... suffix.
pub fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut headers = Vec::with_capacity(raw.len());

    for (idx, name) in raw.iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.clone()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while taken.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }

        taken.insert(candidate.clone());
        headers.push(candidate);
    }
    headers
}
