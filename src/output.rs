use std::io::Write;
use std::path::Path;

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

use crate::types::{ColumnData, Result, Table};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DATETIME_MICROS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Pick one text format for a whole date column: date only when every value
/// sits on midnight, microseconds only when some value needs them.
fn date_format(values: &[Option<NaiveDateTime>]) -> &'static str {
    let present = values.iter().flatten();
    if present.clone().any(|dt| dt.nanosecond() != 0) {
        DATETIME_MICROS_FORMAT
    } else if present.clone().any(|dt| dt.num_seconds_from_midnight() != 0) {
        DATETIME_FORMAT
    } else {
        DATE_FORMAT
    }
}

/// Render every cell of a column as text. Missing cells become empty strings.
fn render_column(data: &ColumnData) -> Vec<String> {
    match data {
        ColumnData::Text(values) => values
            .iter()
            .map(|v| v.clone().unwrap_or_default())
            .collect(),
        ColumnData::Number(values) => values
            .iter()
            .map(|v| v.map(|n| n.to_string()).unwrap_or_default())
            .collect(),
        ColumnData::Date(values) => {
            let format = date_format(values);
            values
                .iter()
                .map(|v| v.map(|dt| dt.format(format).to_string()).unwrap_or_default())
                .collect()
        }
    }
}

/// Write a table as CSV: a header row, then one record per row
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.column_names())?;

    let rendered: Vec<Vec<String>> = table.columns().iter().map(|c| render_column(&c.data)).collect();
    for row in 0..table.row_count() {
        csv_writer.write_record(rendered.iter().map(|col| col[row].as_str()))?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write a table to a CSV file
pub fn write_csv_file(table: &Table, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(table, std::io::BufWriter::new(file))
}

/// Write a table as CSV to stdout
pub fn write_csv_stdout(table: &Table) -> Result<()> {
    let stdout = std::io::stdout();
    write_csv(table, stdout.lock())
}

/// Write any serializable value (the cleaning report) to a JSON file
pub fn write_json_file<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

/// Serialize a value to a JSON string
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
