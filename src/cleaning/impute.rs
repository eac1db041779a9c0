use super::report::{ColumnEvent, StageReport};
use super::ColumnKind;
use crate::stats::{median, ValueCounts};
use crate::types::{ColumnData, Table, UNKNOWN_PLACEHOLDER};

/// Replace every missing cell with `value`. Returns how many cells were filled.
fn fill_missing<T: Clone>(cells: &mut [Option<T>], value: &T) -> usize {
    let mut filled = 0;
    for cell in cells.iter_mut().filter(|c| c.is_none()) {
        *cell = Some(value.clone());
        filled += 1;
    }
    filled
}

/// Median of the present cells, or `None` when every cell is missing
pub fn column_median(cells: &[Option<f64>]) -> Option<f64> {
    let present: Vec<f64> = cells.iter().flatten().copied().collect();
    median(&present)
}

/// Most frequent present value, ties broken by sort order
pub fn column_mode(cells: &[Option<String>]) -> Option<String> {
    let counts: ValueCounts = cells.iter().flatten().map(String::as_str).collect();
    counts.mode().map(str::to_string)
}

/// Stage 3: fill missing numeric cells with the column median
pub fn impute_numeric(table: Table, kinds: &[ColumnKind], report: &mut StageReport) -> Table {
    table.map_columns(|idx, mut col| {
        if kinds.get(idx) != Some(&ColumnKind::Numeric) || col.data.missing_count() == 0 {
            return col;
        }

        if let ColumnData::Number(cells) = &mut col.data {
            match column_median(cells) {
                Some(m) => {
                    let filled = fill_missing(cells, &m);
                    report.record(ColumnEvent::MedianFilled {
                        column: col.name.clone(),
                        median: m,
                        cells: filled,
                    });
                }
                None => report.record(ColumnEvent::MedianUndefined {
                    column: col.name.clone(),
                }),
            }
        }
        col
    })
}

/// Stage 4: fill missing text cells with the column mode, or the placeholder
/// when the column has no values at all
pub fn impute_categorical(table: Table, kinds: &[ColumnKind], report: &mut StageReport) -> Table {
    table.map_columns(|idx, mut col| {
        if kinds.get(idx) != Some(&ColumnKind::Text) || col.data.missing_count() == 0 {
            return col;
        }

        if let ColumnData::Text(cells) = &mut col.data {
            let event = match column_mode(cells) {
                Some(mode) => {
                    let filled = fill_missing(cells, &mode);
                    ColumnEvent::ModeFilled {
                        column: col.name.clone(),
                        value: mode,
                        cells: filled,
                    }
                }
                None => {
                    let filled = fill_missing(cells, &UNKNOWN_PLACEHOLDER.to_string());
                    ColumnEvent::PlaceholderFilled {
                        column: col.name.clone(),
                        cells: filled,
                    }
                }
            };
            report.record(event);
        }
        col
    })
}
