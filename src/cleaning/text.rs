use super::report::{ColumnEvent, StageReport};
use super::ColumnKind;
use crate::types::{ColumnData, Table};

/// Strip surrounding whitespace from every present cell. Returns how many cells changed.
pub fn trim_cells(cells: &mut [Option<String>]) -> usize {
    let mut changed = 0;
    for cell in cells.iter_mut().flatten() {
        let trimmed = cell.trim();
        if trimmed.len() != cell.len() {
            *cell = trimmed.to_string();
            changed += 1;
        }
    }
    changed
}

/// Stage 2: trim whitespace in every column classified as text
pub fn normalize_text(table: Table, kinds: &[ColumnKind], report: &mut StageReport) -> Table {
    table.map_columns(|idx, mut col| {
        if kinds.get(idx) != Some(&ColumnKind::Text) {
            return col;
        }

        if let ColumnData::Text(cells) = &mut col.data {
            let changed = trim_cells(cells);
            if changed > 0 {
                report.record(ColumnEvent::Trimmed {
                    column: col.name.clone(),
                    cells: changed,
                });
            }
        }
        col
    })
}
