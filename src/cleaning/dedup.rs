use std::collections::HashSet;

use chrono::NaiveDateTime;

use super::report::{ColumnEvent, StageReport};
use super::ColumnKind;
use crate::types::{ColumnData, Table};

/// Hashable view of a single cell
#[derive(Debug, PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Text(&'a str),
    Number(u64),
    Date(NaiveDateTime),
}

fn number_key(value: f64) -> u64 {
    // 0.0 and -0.0 compare equal, so they must hash the same
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

fn cell_key(data: &ColumnData, row: usize) -> CellKey<'_> {
    match data {
        ColumnData::Text(v) => v[row].as_deref().map_or(CellKey::Missing, CellKey::Text),
        ColumnData::Number(v) => v[row].map_or(CellKey::Missing, |n| CellKey::Number(number_key(n))),
        ColumnData::Date(v) => v[row].map_or(CellKey::Missing, CellKey::Date),
    }
}

/// Mask of rows to keep: the first occurrence of every distinct row
pub fn first_occurrences(table: &Table) -> Vec<bool> {
    let mut seen: HashSet<Vec<CellKey<'_>>> = HashSet::with_capacity(table.row_count());

    (0..table.row_count())
        .map(|row| {
            let key: Vec<CellKey<'_>> = table
                .columns()
                .iter()
                .map(|col| cell_key(&col.data, row))
                .collect();
            seen.insert(key)
        })
        .collect()
}

/// Stage 1: drop rows that repeat an earlier row exactly
pub fn drop_duplicates(table: Table, _kinds: &[ColumnKind], report: &mut StageReport) -> Table {
    let keep = first_occurrences(&table);
    let removed = keep.iter().filter(|k| !**k).count();
    if removed == 0 {
        return table;
    }

    report.record(ColumnEvent::DuplicatesRemoved { count: removed });
    table.retain_rows(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::Stage;
    use crate::types::Column;

    fn run(table: Table) -> (Table, StageReport) {
        let mut report = StageReport::new(Stage::Deduplicate);
        let table = drop_duplicates(table, &[], &mut report);
        (table, report)
    }

    #[test]
    fn test_keeps_first_occurrence_in_order() {
        let table = Table::new(vec![
            Column::text("name", vec![Some("b"), Some("a"), Some("b"), Some("c"), Some("a")]),
            Column::number("val", vec![Some(2.0), Some(1.0), Some(2.0), Some(3.0), Some(1.0)]),
        ])
        .unwrap();

        let (table, report) = run(table);

        assert_eq!(table.row_count(), 3);
        assert_eq!(
            table.column("name").unwrap().data,
            ColumnData::Text(vec![
                Some("b".to_string()),
                Some("a".to_string()),
                Some("c".to_string())
            ])
        );
        assert_eq!(report.events, vec![ColumnEvent::DuplicatesRemoved { count: 2 }]);
    }

    #[test]
    fn test_missing_cells_compare_equal() {
        let table = Table::new(vec![
            Column::text("name", vec![None::<&str>, None]),
            Column::number("val", vec![None, None]),
        ])
        .unwrap();

        let (table, _) = run(table);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_missing_differs_from_empty_and_zero() {
        let table = Table::new(vec![
            Column::text("name", vec![None, Some(""), Some("")]),
            Column::number("val", vec![Some(0.0), None, Some(-0.0)]),
        ])
        .unwrap();

        let (table, report) = run(table);
        assert_eq!(table.row_count(), 3);
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_signed_zero_is_duplicate() {
        let table = Table::new(vec![Column::number("val", vec![Some(0.0), Some(-0.0)])]).unwrap();

        let (table, _) = run(table);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_partial_match_is_not_duplicate() {
        let table = Table::new(vec![
            Column::text("name", vec![Some("a"), Some("a")]),
            Column::number("val", vec![Some(1.0), Some(2.0)]),
        ])
        .unwrap();

        let (table, _) = run(table);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_zero_columns_passes_through() {
        let (table, report) = run(Table::default());
        assert_eq!(table.column_count(), 0);
        assert!(report.events.is_empty());
    }
}
