use chrono::NaiveDateTime;

use super::report::{ColumnEvent, StageReport};
use super::ColumnKind;
use crate::inference::parse_datetime;
use crate::types::{ColumnData, Table};

/// Parse every present cell as a date, or give up on the whole column.
/// Missing cells stay missing.
pub fn try_parse_column(cells: &[Option<String>]) -> Option<Vec<Option<NaiveDateTime>>> {
    cells
        .iter()
        .map(|cell| match cell {
            Some(value) => parse_datetime(value).map(Some),
            None => Some(None),
        })
        .collect()
}

/// Stage 5: turn text columns into date columns when every value parses.
///
/// Looks at each column's current storage rather than the entry classification.
pub fn coerce_dates(table: Table, _kinds: &[ColumnKind], report: &mut StageReport) -> Table {
    table.map_columns(|_, mut col| {
        let ColumnData::Text(cells) = &col.data else {
            return col;
        };

        match try_parse_column(cells) {
            Some(dates) => {
                col.data = ColumnData::Date(dates);
                report.record(ColumnEvent::DatesCoerced {
                    column: col.name.clone(),
                });
            }
            None => report.record(ColumnEvent::DateCoercionSkipped {
                column: col.name.clone(),
            }),
        }
        col
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::Stage;
    use crate::types::Column;
    use chrono::NaiveDate;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn run(table: Table) -> (Table, StageReport) {
        let kinds = vec![ColumnKind::Text; table.column_count()];
        let mut report = StageReport::new(Stage::CoerceDates);
        let table = coerce_dates(table, &kinds, &mut report);
        (table, report)
    }

    #[test]
    fn test_all_dates_coerced() {
        let table = Table::new(vec![Column::text(
            "when",
            vec![Some("2024-01-01"), Some("2024-02-15"), Some("2024-03-10")],
        )])
        .unwrap();

        let (table, report) = run(table);

        assert_eq!(
            table.columns()[0].data,
            ColumnData::Date(vec![
                Some(midnight(2024, 1, 1)),
                Some(midnight(2024, 2, 15)),
                Some(midnight(2024, 3, 10)),
            ])
        );
        assert_eq!(
            report.events,
            vec![ColumnEvent::DatesCoerced {
                column: "when".to_string()
            }]
        );
    }

    #[test]
    fn test_one_failure_leaves_column_untouched() {
        let original = Column::text(
            "when",
            vec![Some("2024-01-01"), Some("not-a-date"), Some("2024-03-10")],
        );
        let table = Table::new(vec![original.clone()]).unwrap();

        let (table, report) = run(table);

        assert_eq!(table.columns()[0], original);
        assert_eq!(
            report.events,
            vec![ColumnEvent::DateCoercionSkipped {
                column: "when".to_string()
            }]
        );
    }

    #[test]
    fn test_missing_cells_survive_coercion() {
        let table = Table::new(vec![Column::text("when", vec![Some("2024-01-01"), None])]).unwrap();

        let (table, _) = run(table);
        assert_eq!(
            table.columns()[0].data,
            ColumnData::Date(vec![Some(midnight(2024, 1, 1)), None])
        );
    }

    #[test]
    fn test_non_text_columns_skipped() {
        let table = Table::new(vec![Column::number("year", vec![Some(2024.0), Some(2025.0)])]).unwrap();

        let (table, report) = run(table);
        assert!(matches!(table.columns()[0].data, ColumnData::Number(_)));
        assert!(report.events.is_empty());
    }

    #[test]
    fn test_empty_text_column_becomes_date() {
        let table = Table::new(vec![Column::text("when", Vec::<Option<&str>>::new())]).unwrap();

        let (table, _) = run(table);
        assert_eq!(table.columns()[0].data, ColumnData::Date(Vec::new()));
    }

    #[test]
    fn test_mixed_formats_all_parse() {
        let cells = vec![
            Some("2024-01-15".to_string()),
            Some("Jan 16, 2024".to_string()),
            Some("01/17/2024".to_string()),
        ];
        let parsed = try_parse_column(&cells).unwrap();
        assert_eq!(parsed[2], Some(midnight(2024, 1, 17)));
    }
}
