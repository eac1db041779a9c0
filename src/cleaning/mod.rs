//! The cleaning pipeline.
//!
//! Five stages run in a fixed order over one table:
//! deduplicate, trim text, impute numeric medians, impute text modes, and
//! finally try to turn text columns into dates. Column classification is
//! taken once on entry and shared by every stage.

pub mod dates;
pub mod dedup;
pub mod impute;
pub mod report;
pub mod text;

use serde::Serialize;

use crate::types::{ColumnData, Table};

pub use report::{CleanReport, ColumnEvent, ColumnSummary, StageReport};

/// Classification of a column, fixed at pipeline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Numeric,
    Other,
}

impl ColumnKind {
    pub fn of(data: &ColumnData) -> Self {
        match data {
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Number(_) => ColumnKind::Numeric,
            ColumnData::Date(_) => ColumnKind::Other,
        }
    }
}

/// Take the classification snapshot for every column
pub fn classify(table: &Table) -> Vec<ColumnKind> {
    table.columns().iter().map(|c| ColumnKind::of(&c.data)).collect()
}

type StageFn = fn(Table, &[ColumnKind], &mut StageReport) -> Table;

/// A pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Deduplicate,
    NormalizeText,
    ImputeNumeric,
    ImputeCategorical,
    CoerceDates,
}

/// Stages in the order they run
pub const STAGES: [Stage; 5] = [
    Stage::Deduplicate,
    Stage::NormalizeText,
    Stage::ImputeNumeric,
    Stage::ImputeCategorical,
    Stage::CoerceDates,
];

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Deduplicate => "deduplicate",
            Stage::NormalizeText => "normalize text",
            Stage::ImputeNumeric => "impute numeric",
            Stage::ImputeCategorical => "impute categorical",
            Stage::CoerceDates => "coerce dates",
        }
    }

    fn function(&self) -> StageFn {
        match self {
            Stage::Deduplicate => dedup::drop_duplicates,
            Stage::NormalizeText => text::normalize_text,
            Stage::ImputeNumeric => impute::impute_numeric,
            Stage::ImputeCategorical => impute::impute_categorical,
            Stage::CoerceDates => dates::coerce_dates,
        }
    }

    /// Run this stage alone. Columns past the end of `kinds` are left untouched.
    pub fn apply(&self, table: Table, kinds: &[ColumnKind]) -> (Table, StageReport) {
        let mut report = StageReport::new(*self);
        let table = (self.function())(table, kinds, &mut report);
        (table, report)
    }
}

/// Output of a pipeline run
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub table: Table,
    pub report: CleanReport,
}

/// Run the full pipeline. Never fails; per-column problems end up in the report.
pub fn clean(table: Table) -> Cleaned {
    let kinds = classify(&table);
    let rows_in = table.row_count();
    let columns = table
        .columns()
        .iter()
        .zip(&kinds)
        .map(|(col, kind)| ColumnSummary {
            name: col.name.clone(),
            kind: *kind,
        })
        .collect();

    let mut stages = Vec::with_capacity(STAGES.len());
    let mut table = table;
    for stage in STAGES {
        let (next, stage_report) = stage.apply(table, &kinds);
        table = next;
        stages.push(stage_report);
    }

    let report = CleanReport {
        rows_in,
        rows_out: table.row_count(),
        columns,
        stages,
    };
    Cleaned { table, report }
}

/// Run the full pipeline and keep only the table
pub fn clean_table(table: Table) -> Table {
    clean(table).table
}
