use serde::Serialize;

use super::{ColumnKind, Stage};

/// Column name and the classification the pipeline gave it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub kind: ColumnKind,
}

/// Something a stage did (or declined to do) to a column
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ColumnEvent {
    DuplicatesRemoved { count: usize },
    Trimmed { column: String, cells: usize },
    MedianFilled { column: String, median: f64, cells: usize },
    /// No finite median (all values missing, or infinite middle values); column left as is
    MedianUndefined { column: String },
    ModeFilled { column: String, value: String, cells: usize },
    PlaceholderFilled { column: String, cells: usize },
    DatesCoerced { column: String },
    /// At least one value did not parse; the column keeps its text
    DateCoercionSkipped { column: String },
}

/// Events recorded by a single stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub events: Vec<ColumnEvent>,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            events: Vec::new(),
        }
    }

    pub fn record(&mut self, event: ColumnEvent) {
        self.events.push(event);
    }
}

/// Summary of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub columns: Vec<ColumnSummary>,
    pub stages: Vec<StageReport>,
}

impl CleanReport {
    /// All events across stages, in pipeline order
    pub fn events(&self) -> impl Iterator<Item = (Stage, &ColumnEvent)> {
        self.stages
            .iter()
            .flat_map(|s| s.events.iter().map(move |e| (s.stage, e)))
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == stage)
    }
}

impl std::fmt::Display for ColumnEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnEvent::DuplicatesRemoved { count } => {
                write!(f, "removed {} duplicate row(s)", count)
            }
            ColumnEvent::Trimmed { column, cells } => {
                write!(f, "'{}': trimmed whitespace in {} cell(s)", column, cells)
            }
            ColumnEvent::MedianFilled {
                column,
                median,
                cells,
            } => write!(
                f,
                "'{}': filled {} missing cell(s) with median {}",
                column, cells, median
            ),
            ColumnEvent::MedianUndefined { column } => {
                write!(f, "'{}': median is undefined, left missing", column)
            }
            ColumnEvent::ModeFilled {
                column,
                value,
                cells,
            } => write!(
                f,
                "'{}': filled {} missing cell(s) with mode '{}'",
                column, cells, value
            ),
            ColumnEvent::PlaceholderFilled { column, cells } => write!(
                f,
                "'{}': no values to take a mode from, filled {} cell(s) with placeholder",
                column, cells
            ),
            ColumnEvent::DatesCoerced { column } => {
                write!(f, "'{}': converted to dates", column)
            }
            ColumnEvent::DateCoercionSkipped { column } => {
                write!(f, "'{}': not all values are dates, kept as text", column)
            }
        }
    }
}
