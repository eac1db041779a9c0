//! Automatic cleaning of tabular data files.
//!
//! A table is read from CSV, TSV or a spreadsheet, run through a fixed
//! cleaning pipeline (see [`cleaning`]), and written back out as CSV.

pub mod cleaning;
pub mod cli;
pub mod error;
pub mod inference;
pub mod output;
pub mod readers;
pub mod stats;
pub mod types;

pub use cleaning::{clean, clean_table, CleanReport, Cleaned};
pub use error::Error;
pub use types::{Column, ColumnData, Result, Table};
