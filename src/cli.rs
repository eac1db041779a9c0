use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::ReadOptions;

/// Automatic cleaning of CSV and spreadsheet files
#[derive(Parser, Debug)]
#[command(name = "autoclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clean a data file and write the result as CSV
    Clean {
        /// Input file path (.csv, .tsv, .xlsx, .xls, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file path (stdout if not specified)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Worksheet to read from a workbook (first sheet by default)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Write a JSON report of what each cleaning stage did
        #[arg(short, long)]
        report: Option<PathBuf>,
    },
}

impl Commands {
    pub fn read_options(&self) -> ReadOptions {
        match self {
            Commands::Clean { sheet, .. } => ReadOptions {
                sheet: sheet.clone(),
            },
        }
    }
}
