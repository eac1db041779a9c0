use std::path::Path;
use std::process::ExitCode;

use autoclean::cli::{Cli, Commands};
use autoclean::types::{ReadOptions, Result};
use autoclean::{cleaning, output, readers, Error};
use clap::Parser;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_unreadable() => {
            log::error!("Could not read input: {}", e);
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<()> {
    let options = command.read_options();
    match command {
        Commands::Clean {
            input, out, report, ..
        } => clean_file(&input, out.as_deref(), report.as_deref(), &options),
    }
}

fn clean_file(
    input: &Path,
    out: Option<&Path>,
    report_path: Option<&Path>,
    options: &ReadOptions,
) -> Result<()> {
    for target in out.into_iter().chain(report_path) {
        if same_file(input, target) {
            return Err(Error::InvalidInput(format!(
                "Refusing to overwrite the input file: {}",
                target.display()
            )));
        }
    }

    let mut reader = readers::create_reader(input)?;
    let table = reader.read(options)?;
    log::info!(
        "Read {} ({:?}): {} rows, {} columns",
        input.display(),
        reader.format(),
        table.row_count(),
        table.column_count()
    );

    let cleaning::Cleaned { table, report } = cleaning::clean(table);
    for (stage, event) in report.events() {
        match event {
            cleaning::ColumnEvent::MedianUndefined { .. } => {
                log::warn!("[{}] {}", stage.name(), event)
            }
            _ => log::info!("[{}] {}", stage.name(), event),
        }
    }
    log::info!("Cleaned: {} rows in, {} rows out", report.rows_in, report.rows_out);

    if let Some(path) = report_path {
        output::write_json_file(&report, path)?;
        log::info!("Report written to: {}", path.display());
    }

    match out {
        Some(path) => {
            output::write_csv_file(&table, path)?;
            log::info!("Cleaned data written to: {}", path.display());
        }
        None => output::write_csv_stdout(&table)?,
    }

    Ok(())
}

/// Whether `target` names the same file as `input`, after resolving `.`, `..`
/// and symlinks. A target that does not exist yet is resolved through its parent.
fn same_file(input: &Path, target: &Path) -> bool {
    let Ok(input) = std::fs::canonicalize(input) else {
        return false;
    };
    if let Ok(target) = std::fs::canonicalize(target) {
        return target == input;
    }

    let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
        return false;
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    std::fs::canonicalize(parent).is_ok_and(|parent| parent.join(name) == input)
}
