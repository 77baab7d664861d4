//! The batch pipeline shared by real runs and dry runs.
//!
//! Per file: load + normalise every tagged column -> roughen each column ->
//! write one table per column. Everything for a file is computed before its
//! first table is written, so a file that fails leaves no output behind.
//!
//! Progress lines go to the `out` writer (stdout in the binary).

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use crate::domain::{RoughenedBundle, RunConfig, Series, TaggedColumn};
use crate::error::AppError;
use crate::io::{discover_inputs, ensure_output_dir, load_tagged_table, output_path, write_roughened_csv};
use crate::report::{
    BatchReport, FileOutcome, FileStatus, OutputEntry, SlotRows, format_column_line, format_file_start,
    format_unit_line,
};

/// Process every eligible file of `config.input_dir`.
///
/// A failing file is logged and recorded, and the batch moves on, unless
/// `config.fail_fast` is set. `interrupted` is checked between files only.
pub fn run_batch<W: Write>(
    config: &RunConfig,
    interrupted: &AtomicBool,
    out: &mut W,
) -> Result<BatchReport, AppError> {
    let inputs = discover_inputs(&config.input_dir)?;
    info!(count = inputs.len(), dir = %config.input_dir.display(), "discovered input files");

    if !config.dry_run {
        ensure_output_dir(&config.output_dir)?;
    }

    let mut report = BatchReport::new(config.input_dir.clone(), config.output_dir.clone(), config.dry_run);

    for path in inputs {
        if interrupted.load(Ordering::SeqCst) {
            warn!("interrupted, stopping before {}", path.display());
            report.interrupted = true;
            break;
        }

        let name = file_label(&path);
        match process_file(&path, config, out) {
            Ok(outcome) => report.files.push(outcome),
            Err(err) => {
                let err = err.context(&name);
                error!("{err}");
                if config.fail_fast {
                    return Err(err);
                }
                report.files.push(FileOutcome::failed(name, &err));
            }
        }
    }

    Ok(report)
}

/// Load, roughen and (unless dry-running) write the tables of one file.
pub fn process_file<W: Write>(path: &Path, config: &RunConfig, out: &mut W) -> Result<FileOutcome, AppError> {
    let name = file_label(path);
    progress(out, &format_file_start(&name))?;

    let table = load_tagged_table(path)?;
    let rows = table.row_count();
    debug!(
        file = %name,
        rows,
        periodicity = %table.periodicity,
        columns = table.columns.len(),
        "loaded tagged table"
    );

    let mut planned: Vec<(TaggedColumn, RoughenedBundle)> = Vec::with_capacity(table.columns.len());
    for loaded in table.columns {
        progress(out, &format_column_line(&loaded.column.header))?;
        if let Some(sniff) = &loaded.sniff {
            progress(out, &format_unit_line(sniff))?;
        }

        // The values move into the series; the column keeps only its naming.
        let mut column = loaded.column;
        let series = Series::new(table.periodicity, table.dates.clone(), std::mem::take(&mut column.values))?;
        planned.push((column, series.roughen()));
    }

    let mut outputs = Vec::with_capacity(planned.len());
    for (column, bundle) in &planned {
        let path = output_path(&config.output_dir, column, rows);
        if !config.dry_run {
            write_roughened_csv(&path, column, bundle)?;
            debug!(output = %path.display(), "wrote table");
        }
        outputs.push(OutputEntry {
            tag: column.tag.clone(),
            unit: column.unit.clone(),
            path,
            rows: bundle.row_count(),
            filled: SlotRows::of(bundle),
        });
    }

    Ok(FileOutcome {
        file: name,
        status: FileStatus::Done,
        periodicity: Some(table.periodicity),
        rows,
        outputs,
        error: None,
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn progress<W: Write>(out: &mut W, line: &str) -> Result<(), AppError> {
    writeln!(out, "{line}").map_err(|e| AppError::output(format!("Failed to write progress output: {e}")))
}
