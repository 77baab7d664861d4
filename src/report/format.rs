//! Terminal output: per-file progress lines and the end-of-batch summary.
//!
//! Formatting lives here so the pipeline only decides *what* happened.

use crate::io::ingest::UnitSniff;
use crate::report::{BatchReport, FileStatus};

pub fn format_file_start(file_name: &str) -> String {
    format!("Working on file {file_name}...")
}

pub fn format_column_line(header: &str) -> String {
    format!("\t{header}")
}

/// The numeric part and unit of the sniffed cell, so a wrong split is visible.
pub fn format_unit_line(sniff: &UnitSniff) -> String {
    format!("\t\t{}, {}", sniff.sample, sniff.unit)
}

pub fn format_batch_summary(report: &BatchReport) -> String {
    let mut out = String::new();

    out.push_str("\n=== roughen - batch summary ===\n");
    out.push_str(&format!("Input:  {}\n", report.input_dir.display()));
    out.push_str(&format!("Output: {}\n", report.output_dir.display()));
    out.push_str(&format!(
        "Files: {} done, {} failed{}\n",
        report.succeeded(),
        report.failed(),
        if report.interrupted { " (interrupted)" } else { "" }
    ));

    let verb = if report.dry_run { "Planned" } else { "Written" };
    out.push_str(&format!("{verb} tables: {}\n", report.outputs().count()));

    let failures: Vec<_> = report
        .files
        .iter()
        .filter(|f| f.status == FileStatus::Failed)
        .collect();
    if !failures.is_empty() {
        out.push_str("\nFailed files:\n");
        for f in failures {
            out.push_str(&format!(
                "  {}: {}\n",
                f.file,
                f.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    out
}
