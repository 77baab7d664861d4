//! Output tables and the batch manifest.
//!
//! Each tagged column becomes one `;`-delimited table with the four
//! periodicity slots side by side. Line endings are CRLF, the usual choice
//! for spreadsheet-bound CSV.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::{RoughenedBundle, TaggedColumn};
use crate::error::AppError;
use crate::io::ingest::DELIMITER;
use crate::report::BatchReport;

/// Where the table for `column` goes, given the native row count of its file.
pub fn output_path(dir: &Path, column: &TaggedColumn, row_count: usize) -> PathBuf {
    dir.join(column.output_file_name(row_count))
}

/// Create the output directory (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<(), AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::output(format!("Failed to create output directory '{}': {e}", dir.display())))
}

/// Write one roughened table to `path`.
pub fn write_roughened_csv(path: &Path, column: &TaggedColumn, bundle: &RoughenedBundle) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create output CSV '{}': {e}", path.display())))?;
    write_roughened(file, column, bundle)
        .map_err(|e| e.context(path.display()))
}

/// Write the header row and every bundle row to `out`.
pub fn write_roughened<W: Write>(out: W, column: &TaggedColumn, bundle: &RoughenedBundle) -> Result<(), AppError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    writer
        .write_record(column.output_headers())
        .map_err(|e| AppError::output(format!("Failed to write output header: {e}")))?;

    for row in bundle.rows() {
        writer
            .write_record(row)
            .map_err(|e| AppError::output(format!("Failed to write output row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::output(format!("Failed to flush output CSV: {e}")))?;
    Ok(())
}

/// Write the batch report as pretty-printed JSON.
pub fn write_manifest_json(path: &Path, report: &BatchReport) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::output(format!("Failed to create manifest JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, report)
        .map_err(|e| AppError::output(format!("Failed to write manifest JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Periodicity, Timestamp};
    use crate::roughen::roughen;

    #[test]
    fn table_layout_matches_bundle() {
        let column = TaggedColumn {
            header: "TAG_power".to_string(),
            tag: "power".to_string(),
            unit: Some("kWh".to_string()),
            values: vec!["1.00".to_string(), "2.00".to_string()],
        };
        let dates = vec![
            Timestamp::new(2021, 1, 1, 0).unwrap(),
            Timestamp::new(2021, 1, 2, 0).unwrap(),
        ];
        let bundle = roughen(Periodicity::Daily, &dates, &column.values);

        let mut buf = Vec::new();
        write_roughened(&mut buf, &column, &bundle).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "h_date;h_kWh;d_date;d_kWh;M_date;M_kWh;Y_date;Y_kWh\r\n\
             ;;2021-01-01;1.00;2021-01;1.00;2021;1.00\r\n\
             ;;2021-01-02;2.00;;;;\r\n"
        );
    }

    #[test]
    fn output_path_encodes_rows_and_tag() {
        let column = TaggedColumn {
            header: "TAG_flow".to_string(),
            tag: "flow".to_string(),
            unit: None,
            values: vec![],
        };
        assert_eq!(
            output_path(Path::new("out"), &column, 8760),
            Path::new("out").join("008760__flow.csv")
        );
    }
}
