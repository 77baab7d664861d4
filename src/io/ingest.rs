//! Tagged CSV ingest and normalisation.
//!
//! Turns one tagged input table into a native-periodicity date column plus
//! a set of normalised value columns, ready for the roughening engine.
//!
//! Conventions of the input table:
//! - `;` delimited, first row is the header
//! - the date column is the first header starting with `T_`; the segment
//!   after its last `_` is the periodicity code (`h`, `d`, `M`, `Y`)
//! - data columns start with `TAG_`; every other column is ignored
//!
//! A file either loads completely or fails as a whole: the first malformed
//! date or number aborts the load, so nothing is written for that file.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::domain::{Periodicity, TaggedColumn, Timestamp};
use crate::error::AppError;

pub const DELIMITER: u8 = b';';
pub const DATE_PREFIX: &str = "T_";
pub const TAG_PREFIX: &str = "TAG_";

/// Full-resolution timestamp layouts, tried in order. `%.f` also matches no fraction.
const FULL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The unit found by sniffing a column, with the numeric part of the sniffed cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSniff {
    pub sample: String,
    pub unit: String,
}

/// A normalised column plus how its unit was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedColumn {
    pub column: TaggedColumn,
    pub sniff: Option<UnitSniff>,
}

/// Everything needed to roughen and export one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    pub date_header: String,
    pub periodicity: Periodicity,
    pub dates: Vec<Timestamp>,
    pub columns: Vec<LoadedColumn>,
}

impl LoadedTable {
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }
}

/// Open and load a tagged CSV file.
pub fn load_tagged_table(path: &Path) -> Result<LoadedTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_tagged_table(file)
}

/// Load a tagged table from any reader.
pub fn read_tagged_table<R: Read>(input: R) -> Result<LoadedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let (date_idx, date_header) = find_date_column(&headers)?;
    let periodicity = periodicity_from_header(&date_header)?;

    let tag_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (idx, normalize_header_name(name).to_string()))
        .filter(|(_, name)| name.starts_with(TAG_PREFIX))
        .collect();
    if tag_columns.is_empty() {
        return Err(AppError::input(format!(
            "No `{TAG_PREFIX}` columns found next to date column `{date_header}`."
        )));
    }

    let mut date_cells = Vec::new();
    let mut raw: Vec<Vec<String>> = vec![Vec::new(); tag_columns.len()];

    for (idx, result) in reader.records().enumerate() {
        // +2: records start after the header, lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("Line {line}: CSV parse error: {e}")))?;

        date_cells.push(cell(&record, date_idx).to_string());
        for (cells, (col_idx, _)) in raw.iter_mut().zip(&tag_columns) {
            cells.push(cell(&record, *col_idx).to_string());
        }
    }

    let dates = parse_date_column(&date_header, &date_cells)?;

    let columns = tag_columns
        .into_iter()
        .zip(raw)
        .map(|((_, header), cells)| normalise_column(&header, &cells))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LoadedTable {
        date_header,
        periodicity,
        dates,
        columns,
    })
}

fn normalize_header_name(name: &str) -> &str {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}')
}

fn cell(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("")
}

fn find_date_column(headers: &StringRecord) -> Result<(usize, String), AppError> {
    headers
        .iter()
        .map(normalize_header_name)
        .enumerate()
        .find(|(_, name)| name.starts_with(DATE_PREFIX))
        .map(|(idx, name)| (idx, name.to_string()))
        .ok_or_else(|| AppError::input(format!("No date column (header starting with `{DATE_PREFIX}`) found.")))
}

/// Read the periodicity code from the last `_`-separated segment of the date header.
pub fn periodicity_from_header(header: &str) -> Result<Periodicity, AppError> {
    let code = header.rsplit('_').next().unwrap_or_default();
    Periodicity::from_code(code).ok_or_else(|| {
        AppError::input(format!(
            "Date column `{header}` has unknown periodicity code '{code}' (expected one of h, d, M, Y)."
        ))
    })
}

/// Parse one date cell, trying the full ISO layouts first, then `YYYY`, then `YYYY-MM`.
pub fn parse_stamp(s: &str) -> Option<Timestamp> {
    parse_full(s).or_else(|| match s.len() {
        4 => parse_year(s),
        7 => parse_year_month(s),
        _ => None,
    })
}

fn parse_full(s: &str) -> Option<Timestamp> {
    for fmt in FULL_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Timestamp::from_naive(dt));
        }
    }
    // Offsets are accepted but ignored: the wall-clock time is kept as written.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(Timestamp::from_naive(dt.naive_local()));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(Timestamp::from_naive);
    }
    parse_date_hour(s)
}

/// `YYYY-MM-DDTHH` (or with a space), which chrono will not parse without minutes.
fn parse_date_hour(s: &str) -> Option<Timestamp> {
    if s.len() != 13 || !s.is_char_boundary(10) {
        return None;
    }
    let (date, hour) = s.split_at(10);
    let hour = hour.strip_prefix('T').or_else(|| hour.strip_prefix(' '))?;
    if !hour.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let dt = d.and_hms_opt(hour.parse().ok()?, 0, 0)?;
    Some(Timestamp::from_naive(dt))
}

fn parse_year(s: &str) -> Option<Timestamp> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Timestamp::new(s.parse().ok()?, 1, 1, 0)
}

fn parse_year_month(s: &str) -> Option<Timestamp> {
    let (year, month) = s.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    if !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    Timestamp::new(year.parse().ok()?, month.parse().ok()?, 1, 0)
}

fn parse_date_column(header: &str, cells: &[String]) -> Result<Vec<Timestamp>, AppError> {
    cells
        .iter()
        .enumerate()
        .map(|(idx, s)| {
            parse_stamp(s).ok_or_else(|| {
                AppError::input(format!(
                    "Line {}: invalid date '{s}' in `{header}`. Expected an ISO date/time, YYYY or YYYY-MM.",
                    idx + 2
                ))
            })
        })
        .collect()
}

/// Look for a unit suffix (`"12.5 kWh"`) in the second data row, or the first
/// when there is only one.
///
/// A cell ending in a non-numeric character is split at its first space; the
/// left part must parse as a number, otherwise the column is rejected.
pub fn sniff_unit(header: &str, cells: &[String]) -> Result<Option<UnitSniff>, AppError> {
    let Some(probe) = cells.get(1).or_else(|| cells.first()) else {
        return Ok(None);
    };
    let Some(last) = probe.chars().last() else {
        return Ok(None);
    };
    if last.is_numeric() {
        return Ok(None);
    }

    let (sample, unit) = probe.split_once(' ').ok_or_else(|| {
        AppError::input(format!(
            "Column `{header}`: value '{probe}' is not numeric and has no space-separated unit."
        ))
    })?;
    sample.parse::<f64>().map_err(|e| {
        AppError::input(format!(
            "Column `{header}`: unit removal from '{probe}' left '{sample}', which is not a number ({e})."
        ))
    })?;

    Ok(Some(UnitSniff {
        sample: sample.to_string(),
        unit: unit.to_string(),
    }))
}

/// Keep the text before the first space.
pub fn strip_unit(cell: &str) -> &str {
    cell.split_once(' ').map_or(cell, |(number, _)| number)
}

/// Format a cell with two decimals. Empty cells count as zero; `NaN` and
/// infinities are rejected.
pub fn coerce_value(cell: &str) -> Result<String, String> {
    if cell.is_empty() {
        return Ok("0.00".to_string());
    }
    let v = cell
        .parse::<f64>()
        .map_err(|e| format!("'{cell}' is not a number ({e})"))?;
    if !v.is_finite() {
        return Err(format!("'{cell}' is not a finite number"));
    }
    Ok(format!("{v:.2}"))
}

/// Sniff, strip and coerce one `TAG_` column.
pub fn normalise_column(header: &str, cells: &[String]) -> Result<LoadedColumn, AppError> {
    let sniff = sniff_unit(header, cells)?;

    let values = cells
        .iter()
        .enumerate()
        .map(|(idx, raw)| {
            let raw = if sniff.is_some() { strip_unit(raw) } else { raw.as_str() };
            coerce_value(raw).map_err(|e| AppError::input(format!("Line {}: column `{header}`: {e}", idx + 2)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let column = TaggedColumn {
        header: header.to_string(),
        tag: header.strip_prefix(TAG_PREFIX).unwrap_or(header).to_string(),
        unit: sniff.as_ref().map(|s| s.unit.clone()),
        values,
    };

    Ok(LoadedColumn { column, sniff })
}
