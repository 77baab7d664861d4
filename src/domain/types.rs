//! Shared domain types.
//!
//! These are kept small and copyable where possible so they can be:
//!
//! - passed by value through the roughening engine
//! - rendered into output tables
//! - serialized into the batch manifest

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Granularity of a date column, ordered from finest to coarsest.
///
/// The single-character codes are the ones used as the suffix of the date
/// column header (`T_<name>_<code>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    #[serde(rename = "h")]
    Hourly,
    #[serde(rename = "d")]
    Daily,
    #[serde(rename = "M")]
    Monthly,
    #[serde(rename = "Y")]
    Yearly,
}

impl Periodicity {
    /// All periodicities, finest first. This is also the column order of the output tables.
    pub const ALL: [Periodicity; 4] = [
        Periodicity::Hourly,
        Periodicity::Daily,
        Periodicity::Monthly,
        Periodicity::Yearly,
    ];

    pub fn code(self) -> char {
        match self {
            Periodicity::Hourly => 'h',
            Periodicity::Daily => 'd',
            Periodicity::Monthly => 'M',
            Periodicity::Yearly => 'Y',
        }
    }

    /// Parse a header code. Codes are case-sensitive: `M` is month, `m` is nothing.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "h" => Some(Periodicity::Hourly),
            "d" => Some(Periodicity::Daily),
            "M" => Some(Periodicity::Monthly),
            "Y" => Some(Periodicity::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A calendar point at hour resolution.
///
/// Minutes and below are dropped when a timestamp is built from parsed input,
/// so two readings within the same hour share a `Timestamp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
}

impl Timestamp {
    /// Build a timestamp, rejecting dates that do not exist and hours outside `0..24`.
    pub fn new(year: i32, month: u32, day: u32, hour: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?;
        if hour >= 24 {
            return None;
        }
        Some(Self {
            year,
            month,
            day,
            hour,
        })
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
        }
    }

    /// Reset every field finer than `periodicity` to its start value.
    ///
    /// Daily zeroes the hour, monthly also sets the day to 1, yearly also sets
    /// the month to 1. Hourly is the identity.
    pub fn truncate_to(self, periodicity: Periodicity) -> Self {
        match periodicity {
            Periodicity::Hourly => self,
            Periodicity::Daily => Self { hour: 0, ..self },
            Periodicity::Monthly => Self {
                day: 1,
                hour: 0,
                ..self
            },
            Periodicity::Yearly => Self {
                month: 1,
                day: 1,
                hour: 0,
                ..self
            },
        }
    }

    /// Canonical text at the given resolution:
    /// `YYYY-MM-DDTHH`, `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
    pub fn render(self, periodicity: Periodicity) -> String {
        match periodicity {
            Periodicity::Hourly => format!(
                "{:04}-{:02}-{:02}T{:02}",
                self.year, self.month, self.day, self.hour
            ),
            Periodicity::Daily => format!("{:04}-{:02}-{:02}", self.year, self.month, self.day),
            Periodicity::Monthly => format!("{:04}-{:02}", self.year, self.month),
            Periodicity::Yearly => format!("{:04}", self.year),
        }
    }
}

/// Label used in output headers when a column carries no unit suffix.
pub const NO_UNIT_LABEL: &str = "_";

/// A `TAG_` column after normalisation: values are two-decimal strings.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedColumn {
    /// Full input header, e.g. `TAG_pump_power`.
    pub header: String,
    /// Header without the `TAG_` prefix, used in the output file name.
    pub tag: String,
    /// Unit sniffed from the cell values (e.g. `kWh`), if any.
    pub unit: Option<String>,
    pub values: Vec<String>,
}

impl TaggedColumn {
    pub fn unit_label(&self) -> &str {
        self.unit.as_deref().unwrap_or(NO_UNIT_LABEL)
    }

    /// `h_date, h_<unit>, d_date, d_<unit>, M_date, M_<unit>, Y_date, Y_<unit>`.
    pub fn output_headers(&self) -> Vec<String> {
        let unit = self.unit_label();
        Periodicity::ALL
            .iter()
            .flat_map(|p| [format!("{p}_date"), format!("{p}_{unit}")])
            .collect()
    }

    /// `<row_count, zero-padded to 6>__<tag>.csv`.
    pub fn output_file_name(&self, row_count: usize) -> String {
        format!("{row_count:06}__{}.csv", self.tag)
    }
}

/// Resolved settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Abort the batch on the first failing file instead of logging and continuing.
    pub fail_fast: bool,
    /// Load and roughen everything, but write no output tables.
    pub dry_run: bool,
    pub manifest: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Timestamp::new(y, m, d, h).unwrap()
    }

    #[test]
    fn periodicity_codes_are_case_sensitive() {
        assert_eq!(Periodicity::from_code("M"), Some(Periodicity::Monthly));
        assert_eq!(Periodicity::from_code("m"), None);
        assert_eq!(Periodicity::from_code("Y"), Some(Periodicity::Yearly));
        assert_eq!(Periodicity::from_code("y"), None);
        for p in Periodicity::ALL {
            assert_eq!(Periodicity::from_code(&p.code().to_string()), Some(p));
        }
    }

    #[test]
    fn periodicity_orders_fine_to_coarse() {
        assert!(Periodicity::Hourly < Periodicity::Daily);
        assert!(Periodicity::Monthly < Periodicity::Yearly);
        assert_eq!(Periodicity::ALL.iter().max(), Some(&Periodicity::Yearly));
    }

    #[test]
    fn timestamp_rejects_impossible_dates() {
        assert!(Timestamp::new(2021, 2, 29, 0).is_none());
        assert!(Timestamp::new(2020, 2, 29, 0).is_some());
        assert!(Timestamp::new(2021, 1, 1, 24).is_none());
    }

    #[test]
    fn truncation_resets_finer_fields() {
        let t = ts(2021, 7, 15, 13);
        assert_eq!(t.truncate_to(Periodicity::Hourly), t);
        assert_eq!(t.truncate_to(Periodicity::Daily), ts(2021, 7, 15, 0));
        assert_eq!(t.truncate_to(Periodicity::Monthly), ts(2021, 7, 1, 0));
        assert_eq!(t.truncate_to(Periodicity::Yearly), ts(2021, 1, 1, 0));
    }

    #[test]
    fn render_uses_own_resolution() {
        let t = ts(2021, 3, 4, 5);
        assert_eq!(t.render(Periodicity::Hourly), "2021-03-04T05");
        assert_eq!(t.render(Periodicity::Daily), "2021-03-04");
        assert_eq!(t.render(Periodicity::Monthly), "2021-03");
        assert_eq!(t.render(Periodicity::Yearly), "2021");
    }

    #[test]
    fn output_headers_use_unit_or_placeholder() {
        let mut col = TaggedColumn {
            header: "TAG_power".to_string(),
            tag: "power".to_string(),
            unit: Some("kWh".to_string()),
            values: vec![],
        };
        assert_eq!(
            col.output_headers(),
            vec!["h_date", "h_kWh", "d_date", "d_kWh", "M_date", "M_kWh", "Y_date", "Y_kWh"]
        );
        col.unit = None;
        assert_eq!(col.output_headers()[1], "h__");
        assert_eq!(col.output_file_name(42), "000042__power.csv");
    }
}
