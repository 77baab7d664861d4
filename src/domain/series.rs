//! Series in and out of the roughening engine.

use crate::domain::{Periodicity, Timestamp};
use crate::error::AppError;

/// Marker written into padding cells.
pub const EMPTY_CELL: &str = "";

/// Ordered `(timestamp, value)` pairs sharing one periodicity.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    periodicity: Periodicity,
    dates: Vec<Timestamp>,
    values: Vec<String>,
}

impl Series {
    pub fn new(periodicity: Periodicity, dates: Vec<Timestamp>, values: Vec<String>) -> Result<Self, AppError> {
        if dates.len() != values.len() {
            return Err(AppError::input(format!(
                "Series length mismatch: {} dates vs {} values.",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self {
            periodicity,
            dates,
            values,
        })
    }

    /// Derive all four periodicity slots from this series.
    pub fn roughen(&self) -> RoughenedBundle {
        crate::roughen::roughen(self.periodicity, &self.dates, &self.values)
    }
}

/// One periodicity's column pair in the output table.
///
/// `dates` and `values` always have the bundle's row count; rows past
/// `filled` are padding (`EMPTY_CELL`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub periodicity: Periodicity,
    pub dates: Vec<String>,
    pub values: Vec<String>,
    pub filled: usize,
}

impl Slot {
    /// A slot with no data: every row is padding.
    pub fn empty(periodicity: Periodicity, rows: usize) -> Self {
        Self {
            periodicity,
            dates: vec![EMPTY_CELL.to_string(); rows],
            values: vec![EMPTY_CELL.to_string(); rows],
            filled: 0,
        }
    }

    /// Render `dates` at the slot's resolution and right-pad both columns to `rows`.
    pub fn padded(periodicity: Periodicity, dates: &[Timestamp], values: &[String], rows: usize) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        debug_assert!(dates.len() <= rows);

        let filled = dates.len();
        let mut rendered: Vec<String> = dates.iter().map(|d| d.render(periodicity)).collect();
        let mut values = values.to_vec();
        rendered.resize(rows.max(filled), EMPTY_CELL.to_string());
        values.resize(rows.max(filled), EMPTY_CELL.to_string());

        Self {
            periodicity,
            dates: rendered,
            values,
            filled,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// The rows that carry data, as `(date, value)` pairs.
    pub fn filled_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dates
            .iter()
            .zip(&self.values)
            .take(self.filled)
            .map(|(d, v)| (d.as_str(), v.as_str()))
    }
}

/// The four slots derived from one source series, all with the same row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoughenedBundle {
    pub hourly: Slot,
    pub daily: Slot,
    pub monthly: Slot,
    pub yearly: Slot,
}

impl RoughenedBundle {
    pub fn slot(&self, periodicity: Periodicity) -> &Slot {
        match periodicity {
            Periodicity::Hourly => &self.hourly,
            Periodicity::Daily => &self.daily,
            Periodicity::Monthly => &self.monthly,
            Periodicity::Yearly => &self.yearly,
        }
    }

    pub fn row_count(&self) -> usize {
        self.hourly.dates.len()
    }

    /// Output rows: `[h_date, h_val, d_date, d_val, M_date, M_val, Y_date, Y_val]`.
    pub fn rows(&self) -> impl Iterator<Item = [&str; 8]> + '_ {
        (0..self.row_count()).map(move |i| {
            [
                self.hourly.dates[i].as_str(),
                self.hourly.values[i].as_str(),
                self.daily.dates[i].as_str(),
                self.daily.values[i].as_str(),
                self.monthly.dates[i].as_str(),
                self.monthly.values[i].as_str(),
                self.yearly.dates[i].as_str(),
                self.yearly.values[i].as_str(),
            ]
        })
    }

    /// Flatten into `(dates_h, values_h, dates_d, values_d, dates_M, values_M, dates_Y, values_Y)`.
    #[allow(clippy::type_complexity)]
    pub fn into_columns(
        self,
    ) -> (
        Vec<String>,
        Vec<String>,
        Vec<String>,
        Vec<String>,
        Vec<String>,
        Vec<String>,
        Vec<String>,
        Vec<String>,
    ) {
        (
            self.hourly.dates,
            self.hourly.values,
            self.daily.dates,
            self.daily.values,
            self.monthly.dates,
            self.monthly.values,
            self.yearly.dates,
            self.yearly.values,
        )
    }
}
