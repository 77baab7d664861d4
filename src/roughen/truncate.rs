//! Truncation + first-wins deduplication.
//!
//! Every coarsening step (hour→day, day→month, month→year) is the same two
//! moves: truncate each timestamp to the target periodicity, then keep one row
//! per truncated key. The row kept is the first one seen; later rows with the
//! same key are dropped, never averaged or summed.

use std::collections::HashSet;

use crate::domain::{Periodicity, Timestamp};

/// A deduplicated series at one periodicity, before rendering and padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Coarsened {
    pub dates: Vec<Timestamp>,
    pub values: Vec<String>,
}

impl Coarsened {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Keep the first `(key, value)` pair for every distinct key, in order of first appearance.
pub fn dedup_first<'a, I>(pairs: I) -> Coarsened
where
    I: IntoIterator<Item = (Timestamp, &'a str)>,
{
    let mut seen = HashSet::new();
    let mut out = Coarsened::default();
    for (key, value) in pairs {
        if seen.insert(key) {
            out.dates.push(key);
            out.values.push(value.to_string());
        }
    }
    out
}

/// Truncate `dates` to `target` and collapse duplicates, first occurrence wins.
pub fn coarsen(dates: &[Timestamp], values: &[String], target: Periodicity) -> Coarsened {
    dedup_first(
        dates
            .iter()
            .zip(values)
            .map(|(d, v)| (d.truncate_to(target), v.as_str())),
    )
}
