//! Roughening engine.
//!
//! Given a series at its native periodicity, derive the hourly, daily, monthly
//! and yearly slots of the output table:
//!
//! - the native slot is the input, rendered at its own resolution
//! - slots finer than the native periodicity stay empty
//! - each coarser slot is derived from the next-finer one (see [`truncate`])
//! - every slot is right-padded with empty cells to the input row count
//!
//! The engine is pure: inputs are borrowed and never modified, and the same
//! inputs always produce the same bundle.

pub mod truncate;

use std::cmp::Ordering;

use crate::domain::{Periodicity, RoughenedBundle, Slot, Timestamp};
use crate::roughen::truncate::{Coarsened, coarsen};

/// Derive all four periodicity slots from a native series.
///
/// `dates` and `values` must have the same length.
///
/// Truncating to a coarser periodicity resets every finer field, not just the
/// next one: monthly input dated mid-month (`2021-01-15`, `2021-02-20`) still
/// collapses to a single `2021` yearly row.
pub fn roughen(periodicity: Periodicity, dates: &[Timestamp], values: &[String]) -> RoughenedBundle {
    debug_assert_eq!(dates.len(), values.len(), "roughen expects one value per date");

    let rows = dates.len();
    let mut slots = Periodicity::ALL.map(|p| Slot::empty(p, rows));

    // The finest series known so far, once we are past the native slot.
    let mut derived: Option<Coarsened> = None;

    for (slot, target) in slots.iter_mut().zip(Periodicity::ALL) {
        match target.cmp(&periodicity) {
            Ordering::Less => {}
            Ordering::Equal => *slot = Slot::padded(target, dates, values, rows),
            Ordering::Greater => {
                let next = match &derived {
                    Some(finer) => coarsen(&finer.dates, &finer.values, target),
                    None => coarsen(dates, values, target),
                };
                *slot = Slot::padded(target, &next.dates, &next.values, rows);
                derived = Some(next);
            }
        }
    }

    let [hourly, daily, monthly, yearly] = slots;
    RoughenedBundle {
        hourly,
        daily,
        monthly,
        yearly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32) -> Timestamp {
        Timestamp::new(y, m, d, h).unwrap()
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn hourly_fixture() -> (Vec<Timestamp>, Vec<String>) {
        let dates = vec![
            ts(2020, 12, 31, 22),
            ts(2020, 12, 31, 23),
            ts(2021, 1, 1, 0),
            ts(2021, 1, 1, 5),
            ts(2021, 1, 2, 0),
            ts(2021, 2, 1, 7),
        ];
        let values = strings(&["1.00", "2.00", "3.00", "4.00", "5.00", "6.00"]);
        (dates, values)
    }

    #[test]
    fn daily_input_end_to_end() {
        let dates = vec![ts(2021, 1, 1, 0), ts(2021, 1, 2, 0), ts(2021, 2, 1, 0)];
        let values = strings(&["1.00", "2.00", "3.00"]);

        let (dh, vh, dd, vd, dm, vm, dy, vy) = roughen(Periodicity::Daily, &dates, &values).into_columns();

        assert_eq!(dh, vec!["", "", ""]);
        assert_eq!(vh, vec!["", "", ""]);
        assert_eq!(dd, vec!["2021-01-01", "2021-01-02", "2021-02-01"]);
        assert_eq!(vd, vec!["1.00", "2.00", "3.00"]);
        assert_eq!(dm, vec!["2021-01", "2021-02", ""]);
        assert_eq!(vm, vec!["1.00", "3.00", ""]);
        assert_eq!(dy, vec!["2021", "", ""]);
        assert_eq!(vy, vec!["1.00", "", ""]);
    }

    #[test]
    fn first_wins_hour_to_day() {
        let dates = vec![ts(2021, 1, 1, 0), ts(2021, 1, 1, 5)];
        let bundle = roughen(Periodicity::Hourly, &dates, &strings(&["1", "2"]));
        assert_eq!(
            bundle.daily.filled_pairs().collect::<Vec<_>>(),
            vec![("2021-01-01", "1")]
        );
        assert_eq!(bundle.daily.dates.len(), 2);
    }

    #[test]
    fn every_slot_has_input_row_count() {
        let (dates, values) = hourly_fixture();
        for p in Periodicity::ALL {
            let bundle = roughen(p, &dates, &values);
            for slot_p in Periodicity::ALL {
                let slot = bundle.slot(slot_p);
                assert_eq!(slot.dates.len(), dates.len(), "{p} -> {slot_p}");
                assert_eq!(slot.values.len(), dates.len(), "{p} -> {slot_p}");
            }
            assert_eq!(bundle.rows().count(), dates.len());
        }
    }

    #[test]
    fn native_slot_is_passed_through() {
        let (dates, values) = hourly_fixture();
        for p in Periodicity::ALL {
            let bundle = roughen(p, &dates, &values);
            let native = bundle.slot(p);
            let expected: Vec<String> = dates.iter().map(|d| d.render(p)).collect();
            assert_eq!(native.dates, expected);
            assert_eq!(native.values, values);
            assert_eq!(native.filled, dates.len());
        }
    }

    #[test]
    fn coarser_slots_never_grow() {
        let (dates, values) = hourly_fixture();
        let bundle = roughen(Periodicity::Hourly, &dates, &values);
        assert_eq!(bundle.hourly.filled, 6);
        assert_eq!(bundle.daily.filled, 4);
        assert_eq!(bundle.monthly.filled, 3);
        assert_eq!(bundle.yearly.filled, 2);

        for pair in Periodicity::ALL.windows(2) {
            assert!(bundle.slot(pair[1]).filled <= bundle.slot(pair[0]).filled);
        }
    }

    #[test]
    fn hourly_chain_keeps_first_values() {
        let (dates, values) = hourly_fixture();
        let bundle = roughen(Periodicity::Hourly, &dates, &values);
        assert_eq!(
            bundle.daily.filled_pairs().collect::<Vec<_>>(),
            vec![
                ("2020-12-31", "1.00"),
                ("2021-01-01", "3.00"),
                ("2021-01-02", "5.00"),
                ("2021-02-01", "6.00"),
            ]
        );
        assert_eq!(
            bundle.monthly.filled_pairs().collect::<Vec<_>>(),
            vec![("2020-12", "1.00"), ("2021-01", "3.00"), ("2021-02", "6.00")]
        );
        assert_eq!(
            bundle.yearly.filled_pairs().collect::<Vec<_>>(),
            vec![("2020", "1.00"), ("2021", "3.00")]
        );
    }

    #[test]
    fn yearly_input_leaves_finer_slots_empty() {
        let dates = vec![ts(2019, 1, 1, 0), ts(2020, 1, 1, 0)];
        let bundle = roughen(Periodicity::Yearly, &dates, &strings(&["1.00", "2.00"]));
        assert!(bundle.hourly.is_empty());
        assert!(bundle.daily.is_empty());
        assert!(bundle.monthly.is_empty());
        assert_eq!(bundle.yearly.dates, vec!["2019", "2020"]);
    }

    #[test]
    fn native_duplicates_are_not_collapsed() {
        let dates = vec![ts(2021, 5, 1, 0), ts(2021, 5, 1, 0)];
        let bundle = roughen(Periodicity::Monthly, &dates, &strings(&["1.00", "2.00"]));
        assert_eq!(bundle.monthly.dates, vec!["2021-05", "2021-05"]);
        assert_eq!(bundle.yearly.dates, vec!["2021", ""]);
    }

    #[test]
    fn monthly_input_with_day_offsets_collapses_per_year() {
        let dates = vec![ts(2021, 1, 15, 0), ts(2021, 2, 20, 0)];
        let bundle = roughen(Periodicity::Monthly, &dates, &strings(&["1.00", "2.00"]));
        assert_eq!(bundle.yearly.filled_pairs().collect::<Vec<_>>(), vec![("2021", "1.00")]);
    }

    #[test]
    fn empty_input_gives_empty_bundle() {
        let bundle = roughen(Periodicity::Daily, &[], &[]);
        assert_eq!(bundle.row_count(), 0);
        assert_eq!(bundle.rows().count(), 0);
    }

    #[test]
    fn roughen_is_idempotent() {
        let (dates, values) = hourly_fixture();
        let first = roughen(Periodicity::Hourly, &dates, &values);
        let second = roughen(Periodicity::Hourly, &dates, &values);
        assert_eq!(first, second);
    }
}
