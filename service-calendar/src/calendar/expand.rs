//! Expansion of weekly calendar entries into concrete service dates.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use super::entry::{CalendarEntry, DateServiceRow};

/// The global date span covered by a calendar.
///
/// Returns `[min(start_date), max(end_date)]` over the bounds that are
/// defined, or `None` if either side has no defined bound or the span is
/// inverted.
pub fn date_span(entries: &[CalendarEntry]) -> Option<(NaiveDate, NaiveDate)> {
    let first = entries.iter().filter_map(|e| e.start_date).min()?;
    let last = entries.iter().filter_map(|e| e.end_date).max()?;
    (first <= last).then_some((first, last))
}

/// Expand calendar entries into the base set of (date, service) rows.
///
/// Every date in the global span is visited once. Entries are grouped by the
/// weekdays they run on, so each date only probes the entries for its own
/// weekday, and a row is emitted when the date also lies within that entry's
/// own range. Entries repeated for the same service collapse into a single
/// row per date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use service_calendar::calendar::{ALL_WEEKDAYS, CalendarEntry, expand_calendar};
/// use service_calendar::domain::ServiceId;
///
/// let entry = CalendarEntry::new(
///     ServiceId::new("svcA".to_string()).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 1, 6),
///     NaiveDate::from_ymd_opt(2020, 1, 12),
///     &ALL_WEEKDAYS,
/// );
/// assert_eq!(expand_calendar(&[entry]).len(), 7);
/// ```
pub fn expand_calendar(entries: &[CalendarEntry]) -> BTreeSet<DateServiceRow> {
    let mut rows = BTreeSet::new();

    let Some((first, last)) = date_span(entries) else {
        debug!(entries = entries.len(), "calendar defines no date span");
        return rows;
    };

    // Index 0 is Monday
    let mut by_weekday: [Vec<&CalendarEntry>; 7] = Default::default();
    for entry in entries {
        for day in entry.active_weekdays() {
            by_weekday[day.num_days_from_monday() as usize].push(entry);
        }
    }

    let mut days = 0usize;
    for date in first.iter_days().take_while(|d| *d <= last) {
        days += 1;
        let candidates = &by_weekday[date.weekday().num_days_from_monday() as usize];
        for entry in candidates {
            if entry.covers(date) {
                rows.insert(DateServiceRow::new(date, entry.service_id.clone()));
            }
        }
    }

    debug!(
        entries = entries.len(),
        days,
        rows = rows.len(),
        %first,
        %last,
        "expanded calendar"
    );

    rows
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::calendar::ALL_WEEKDAYS;
    use crate::domain::ServiceId;
    use proptest::prelude::*;

    prop_compose! {
        fn calendar_entry()(
            id in 0u8..5,
            start_offset in 0i64..60,
            len in 0i64..30,
            flags in prop::array::uniform7(any::<bool>()),
        ) -> CalendarEntry {
            let base = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
            let start = base + chrono::Duration::days(start_offset);
            let end = start + chrono::Duration::days(len);
            let days: Vec<_> = ALL_WEEKDAYS
                .iter()
                .zip(flags)
                .filter(|(_, on)| *on)
                .map(|(d, _)| *d)
                .collect();
            CalendarEntry::new(
                ServiceId::new(format!("S{id}")).unwrap(),
                Some(start),
                Some(end),
                &days,
            )
        }
    }

    proptest! {
        /// Every produced row is implied by some entry
        #[test]
        fn rows_are_implied(cal in prop::collection::vec(calendar_entry(), 0..6)) {
            for row in expand_calendar(&cal) {
                prop_assert!(
                    cal.iter()
                        .any(|e| e.service_id == row.service_id && e.implies(row.date))
                );
            }
        }

        /// Every implied (date, service) pair is produced
        #[test]
        fn implied_pairs_are_present(cal in prop::collection::vec(calendar_entry(), 1..6)) {
            let rows = expand_calendar(&cal);
            for e in &cal {
                let (Some(start), Some(end)) = (e.start_date, e.end_date) else { continue };
                for date in start.iter_days().take_while(|d| *d <= end) {
                    if e.implies(date) {
                        let row = DateServiceRow::new(date, e.service_id.clone());
                        prop_assert!(rows.contains(&row));
                    }
                }
            }
        }

        /// Expansion is a pure function of its input
        #[test]
        fn expansion_is_deterministic(cal in prop::collection::vec(calendar_entry(), 0..6)) {
            prop_assert_eq!(expand_calendar(&cal), expand_calendar(&cal));
        }
    }
}
