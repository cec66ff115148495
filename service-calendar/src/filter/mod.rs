//! Hour-of-day filtering of stop times.
//!
//! Selects the stop times whose arrival is strictly after the window's start
//! hour and whose departure is strictly before its end hour. There is no
//! inclusive variant.

mod config;

pub use config::HourWindow;

use crate::feed::{TimedStopTime, TimedStopTimes};

/// Keep the stop times that fall strictly inside `window`.
///
/// Rows with a missing arrival or departure duration never satisfy a strict
/// bound and are dropped. Input order is preserved.
///
/// # Examples
///
/// ```
/// use service_calendar::feed::{StopTime, TimedStopTimes};
/// use service_calendar::filter::{HourWindow, filter_by_hour};
///
/// let timed = TimedStopTimes::parse(&[
///     StopTime::new("T1", "S1", 1, Some("08:00:00"), Some("08:05:00")),
/// ]);
///
/// // 08:00:00 is not strictly after 8
/// assert!(filter_by_hour(&timed, &HourWindow::new(8, 10)).is_empty());
/// assert_eq!(filter_by_hour(&timed, &HourWindow::new(7, 10)).len(), 1);
/// ```
pub fn filter_by_hour<'a>(
    stop_times: &'a TimedStopTimes,
    window: &HourWindow,
) -> Vec<&'a TimedStopTime> {
    let start = window.start_secs();
    let end = window.end_secs();

    stop_times
        .iter()
        .filter(|st| {
            match (st.arrival_time_hms, st.departure_time_hms) {
                (Some(arrival), Some(departure)) => {
                    u64::from(arrival.as_secs()) > start && u64::from(departure.as_secs()) < end
                }
                _ => false,
            }
        })
        .collect()
}
