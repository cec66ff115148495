//! Calendar resolution: expansion followed by the exception overlay.

use std::fmt;

use tracing::{info, warn};

use super::entry::{CalendarEntry, CalendarException};
use super::expand::expand_calendar;
use super::overlay::apply_exceptions;
use super::table::DateServiceTable;

/// Non-fatal conditions noticed while resolving a calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Neither the calendar nor its exceptions yielded any service date.
    NoUsableCalendarData,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observation::NoUsableCalendarData => write!(f, "no usable calendar data"),
        }
    }
}

/// Outcome of resolving a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The resolved table; may be empty.
    pub table: DateServiceTable,
    /// Non-fatal observations, in the order they were made.
    pub observations: Vec<Observation>,
}

/// Resolve which services run on which dates.
///
/// Expands the weekly calendar, then overlays the exceptions (additions
/// first, removals second). The result depends only on the two inputs. An
/// empty result is not an error: it is reported as
/// [`Observation::NoUsableCalendarData`] and logged as a warning.
///
/// # Examples
///
/// ```
/// use service_calendar::calendar::{Observation, resolve_date_services};
///
/// let resolution = resolve_date_services(&[], &[]);
/// assert!(resolution.table.is_empty());
/// assert_eq!(resolution.observations, vec![Observation::NoUsableCalendarData]);
/// ```
pub fn resolve_date_services(
    calendar: &[CalendarEntry],
    exceptions: &[CalendarException],
) -> Resolution {
    let base = expand_calendar(calendar);
    let rows = apply_exceptions(base, exceptions);
    let table = DateServiceTable::from_rows(rows);

    let mut observations = Vec::new();
    match table.date_range() {
        None => {
            warn!(
                calendar = calendar.len(),
                exceptions = exceptions.len(),
                "{}",
                Observation::NoUsableCalendarData
            );
            observations.push(Observation::NoUsableCalendarData);
        }
        Some((first, last)) => {
            info!(
                rows = table.len(),
                services = table.service_ids().count(),
                %first,
                %last,
                "resolved date-service table"
            );
        }
    }

    Resolution {
        table,
        observations,
    }
}
