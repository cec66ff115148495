//! Date-specific corrections to the expanded calendar.

use std::collections::BTreeSet;

use tracing::debug;

use super::entry::{CalendarException, DateServiceRow, ExceptionType};

/// Apply calendar exceptions to a base relation.
///
/// Two ordered passes: every `Added` pair is unioned in, then every `Removed`
/// pair is taken out. Because removals run last, a removal wins over any
/// addition of the identical pair, whether that addition came from the
/// weekly calendar or from another exception. Set semantics mean repeated
/// exceptions and additions of rows already present never duplicate a row.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
/// use chrono::NaiveDate;
/// use service_calendar::calendar::{
///     CalendarException, DateServiceRow, ExceptionType, apply_exceptions,
/// };
/// use service_calendar::domain::ServiceId;
///
/// let day = NaiveDate::from_ymd_opt(2020, 1, 20).unwrap();
/// let svc = ServiceId::new("svcB".to_string()).unwrap();
/// let exceptions = vec![
///     CalendarException::new(svc.clone(), day, ExceptionType::Added),
/// ];
///
/// let rows = apply_exceptions(BTreeSet::new(), &exceptions);
/// assert!(rows.contains(&DateServiceRow::new(day, svc)));
/// ```
pub fn apply_exceptions(
    base: BTreeSet<DateServiceRow>,
    exceptions: &[CalendarException],
) -> BTreeSet<DateServiceRow> {
    let mut rows = base;
    let base_len = rows.len();

    let mut inserted = 0usize;
    for exc in of_type(exceptions, ExceptionType::Added) {
        if rows.insert(exc.row()) {
            inserted += 1;
        }
    }

    let mut removed = 0usize;
    for exc in of_type(exceptions, ExceptionType::Removed) {
        if rows.remove(&exc.row()) {
            removed += 1;
        }
    }

    debug!(
        base = base_len,
        exceptions = exceptions.len(),
        inserted,
        removed,
        rows = rows.len(),
        "applied calendar exceptions"
    );

    rows
}

fn of_type(
    exceptions: &[CalendarException],
    kind: ExceptionType,
) -> impl Iterator<Item = &CalendarException> {
    exceptions.iter().filter(move |e| e.exception_type == kind)
}
