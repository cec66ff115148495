//! Calendar input and output rows.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::ServiceId;

/// The seven weekdays in calendar column order (monday first).
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A recurring weekly schedule with a validity date range.
///
/// Both bounds are inclusive. A bound may be missing in poorly formed feeds;
/// an entry without both bounds never matches any date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub service_id: ServiceId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub monday: bool,
    pub tuesday: bool,
    pub wednesday: bool,
    pub thursday: bool,
    pub friday: bool,
    pub saturday: bool,
    pub sunday: bool,
}

impl CalendarEntry {
    /// Create an entry running on the given weekdays between two dates.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{NaiveDate, Weekday};
    /// use service_calendar::calendar::CalendarEntry;
    /// use service_calendar::domain::ServiceId;
    ///
    /// let entry = CalendarEntry::new(
    ///     ServiceId::new("WKND".to_string()).unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 1, 1),
    ///     NaiveDate::from_ymd_opt(2020, 12, 31),
    ///     &[Weekday::Sat, Weekday::Sun],
    /// );
    /// assert!(entry.runs_on(Weekday::Sat));
    /// assert!(!entry.runs_on(Weekday::Mon));
    /// ```
    pub fn new(
        service_id: ServiceId,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        weekdays: &[Weekday],
    ) -> Self {
        let has = |day: Weekday| weekdays.contains(&day);
        Self {
            service_id,
            start_date,
            end_date,
            monday: has(Weekday::Mon),
            tuesday: has(Weekday::Tue),
            wednesday: has(Weekday::Wed),
            thursday: has(Weekday::Thu),
            friday: has(Weekday::Fri),
            saturday: has(Weekday::Sat),
            sunday: has(Weekday::Sun),
        }
    }

    /// Returns the flag for a weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    /// Weekdays whose flag is set, monday first.
    pub fn active_weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.into_iter().filter(|day| self.runs_on(*day))
    }

    /// True if `date` lies within `[start_date, end_date]`.
    ///
    /// Always false when either bound is missing.
    pub fn covers(&self, date: NaiveDate) -> bool {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        }
    }

    /// True if the recurring schedule implies service on `date`.
    pub fn implies(&self, date: NaiveDate) -> bool {
        self.covers(date) && self.runs_on(date.weekday())
    }
}

/// Whether a calendar exception adds or removes service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ExceptionType {
    /// Service runs on the date (feed code 1).
    Added,
    /// Service does not run on the date (feed code 2).
    Removed,
}

/// Error returned for an exception type code other than 1 or 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid exception type {0}: expected 1 (added) or 2 (removed)")]
pub struct InvalidExceptionType(pub u8);

impl TryFrom<u8> for ExceptionType {
    type Error = InvalidExceptionType;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(ExceptionType::Added),
            2 => Ok(ExceptionType::Removed),
            other => Err(InvalidExceptionType(other)),
        }
    }
}

impl From<ExceptionType> for u8 {
    fn from(kind: ExceptionType) -> Self {
        match kind {
            ExceptionType::Added => 1,
            ExceptionType::Removed => 2,
        }
    }
}

/// A single-date override of the recurring schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CalendarException {
    pub service_id: ServiceId,
    pub date: NaiveDate,
    pub exception_type: ExceptionType,
}

impl CalendarException {
    pub fn new(service_id: ServiceId, date: NaiveDate, exception_type: ExceptionType) -> Self {
        Self {
            service_id,
            date,
            exception_type,
        }
    }

    /// The (date, service) pair this exception targets.
    pub fn row(&self) -> DateServiceRow {
        DateServiceRow::new(self.date, self.service_id.clone())
    }
}

/// "This service operates on this date."
///
/// Ordered by date, then service id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateServiceRow {
    pub date: NaiveDate,
    pub service_id: ServiceId,
}

impl DateServiceRow {
    pub fn new(date: NaiveDate, service_id: ServiceId) -> Self {
        Self { date, service_id }
    }
}
