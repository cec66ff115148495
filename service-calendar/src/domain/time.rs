//! Service-day time handling.
//!
//! Feeds provide times of day as "HH:MM:SS" strings measured from midnight of
//! the service day. Trips that run past midnight keep counting upwards, so
//! "25:10:00" is ten past one on the morning *after* the service day. This
//! module keeps those values as plain second counts and never wraps them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seconds in one day.
pub const SECONDS_PER_DAY: u32 = 24 * 60 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day as seconds since midnight of the service day.
///
/// Unlike a wall-clock time this may exceed 24 hours.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::ServiceTime;
///
/// let t = ServiceTime::parse_hms("05:30:00").unwrap();
/// assert_eq!(t.as_secs(), 19800);
///
/// // Post-midnight trips are not wrapped
/// let t = ServiceTime::parse_hms("25:10:00").unwrap();
/// assert_eq!(t.as_secs(), 90600);
/// assert_eq!(t.to_string(), "25:10:00");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceTime(u32);

impl ServiceTime {
    /// Create a time from a raw second count.
    pub fn from_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Create a time from hour, minute and second components.
    ///
    /// Returns `None` if minute or second is out of range, or the total
    /// overflows.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        if minute > 59 || second > 59 {
            return None;
        }
        let secs = hour
            .checked_mul(3600)?
            .checked_add(minute * 60 + second)?;
        Some(Self(secs))
    }

    /// Parse a time from "HH:MM:SS" format.
    ///
    /// The hour field may have one or more digits and may be 24 or greater.
    /// Minutes and seconds must be exactly two digits. Surrounding whitespace
    /// is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_calendar::domain::ServiceTime;
    ///
    /// // Valid times
    /// assert!(ServiceTime::parse_hms("00:00:00").is_ok());
    /// assert!(ServiceTime::parse_hms("7:05:00").is_ok());
    /// assert!(ServiceTime::parse_hms("47:59:59").is_ok());
    ///
    /// // Invalid formats
    /// assert!(ServiceTime::parse_hms("07:05").is_err());
    /// assert!(ServiceTime::parse_hms("07:5:00").is_err());
    /// assert!(ServiceTime::parse_hms("07:60:00").is_err());
    /// ```
    pub fn parse_hms(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TimeError::new("empty time"));
        }

        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected HH:MM:SS format"));
        };

        let hour =
            parse_hours(h.as_bytes()).ok_or_else(|| TimeError::new("invalid hour digits"))?;

        let minute =
            parse_two_digits(m.as_bytes()).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let second = parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if second > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Self::from_hms(hour, minute, second).ok_or_else(|| TimeError::new("time overflow"))
    }

    /// Returns the number of seconds since midnight of the service day.
    pub fn as_secs(&self) -> u32 {
        self.0
    }

    /// Returns the hour component (may be 24 or greater).
    pub fn hour(&self) -> u32 {
        self.0 / 3600
    }

    /// Returns the minute component (0-59).
    pub fn minute(&self) -> u32 {
        (self.0 % 3600) / 60
    }

    /// Returns the second component (0-59).
    pub fn second(&self) -> u32 {
        self.0 % 60
    }

    /// True if this time falls after midnight of the following calendar day.
    pub fn is_past_midnight(&self) -> bool {
        self.0 >= SECONDS_PER_DAY
    }
}

impl FromStr for ServiceTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hms(s)
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// Parse one or more ASCII digits into a u32, rejecting overflow.
fn parse_hours(bytes: &[u8]) -> Option<u32> {
    if bytes.is_empty() {
        return None;
    }
    bytes.iter().try_fold(0u32, |acc, b| {
        let d = (*b as char).to_digit(10)?;
        acc.checked_mul(10)?.checked_add(d)
    })
}

/// Result of parsing a column of optional time strings.
///
/// One entry per input row, in input order. Rows whose text was missing or
/// blank are `None`; rows whose text could not be parsed are also `None` and
/// their indices are listed in [`ParsedTimes::failed_rows`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTimes {
    values: Vec<Option<ServiceTime>>,
    failed_rows: Vec<usize>,
}

impl ParsedTimes {
    /// Parsed values, one per input row.
    pub fn values(&self) -> &[Option<ServiceTime>] {
        &self.values
    }

    /// Indices of rows whose text was present but malformed.
    pub fn failed_rows(&self) -> &[usize] {
        &self.failed_rows
    }

    /// Consumes self and returns the parsed values.
    pub fn into_values(self) -> Vec<Option<ServiceTime>> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parse a column of optional "HH:MM:SS" strings elementwise.
///
/// A malformed row does not abort the column. It yields `None` and is
/// recorded in [`ParsedTimes::failed_rows`], so one bad row in a large feed
/// does not discard the rest.
///
/// # Examples
///
/// ```
/// use service_calendar::domain::parse_time_column;
///
/// let parsed = parse_time_column(&[Some("08:00:00"), None, Some("bogus"), Some("")]);
/// assert_eq!(parsed.len(), 4);
/// assert_eq!(parsed.values()[0].unwrap().as_secs(), 28800);
/// assert!(parsed.values()[1].is_none());
/// assert!(parsed.values()[2].is_none());
/// assert!(parsed.values()[3].is_none());
/// assert_eq!(parsed.failed_rows(), &[2]);
/// ```
pub fn parse_time_column(times: &[Option<&str>]) -> ParsedTimes {
    let mut values = Vec::with_capacity(times.len());
    let mut failed_rows = Vec::new();

    for (idx, time_opt) in times.iter().enumerate() {
        match time_opt.map(str::trim) {
            None | Some("") => values.push(None),
            Some(text) => match ServiceTime::parse_hms(text) {
                Ok(t) => values.push(Some(t)),
                Err(_) => {
                    failed_rows.push(idx);
                    values.push(None);
                }
            },
        }
    }

    ParsedTimes {
        values,
        failed_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_times() {
        assert_eq!(ServiceTime::parse_hms("00:00:00").unwrap().as_secs(), 0);
        assert_eq!(ServiceTime::parse_hms("05:30:00").unwrap().as_secs(), 19800);
        assert_eq!(ServiceTime::parse_hms("23:59:59").unwrap().as_secs(), 86399);
        assert_eq!(ServiceTime::parse_hms("08:00:00").unwrap().as_secs(), 28800);
    }

    #[test]
    fn parse_past_midnight_not_wrapped() {
        let t = ServiceTime::parse_hms("25:10:00").unwrap();
        assert_eq!(t.as_secs(), 90600);
        assert_eq!(t.hour(), 25);
        assert!(t.is_past_midnight());

        let t = ServiceTime::parse_hms("24:00:00").unwrap();
        assert_eq!(t.as_secs(), SECONDS_PER_DAY);
        assert!(t.is_past_midnight());

        assert!(!ServiceTime::parse_hms("23:59:59").unwrap().is_past_midnight());
    }

    #[test]
    fn parse_single_digit_hour() {
        assert_eq!(ServiceTime::parse_hms("7:05:00").unwrap().as_secs(), 25500);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(ServiceTime::parse_hms(" 08:00:00 ").unwrap().as_secs(), 28800);
    }

    #[test]
    fn parse_invalid_format() {
        // Wrong number of fields
        assert!(ServiceTime::parse_hms("08:00").is_err());
        assert!(ServiceTime::parse_hms("08:00:00:00").is_err());
        assert!(ServiceTime::parse_hms("080000").is_err());

        // Wrong field widths
        assert!(ServiceTime::parse_hms("08:0:00").is_err());
        assert!(ServiceTime::parse_hms("08:00:000").is_err());
        assert!(ServiceTime::parse_hms(":00:00").is_err());

        // Non-digit characters
        assert!(ServiceTime::parse_hms("ab:cd:ef").is_err());
        assert!(ServiceTime::parse_hms("-1:00:00").is_err());
        assert!(ServiceTime::parse_hms("08:0a:00").is_err());

        assert!(ServiceTime::parse_hms("").is_err());
        assert!(ServiceTime::parse_hms("   ").is_err());
    }

    #[test]
    fn parse_invalid_values() {
        assert!(ServiceTime::parse_hms("12:60:00").is_err());
        assert!(ServiceTime::parse_hms("12:00:60").is_err());
        // Hours large enough to overflow u32 seconds
        assert!(ServiceTime::parse_hms("9999999999:00:00").is_err());
        assert!(ServiceTime::parse_hms("1193047:00:00").is_err());
    }

    #[test]
    fn from_str_matches_parse() {
        let t: ServiceTime = "06:15:30".parse().unwrap();
        assert_eq!(t, ServiceTime::parse_hms("06:15:30").unwrap());
        assert!("nope".parse::<ServiceTime>().is_err());
    }

    #[test]
    fn display_format() {
        assert_eq!(ServiceTime::from_secs(0).to_string(), "00:00:00");
        assert_eq!(ServiceTime::from_secs(19800).to_string(), "05:30:00");
        assert_eq!(ServiceTime::from_secs(90600).to_string(), "25:10:00");
        assert_eq!(ServiceTime::from_secs(100 * 3600 + 61).to_string(), "100:01:01");
    }

    #[test]
    fn from_hms_validates_components() {
        assert_eq!(ServiceTime::from_hms(1, 2, 3).unwrap().as_secs(), 3723);
        assert!(ServiceTime::from_hms(1, 60, 0).is_none());
        assert!(ServiceTime::from_hms(1, 0, 60).is_none());
        assert!(ServiceTime::from_hms(u32::MAX, 0, 0).is_none());
    }

    #[test]
    fn ordering() {
        let early = ServiceTime::parse_hms("23:00:00").unwrap();
        let late = ServiceTime::parse_hms("24:30:00").unwrap();
        assert!(early < late);
    }

    #[test]
    fn error_display() {
        let err = ServiceTime::parse_hms("12:60:00").unwrap_err();
        assert_eq!(err.to_string(), "invalid time: minute must be 0-59");
    }

    // Column parsing tests

    #[test]
    fn column_preserves_order_and_length() {
        let parsed = parse_time_column(&[Some("10:00:00"), Some("09:00:00"), Some("26:00:00")]);
        let secs: Vec<u32> = parsed.values().iter().map(|t| t.unwrap().as_secs()).collect();
        assert_eq!(secs, vec![36000, 32400, 93600]);
        assert!(parsed.failed_rows().is_empty());
    }

    #[test]
    fn column_missing_is_not_failure() {
        let parsed = parse_time_column(&[None, Some(""), Some("  ")]);
        assert_eq!(parsed.len(), 3);
        assert!(parsed.values().iter().all(|v| v.is_none()));
        assert!(parsed.failed_rows().is_empty());
    }

    #[test]
    fn column_tolerates_bad_rows() {
        let parsed = parse_time_column(&[Some("bad"), Some("08:00:00"), Some("8:61:00")]);
        assert_eq!(parsed.failed_rows(), &[0, 2]);
        assert_eq!(parsed.values()[1], Some(ServiceTime::from_secs(28800)));
    }

    #[test]
    fn column_empty() {
        let parsed = parse_time_column(&[]);
        assert!(parsed.is_empty());
        assert!(parsed.into_values().is_empty());
    }
}
