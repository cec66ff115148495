//! Loading a feed from a directory of text files.
//!
//! Only the files calendar resolution and time parsing need are read:
//! `calendar.txt`, `calendar_dates.txt`, `stop_times.txt` and
//! `frequencies.txt`. Everything else in the directory is ignored.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::{Feed, Frequency, StopTime};
use crate::calendar::{CalendarEntry, CalendarException, ExceptionType};
use crate::domain::ServiceId;

const CALENDAR: &str = "calendar.txt";
const CALENDAR_DATES: &str = "calendar_dates.txt";
const STOP_TIMES: &str = "stop_times.txt";
const FREQUENCIES: &str = "frequencies.txt";

/// Errors that can occur while loading a feed directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File is not well-formed CSV, or a field has the wrong type
    #[error("CSV error in {file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    /// Row parsed as CSV but holds an invalid value
    #[error("{file} line {line}: {reason}")]
    InvalidRow {
        file: &'static str,
        line: u64,
        reason: String,
    },

    /// Neither calendar file exists
    #[error("feed directory {} has neither calendar.txt nor calendar_dates.txt", .0.display())]
    MissingCalendar(PathBuf),
}

/// Configuration for loading a feed directory.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// Directory holding the feed's text files.
    pub dir: PathBuf,
    /// Trim whitespace around every field.
    pub trim: bool,
}

impl LoadConfig {
    /// Create a config for the given directory with field trimming enabled.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            trim: true,
        }
    }

    /// Enable or disable field trimming.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

#[derive(Debug, Deserialize)]
struct CalendarRecord {
    service_id: String,
    monday: u8,
    tuesday: u8,
    wednesday: u8,
    thursday: u8,
    friday: u8,
    saturday: u8,
    sunday: u8,
    start_date: Option<String>,
    end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CalendarDateRecord {
    service_id: String,
    date: String,
    exception_type: u8,
}

/// Load the calendar-related relations of a feed directory.
///
/// `calendar.txt` and `calendar_dates.txt` are each optional but at least one
/// must exist. `stop_times.txt` and `frequencies.txt` are optional.
pub fn load_feed(config: &LoadConfig) -> Result<Feed, LoadError> {
    let calendar = read_rows::<CalendarRecord>(config, CALENDAR)?;
    let calendar_dates = read_rows::<CalendarDateRecord>(config, CALENDAR_DATES)?;

    if calendar.is_none() && calendar_dates.is_none() {
        return Err(LoadError::MissingCalendar(config.dir.clone()));
    }

    let calendar = calendar
        .unwrap_or_default()
        .into_iter()
        .map(|(line, rec)| calendar_entry(line, rec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut feed = Feed::new(calendar);

    if let Some(rows) = calendar_dates {
        let exceptions = rows
            .into_iter()
            .map(|(line, rec)| calendar_exception(line, rec))
            .collect::<Result<Vec<_>, _>>()?;
        feed = feed.with_calendar_dates(exceptions);
    }

    if let Some(rows) = read_rows::<StopTime>(config, STOP_TIMES)? {
        feed = feed.with_stop_times(rows.into_iter().map(|(_, st)| st).collect());
    }

    if let Some(rows) = read_rows::<Frequency>(config, FREQUENCIES)? {
        feed = feed.with_frequencies(rows.into_iter().map(|(_, f)| f).collect());
    }

    info!(
        dir = %config.dir.display(),
        calendar = feed.calendar().len(),
        calendar_dates = feed.calendar_dates().map_or(0, |c| c.len()),
        stop_times = feed.stop_times().len(),
        frequencies = feed.frequencies().map_or(0, |f| f.len()),
        "loaded feed"
    );

    Ok(feed)
}

/// Read every row of a file, with its line number.
///
/// Returns `Ok(None)` if the file does not exist.
fn read_rows<T: DeserializeOwned>(
    config: &LoadConfig,
    file: &'static str,
) -> Result<Option<Vec<(u64, T)>>, LoadError> {
    let path = config.dir.join(file);
    let handle = match File::open(&path) {
        Ok(handle) => handle,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file, "feed file not present");
            return Ok(None);
        }
        Err(source) => return Err(LoadError::Io { path, source }),
    };

    let trim = if config.trim {
        csv::Trim::All
    } else {
        csv::Trim::None
    };
    let mut rdr = csv::ReaderBuilder::new().trim(trim).from_reader(handle);
    let csv_err = |source: csv::Error| LoadError::Csv { file, source };

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let mut record = csv::StringRecord::new();
    let mut rows = Vec::new();

    while rdr.read_record(&mut record).map_err(csv_err)? {
        let line = record.position().map_or(0, |p| p.line());
        let row: T = record.deserialize(Some(&headers)).map_err(csv_err)?;
        rows.push((line, row));
    }

    debug!(file, rows = rows.len(), "read feed file");
    Ok(Some(rows))
}

fn calendar_entry(line: u64, rec: CalendarRecord) -> Result<CalendarEntry, LoadError> {
    let invalid = |reason: String| LoadError::InvalidRow {
        file: CALENDAR,
        line,
        reason,
    };
    let flag = |name: &str, value: u8| match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(invalid(format!("{name} must be 0 or 1, got {other}"))),
    };

    Ok(CalendarEntry {
        service_id: ServiceId::new(rec.service_id).map_err(|e| invalid(e.to_string()))?,
        start_date: optional_date(rec.start_date.as_deref()).map_err(invalid)?,
        end_date: optional_date(rec.end_date.as_deref()).map_err(invalid)?,
        monday: flag("monday", rec.monday)?,
        tuesday: flag("tuesday", rec.tuesday)?,
        wednesday: flag("wednesday", rec.wednesday)?,
        thursday: flag("thursday", rec.thursday)?,
        friday: flag("friday", rec.friday)?,
        saturday: flag("saturday", rec.saturday)?,
        sunday: flag("sunday", rec.sunday)?,
    })
}

fn calendar_exception(line: u64, rec: CalendarDateRecord) -> Result<CalendarException, LoadError> {
    let invalid = |reason: String| LoadError::InvalidRow {
        file: CALENDAR_DATES,
        line,
        reason,
    };

    let service_id = ServiceId::new(rec.service_id).map_err(|e| invalid(e.to_string()))?;
    let date = parse_date(&rec.date).map_err(invalid)?;
    let exception_type =
        ExceptionType::try_from(rec.exception_type).map_err(|e| invalid(e.to_string()))?;

    Ok(CalendarException::new(service_id, date, exception_type))
}

/// Parse a `YYYYMMDD` date.
fn parse_date(s: &str) -> Result<NaiveDate, String> {
    let s = s.trim();
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid date {s:?}: expected YYYYMMDD"));
    }
    NaiveDate::parse_from_str(s, "%Y%m%d").map_err(|e| format!("invalid date {s:?}: {e}"))
}

/// Parse a `YYYYMMDD` date where an empty field means undefined.
fn optional_date(s: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_date(text).map(Some),
    }
}
